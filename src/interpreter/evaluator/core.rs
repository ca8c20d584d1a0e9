use std::{cell::Cell, collections::HashMap, rc::Rc};

use tracing::debug;

use crate::{
    ast::{Expr, ObjectEntry, Statement},
    error::{Error, RuntimeError},
    interpreter::{
        evaluator::{function::registry::Functions, governor::Limits},
        parser::core::parse_script,
        value::{
            context::Context,
            core::Value,
            display::NumberStyle,
            function::{Closure, Function},
        },
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// How a statement finished.
///
/// `Return` travels up through every enclosing block and loop until a
/// function call or the top level of a script unwraps it.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// The statement completed normally with this value.
    Value(Value),
    /// A `return` was executed.
    Return(Value),
}

impl Flow {
    /// The carried value, whichever way the statement finished.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Value(value) | Self::Return(value) => value,
        }
    }
}

/// Walks the AST and computes results.
///
/// An evaluator borrows the host's function registry and owns the resource
/// limits for a run. Variable state lives in the [`Context`] passed to each
/// call, so one evaluator can serve many runs.
///
/// ## Usage
/// ```
/// use brickengine::{Context, Evaluator, Functions, Limits};
///
/// let functions = Functions::with_builtins();
/// let evaluator = Evaluator::new(&functions).with_limits(Limits::default()
///                                                            .with_max_iterations(1_000));
/// let mut ctx = Context::new();
///
/// assert_eq!(evaluator.run_script("let x = 2; x * 21", &mut ctx).unwrap(), "42");
/// assert!(evaluator.run_script("while true { }", &mut ctx).is_err());
/// ```
#[derive(Debug)]
pub struct Evaluator<'f> {
    pub(crate) functions: &'f Functions,
    pub(crate) limits:    Limits,
    pub(crate) depth:     Cell<usize>,
}

impl<'f> Evaluator<'f> {
    /// Creates an evaluator over `functions` with default limits.
    #[must_use]
    pub fn new(functions: &'f Functions) -> Self {
        Self { functions,
               limits: Limits::default(),
               depth: Cell::new(0) }
    }

    /// Replaces the resource limits.
    #[must_use]
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// The limits this evaluator enforces.
    #[must_use]
    pub const fn limits(&self) -> &Limits {
        &self.limits
    }

    /// The native function registry.
    #[must_use]
    pub const fn functions(&self) -> &'f Functions {
        self.functions
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation; it dispatches
    /// on the expression variant.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    /// - `ctx`: Variable bindings, read and written in place.
    ///
    /// # Returns
    /// The value of the expression.
    pub fn eval(&self, expr: &Expr, ctx: &mut Context) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Value::from(value)),
            Expr::Array { elements, .. } => {
                let items = elements.iter()
                                    .map(|element| self.eval(element, ctx))
                                    .collect::<EvalResult<Vec<_>>>()?;
                Ok(Value::from(items))
            },
            Expr::Object { entries, .. } => self.eval_object_literal(entries, ctx),
            Expr::Variable { path, line } => ctx.resolve(path, *line),
            Expr::Binary { left,
                           op,
                           right,
                           line, } => {
                let left = self.eval(left, ctx)?;
                let right = self.eval(right, ctx)?;
                Self::eval_binary(*op, &left, &right, *line)
            },
            Expr::Pipe { preferred,
                         fallback,
                         .. } => self.eval_pipe(preferred, fallback, ctx),
            Expr::Index { target,
                          index,
                          line, } => self.eval_index(target, index, *line, ctx),
            Expr::Call { target,
                         arguments,
                         line, } => self.eval_call(target, arguments, *line, ctx),
        }
    }

    fn eval_object_literal(&self,
                           entries: &[(String, ObjectEntry)],
                           ctx: &mut Context)
                           -> EvalResult<Value> {
        let mut map = HashMap::with_capacity(entries.len());
        for (key, entry) in entries {
            let value = match entry {
                ObjectEntry::Value(expr) => self.eval(expr, ctx)?,
                ObjectEntry::Function(def) => {
                    Value::Function(Function::Closure(Rc::new(Closure::capture(def, ctx))))
                },
            };
            map.insert(key.clone(), value);
        }
        Ok(Value::from(map))
    }

    /// Runs a parsed program.
    ///
    /// The result is the value of the first top-level `return`, or else the
    /// value of the last statement. An empty program yields null.
    pub fn run_program(&self, statements: &[Statement], ctx: &mut Context) -> EvalResult<Value> {
        let mut last = Value::Null;
        for statement in statements {
            match self.exec(statement, ctx)? {
                Flow::Return(value) => return Ok(value),
                Flow::Value(value) => last = value,
            }
        }
        Ok(last)
    }

    /// Parses and runs a script, rendering its result with numbers rounded
    /// to whole digits.
    ///
    /// # Errors
    /// Any parse or runtime error.
    pub fn run_script(&self, source: &str, ctx: &mut Context) -> Result<String, Error> {
        let program = parse_script(source)?;
        debug!(statements = program.len(), "running script");

        let value = self.run_program(&program, ctx)?;
        debug!(result = value.type_name(), "script finished");

        Ok(value.render(NumberStyle::Rounded))
    }
}

/// Evaluates a single expression with default limits.
///
/// # Example
/// ```
/// use brickengine::{
///     Context, Functions, Value, evaluate, interpreter::parser::core::parse_template_expression,
/// };
///
/// let expr = parse_template_expression("missing | 'default'").unwrap();
/// let value = evaluate(&expr, &mut Context::new(), &Functions::new()).unwrap();
///
/// assert_eq!(value, Value::from("default"));
/// ```
pub fn evaluate(expr: &Expr, ctx: &mut Context, functions: &Functions) -> EvalResult<Value> {
    Evaluator::new(functions).eval(expr, ctx)
}
