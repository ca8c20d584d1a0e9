use std::rc::Rc;

use tracing::{trace, warn};

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator, Flow},
        value::{
            context::Context,
            core::Value,
            function::{Closure, Function},
        },
    },
};

impl Evaluator<'_> {
    /// Evaluates a function call.
    ///
    /// A callee written as a plain variable path is first looked up in the
    /// native registry under its dotted name. Otherwise the callee is
    /// evaluated like any expression and must produce a function.
    ///
    /// # Parameters
    /// - `target`: The callee expression.
    /// - `arguments`: Argument expressions, evaluated left to right.
    /// - `line`: Line number for error reporting.
    /// - `ctx`: Variable bindings of the caller.
    ///
    /// # Returns
    /// The function result or an error if lookup, arity or the call fails.
    pub(crate) fn eval_call(&self,
                            target: &Expr,
                            arguments: &[Expr],
                            line: usize,
                            ctx: &mut Context)
                            -> EvalResult<Value> {
        let name = match target {
            Expr::Variable { path, .. } => {
                let name = path.join(".");
                if let Some(native) = self.functions.get(&name) {
                    let native = Rc::clone(native);
                    let args = self.eval_arguments(arguments, ctx)?;
                    return native.call(args, line);
                }
                name
            },
            _ => "<expression>".to_owned(),
        };

        let callee = self.eval(target, ctx)?;
        let function = match callee {
            Value::Function(function) => function,
            Value::Null => return Err(RuntimeError::UnknownFunction { name, line }),
            other => {
                return Err(RuntimeError::NotCallable { name,
                                                       found: other.type_name(),
                                                       line });
            },
        };

        let args = self.eval_arguments(arguments, ctx)?;
        self.call_function(&function, args, line)
    }

    fn eval_arguments(&self, arguments: &[Expr], ctx: &mut Context) -> EvalResult<Vec<Value>> {
        arguments.iter().map(|arg| self.eval(arg, ctx)).collect()
    }

    /// Invokes a function value with already evaluated arguments.
    ///
    /// # Errors
    /// Whatever the native or the closure body reports.
    pub fn call_function(&self, function: &Function, args: Vec<Value>, line: usize) -> EvalResult<Value> {
        match function {
            Function::Native(native) => native.call(args, line),
            Function::Closure(closure) => self.call_closure(closure, args, line),
        }
    }

    /// Executes a closure.
    ///
    /// The body runs in a fresh copy of the captured bindings. The closure is
    /// bound under its own name first so it can recurse, then parameters are
    /// bound positionally: extra arguments are ignored and parameters without
    /// an argument stay unbound. A body that finishes without `return`
    /// yields null.
    fn call_closure(&self, closure: &Rc<Closure>, args: Vec<Value>, line: usize) -> EvalResult<Value> {
        let depth = self.depth.get() + 1;
        if depth > self.limits.max_call_depth {
            warn!(limit = self.limits.max_call_depth, line, "call aborted: call depth exceeded");
            return Err(RuntimeError::CallDepthExceeded { limit: self.limits.max_call_depth,
                                                         line });
        }

        let mut local = Context::from(closure.env.clone());
        if let Some(name) = &closure.name {
            local.insert(name.clone(), Value::Function(Function::Closure(Rc::clone(closure))));
        }
        for (param, arg) in closure.params.iter().zip(args) {
            local.insert(param.clone(), arg);
        }

        trace!(name = closure.name.as_deref().unwrap_or("<anonymous>"), depth, "calling closure");

        self.depth.set(depth);
        let result = self.exec_block(&closure.body, &mut local);
        self.depth.set(depth - 1);

        Ok(match result? {
               Flow::Return(value) => value,
               Flow::Value(_) => Value::Null,
           })
    }
}
