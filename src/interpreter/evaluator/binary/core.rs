use tracing::trace;

use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::{context::Context, core::Value},
    },
};

impl Evaluator<'_> {
    /// Evaluates a binary operation between two values.
    ///
    /// Both operands are coerced to numbers first (numbers and numeric
    /// strings are accepted). Arithmetic is routed to `eval_scalar_op`,
    /// comparisons to `eval_comparison`.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    ///
    /// # Example
    /// ```
    /// use brickengine::{Evaluator, Value, ast::BinaryOperator, error::RuntimeError};
    ///
    /// let result = Evaluator::eval_binary(BinaryOperator::Add,
    ///                                     &Value::from(1024.0),
    ///                                     &Value::from("128"),
    ///                                     1);
    /// assert_eq!(result.unwrap(), Value::Number(1152.0));
    ///
    /// let result = Evaluator::eval_binary(BinaryOperator::Less, &Value::from(3.0), &Value::from(5.0), 1);
    /// assert_eq!(result.unwrap(), Value::Bool(true));
    ///
    /// let err = Evaluator::eval_binary(BinaryOperator::Div, &Value::from(1.0), &Value::from(0.0), 4);
    /// assert!(matches!(err, Err(RuntimeError::DivisionByZero { line: 4 })));
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
        use BinaryOperator::{
            Add, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, NotEqual, Sub,
        };

        let left = left.as_number(line)?;
        let right = right.as_number(line)?;

        match op {
            Add | Sub | Mul | Div => Self::eval_scalar_op(op, left, right, line),
            Equal | NotEqual | Less | Greater | LessEqual | GreaterEqual => {
                Ok(Self::eval_comparison(op, left, right))
            },
        }
    }

    /// Evaluates `preferred | fallback`.
    ///
    /// The fallback runs when the preferred side fails or yields a falsy
    /// value. Errors that abort the run (resource ceilings) are passed on
    /// instead.
    pub(crate) fn eval_pipe(&self,
                            preferred: &Expr,
                            fallback: &Expr,
                            ctx: &mut Context)
                            -> EvalResult<Value> {
        match self.eval(preferred, ctx) {
            Ok(value) if value.is_truthy() => Ok(value),
            Ok(_) => self.eval(fallback, ctx),
            Err(error) if error.aborts_run() => Err(error),
            Err(error) => {
                trace!(%error, "pipe falling back after error");
                self.eval(fallback, ctx)
            },
        }
    }
}
