use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
};

impl Evaluator<'_> {
    /// Evaluates an arithmetic operation on two numbers.
    ///
    /// The operator must be one of `Add`, `Sub`, `Mul` or `Div`; only
    /// [`Evaluator::eval_binary`] calls this. Division by zero is checked
    /// explicitly.
    pub(crate) fn eval_scalar_op(op: BinaryOperator,
                                 left: f64,
                                 right: f64,
                                 line: usize)
                                 -> EvalResult<Value> {
        use BinaryOperator::{Add, Div, Mul, Sub};

        Ok(Value::Number(match op {
                             Add => left + right,
                             Sub => left - right,
                             Mul => left * right,
                             Div => {
                                 if right == 0.0 {
                                     return Err(RuntimeError::DivisionByZero { line });
                                 }
                                 left / right
                             },
                             _ => unreachable!("eval_scalar_op used with non arithmetic operator"),
                         }))
    }
}
