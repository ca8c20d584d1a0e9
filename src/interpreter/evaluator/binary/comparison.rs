use crate::{
    ast::BinaryOperator,
    interpreter::{evaluator::core::Evaluator, value::core::Value},
};

impl Evaluator<'_> {
    /// Evaluates a comparison of two numbers.
    ///
    /// Equality is plain `f64` equality, so `NaN == NaN` is false. Only
    /// called by [`Evaluator::eval_binary`] with a comparison operator.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub(crate) fn eval_comparison(op: BinaryOperator, left: f64, right: f64) -> Value {
        Value::Bool(match op {
                        BinaryOperator::Equal => left == right,
                        BinaryOperator::NotEqual => left != right,
                        BinaryOperator::Less => left < right,
                        BinaryOperator::Greater => left > right,
                        BinaryOperator::LessEqual => left <= right,
                        BinaryOperator::GreaterEqual => left >= right,
                        _ => unreachable!("eval_comparison used with non comparison operator"),
                    })
    }
}
