/// Comparison operators.
///
/// `==`, `!=`, `<`, `>`, `<=` and `>=`, all numeric.
pub mod comparison;
/// Binary dispatch and the fallback (pipe) operator.
pub mod core;
/// Arithmetic operators.
///
/// `+`, `-`, `*` and `/` over numbers, with division by zero reported as an
/// error.
pub mod scalar;
