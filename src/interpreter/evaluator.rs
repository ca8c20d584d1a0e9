/// Binary operator evaluation logic.
///
/// Handles arithmetic, comparisons and the fallback pipe operator.
pub mod binary;

/// Core evaluation logic.
///
/// Contains the `Evaluator`, expression dispatch, the `Flow` signal used for
/// early returns, and script execution.
pub mod core;

/// Evaluation of loops.
///
/// Classic `for`, `for ... in` and `while`, each governed by the iteration
/// and memory limits.
pub mod for_loop;

/// Function evaluation.
///
/// Handles native and closure calls, argument adaptation and the default
/// function library.
pub mod function;

/// Resource limits and their enforcement.
pub mod governor;

/// Array element reads and writes.
pub mod index;

/// Statement execution: bindings, assignments, `if` and `try`/`catch`.
pub mod statement;
