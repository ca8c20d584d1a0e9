/// Binary operator chains.
///
/// All arithmetic and comparison operators share a single precedence tier and
/// associate to the left.
pub mod binary;

/// Brace-delimited statement blocks.
pub mod block;

/// Entry points: expressions, whole programs and template placeholders.
pub mod core;

/// Operands and primary expressions.
///
/// Literals, arrays, object literals, dotted variable paths, and the index and
/// call suffixes that may follow them.
pub mod primary;

/// Statement parsing.
///
/// Declarations, assignments, control flow and function definitions.
pub mod statement;

/// Helpers shared by the parser submodules.
mod utils;
