/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks statements and expressions against a `Context`,
/// calls native functions and closures, and enforces the resource limits of a
/// run.
///
/// # Responsibilities
/// - Evaluates expressions, statements and control flow.
/// - Propagates early returns through blocks and loops.
/// - Reports runtime errors such as division by zero or a runaway loop.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// carrying its kind, its text and the line it started on. Comments and
/// whitespace are dropped here.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// A recursive-descent parser over a peekable token stream. Scripts parse
/// into a list of statements; template placeholders parse into a single
/// expression.
pub mod parser;
/// Rendering of `{{ expression }}` templates.
pub mod template;
/// The value module defines the runtime data types for evaluation.
///
/// # Responsibilities
/// - Defines the `Value` enum, truthiness and numeric coercion.
/// - Holds variable bindings in `Context`.
/// - Describes native functions and closures as first-class values.
/// - Renders values as text.
pub mod value;
