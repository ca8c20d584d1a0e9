//! # brickengine
//!
//! brickengine is a small embeddable scripting language written in Rust.
//! Hosts use it to evaluate user-supplied formulas and scripts against their
//! own data, and to render text templates containing `{{ expression }}`
//! placeholders.
//!
//! The host supplies the variable bindings ([`Context`]) and the native
//! functions scripts may call ([`Functions`]). Runaway scripts are stopped by
//! the iteration, memory and call-depth ceilings in [`Limits`].
//!
//! ```
//! use brickengine::{Context, Functions, NativeFunction, ParamKind, Value, run_script};
//!
//! let mut functions = Functions::new();
//! functions.insert(NativeFunction::new("gb", [ParamKind::Number], |args| {
//!     Value::from(args[0].coerce_number().unwrap_or(0.0) * 1024.0)
//! }));
//!
//! let mut ctx = Context::new();
//! ctx.insert("var", Value::object([("extra", Value::from(128.0))]));
//!
//! assert_eq!(run_script("gb(1) + var.extra", &mut ctx, &functions).unwrap(), "1152");
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` types that represent
/// scripts and placeholders as a tree. The AST is built by the parser and
/// traversed by the evaluator. Every node carries the line it started on.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// # Responsibilities
/// - Defines `ParseError` and `RuntimeError` with line numbers.
/// - Wraps both, and template placeholder failures, in `Error`.
/// - Classifies every error into an `ErrorKind`.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, values and template
/// rendering.
pub mod interpreter;
/// General utilities for safe numeric conversion and number formatting.
pub mod util;

pub use crate::{
    error::{Error, ErrorKind, ParseError, RuntimeError},
    interpreter::{
        evaluator::{
            core::{EvalResult, Evaluator, Flow, evaluate},
            function::{
                builtin::BUILTIN_FUNCTIONS,
                native::{NativeFunction, ParamKind},
                registry::Functions,
            },
            governor::Limits,
        },
        value::{
            context::Context,
            core::Value,
            display::NumberStyle,
            function::{Closure, Function},
        },
    },
};

/// Runs a script and returns its result as text.
///
/// Statements run in order against `ctx`. The result is the value of the
/// first top-level `return`, or else the value of the last statement; an
/// empty script yields `null`. Numbers in the result are rounded to whole
/// digits, including inside arrays and objects.
///
/// Default [`Limits`] apply; use [`Evaluator::run_script`] to change them.
///
/// # Errors
/// Returns an error if parsing or evaluation fails.
///
/// # Examples
/// ```
/// use brickengine::{Context, ErrorKind, Functions, run_script};
///
/// let functions = Functions::with_builtins();
/// let mut ctx = Context::new();
///
/// assert_eq!(run_script("let third = 7 / 3; third * 2", &mut ctx, &functions).unwrap(), "5");
/// assert_eq!(run_script("[1.2, 'a']", &mut ctx, &functions).unwrap(), "[1, \"a\"]");
///
/// let err = run_script("let y = 1 / 0", &mut ctx, &functions).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::Arithmetic);
/// ```
pub fn run_script(source: &str, ctx: &mut Context, functions: &Functions) -> Result<String, Error> {
    Evaluator::new(functions).run_script(source, ctx)
}

/// Renders a template, replacing each `{{ expression }}` with its value.
///
/// Numbers are printed in their shortest exact form (`3.5`, `3`). Default
/// [`Limits`] apply; use [`Evaluator::run_template`] to change them.
///
/// # Errors
/// Returns [`Error::Placeholder`] for the first placeholder that fails to
/// parse or evaluate.
///
/// # Examples
/// ```
/// use brickengine::{Context, Functions, run_template};
///
/// let mut ctx = Context::new();
/// ctx.insert("name", "Ada");
///
/// let out = run_template("Hello, {{ name }}! {{ 7 / 2 }}", &mut ctx, &Functions::new()).unwrap();
/// assert_eq!(out, "Hello, Ada! 3.5");
/// ```
pub fn run_template(source: &str, ctx: &mut Context, functions: &Functions) -> Result<String, Error> {
    Evaluator::new(functions).run_template(source, ctx)
}
