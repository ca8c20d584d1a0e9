/// Parsing errors.
///
/// Defines all error types that can occur while turning source text into an
/// AST: unexpected tokens, illegal characters, unterminated blocks and the
/// like.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation: type
/// mismatches, bad indices, division by zero, resource ceilings and failures
/// reported by native functions.
pub mod runtime_error;

use std::fmt;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Error categories visible to hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed source text.
    Syntax,
    /// A value of the wrong kind.
    Type,
    /// An index outside the allowed range.
    Range,
    /// An arithmetic failure such as division by zero.
    Arithmetic,
    /// A name that resolves to nothing callable.
    Reference,
    /// A loop, memory or call-depth ceiling was hit.
    ResourceExceeded,
    /// A native function reported a failure.
    Host,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Syntax => "SyntaxError",
            Self::Type => "TypeError",
            Self::Range => "RangeError",
            Self::Arithmetic => "ArithmeticError",
            Self::Reference => "ReferenceError",
            Self::ResourceExceeded => "ResourceExceeded",
            Self::Host => "HostError",
        };
        write!(f, "{name}")
    }
}

/// Any error returned by [`run_script`](crate::run_script) or
/// [`run_template`](crate::run_template).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The source could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Evaluation failed.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    /// A template placeholder failed to parse or evaluate.
    #[error("In placeholder '{{{{ {expression} }}}}': {source}")]
    Placeholder {
        /// The text between the braces, trimmed.
        expression: String,
        /// What went wrong inside it.
        source:     Box<Self>,
    },
}

impl Error {
    /// The category of the underlying error.
    ///
    /// # Example
    /// ```
    /// use brickengine::{Context, ErrorKind, Functions, run_script};
    ///
    /// let error = run_script("1 / 0", &mut Context::new(), &Functions::new()).unwrap_err();
    ///
    /// assert_eq!(error.kind(), ErrorKind::Arithmetic);
    /// ```
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse(error) => error.kind(),
            Self::Runtime(error) => error.kind(),
            Self::Placeholder { source, .. } => source.kind(),
        }
    }
}
