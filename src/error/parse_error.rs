use super::ErrorKind;

/// Represents all errors that can occur during parsing.
///
/// `expected` fields hold a short structural description such as
/// `"expected identifier after '.'"`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Found an unexpected token while parsing.
    #[error("Error on line {line}: Unexpected token '{token}', {expected}.")]
    UnexpectedToken {
        /// The literal of the token encountered.
        token:    String,
        /// What the parser was looking for.
        expected: &'static str,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Reached the end of input unexpectedly.
    #[error("Error on line {line}: Unexpected end of input, {expected}.")]
    UnexpectedEndOfInput {
        /// What the parser was looking for.
        expected: &'static str,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A character the tokenizer could not classify.
    #[error("Error on line {line}: Illegal character '{token}'.")]
    IllegalCharacter {
        /// The offending text.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A number literal that does not fit an `f64`.
    #[error("Error on line {line}: Invalid number literal '{literal}'.")]
    InvalidNumber {
        /// The literal as written.
        literal: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// `target[]` with nothing between the brackets.
    #[error("Error on line {line}: Empty index expression is not allowed.")]
    EmptyIndex {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A block, object or function body was never closed.
    #[error("Error on line {line}: Expected '}}' to close block, found {found}.")]
    UnterminatedBlock {
        /// What was found instead.
        found: String,
        /// The line the block was opened on.
        line:  usize,
    },
    /// The left-hand side of `=` is not a variable path or path element.
    #[error("Error on line {line}: Invalid assignment target.")]
    InvalidAssignmentTarget {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Found extra tokens after a template expression.
    #[error("Error on line {line}: Extra tokens after expression: '{token}'.")]
    TrailingTokens {
        /// The first extra token.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Expressions or blocks nested, or operators chained, past the parser's
    /// depth ceiling.
    #[error("Error on line {line}: Expression nested too deeply (limit is {limit} levels).")]
    NestingTooDeep {
        /// The depth ceiling.
        limit: usize,
        /// The source line where the ceiling was reached.
        line:  usize,
    },
}

impl ParseError {
    /// The error category exposed to hosts.
    ///
    /// Everything is a syntax error except an empty index, which counts as a
    /// range error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyIndex { .. } => ErrorKind::Range,
            _ => ErrorKind::Syntax,
        }
    }

    /// The source line the error refers to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnexpectedToken { line, .. }
            | Self::UnexpectedEndOfInput { line, .. }
            | Self::IllegalCharacter { line, .. }
            | Self::InvalidNumber { line, .. }
            | Self::EmptyIndex { line }
            | Self::UnterminatedBlock { line, .. }
            | Self::InvalidAssignmentTarget { line }
            | Self::TrailingTokens { line, .. }
            | Self::NestingTooDeep { line, .. } => *line,
        }
    }
}
