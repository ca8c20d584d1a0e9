use super::ErrorKind;

/// Represents all errors that can occur during evaluation and runtime.
///
/// `found` fields hold the type name of the offending value (`"string"`,
/// `"null"`, ...).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuntimeError {
    /// Called a name that is neither a native nor bound to a function.
    #[error("Error on line {line}: Unknown function '{name}'.")]
    UnknownFunction {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to call a value that is not a function.
    #[error("Error on line {line}: '{name}' is not callable (found {found}).")]
    NotCallable {
        /// The callee as written.
        name:  String,
        /// The type of the value found.
        found: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A numeric value was expected, but not found.
    #[error("Error on line {line}: Expected number, found {found}.")]
    ExpectedNumber {
        /// The type of the value found.
        found: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// An array value was expected, but not found.
    #[error("Error on line {line}: Expected array, found {found}.")]
    ExpectedArray {
        /// The type of the value found.
        found: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A dotted path walked through something that is not an object.
    #[error("Error on line {line}: Cannot read '{segment}' from {found}.")]
    NotAnObject {
        /// The path segment that could not be resolved.
        segment: String,
        /// The type of the value found.
        found:   &'static str,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// The wrong number of arguments was supplied to a native function.
    #[error("Error on line {line}: Function '{name}' expects {expected} argument(s), but {found} were given.")]
    ArgumentCountMismatch {
        /// The function name.
        name:     String,
        /// The declared parameter count.
        expected: usize,
        /// The number of arguments supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// An argument could not be adapted to the declared parameter kind.
    #[error("Error on line {line}: Argument {position} of '{name}' must be {expected}, found {found}.")]
    ArgumentTypeMismatch {
        /// The function name.
        name:     String,
        /// 1-based argument position.
        position: usize,
        /// The declared parameter kind.
        expected: &'static str,
        /// The type of the value found.
        found:    &'static str,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// An index that is negative or not a finite number.
    #[error("Error on line {line}: Index {index} is not a non-negative integer.")]
    InvalidIndex {
        /// The index as evaluated.
        index: f64,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Tried to read an array element past the end.
    #[error("Error on line {line}: Index out of bounds. Length is {len}, but found {found} instead.")]
    IndexOutOfBounds {
        /// The array length.
        len:   usize,
        /// The index that was actually requested.
        found: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Attempted division by zero.
    #[error("Error on line {line}: Division by zero.")]
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A loop ran more passes than allowed.
    #[error("Error on line {line}: Execution limit of {limit} iterations exceeded (possible infinite loop).")]
    IterationLimit {
        /// The configured ceiling.
        limit: u64,
        /// The line of the loop.
        line:  usize,
    },
    /// Resident memory grew past the configured ceiling.
    #[error("Error on line {line}: Memory limit exceeded ({used} bytes in use, limit is {limit} bytes).")]
    MemoryLimit {
        /// Resident memory observed.
        used:  u64,
        /// The configured ceiling.
        limit: u64,
        /// The line of the loop.
        line:  usize,
    },
    /// An index assignment would pad an array past what memory allows.
    #[error("Error on line {line}: Array of {len} elements exceeds the memory limit.")]
    ArrayTooLarge {
        /// The length the array would have grown to.
        len:  usize,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Closures nested deeper than allowed.
    #[error("Error on line {line}: Call depth limit of {limit} exceeded.")]
    CallDepthExceeded {
        /// The configured ceiling.
        limit: usize,
        /// The line of the call.
        line:  usize,
    },
    /// A native function reported a failure.
    #[error("Error on line {line}: Function '{name}' failed: {message}.")]
    Host {
        /// The function name.
        name:    String,
        /// The message reported by the function.
        message: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}

impl RuntimeError {
    /// The error category exposed to hosts.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownFunction { .. } => ErrorKind::Reference,
            Self::NotCallable { .. }
            | Self::ExpectedNumber { .. }
            | Self::ExpectedArray { .. }
            | Self::NotAnObject { .. }
            | Self::ArgumentCountMismatch { .. }
            | Self::ArgumentTypeMismatch { .. } => ErrorKind::Type,
            Self::InvalidIndex { .. } | Self::IndexOutOfBounds { .. } => ErrorKind::Range,
            Self::DivisionByZero { .. } => ErrorKind::Arithmetic,
            Self::IterationLimit { .. }
            | Self::MemoryLimit { .. }
            | Self::ArrayTooLarge { .. }
            | Self::CallDepthExceeded { .. } => ErrorKind::ResourceExceeded,
            Self::Host { .. } => ErrorKind::Host,
        }
    }

    /// Returns `true` for errors that end the whole run.
    ///
    /// Neither `try`/`catch` nor the pipe operator intercepts these.
    #[must_use]
    pub const fn aborts_run(&self) -> bool {
        matches!(self.kind(), ErrorKind::ResourceExceeded)
    }

    /// The source line the error refers to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnknownFunction { line, .. }
            | Self::NotCallable { line, .. }
            | Self::ExpectedNumber { line, .. }
            | Self::ExpectedArray { line, .. }
            | Self::NotAnObject { line, .. }
            | Self::ArgumentCountMismatch { line, .. }
            | Self::ArgumentTypeMismatch { line, .. }
            | Self::InvalidIndex { line, .. }
            | Self::IndexOutOfBounds { line, .. }
            | Self::DivisionByZero { line }
            | Self::IterationLimit { line, .. }
            | Self::MemoryLimit { line, .. }
            | Self::ArrayTooLarge { line, .. }
            | Self::CallDepthExceeded { line, .. }
            | Self::Host { line, .. } => *line,
        }
    }
}
