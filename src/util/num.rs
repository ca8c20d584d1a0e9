use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Converts a script number into an array index.
///
/// The fractional part is truncated. Negative, NaN and infinite values are
/// rejected, as are values beyond [`MAX_SAFE_U64_INT`].
///
/// ## Errors
/// Returns `RuntimeError::InvalidIndex` if the value cannot name an element.
///
/// ## Example
/// ```
/// use brickengine::{error::RuntimeError, util::num::f64_to_index};
///
/// assert_eq!(f64_to_index(2.9, 1).unwrap(), 2);
/// assert!(matches!(f64_to_index(-1.0, 7),
///                  Err(RuntimeError::InvalidIndex { line: 7, .. })));
/// ```
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn f64_to_index(value: f64, line: usize) -> EvalResult<usize> {
    let truncated = value.trunc();
    if !truncated.is_finite() || truncated < 0.0 || truncated > MAX_SAFE_U64_INT as f64 {
        return Err(RuntimeError::InvalidIndex { index: value,
                                                line });
    }
    usize::try_from(truncated as u64).map_err(|_| RuntimeError::InvalidIndex { index: value,
                                                                              line })
}

/// Converts a length or count into a script number.
///
/// Lengths above `2^53` lose precision; no collection in a script gets near
/// that.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn usize_to_f64(value: usize) -> f64 {
    value as f64
}

/// Formats a number rounded to zero fractional digits, the way script results
/// are printed.
///
/// A result that rounds to zero prints as `0`, never `-0`.
///
/// ## Example
/// ```
/// use brickengine::util::num::format_rounded;
///
/// assert_eq!(format_rounded(2.6), "3");
/// assert_eq!(format_rounded(1152.0), "1152");
/// assert_eq!(format_rounded(-0.2), "0");
/// ```
#[must_use]
pub fn format_rounded(value: f64) -> String {
    let text = format!("{value:.0}");
    if text == "-0" { "0".to_owned() } else { text }
}

/// Formats a number in its shortest round-trip form, the way template
/// placeholders print it (`3.5`, `3`, `0.30000000000000004`).
#[must_use]
pub fn format_native(value: f64) -> String {
    value.to_string()
}
