/// Numeric conversion helpers.
///
/// Converts script numbers (always `f64`) into indices without silent
/// wrap-around, and formats numbers in the two styles the engine prints them:
/// rounded for script results and shortest round-trip for templates.
pub mod num;
