/// Variable bindings.
///
/// Defines `Context`, the map of top-level names a script reads and writes,
/// with dotted-path resolution and auto-vivifying assignment.
pub mod context;
/// The `Value` enum and its conversions.
pub mod core;
/// Turning values into text.
///
/// Scripts and templates print numbers differently; `NumberStyle` selects
/// between the two.
pub mod display;
/// Function values: host natives and script closures.
pub mod function;
