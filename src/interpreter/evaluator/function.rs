/// Built-in function implementations.
///
/// The default library registered by `Functions::with_builtins`: string
/// helpers, rounding, `min`/`max`, `push`, `keys`, conversions and random
/// identifiers.
pub mod builtin;
/// Call dispatch.
///
/// Resolves a callee to a native function or a closure, binds arguments and
/// runs closure bodies.
pub mod core;
/// Native function descriptors and argument adaptation.
pub mod native;
/// The host function registry.
pub mod registry;
/// Random identifiers for the default library.
mod random;
