use std::rc::Rc;

use crate::{
    interpreter::{
        evaluator::function::{
            native::{NativeFunction, ParamKind},
            random,
            registry::Functions,
        },
        value::{core::Value, display::NumberStyle},
    },
    util::num::usize_to_f64,
};

/// Type alias for builtin function handlers.
///
/// A builtin receives its arguments already adapted to the declared parameter
/// kinds. An `Err` message is reported to the script as a host error.
type BuiltinFn = fn(&[Value]) -> Result<Value, String>;

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - the parameter kinds,
/// - whether it can fail,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table used for registration),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                params: [$($kind:ident),* $(,)?],
                fallible: $fallible:literal,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:     &'static str,
            params:   &'static [ParamKind],
            fallible: bool,
            func:     BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, params: &[$(ParamKind::$kind),*], fallible: $fallible, func: $func },
            )*
        ];
        /// Names of the functions registered by
        /// [`Functions::with_builtins`](crate::Functions::with_builtins).
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "len"    => { params: [Any],            fallible: false, func: len },
    "upper"  => { params: [String],         fallible: false, func: |args| map_str(args, str::to_uppercase) },
    "lower"  => { params: [String],         fallible: false, func: |args| map_str(args, str::to_lowercase) },
    "trim"   => { params: [String],         fallible: false, func: |args| map_str(args, |s| s.trim().to_owned()) },
    "concat" => { params: [String, String], fallible: false, func: concat },
    "round"  => { params: [Number],         fallible: false, func: |args| map_num(args, f64::round) },
    "floor"  => { params: [Number],         fallible: false, func: |args| map_num(args, f64::floor) },
    "ceil"   => { params: [Number],         fallible: false, func: |args| map_num(args, f64::ceil) },
    "abs"    => { params: [Number],         fallible: false, func: |args| map_num(args, f64::abs) },
    "min"    => { params: [Number, Number], fallible: false, func: |args| fold_num(args, f64::min) },
    "max"    => { params: [Number, Number], fallible: false, func: |args| fold_num(args, f64::max) },
    "push"   => { params: [Array, Any],     fallible: false, func: push },
    "keys"   => { params: [Object],         fallible: false, func: keys },
    "str"    => { params: [Any],            fallible: false, func: |args| Ok(Value::String(arg(args, 0)?.render(NumberStyle::Native))) },
    "num"    => { params: [Any],            fallible: true,  func: num },
    "type"   => { params: [Any],            fallible: false, func: |args| Ok(Value::from(arg(args, 0)?.type_name())) },

    "uuid"           => { params: [],       fallible: true, func: random::uuid },
    "random_string"  => { params: [Number], fallible: true, func: random::random_string },
    "random_mac"     => { params: [],       fallible: true, func: random::random_mac },
    "random_ipv4_in" => { params: [String], fallible: true, func: random::random_ipv4_in },
}

/// Registers every entry of the builtin table.
pub(crate) fn register_builtins(functions: &mut Functions) {
    for def in BUILTIN_TABLE {
        functions.insert(NativeFunction::from_parts(def.name, def.params, def.fallible, def.func));
    }
}

fn arg(args: &[Value], index: usize) -> Result<&Value, String> {
    args.get(index).ok_or_else(|| format!("missing argument {}", index + 1))
}

fn str_arg(args: &[Value], index: usize) -> Result<&str, String> {
    match arg(args, index)? {
        Value::String(s) => Ok(s),
        other => Err(format!("argument {} must be a string, found {}", index + 1, other.type_name())),
    }
}

fn num_arg(args: &[Value], index: usize) -> Result<f64, String> {
    match arg(args, index)? {
        Value::Number(n) => Ok(*n),
        other => Err(format!("argument {} must be a number, found {}", index + 1, other.type_name())),
    }
}

fn map_str(args: &[Value], f: impl Fn(&str) -> String) -> Result<Value, String> {
    Ok(Value::String(f(str_arg(args, 0)?)))
}

fn map_num(args: &[Value], f: impl Fn(f64) -> f64) -> Result<Value, String> {
    Ok(Value::Number(f(num_arg(args, 0)?)))
}

fn fold_num(args: &[Value], f: impl Fn(f64, f64) -> f64) -> Result<Value, String> {
    Ok(Value::Number(f(num_arg(args, 0)?, num_arg(args, 1)?)))
}

/// Length of a string (in characters), array or object.
///
/// # Example
/// ```
/// use brickengine::{Context, Functions, run_script};
///
/// let out = run_script("len([1, 2, 3]) + len('héllo')",
///                      &mut Context::new(),
///                      &Functions::with_builtins());
/// assert_eq!(out.unwrap(), "8");
/// ```
fn len(args: &[Value]) -> Result<Value, String> {
    let len = match arg(args, 0)? {
        Value::String(s) => s.chars().count(),
        Value::Array(items) => items.len(),
        Value::Object(map) => map.len(),
        other => return Err(format!("cannot take the length of {}", other.type_name())),
    };
    Ok(Value::Number(usize_to_f64(len)))
}

fn concat(args: &[Value]) -> Result<Value, String> {
    let mut out = str_arg(args, 0)?.to_owned();
    out.push_str(str_arg(args, 1)?);
    Ok(Value::String(out))
}

/// Returns a new array with the item appended; the argument array is left
/// untouched.
fn push(args: &[Value]) -> Result<Value, String> {
    let Value::Array(items) = arg(args, 0)? else {
        return Err("argument 1 must be an array".to_owned());
    };
    let mut items = Rc::clone(items);
    Rc::make_mut(&mut items).push(arg(args, 1)?.clone());
    Ok(Value::Array(items))
}

/// The keys of an object, sorted.
fn keys(args: &[Value]) -> Result<Value, String> {
    let Value::Object(map) = arg(args, 0)? else {
        return Err("argument 1 must be an object".to_owned());
    };
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort();
    Ok(Value::from(keys.into_iter().map(|k| Value::String(k.clone())).collect::<Vec<_>>()))
}

/// Converts a value to a number, failing for anything that is not a number
/// or a numeric string.
fn num(args: &[Value]) -> Result<Value, String> {
    let value = arg(args, 0)?;
    value.coerce_number().map(Value::Number).ok_or_else(|| match value {
                                                   Value::String(s) => {
                                                       format!("cannot convert \"{s}\" to a number")
                                                   },
                                                   other => format!("cannot convert {} to a number",
                                                                    other.type_name()),
                                               })
}
