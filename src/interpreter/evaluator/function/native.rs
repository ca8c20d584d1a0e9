use std::fmt;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{core::Value, display::NumberStyle},
    },
};

/// Signature of the callable stored in a [`NativeFunction`].
///
/// Receives the adapted arguments; an `Err` carries a message that is
/// reported to the script as a host error.
pub type NativeFn = dyn Fn(&[Value]) -> Result<Value, String>;

/// The declared kind of a native function parameter.
///
/// Arguments are adapted to the declared kind before the function runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// Numbers, and strings that parse as numbers.
    Number,
    /// Strings; numbers and booleans are converted to their text form.
    String,
    /// Booleans only.
    Bool,
    /// Arrays only.
    Array,
    /// Objects only.
    Object,
    /// Anything, passed through unchanged.
    Any,
}

impl ParamKind {
    /// Name used in error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String => "string",
            Self::Bool => "bool",
            Self::Array => "array",
            Self::Object => "object",
            Self::Any => "any",
        }
    }

    /// Adapts an argument to this kind.
    ///
    /// Returns the argument unchanged or converted, or `None` if it cannot be
    /// adapted.
    ///
    /// # Example
    /// ```
    /// use brickengine::{ParamKind, Value};
    ///
    /// assert_eq!(ParamKind::Number.adapt(Value::from("4")), Some(Value::Number(4.0)));
    /// assert_eq!(ParamKind::String.adapt(Value::from(4.0)), Some(Value::from("4")));
    /// assert_eq!(ParamKind::Array.adapt(Value::Null), None);
    /// ```
    #[must_use]
    pub fn adapt(self, value: Value) -> Option<Value> {
        match (self, value) {
            (Self::Any, value) => Some(value),
            (Self::Number, value) => value.coerce_number().map(Value::Number),
            (Self::String, value @ Value::String(_)) => Some(value),
            (Self::String, value @ (Value::Number(_) | Value::Bool(_))) => {
                Some(Value::String(value.render(NumberStyle::Native)))
            },
            (Self::Bool, value @ Value::Bool(_))
            | (Self::Array, value @ Value::Array(_))
            | (Self::Object, value @ Value::Object(_)) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A host function callable from scripts.
///
/// The descriptor is explicit: a name, the ordered parameter kinds, whether
/// the function can fail, and the callable itself. The evaluator checks the
/// argument count and adapts every argument before invoking the callable.
///
/// # Example
/// ```
/// use brickengine::{Context, Functions, NativeFunction, ParamKind, Value, run_script};
///
/// let mut functions = Functions::new();
/// functions.insert(NativeFunction::new("gb", [ParamKind::Number], |args| {
///              Value::from(args[0].coerce_number().unwrap_or(0.0) * 1024.0)
///          }));
///
/// let out = run_script("gb(2)", &mut Context::new(), &functions).unwrap();
/// assert_eq!(out, "2048");
/// ```
pub struct NativeFunction {
    name:     String,
    params:   Vec<ParamKind>,
    fallible: bool,
    body:     Box<NativeFn>,
}

impl NativeFunction {
    /// Creates a native function that always succeeds.
    ///
    /// The callable receives exactly as many arguments as `params` declares,
    /// each already adapted to its kind.
    pub fn new<F>(name: impl Into<String>, params: impl Into<Vec<ParamKind>>, body: F) -> Self
        where F: Fn(&[Value]) -> Value + 'static
    {
        Self { name:     name.into(),
               params:   params.into(),
               fallible: false,
               body:     Box::new(move |args| Ok(body(args))), }
    }

    /// Creates a native function that may fail with a message.
    pub fn fallible<F>(name: impl Into<String>, params: impl Into<Vec<ParamKind>>, body: F) -> Self
        where F: Fn(&[Value]) -> Result<Value, String> + 'static
    {
        Self { name:     name.into(),
               params:   params.into(),
               fallible: true,
               body:     Box::new(body), }
    }

    /// Creates a native function from a full descriptor.
    pub(crate) fn from_parts<F>(name: &str, params: &[ParamKind], fallible: bool, body: F) -> Self
        where F: Fn(&[Value]) -> Result<Value, String> + 'static
    {
        Self { name: name.to_owned(),
               params: params.to_vec(),
               fallible,
               body: Box::new(body), }
    }

    /// The name the function is registered under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared parameter kinds, in order.
    #[must_use]
    pub fn params(&self) -> &[ParamKind] {
        &self.params
    }

    /// Whether the function was declared as able to fail.
    #[must_use]
    pub const fn is_fallible(&self) -> bool {
        self.fallible
    }

    /// Checks arity, adapts arguments and invokes the function.
    ///
    /// # Errors
    /// - `ArgumentCountMismatch` if too few or too many arguments are given.
    /// - `ArgumentTypeMismatch` if an argument cannot be adapted.
    /// - `Host` if the function itself reports a failure.
    pub fn call(&self, args: Vec<Value>, line: usize) -> EvalResult<Value> {
        if args.len() != self.params.len() {
            return Err(RuntimeError::ArgumentCountMismatch { name: self.name.clone(),
                                                             expected: self.params.len(),
                                                             found: args.len(),
                                                             line });
        }

        let mut adapted = Vec::with_capacity(args.len());
        for (i, (arg, kind)) in args.into_iter().zip(&self.params).enumerate() {
            let found = arg.type_name();
            let value = kind.adapt(arg)
                            .ok_or_else(|| RuntimeError::ArgumentTypeMismatch { name: self.name.clone(),
                                                                                position: i + 1,
                                                                                expected: kind.name(),
                                                                                found,
                                                                                line })?;
            adapted.push(value);
        }

        (self.body)(&adapted).map_err(|message| RuntimeError::Host { name: self.name.clone(),
                                                                     message,
                                                                     line })
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
         .field("name", &self.name)
         .field("params", &self.params)
         .field("fallible", &self.fallible)
         .finish_non_exhaustive()
    }
}
