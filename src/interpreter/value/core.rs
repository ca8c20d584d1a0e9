use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::LiteralValue,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::function::Function},
    util::num::f64_to_index,
};

/// Represents a runtime value in the interpreter.
///
/// Arrays and objects sit behind an `Rc` and are copied on write, so cloning a
/// value is cheap and a mutation through one path never shows up through
/// another.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// The absence of a value. Missing variables and fields read as null.
    #[default]
    Null,
    /// A boolean value (`true` or `false`).
    Bool(bool),
    /// A numeric value (double precision floating-point).
    Number(f64),
    /// A string.
    String(String),
    /// An ordered list of values.
    Array(Rc<Vec<Self>>),
    /// A string-keyed map of values.
    Object(Rc<HashMap<String, Self>>),
    /// A native function or a closure.
    Function(Function),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Array(Rc::new(v))
    }
}

impl From<HashMap<String, Self>> for Value {
    fn from(v: HashMap<String, Self>) -> Self {
        Self::Object(Rc::new(v))
    }
}

impl From<Function> for Value {
    fn from(v: Function) -> Self {
        Self::Function(v)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl From<&LiteralValue> for Value {
    fn from(lit: &LiteralValue) -> Self {
        match lit {
            LiteralValue::Str(s) => Self::String(s.clone()),
            LiteralValue::Number(n) => Self::Number(*n),
            LiteralValue::Bool(b) => Self::Bool(*b),
            LiteralValue::Null => Self::Null,
        }
    }
}

impl Value {
    /// Builds an object value from key/value pairs.
    ///
    /// # Example
    /// ```
    /// use brickengine::Value;
    ///
    /// let var = Value::object([("extra", Value::from(128.0))]);
    ///
    /// assert_eq!(var.get("extra"), Some(&Value::Number(128.0)));
    /// ```
    pub fn object<K, I>(entries: I) -> Self
        where K: Into<String>,
              I: IntoIterator<Item = (K, Self)>
    {
        Self::Object(Rc::new(entries.into_iter().map(|(k, v)| (k.into(), v)).collect()))
    }

    /// Looks up a field of an object. Returns `None` for missing keys and for
    /// values that are not objects.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// The name of the value's type as scripts see it.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
            Self::Function(_) => "function",
        }
    }

    /// Truthiness as used by conditions and the pipe operator.
    ///
    /// `null`, `false`, `""` and `0` are falsy; everything else, including
    /// empty arrays, empty objects and NaN, is truthy.
    ///
    /// # Example
    /// ```
    /// use brickengine::Value;
    ///
    /// assert!(!Value::Null.is_truthy());
    /// assert!(!Value::from("").is_truthy());
    /// assert!(!Value::from(0.0).is_truthy());
    /// assert!(Value::from(Vec::new()).is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0,
            Self::String(s) => !s.is_empty(),
            Self::Array(_) | Self::Object(_) | Self::Function(_) => true,
        }
    }

    /// Interprets the value as a number, parsing numeric strings.
    ///
    /// Returns `None` for everything else.
    #[must_use]
    pub fn coerce_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Converts the value to an `f64` for arithmetic and comparison.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Returns
    /// - `Ok(f64)`: For numbers and strings that parse as numbers.
    /// - `Err(RuntimeError::ExpectedNumber)`: For everything else.
    ///
    /// # Example
    /// ```
    /// use brickengine::Value;
    ///
    /// assert_eq!(Value::from("2.5").as_number(1).unwrap(), 2.5);
    /// assert!(Value::Bool(true).as_number(1).is_err());
    /// ```
    pub fn as_number(&self, line: usize) -> EvalResult<f64> {
        self.coerce_number()
            .ok_or(RuntimeError::ExpectedNumber { found: self.type_name(),
                                                  line })
    }

    /// Converts the value to an array index, truncating any fraction.
    ///
    /// # Errors
    /// `ExpectedNumber` if the value is not numeric, `InvalidIndex` if it is
    /// negative or not finite.
    pub fn as_index(&self, line: usize) -> EvalResult<usize> {
        f64_to_index(self.as_number(line)?, line)
    }

    /// Borrows the elements of an array value.
    ///
    /// # Errors
    /// `ExpectedArray` if the value is not an array.
    pub fn as_array(&self, line: usize) -> EvalResult<&Rc<Vec<Self>>> {
        match self {
            Self::Array(items) => Ok(items),
            other => Err(RuntimeError::ExpectedArray { found: other.type_name(),
                                                       line }),
        }
    }
}
