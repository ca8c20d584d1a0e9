use std::{collections::HashMap, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// The variable bindings a script runs against.
///
/// Hosts fill a context with input data before a run and may read it back
/// afterwards: `let` and assignments write into it, so a script's top-level
/// variables are visible to the host once the run finishes.
///
/// # Example
/// ```
/// use brickengine::{Context, Functions, Value, run_script};
///
/// let mut ctx = Context::new();
/// ctx.insert("price", 20.0);
///
/// run_script("let total = price * 2", &mut ctx, &Functions::new()).unwrap();
///
/// assert_eq!(ctx.get("total"), Some(&Value::Number(40.0)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    bindings: HashMap<String, Value>,
}

impl Context {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to `value`, returning the previous value if any.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.bindings.insert(name.into(), value.into())
    }

    /// Returns the value bound to a top-level name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Removes a top-level binding.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.bindings.remove(name)
    }

    /// Returns `true` if `name` is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Number of top-level bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Iterates over the top-level bindings in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.bindings.iter()
    }

    /// A copy of the current bindings, as captured by closures.
    ///
    /// Arrays and objects are shared until one side writes to them.
    #[must_use]
    pub fn snapshot(&self) -> HashMap<String, Value> {
        self.bindings.clone()
    }

    /// Resolves a dotted path.
    ///
    /// A missing name or field reads as null. Every segment after the first
    /// must be looked up in an object.
    ///
    /// # Errors
    /// `NotAnObject` if an intermediate value (including null) is not an
    /// object.
    ///
    /// # Example
    /// ```
    /// use brickengine::{Context, Value};
    ///
    /// let mut ctx = Context::new();
    /// ctx.insert("user", Value::object([("name", Value::from("ada"))]));
    ///
    /// let path = |p: &str| p.split('.').map(str::to_owned).collect::<Vec<_>>();
    ///
    /// assert_eq!(ctx.resolve(&path("user.name"), 1).unwrap(), Value::from("ada"));
    /// assert_eq!(ctx.resolve(&path("user.age"), 1).unwrap(), Value::Null);
    /// assert!(ctx.resolve(&path("user.name.first"), 1).is_err());
    /// ```
    pub fn resolve(&self, path: &[String], line: usize) -> EvalResult<Value> {
        let Some((first, rest)) = path.split_first() else {
            return Ok(Value::Null);
        };

        let mut current = self.bindings.get(first);
        for segment in rest {
            current = match current {
                Some(Value::Object(map)) => map.get(segment),
                other => {
                    return Err(RuntimeError::NotAnObject { segment: segment.clone(),
                                                           found: other.map_or("null",
                                                                               Value::type_name),
                                                           line });
                },
            };
        }
        Ok(current.cloned().unwrap_or_default())
    }

    /// Assigns to a dotted path, creating objects along the way.
    ///
    /// Any intermediate segment that is missing or holds a non-object is
    /// replaced by a fresh empty object; the final segment is overwritten.
    pub fn assign(&mut self, path: &[String], value: Value) {
        assign_into(&mut self.bindings, path, value);
    }

    /// Finds the value stored at a dotted path for in-place modification.
    ///
    /// Objects along the path are unshared first, so writing through the
    /// returned reference only affects this context.
    ///
    /// # Errors
    /// `NotAnObject` if an intermediate value is not an object.
    pub fn lookup_mut(&mut self, path: &[String], line: usize) -> EvalResult<Option<&mut Value>> {
        let Some((first, rest)) = path.split_first() else {
            return Ok(None);
        };

        let Some(mut current) = self.bindings.get_mut(first) else {
            return Ok(None);
        };
        for segment in rest {
            current = match current {
                Value::Object(map) => match Rc::make_mut(map).get_mut(segment) {
                    Some(value) => value,
                    None => return Ok(None),
                },
                other => {
                    return Err(RuntimeError::NotAnObject { segment: segment.clone(),
                                                           found: other.type_name(),
                                                           line });
                },
            };
        }
        Ok(Some(current))
    }
}

fn assign_into(map: &mut HashMap<String, Value>, path: &[String], value: Value) {
    let Some((first, rest)) = path.split_first() else {
        return;
    };
    if rest.is_empty() {
        map.insert(first.clone(), value);
        return;
    }

    let slot = map.entry(first.clone()).or_default();
    if !matches!(slot, Value::Object(_)) {
        *slot = Value::Object(Rc::default());
    }
    if let Value::Object(child) = slot {
        assign_into(Rc::make_mut(child), rest, value);
    }
}

impl From<HashMap<String, Value>> for Context {
    fn from(bindings: HashMap<String, Value>) -> Self {
        Self { bindings }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Context {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self { bindings: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}
