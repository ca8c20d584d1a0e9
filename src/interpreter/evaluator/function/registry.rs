use std::{collections::HashMap, fmt, rc::Rc};

use crate::interpreter::{
    evaluator::function::{
        builtin,
        native::{NativeFunction, ParamKind},
    },
    value::core::Value,
};

/// The registry of host functions available to scripts.
///
/// Names may contain dots (`math.round`); a call whose callee is written as
/// that dotted path resolves here before variables are consulted.
#[derive(Clone, Default)]
pub struct Functions {
    entries: HashMap<String, Rc<NativeFunction>>,
}

impl Functions {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the default library (`len`, `upper`,
    /// `round`, `push`, ...).
    ///
    /// # Example
    /// ```
    /// use brickengine::{Context, Functions, run_script};
    ///
    /// let out = run_script("upper('abc')", &mut Context::new(), &Functions::with_builtins());
    /// assert_eq!(out.unwrap(), "ABC");
    /// ```
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut functions = Self::new();
        builtin::register_builtins(&mut functions);
        functions
    }

    /// Registers a function under its own name, replacing any previous one.
    pub fn insert(&mut self, function: NativeFunction) -> Option<Rc<NativeFunction>> {
        self.entries.insert(function.name().to_owned(), Rc::new(function))
    }

    /// Shorthand for registering an infallible function.
    pub fn register<F>(&mut self, name: &str, params: impl Into<Vec<ParamKind>>, body: F)
        where F: Fn(&[Value]) -> Value + 'static
    {
        self.insert(NativeFunction::new(name, params, body));
    }

    /// Looks up a function by its full (possibly dotted) name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Rc<NativeFunction>> {
        self.entries.get(name)
    }

    /// Returns `true` if a function is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Removes a function.
    pub fn remove(&mut self, name: &str) -> Option<Rc<NativeFunction>> {
        self.entries.remove(name)
    }

    /// Number of registered functions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for Functions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}
