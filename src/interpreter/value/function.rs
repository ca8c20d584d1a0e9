use std::{collections::HashMap, fmt, rc::Rc};

use crate::{
    ast::{FunctionDef, Statement},
    interpreter::{
        evaluator::function::native::NativeFunction,
        value::{context::Context, core::Value},
    },
};

/// A callable value: either provided by the host or defined in a script.
///
/// Two function values are equal only if they are the same function object.
#[derive(Clone)]
pub enum Function {
    /// A host function from the [`Functions`](crate::Functions) registry.
    Native(Rc<NativeFunction>),
    /// A script function together with its captured bindings.
    Closure(Rc<Closure>),
}

impl Function {
    /// The function's name, if it has one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Native(native) => Some(native.name()),
            Self::Closure(closure) => closure.name.as_deref(),
        }
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Native(a), Self::Native(b)) => Rc::ptr_eq(a, b),
            (Self::Closure(a), Self::Closure(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native(native) => write!(f, "Native({})", native.name()),
            Self::Closure(closure) => {
                write!(f, "Closure({})", closure.name.as_deref().unwrap_or("<anonymous>"))
            },
        }
    }
}

/// A script function and the bindings it closed over.
///
/// `env` is a snapshot of the defining context taken when the closure was
/// created. Later changes to that context are not visible to the closure, and
/// assignments made while the closure runs never leak back out.
#[derive(Debug)]
pub struct Closure {
    /// Bound under this name inside its own body, so it can call itself.
    pub name:   Option<String>,
    /// The parameter names, bound positionally.
    pub params: Vec<String>,
    /// The shared parsed body.
    pub body:   Rc<[Statement]>,
    /// Captured bindings.
    pub env:    HashMap<String, Value>,
}

impl Closure {
    /// Creates a closure from a definition, capturing `ctx` as it is now.
    #[must_use]
    pub fn capture(def: &FunctionDef, ctx: &Context) -> Self {
        Self { name:   def.name.clone(),
               params: def.params.clone(),
               body:   Rc::clone(&def.body),
               env:    ctx.snapshot(), }
    }
}
