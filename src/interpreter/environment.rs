use std::{cell::RefCell, collections::HashMap, fmt};

use crate::{
    error::RuntimeError,
    interpreter::{lexer::TypeKeyword, value::core::Value},
};

/// The declared-type label of a variable slot, e.g. `DAV.Num`.
///
/// Assigned once at declaration and never checked against the values the
/// slot later holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeTag(String);

impl TypeTag {
    /// Builds the tag for a type name, e.g. `Num` gives `DAV.Num`.
    ///
    /// # Example
    /// ```
    /// use dav::interpreter::environment::TypeTag;
    ///
    /// assert_eq!(TypeTag::named("Num").as_str(), "DAV.Num");
    /// ```
    #[must_use]
    pub fn named(type_name: &str) -> Self {
        Self(format!("DAV.{type_name}"))
    }

    /// The full tag text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<TypeKeyword> for TypeTag {
    fn from(keyword: TypeKeyword) -> Self {
        Self::named(keyword.as_str())
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A variable slot: the value plus the tag it was declared with.
///
/// Parameter slots have no tag unless the argument was a tagged variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    /// Current value.
    pub value: Value,
    /// Declared type, if known.
    pub tag:   Option<TypeTag>,
}

/// What a name is bound to.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// A declared variable or parameter; `set` may update it.
    Slot(Slot),
    /// A host constant injected from outside the script. Reads return the
    /// value verbatim, `set` rejects it.
    Raw(Value),
}

impl Binding {
    /// Creates a tagged slot.
    #[must_use]
    pub const fn slot(value: Value, tag: Option<TypeTag>) -> Self {
        Self::Slot(Slot { value, tag })
    }

    /// The bound value, whatever the binding kind.
    #[must_use]
    pub const fn value(&self) -> &Value {
        match self {
            Self::Slot(slot) => &slot.value,
            Self::Raw(value) => value,
        }
    }

    /// The slot's tag. Raw bindings have none.
    #[must_use]
    pub const fn tag(&self) -> Option<&TypeTag> {
        match self {
            Self::Slot(slot) => slot.tag.as_ref(),
            Self::Raw(_) => None,
        }
    }

    /// Replaces the value of a slot, keeping its tag.
    ///
    /// # Errors
    /// Returns `InvalidVariable` if the binding is raw.
    pub fn assign(&mut self, value: Value, name: &str, line: usize) -> Result<(), RuntimeError> {
        match self {
            Self::Slot(slot) => {
                slot.value = value;
                Ok(())
            },
            Self::Raw(_) => Err(RuntimeError::InvalidVariable { name: name.to_string(),
                                                                line }),
        }
    }
}

/// A lexical scope: its own bindings plus a borrowed link to the enclosing
/// scope.
///
/// Scopes are created per block and per function call and dropped when that
/// block or call ends. The global scope is not a `Scope`; it lives in the
/// interpreter context and is consulted after the chain is exhausted.
#[derive(Debug, Default)]
pub struct Scope<'p> {
    bindings: RefCell<HashMap<String, Binding>>,
    parent:   Option<&'p Scope<'p>>,
}

impl<'p> Scope<'p> {
    /// Creates an empty scope chained to `parent`.
    #[must_use]
    pub fn new(parent: Option<&'p Scope<'p>>) -> Self {
        Self { bindings: RefCell::new(HashMap::new()),
               parent }
    }

    /// Binds `name` in this scope, shadowing any outer binding.
    pub fn declare(&self, name: &str, binding: Binding) {
        self.bindings.borrow_mut().insert(name.to_string(), binding);
    }

    /// Looks `name` up through this scope and its ancestors.
    ///
    /// # Example
    /// ```
    /// use dav::interpreter::{
    ///     environment::{Binding, Scope},
    ///     value::core::Value,
    /// };
    ///
    /// let outer = Scope::new(None);
    /// outer.declare("x", Binding::slot(Value::Integer(1), None));
    /// let inner = Scope::new(Some(&outer));
    ///
    /// assert_eq!(inner.lookup("x").unwrap().value(), &Value::Integer(1));
    /// assert!(inner.lookup("y").is_none());
    /// ```
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Binding> {
        if let Some(binding) = self.bindings.borrow().get(name) {
            return Some(binding.clone());
        }
        self.parent.and_then(|parent| parent.lookup(name))
    }

    /// Finds the innermost scope in the chain that binds `name`.
    #[must_use]
    pub fn owner(&self, name: &str) -> Option<&Self> {
        if self.bindings.borrow().contains_key(name) {
            return Some(self);
        }
        self.parent.and_then(|parent| parent.owner(name))
    }

    /// Runs `update` on this scope's own binding for `name`.
    ///
    /// Returns `None` without calling `update` if this scope does not bind
    /// the name.
    pub fn update<R>(&self, name: &str, update: impl FnOnce(&mut Binding) -> R) -> Option<R> {
        self.bindings.borrow_mut().get_mut(name).map(update)
    }
}
