use crate::{
    error::RuntimeError,
    interpreter::{
        environment::{Binding, Scope},
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Resolves `name` to its binding.
    ///
    /// The scope chain is searched from the innermost scope outwards; if no
    /// scope binds the name, the globals are consulted.
    ///
    /// # Parameters
    /// - `name`: Identifier to resolve.
    /// - `scope`: Innermost scope, or `None` at the top level.
    ///
    /// # Returns
    /// A copy of the binding, or `None` if the name is bound nowhere.
    pub(crate) fn lookup(&self, name: &str, scope: Option<&Scope<'_>>) -> Option<Binding> {
        scope.and_then(|scope| scope.lookup(name))
             .or_else(|| self.globals.get(name).cloned())
    }

    /// Evaluates an identifier expression.
    ///
    /// Slots yield their current value, raw bindings their value verbatim.
    ///
    /// # Errors
    /// Returns `UndefinedVariable` if the name is bound nowhere.
    pub(crate) fn eval_identifier(&self,
                                  name: &str,
                                  scope: Option<&Scope<'_>>,
                                  line: usize)
                                  -> EvalResult<Value> {
        self.lookup(name, scope)
            .map(|binding| binding.value().clone())
            .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.to_string(),
                                                             line })
    }

    /// Creates a binding in the current scope, or in the globals at the top
    /// level. An existing binding of the same name in that scope is
    /// replaced; outer bindings are shadowed.
    pub(crate) fn declare(&mut self, name: &str, binding: Binding, scope: Option<&Scope<'_>>) {
        match scope {
            Some(scope) => scope.declare(name, binding),
            None => {
                self.globals.insert(name.to_string(), binding);
            },
        }
    }

    /// Checks that `set name = ...` has a target.
    ///
    /// # Errors
    /// - `UndeclaredVariable` if nothing binds `name`.
    /// - `InvalidVariable` if the nearest binding is raw.
    pub(crate) fn check_assignable(&self,
                                   name: &str,
                                   scope: Option<&Scope<'_>>,
                                   line: usize)
                                   -> EvalResult<()> {
        match self.lookup(name, scope) {
            Some(Binding::Slot(_)) => Ok(()),
            Some(Binding::Raw(_)) => Err(RuntimeError::InvalidVariable { name: name.to_string(),
                                                                         line }),
            None => Err(RuntimeError::UndeclaredVariable { name: name.to_string(),
                                                           line }),
        }
    }

    /// Stores `value` into the nearest existing binding of `name`.
    ///
    /// Never creates a binding. The slot keeps its declared tag whatever the
    /// new value is.
    ///
    /// # Errors
    /// Same as [`Context::check_assignable`].
    pub(crate) fn assign(&mut self,
                         name: &str,
                         value: Value,
                         scope: Option<&Scope<'_>>,
                         line: usize)
                         -> EvalResult<()> {
        if let Some(owner) = scope.and_then(|scope| scope.owner(name)) {
            return owner.update(name, |binding| binding.assign(value, name, line))
                        .unwrap_or_else(|| {
                            Err(RuntimeError::UndeclaredVariable { name: name.to_string(),
                                                                   line })
                        });
        }

        match self.globals.get_mut(name) {
            Some(binding) => binding.assign(value, name, line),
            None => Err(RuntimeError::UndeclaredVariable { name: name.to_string(),
                                                           line }),
        }
    }
}
