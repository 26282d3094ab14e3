use std::{cell::RefCell, collections::{HashMap, HashSet}, rc::Rc};

use crate::eval::prelude::RuntimeErrorType;

use super::{builtin, value::{NativeFunction, Value, FALSE, NULL, TRUE}};

#[derive(Default)]
struct Scope {
    store: HashMap<String, Value>,
    constants: HashSet<String>,
    parent: Option<Environment>,
}

/// Shared handle to one scope of the scope chain.
///
/// Cloning the handle does not copy the scope: every clone observes the
/// same bindings, which is what closures rely on.
#[derive(Default, Clone)]
pub struct Environment {
    scope: Rc<RefCell<Scope>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parent(parent: &Environment) -> Self {
        Self {
            scope: Rc::new(RefCell::new(Scope {
                parent: Some(parent.clone()),
                ..Default::default()
            }))
        }
    }

    /// Root scope with the `true`/`false`/`null` constants and the builtin natives.
    pub fn global() -> Self {
        let env = Self::new();

        for (name, value) in [("true", TRUE), ("false", FALSE), ("null", NULL)] {
            env.bind(name, value, true);
        }

        for native in builtin::natives() {
            let name = native.name.clone();
            env.bind(&name, Value::NativeFn(native), true);
        }

        env
    }

    pub fn parent(&self) -> Option<Environment> {
        self.scope.borrow().parent.clone()
    }

    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.scope, &other.scope)
    }

    /// Whether `name` is declared in this scope, ignoring parents.
    pub fn contains(&self, name: &str) -> bool {
        self.scope.borrow().store.contains_key(name)
    }

    pub fn declare_var(&self, name: &str, value: Value, constant: bool) -> Result<Value, RuntimeErrorType> {
        if self.contains(name) {
            return Err(RuntimeErrorType::DuplicateDeclaration { name: name.to_string() });
        }

        tracing::debug!(name, constant, "declare");

        self.bind(name, value.clone(), constant);

        Ok(value)
    }

    pub fn declare_native(
        &self,
        name: &str,
        call: impl Fn(Vec<Value>, &Environment) -> Result<Value, RuntimeErrorType> + 'static
    ) -> Result<Value, RuntimeErrorType> {
        self.declare_var(name, Value::NativeFn(NativeFunction::new(name, call)), true)
    }

    pub fn assign_var(&self, name: &str, value: Value) -> Result<Value, RuntimeErrorType> {
        let env = self.resolve(name)?;
        let mut scope = env.scope.borrow_mut();

        if scope.constants.contains(name) {
            return Err(RuntimeErrorType::ConstAssignment { name: name.to_string() });
        }

        scope.store.insert(name.to_string(), value.clone());

        Ok(value)
    }

    pub fn lookup_var(&self, name: &str) -> Result<Value, RuntimeErrorType> {
        let env = self.resolve(name)?;
        let value = env.scope.borrow().store.get(name).cloned();

        value.ok_or_else(|| RuntimeErrorType::UnresolvedVariable { name: name.to_string() })
    }

    /// Finds the nearest scope, starting from this one, that declares `name`.
    pub fn resolve(&self, name: &str) -> Result<Environment, RuntimeErrorType> {
        let mut env = self.clone();

        loop {
            if env.contains(name) {
                return Ok(env);
            }

            env = match env.parent() {
                Some(parent) => parent,
                None => return Err(RuntimeErrorType::UnresolvedVariable { name: name.to_string() })
            };
        }
    }

    /// Names declared in this scope, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names = self.scope.borrow().store.keys().cloned().collect::<Vec<String>>();
        names.sort();
        names
    }

    fn bind(&self, name: &str, value: Value, constant: bool) {
        let mut scope = self.scope.borrow_mut();

        scope.store.insert(name.to_string(), value);

        if constant {
            scope.constants.insert(name.to_string());
        }
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("names", &self.names())
            .field("parent", &self.parent())
            .finish()
    }
}
