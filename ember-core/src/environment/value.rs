use std::{cell::RefCell, collections::{HashMap, HashSet}, fmt::Display, rc::Rc};

use crate::{eval::prelude::RuntimeErrorType, parser::prelude::Statement};

use super::environment::Environment;

pub const TRUE: Value = Value::Boolean { value: true };
pub const FALSE: Value = Value::Boolean { value: false };
pub const NULL: Value = Value::Null;

pub type Properties = Rc<RefCell<HashMap<String, Value>>>;

pub type NativeCallback = dyn Fn(Vec<Value>, &Environment) -> Result<Value, RuntimeErrorType>;

#[derive(Clone)]
pub enum Value {
    Number {
        value: f64
    },
    Boolean {
        value: bool
    },
    Null,
    Object {
        properties: Properties
    },
    NativeFn(NativeFunction),
    Function(Rc<FunctionValue>),
}

impl Value {
    pub fn number(value: f64) -> Self {
        Self::Number { value }
    }

    pub fn object(properties: HashMap<String, Value>) -> Self {
        Self::Object { properties: Rc::new(RefCell::new(properties)) }
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Number { .. } => ValueType::Number,
            Self::Boolean { .. } => ValueType::Boolean,
            Self::Null => ValueType::Null,
            Self::Object { .. } => ValueType::Object,
            Self::NativeFn(_) => ValueType::NativeFn,
            Self::Function(_) => ValueType::Function,
        }
    }

    /// Reads a property when `self` is an object.
    pub fn property(&self, key: &str) -> Option<Value> {
        match self {
            Self::Object { properties } => properties.borrow().get(key).cloned(),
            _ => None
        }
    }
}

// Objects and functions compare by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number { value: left }, Self::Number { value: right }) => left == right,
            (Self::Boolean { value: left }, Self::Boolean { value: right }) => left == right,
            (Self::Null, Self::Null) => true,
            (Self::Object { properties: left }, Self::Object { properties: right }) => Rc::ptr_eq(left, right),
            (Self::NativeFn(left), Self::NativeFn(right)) => Rc::ptr_eq(&left.call, &right.call),
            (Self::Function(left), Self::Function(right)) => Rc::ptr_eq(left, right),
            _ => false
        }
    }
}

impl Value {
    /// `visiting` holds the objects on the current render path; meeting one
    /// again prints `{...}` instead of recursing.
    fn render(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        visiting: &mut HashSet<*const RefCell<HashMap<String, Value>>>
    ) -> std::fmt::Result {
        match self {
            Value::Number { value } => write!(f, "{value}"),
            Value::Boolean { value } => write!(f, "{value}"),
            Value::Null => write!(f, "null"),
            Value::Object { properties } => {
                let id = Rc::as_ptr(properties);

                if !visiting.insert(id) {
                    return write!(f, "{{...}}");
                }

                let properties = properties.borrow();

                if properties.is_empty() {
                    visiting.remove(&id);
                    return write!(f, "{{}}");
                }

                let mut keys = properties.keys().collect::<Vec<&String>>();
                keys.sort();

                write!(f, "{{ ")?;

                for (i, key) in keys.into_iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }

                    write!(f, "{key}: ")?;
                    properties[key].render(f, visiting)?;
                }

                visiting.remove(&id);

                write!(f, " }}")
            },
            Value::NativeFn(native) => write!(f, "<native fn {}>", native.name),
            Value::Function(function) => write!(f, "<fn {}>", function.name),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.render(f, &mut HashSet::new())
    }
}

// Objects list their keys only.
impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Number { value } => f.debug_struct("Number").field("value", value).finish(),
            Value::Boolean { value } => f.debug_struct("Boolean").field("value", value).finish(),
            Value::Null => write!(f, "Null"),
            Value::Object { properties } => {
                let mut keys = properties.borrow().keys().cloned().collect::<Vec<String>>();
                keys.sort();

                f.debug_struct("Object")
                    .field("at", &Rc::as_ptr(properties))
                    .field("keys", &keys)
                    .finish()
            },
            Value::NativeFn(native) => write!(f, "{native:?}"),
            Value::Function(function) => write!(f, "{function:?}"),
        }
    }
}

#[derive(Clone)]
pub struct NativeFunction {
    pub name: String,
    pub call: Rc<NativeCallback>,
}

impl NativeFunction {
    pub fn new(
        name: impl Into<String>,
        call: impl Fn(Vec<Value>, &Environment) -> Result<Value, RuntimeErrorType> + 'static
    ) -> Self {
        Self {
            name: name.into(),
            call: Rc::new(call),
        }
    }
}

impl std::fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NativeFunction({})", self.name)
    }
}

/// A closure: parameters and body plus the scope it was created in.
pub struct FunctionValue {
    pub name: String,
    pub parameters: Vec<String>,
    pub body: Vec<Statement>,
    pub declaration_env: Environment,
}

impl FunctionValue {
    pub fn new(
        name: impl Into<String>,
        parameters: Vec<String>,
        body: Vec<Statement>,
        declaration_env: Environment
    ) -> Self {
        Self {
            name: name.into(),
            parameters,
            body,
            declaration_env,
        }
    }
}

impl std::fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionValue")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .field("body", &self.body.len())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Number,
    Boolean,
    Null,
    Object,
    NativeFn,
    Function,
}

impl Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value_type = match self {
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Null => "null",
            Self::Object => "object",
            Self::NativeFn => "native-fn",
            Self::Function => "function",
        };

        write!(f, "{value_type}")
    }
}
