use thiserror::Error;

use crate::{
    environment::prelude::ValueType,
    lexer::prelude::BinaryOperator,
    utils::prelude::SrcSpan
};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeErrorType {
    #[error("cannot declare variable `{name}` since it is already declared in this scope")]
    DuplicateDeclaration { name: String },
    #[error("cannot resolve variable `{name}` since it does not exist")]
    UnresolvedVariable { name: String },
    #[error("cannot reassign constant `{name}`")]
    ConstAssignment { name: String },
    #[error("invalid assignment target `{target}`")]
    InvalidAssignmentTarget { target: String },
    #[error("cannot call a value of type `{value_type}`")]
    NotCallable { value_type: ValueType },
    #[error("function `{name}` expects {expected} argument(s), but {got} were given")]
    ArityMismatch { name: String, expected: usize, got: usize },
    #[error("cannot apply `{operator}` to `{left}` and `{right}`")]
    TypeMismatch { operator: BinaryOperator, left: ValueType, right: ValueType },
    #[error("cannot access property `{key}` on a value of type `{value_type}`")]
    NotAnObject { key: String, value_type: ValueType },
    #[error("object has no property `{key}`")]
    UnknownProperty { key: String },
    #[error("a value of type `{value_type}` cannot be used as a property key")]
    InvalidPropertyKey { value_type: ValueType },
    #[error("{message}")]
    Native { message: String },
}

impl RuntimeErrorType {
    pub fn title(&self) -> &'static str {
        match self {
            Self::DuplicateDeclaration { .. } => "Duplicate declaration",
            Self::UnresolvedVariable { .. } => "Unresolved variable",
            Self::ConstAssignment { .. } => "Assignment to constant",
            Self::InvalidAssignmentTarget { .. } => "Invalid assignment target",
            Self::NotCallable { .. } => "Not callable",
            Self::ArityMismatch { .. } => "Arity mismatch",
            Self::TypeMismatch { .. } => "Type mismatch",
            Self::NotAnObject { .. } => "Not an object",
            Self::UnknownProperty { .. } => "Unknown property",
            Self::InvalidPropertyKey { .. } => "Invalid property key",
            Self::Native { .. } => "Native function failed",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{error}")]
pub struct RuntimeError {
    pub error: RuntimeErrorType,
    pub location: SrcSpan
}

impl RuntimeError {
    pub fn new(error: RuntimeErrorType, location: SrcSpan) -> Self {
        Self { error, location }
    }
}

pub fn runtime_error<T>(error: RuntimeErrorType, location: SrcSpan) -> Result<T, RuntimeError> {
    Err(RuntimeError { error, location })
}
