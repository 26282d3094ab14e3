pub mod error;

pub mod prelude {
    pub use super::{
        error::*,
        evaluate,
        eval_statement,
        eval_expression,
        call_value
    };
}


use std::collections::HashMap;

use crate::{
    environment::prelude::{Environment, Value, NULL},
    lexer::prelude::BinaryOperator,
    parser::prelude::{
        AssignmentExpr, BinaryExpr, CallExpr, Expression, MemberExpr, ObjectLiteral, Program,
        Statement, VarDeclaration
    },
    utils::prelude::SrcSpan
};
use error::{runtime_error, RuntimeError, RuntimeErrorType};

/// Evaluates every statement of `program` in `env`, yielding the value of the last one.
pub fn evaluate(program: &Program, env: &Environment) -> Result<Value, RuntimeError> {
    eval_body(&program.statements, env)
}

fn eval_body(statements: &[Statement], env: &Environment) -> Result<Value, RuntimeError> {
    let mut result = NULL;

    for statement in statements {
        result = eval_statement(statement, env)?;
    }

    Ok(result)
}

pub fn eval_statement(statement: &Statement, env: &Environment) -> Result<Value, RuntimeError> {
    tracing::trace!(location = %statement.location(), "statement");

    match statement {
        Statement::VarDeclaration(declaration) => eval_var_declaration(declaration, env),
        Statement::Expression(expression) => eval_expression(expression, env)
    }
}

fn eval_var_declaration(declaration: &VarDeclaration, env: &Environment) -> Result<Value, RuntimeError> {
    let value = match &declaration.value {
        Some(value) => eval_expression(value, env)?,
        None => NULL
    };

    env.declare_var(&declaration.identifier.symbol, value, declaration.constant)
        .map_err(|error| RuntimeError::new(error, declaration.location))
}

pub fn eval_expression(expression: &Expression, env: &Environment) -> Result<Value, RuntimeError> {
    match expression {
        Expression::NumericLiteral(literal) => Ok(Value::number(literal.value)),
        Expression::Identifier(ident) => env.lookup_var(&ident.symbol)
            .map_err(|error| RuntimeError::new(error, ident.location)),
        Expression::Object(object) => eval_object(object, env),
        Expression::Call(call) => eval_call(call, env),
        Expression::Assignment(assignment) => eval_assignment(assignment, env),
        Expression::Binary(binary) => eval_binary(binary, env),
        Expression::Member(member) => eval_member(member, env),
    }
}

fn eval_object(object: &ObjectLiteral, env: &Environment) -> Result<Value, RuntimeError> {
    let mut properties = HashMap::with_capacity(object.properties.len());

    for property in &object.properties {
        let value = match &property.value {
            Some(value) => eval_expression(value, env)?,
            None => env.lookup_var(&property.key)
                .map_err(|error| RuntimeError::new(error, property.location))?
        };

        properties.insert(property.key.clone(), value);
    }

    Ok(Value::object(properties))
}

fn eval_call(call: &CallExpr, env: &Environment) -> Result<Value, RuntimeError> {
    let callee = eval_expression(&call.caller, env)?;

    let args = call.args.iter()
        .map(|arg| eval_expression(arg, env))
        .collect::<Result<Vec<Value>, RuntimeError>>()?;

    call_value(callee, args, env, call.location)
}

/// Invokes `callee` with already evaluated `args`; `env` is the calling scope.
pub fn call_value(
    callee: Value,
    args: Vec<Value>,
    env: &Environment,
    location: SrcSpan
) -> Result<Value, RuntimeError> {
    match callee {
        Value::NativeFn(native) => {
            tracing::debug!(name = %native.name, args = args.len(), "call native");

            (native.call)(args, env).map_err(|error| RuntimeError::new(error, location))
        },
        Value::Function(function) => {
            tracing::debug!(name = %function.name, args = args.len(), "call");

            if args.len() < function.parameters.len() {
                return runtime_error(
                    RuntimeErrorType::ArityMismatch {
                        name: function.name.clone(),
                        expected: function.parameters.len(),
                        got: args.len()
                    },
                    location
                );
            }

            let scope = Environment::with_parent(&function.declaration_env);

            for (parameter, arg) in function.parameters.iter().zip(args) {
                scope.declare_var(parameter, arg, false)
                    .map_err(|error| RuntimeError::new(error, location))?;
            }

            eval_body(&function.body, &scope)
        },
        other => runtime_error(
            RuntimeErrorType::NotCallable { value_type: other.value_type() },
            location
        )
    }
}

fn eval_assignment(assignment: &AssignmentExpr, env: &Environment) -> Result<Value, RuntimeError> {
    match assignment.assignee.as_ref() {
        Expression::Identifier(ident) => {
            let value = eval_expression(&assignment.value, env)?;

            env.assign_var(&ident.symbol, value)
                .map_err(|error| RuntimeError::new(error, assignment.location))
        },
        Expression::Member(member) => {
            let object = eval_expression(&member.object, env)?;
            let key = member_key(member, env)?;

            let properties = match object {
                Value::Object { properties } => properties,
                other => return runtime_error(
                    RuntimeErrorType::NotAnObject { key, value_type: other.value_type() },
                    member.object.location()
                )
            };

            let value = eval_expression(&assignment.value, env)?;

            properties.borrow_mut().insert(key, value.clone());

            Ok(value)
        },
        other => runtime_error(
            RuntimeErrorType::InvalidAssignmentTarget { target: other.to_string() },
            other.location()
        )
    }
}

fn eval_member(member: &MemberExpr, env: &Environment) -> Result<Value, RuntimeError> {
    let object = eval_expression(&member.object, env)?;
    let key = member_key(member, env)?;

    if !matches!(object, Value::Object { .. }) {
        return runtime_error(
            RuntimeErrorType::NotAnObject { key, value_type: object.value_type() },
            member.object.location()
        );
    }

    match object.property(&key) {
        Some(value) => Ok(value),
        None => runtime_error(RuntimeErrorType::UnknownProperty { key }, member.property.location())
    }
}

/// `.name` keys by the identifier itself, `[expr]` by the rendered value of `expr`.
fn member_key(member: &MemberExpr, env: &Environment) -> Result<String, RuntimeError> {
    if !member.computed {
        if let Expression::Identifier(ident) = member.property.as_ref() {
            return Ok(ident.symbol.clone());
        }
    }

    let key = eval_expression(&member.property, env)?;

    match key {
        Value::Number { .. } | Value::Boolean { .. } | Value::Null => Ok(key.to_string()),
        other => runtime_error(
            RuntimeErrorType::InvalidPropertyKey { value_type: other.value_type() },
            member.property.location()
        )
    }
}

fn eval_binary(binary: &BinaryExpr, env: &Environment) -> Result<Value, RuntimeError> {
    let left = eval_expression(&binary.left, env)?;
    let right = eval_expression(&binary.right, env)?;

    match (left, right) {
        (
            Value::Number { value: left_value },
            Value::Number { value: right_value }
        ) => {
            // IEEE 754 semantics: x / 0 and x % 0 are not trapped.
            let value = match binary.operator {
                BinaryOperator::Plus => left_value + right_value,
                BinaryOperator::Minus => left_value - right_value,
                BinaryOperator::Mult => left_value * right_value,
                BinaryOperator::Div => left_value / right_value,
                BinaryOperator::Rem => left_value % right_value,
            };

            Ok(Value::number(value))
        },
        (left, right) => runtime_error(
            RuntimeErrorType::TypeMismatch {
                operator: binary.operator,
                left: left.value_type(),
                right: right.value_type()
            },
            binary.location
        )
    }
}
