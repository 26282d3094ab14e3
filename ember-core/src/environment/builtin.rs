use std::time::{SystemTime, UNIX_EPOCH};

use crate::eval::prelude::RuntimeErrorType;

use super::{environment::Environment, value::{NativeFunction, Value, NULL}};

pub fn natives() -> Vec<NativeFunction> {
    vec![
        NativeFunction::new("print", print),
        NativeFunction::new("time", time),
    ]
}

pub fn print(args: Vec<Value>, _env: &Environment) -> Result<Value, RuntimeErrorType> {
    let line = args.iter()
        .map(|arg| arg.to_string())
        .collect::<Vec<String>>()
        .join(" ");

    println!("{line}");

    Ok(NULL)
}

pub fn time(_args: Vec<Value>, _env: &Environment) -> Result<Value, RuntimeErrorType> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|err| RuntimeErrorType::Native { message: err.to_string() })?;

    Ok(Value::number(elapsed.as_millis() as f64))
}
