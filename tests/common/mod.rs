//! Shared functions under test for the integration suites.
#![allow(dead_code)]

use tabletest::prelude::*;

/// Integer division; raises `ZeroDivision` on a zero divisor.
pub fn div(args: &[Value], _kwargs: &Kwargs) -> Result<Value, Raised> {
    match args {
        [Value::Int(_), Value::Int(0)] => Err(Raised::zero_division("integer division by zero")),
        [Value::Int(a), Value::Int(b)] => Ok(Value::from(a / b)),
        _ => Err(Raised::type_error("div takes two ints")),
    }
}

/// `greet(name, greeting="Hello")`
pub fn greet(args: &[Value], kwargs: &Kwargs) -> Result<Value, Raised> {
    let [Value::Str(name)] = args else {
        return Err(Raised::type_error("greet takes one string"));
    };
    let greeting = match kwargs.get("greeting") {
        Some(Value::Str(greeting)) => greeting.to_string(),
        Some(other) => {
            return Err(Raised::type_error(format!(
                "greeting must be a string, not {}",
                other.type_name()
            )))
        }
        None => "Hello".to_string(),
    };
    Ok(Value::from(format!("{}, {}!", greeting, name)))
}

/// Looks a color up by name; raises `Key` for unknown names.
pub fn color(args: &[Value], _kwargs: &Kwargs) -> Result<Value, Raised> {
    match args.first() {
        Some(Value::Str(name)) => match &**name {
            "red" => Ok(Value::from(0xff0000)),
            "green" => Ok(Value::from(0x00ff00)),
            other => Err(Raised::key_error(other.to_string())),
        },
        _ => Err(Raised::type_error("color takes a name")),
    }
}

pub fn quiet() -> RunConfig {
    RunConfig::quiet().with_colors(false)
}
