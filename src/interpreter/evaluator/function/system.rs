use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
    util::num::f64_to_exit_code,
};

/// Number of characters in a text; `null` for anything else.
pub fn length(_context: &mut Context, args: &[Value], _line: usize) -> EvalResult<Value> {
    match args.first() {
        Some(Value::Text(text)) => {
            Ok(Value::Integer(i64::try_from(text.chars().count()).unwrap_or(i64::MAX)))
        },
        _ => Ok(Value::Null),
    }
}

/// Returns the type tag of a global as text.
///
/// Untagged slots and raw host constants report `null`.
///
/// # Errors
/// Returns `UndefinedGlobal` if no global has that name.
///
/// # Example
/// ```
/// use dav::{
///     interpreter::{
///         evaluator::{core::Context, function::system::get_type},
///         value::core::Value,
///     },
///     parse,
/// };
///
/// let mut context = Context::new();
/// context.run(&parse("Num count = 3").unwrap()).unwrap();
///
/// let tag = get_type(&mut context, &[Value::from("count")], 1).unwrap();
/// assert_eq!(tag, Value::from("DAV.Num"));
/// assert!(get_type(&mut context, &[Value::from("missing")], 1).is_err());
/// ```
pub fn get_type(context: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let name = args.first().map(ToString::to_string).unwrap_or_default();

    match context.globals.get(&name) {
        Some(binding) => Ok(binding.tag().map_or(Value::Null, |tag| Value::from(tag.as_str()))),
        None => Err(RuntimeError::UndefinedGlobal { name, line }),
    }
}

/// Stops the program with the given exit status, `0` by default.
///
/// # Errors
/// Always returns `RuntimeError::Exit`, which unwinds to the caller of the
/// run.
pub fn sys_exit(_context: &mut Context, args: &[Value], _line: usize) -> EvalResult<Value> {
    let code = args.first().map_or(0, |code| f64_to_exit_code(code.to_number()));
    Err(RuntimeError::Exit { code })
}

/// Removes a global variable. Deleting a missing global does nothing.
pub fn sys_delete(context: &mut Context, args: &[Value], _line: usize) -> EvalResult<Value> {
    if let Some(name) = args.first() {
        context.globals.remove(&name.to_string());
    }
    Ok(Value::Null)
}
