use std::io::{self, Write};

use crate::{
    error::RuntimeError,
    interpreter::{
        environment::{Binding, TypeTag},
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

/// ANSI sequence that clears the terminal and homes the cursor.
const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

fn io_error(line: usize) -> impl FnOnce(io::Error) -> RuntimeError {
    move |source| RuntimeError::Io { source, line }
}

/// Renders arguments separated by single spaces.
fn join_args<'a>(args: impl IntoIterator<Item = &'a Value>) -> String {
    args.into_iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
}

/// Prints all arguments separated by spaces, followed by a newline.
///
/// # Example
/// ```
/// use std::{cell::RefCell, io::Write, rc::Rc};
///
/// use dav::interpreter::{
///     evaluator::{core::Context, function::console::write},
///     value::core::Value,
/// };
///
/// struct Sink(Rc<RefCell<Vec<u8>>>);
///
/// impl Write for Sink {
///     fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
///         self.0.borrow_mut().write(buf)
///     }
///
///     fn flush(&mut self) -> std::io::Result<()> {
///         Ok(())
///     }
/// }
///
/// let buffer = Rc::new(RefCell::new(Vec::new()));
/// let mut context = Context::new();
/// context.set_output(Box::new(Sink(buffer.clone())));
///
/// write(&mut context, &[Value::from("x ="), Value::Integer(3)], 1).unwrap();
/// assert_eq!(String::from_utf8(buffer.borrow().clone()).unwrap(), "x = 3\n");
/// ```
pub fn write(context: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    writeln!(context.output, "{}", join_args(args)).map_err(io_error(line))?;
    Ok(Value::Null)
}

/// Prints an empty line, then the arguments.
///
/// The line break counts as the first printed item, so the arguments follow
/// it after a separating space.
pub fn writeln(context: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let rendered = join_args(args);
    let text = if rendered.is_empty() { "\n".to_string() } else { format!("\n {rendered}") };
    writeln!(context.output, "{text}").map_err(io_error(line))?;
    Ok(Value::Null)
}

/// Asks the user for a line of input and stores it in a global.
///
/// `prompt(message, variableName, davType)` prints the message and a space,
/// reads one line, and stores the answer as text in global `variableName`.
/// The slot is tagged `DAV.<davType>`, `DAV.Text` when the type is omitted,
/// and untagged when the type is falsy.
///
/// # Errors
/// Returns `InvalidArgument` without a variable name, and `Io` if the
/// console cannot be written or read.
pub fn prompt(context: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let Some(variable) = args.get(1) else {
        return Err(RuntimeError::InvalidArgument { function: "prompt".to_string(),
                                                   details:  "missing variable name".to_string(),
                                                   line });
    };
    let message = args.first().map(ToString::to_string).unwrap_or_default();

    write!(context.output, "{message} ").map_err(io_error(line))?;
    context.output.flush().map_err(io_error(line))?;

    let mut answer = String::new();
    context.input.read_line(&mut answer).map_err(io_error(line))?;
    let answer = answer.trim_end_matches(['\n', '\r']).to_string();

    let tag = match args.get(2) {
        None => Some(TypeTag::named("Text")),
        Some(dav_type) if dav_type.is_truthy() => Some(TypeTag::named(&dav_type.to_string())),
        Some(_) => None,
    };

    context.globals.insert(variable.to_string(), Binding::slot(Value::Text(answer), tag));
    Ok(Value::Null)
}

/// Clears the terminal.
pub fn sys_clear(context: &mut Context, _args: &[Value], line: usize) -> EvalResult<Value> {
    write!(context.output, "{CLEAR_SCREEN}").map_err(io_error(line))?;
    context.output.flush().map_err(io_error(line))?;
    Ok(Value::Null)
}
