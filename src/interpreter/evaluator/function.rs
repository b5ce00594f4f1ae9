/// The builtin function table.
///
/// Declares every builtin with its informational parameter list and the
/// implementation it dispatches to, and builds the initial function map of
/// a context.
pub mod builtin;
/// Math builtins.
///
/// The `__`-prefixed numeric functions: roots, rounding, logarithms,
/// trigonometry, extrema, random numbers and NaN/finite checks.
pub mod math;
/// Console builtins.
///
/// `write`, `writeln`, `prompt` and `sys_clear`, all of which go through the
/// context's output and input.
pub mod console;
/// System and introspection builtins.
///
/// `length`, `get_type`, `sys_exit` and `sys_delete`.
pub mod system;

/// Function values and calls.
///
/// The `Function` table entry, the builtin signature, and argument binding
/// for user-defined functions.
pub mod core;
