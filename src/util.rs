/// Numeric conversion helpers.
///
/// This module provides the conversions between integers and `f64` that the
/// evaluator needs when integer values take part in real arithmetic, and the
/// conversion of a real `sys_exit` argument into a process exit code.
pub mod num;
