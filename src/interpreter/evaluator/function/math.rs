use rand::Rng;

use crate::interpreter::{
    evaluator::core::{Context, EvalResult},
    value::core::Value,
};

/// Reads argument `index` as a number. Missing arguments read as NaN.
fn number_arg(args: &[Value], index: usize) -> f64 {
    args.get(index).map_or(f64::NAN, Value::to_number)
}

/// Applies a unary real function to the first argument.
///
/// The generated builtins coerce their argument with [`Value::to_number`]
/// and always return a [`Value::Real`]. A missing argument is NaN, so the
/// result is NaN as well.
///
/// # Example
/// ```
/// use dav::interpreter::{
///     evaluator::{core::Context, function::math::sqrt},
///     value::core::Value,
/// };
///
/// let mut context = Context::new();
/// let r = sqrt(&mut context, &[Value::Integer(16)], 1).unwrap();
///
/// assert_eq!(r, Value::Real(4.0));
/// ```
macro_rules! real_builtin {
    ($fname:ident, $real_fn:ident) => {
        pub fn $fname(_context: &mut Context, args: &[Value], _line: usize) -> EvalResult<Value> {
            Ok(Value::Real(number_arg(args, 0).$real_fn()))
        }
    };
}

real_builtin!(sqrt, sqrt);
real_builtin!(abs, abs);
real_builtin!(ceil, ceil);
real_builtin!(floor, floor);
real_builtin!(log, ln);
real_builtin!(log2, log2);
real_builtin!(log10, log10);
real_builtin!(sin, sin);
real_builtin!(cos, cos);
real_builtin!(tan, tan);
real_builtin!(atan, atan);
real_builtin!(acos, acos);
real_builtin!(asin, asin);
real_builtin!(exp, exp);

/// Rounds to the nearest integer, with halves going towards positive
/// infinity (`__round(-2.5)` is `-2`).
pub fn round(_context: &mut Context, args: &[Value], _line: usize) -> EvalResult<Value> {
    Ok(Value::Real((number_arg(args, 0) + 0.5).floor()))
}

/// `base ** exponent` on reals.
pub fn pow(_context: &mut Context, args: &[Value], _line: usize) -> EvalResult<Value> {
    Ok(Context::eval_pow(&Value::Real(number_arg(args, 0)), &Value::Real(number_arg(args, 1))))
}

/// The larger of two numbers; NaN if either is NaN.
pub fn max(_context: &mut Context, args: &[Value], _line: usize) -> EvalResult<Value> {
    let (a, b) = (number_arg(args, 0), number_arg(args, 1));
    Ok(Value::Real(if a.is_nan() || b.is_nan() { f64::NAN } else { a.max(b) }))
}

/// The smaller of two numbers; NaN if either is NaN.
pub fn min(_context: &mut Context, args: &[Value], _line: usize) -> EvalResult<Value> {
    let (a, b) = (number_arg(args, 0), number_arg(args, 1));
    Ok(Value::Real(if a.is_nan() || b.is_nan() { f64::NAN } else { a.min(b) }))
}

/// A uniformly distributed real in `[min, max)`.
///
/// Registered as both `__rand` and `__randFloat`.
pub fn rand(_context: &mut Context, args: &[Value], _line: usize) -> EvalResult<Value> {
    let (min, max) = (number_arg(args, 0), number_arg(args, 1));
    let unit: f64 = rand::thread_rng().gen_range(0.0..1.0);
    Ok(Value::Real(unit.mul_add(max - min, min)))
}

/// A uniformly distributed integer in `[min, max]`.
///
/// Bounds are used as given; fractional bounds shift the range the same way
/// `floor(random * (max - min + 1)) + min` does.
pub fn rand_int(_context: &mut Context, args: &[Value], _line: usize) -> EvalResult<Value> {
    let (min, max) = (number_arg(args, 0), number_arg(args, 1));
    let unit: f64 = rand::thread_rng().gen_range(0.0..1.0);
    Ok(Value::Real((unit * (max - min + 1.0)).floor() + min))
}

/// `true` if the argument is not a number after coercion.
pub fn is_nan(_context: &mut Context, args: &[Value], _line: usize) -> EvalResult<Value> {
    Ok(Value::Bool(number_arg(args, 0).is_nan()))
}

/// `true` if the argument is a finite number after coercion.
pub fn is_finite(_context: &mut Context, args: &[Value], _line: usize) -> EvalResult<Value> {
    Ok(Value::Bool(number_arg(args, 0).is_finite()))
}
