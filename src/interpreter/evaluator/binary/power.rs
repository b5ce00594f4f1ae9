use crate::interpreter::{evaluator::core::Context, value::core::Value};

impl Context {
    /// Evaluates an exponentiation operation.
    ///
    /// Integer-integer exponentiation with a non-negative exponent uses
    /// checked arithmetic. Negative exponents, overflowing results and all
    /// other operand kinds are computed with `powf` on the operands'
    /// numeric values.
    ///
    /// A NaN exponent, or an infinite exponent on a base of magnitude one,
    /// yields NaN.
    ///
    /// # Parameters
    /// - `base`: The base value.
    /// - `exponent`: The exponent value.
    ///
    /// # Returns
    /// The value of `base ** exponent`.
    ///
    /// # Example
    /// ```
    /// use dav::interpreter::{evaluator::core::Context, value::core::Value};
    ///
    /// let result = Context::eval_pow(&Value::Integer(2), &Value::Integer(10));
    /// assert_eq!(result, Value::Integer(1024));
    ///
    /// let result = Context::eval_pow(&Value::Integer(2), &Value::Integer(-1));
    /// assert_eq!(result, Value::Real(0.5));
    /// ```
    #[must_use]
    pub fn eval_pow(base: &Value, exponent: &Value) -> Value {
        if let (Value::Integer(b), Value::Integer(e)) = (base, exponent)
           && let Ok(e) = u32::try_from(*e)
           && let Some(result) = b.checked_pow(e)
        {
            return Value::Integer(result);
        }

        Value::Real(real_pow(base.to_number(), exponent.to_number()))
    }
}

/// `powf` with the NaN cases of host-number exponentiation.
fn real_pow(base: f64, exponent: f64) -> f64 {
    if exponent.is_nan() || (exponent.is_infinite() && (base.abs() - 1.0).abs() < f64::EPSILON) {
        return f64::NAN;
    }
    base.powf(exponent)
}
