use crate::{
    ast::Operator,
    interpreter::{evaluator::core::Context, value::core::Value},
};

impl Context {
    /// Evaluates `+`, `-`, `*` and `/`.
    ///
    /// - `+` with a text operand on either side concatenates the display
    ///   forms of both operands.
    /// - Two integers use checked integer arithmetic; on overflow the result
    ///   is computed with reals instead. Division stays integral only when it
    ///   is exact, so `7 / 2` is `3.5`.
    /// - Any other combination coerces both operands with
    ///   [`Value::to_number`]. Division by zero follows real arithmetic and
    ///   yields an infinity or NaN rather than an error.
    ///
    /// # Example
    /// ```
    /// use dav::{
    ///     ast::Operator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let quotient = Context::eval_arithmetic(Operator::Slash, &Value::Integer(7), &Value::Integer(2));
    /// assert_eq!(quotient, Value::Real(3.5));
    ///
    /// let text = Context::eval_arithmetic(Operator::Plus, &Value::from("n = "), &Value::Integer(1));
    /// assert_eq!(text, Value::from("n = 1"));
    /// ```
    #[must_use]
    pub fn eval_arithmetic(op: Operator, left: &Value, right: &Value) -> Value {
        if op == Operator::Plus && (left.is_text() || right.is_text()) {
            return Value::Text(format!("{left}{right}"));
        }

        if let (Value::Integer(a), Value::Integer(b)) = (left, right)
           && let Some(result) = Self::integer_arithmetic(op, *a, *b)
        {
            return Value::Integer(result);
        }

        Value::Real(Self::real_arithmetic(op, left.to_number(), right.to_number()))
    }

    /// Exact integer arithmetic, or `None` when the result is not an exact
    /// integer.
    fn integer_arithmetic(op: Operator, a: i64, b: i64) -> Option<i64> {
        match op {
            Operator::Plus => a.checked_add(b),
            Operator::Minus => a.checked_sub(b),
            Operator::Star => a.checked_mul(b),
            Operator::Slash => match a.checked_rem(b) {
                Some(0) => a.checked_div(b),
                _ => None,
            },
            _ => None,
        }
    }

    fn real_arithmetic(op: Operator, a: f64, b: f64) -> f64 {
        match op {
            Operator::Plus => a + b,
            Operator::Minus => a - b,
            Operator::Star => a * b,
            Operator::Slash => a / b,
            _ => f64::NAN,
        }
    }
}
