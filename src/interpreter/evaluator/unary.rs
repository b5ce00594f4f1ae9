use crate::{
    ast::Operator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `-`: numeric negation. Integers stay integers unless negation
    ///   overflows; everything else is coerced with [`Value::to_number`].
    /// - `+`: numeric coercion. Integers and reals pass through unchanged.
    /// - `!`: logical negation of the value's truthiness.
    ///
    /// # Parameters
    /// - `op`: Unary operator.
    /// - `value`: Input value.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The computed `Value` wrapped in `EvalResult`.
    ///
    /// # Errors
    /// Returns `UnknownOperator` for operators that have no prefix form.
    ///
    /// # Example
    /// ```
    /// use dav::{
    ///     ast::Operator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let v = Context::eval_unary(Operator::Minus, &Value::Integer(5), 1).unwrap();
    /// assert_eq!(v, Value::Integer(-5));
    ///
    /// let v = Context::eval_unary(Operator::Minus, &Value::Integer(0), 1).unwrap();
    /// assert!(matches!(v, Value::Real(z) if z == 0.0 && z.is_sign_negative()));
    ///
    /// let v = Context::eval_unary(Operator::Plus, &Value::from("2.5"), 1).unwrap();
    /// assert_eq!(v, Value::Real(2.5));
    ///
    /// let v = Context::eval_unary(Operator::Not, &Value::from(""), 1).unwrap();
    /// assert_eq!(v, Value::Bool(true));
    /// ```
    pub fn eval_unary(op: Operator, value: &Value, line: usize) -> EvalResult<Value> {
        match op {
            Operator::Minus => match value {
                Value::Integer(0) => Ok(Value::Real(-0.0)),
                Value::Integer(n) => {
                    Ok(n.checked_neg().map_or_else(|| Value::Real(-value.to_number()), Value::Integer))
                },
                _ => Ok(Value::Real(-value.to_number())),
            },
            Operator::Plus => match value {
                Value::Integer(_) | Value::Real(_) => Ok(value.clone()),
                _ => Ok(Value::Real(value.to_number())),
            },
            Operator::Not => Ok(Value::Bool(!value.is_truthy())),
            _ => Err(RuntimeError::UnknownOperator { operator: op.to_string(),
                                                     line }),
        }
    }
}
