use crate::{
    ast::Operator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a binary operation between two values.
    ///
    /// Arithmetic operators go to `eval_arithmetic`, `**` goes to
    /// `eval_pow`, and the equality and relational operators go to
    /// `eval_comparison`. Both operands have already been evaluated, left
    /// first.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    ///
    /// # Errors
    /// Returns `UnknownOperator` for `=` and `!`, which parse in binary
    /// position but have no binary meaning.
    ///
    /// # Example
    /// ```
    /// use dav::{
    ///     ast::Operator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let result = Context::eval_binary(Operator::Plus, &Value::Integer(3), &Value::Integer(4), 1);
    /// assert_eq!(result.unwrap(), Value::Integer(7));
    ///
    /// let result = Context::eval_binary(Operator::Equal, &Value::Integer(1), &Value::from("1"), 1);
    /// assert_eq!(result.unwrap(), Value::Bool(true));
    /// ```
    pub fn eval_binary(op: Operator, left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
        use Operator::{
            Assign, Equal, Greater, GreaterEqual, Less, LessEqual, Minus, Not, NotEqual, Plus,
            Power, Slash, Star,
        };

        match op {
            Plus | Minus | Star | Slash => Ok(Self::eval_arithmetic(op, left, right)),
            Power => Ok(Self::eval_pow(left, right)),
            Equal | NotEqual | Less | Greater | LessEqual | GreaterEqual => {
                Ok(Value::Bool(Self::eval_comparison(op, left, right)))
            },
            Not | Assign => Err(RuntimeError::UnknownOperator { operator: op.to_string(),
                                                                line }),
        }
    }
}
