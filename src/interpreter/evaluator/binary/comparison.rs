use std::cmp::Ordering;

use crate::{
    ast::Operator,
    interpreter::{evaluator::core::Context, value::core::Value},
};

impl Context {
    /// Evaluates a comparison between two values.
    ///
    /// Supports `==` and `!=` through [`Value::loose_eq`], so values of
    /// different kinds can compare equal (`1 == "1"`).
    ///
    /// Relational operators (`<`, `>`, `<=`, `>=`) compare two texts
    /// lexicographically. Any other pair is compared by numeric value, and a
    /// NaN on either side makes every relational comparison false.
    ///
    /// # Parameters
    /// - `op`: Comparison operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    ///
    /// # Returns
    /// The outcome of the comparison.
    ///
    /// # Example
    /// ```
    /// use dav::{
    ///     ast::Operator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// assert!(Context::eval_comparison(Operator::Less, &Value::from("apple"), &Value::from("banana")));
    /// assert!(Context::eval_comparison(Operator::GreaterEqual, &Value::Real(2.5), &Value::from("2")));
    /// assert!(!Context::eval_comparison(Operator::Less, &Value::Integer(1), &Value::from("x")));
    /// ```
    #[must_use]
    pub fn eval_comparison(op: Operator, left: &Value, right: &Value) -> bool {
        match op {
            Operator::Equal => return left.loose_eq(right),
            Operator::NotEqual => return !left.loose_eq(right),
            _ => {},
        }

        let ordering = match (left, right) {
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
            _ => left.to_number().partial_cmp(&right.to_number()),
        };

        let Some(ordering) = ordering else {
            return false;
        };

        match op {
            Operator::Less => ordering == Ordering::Less,
            Operator::Greater => ordering == Ordering::Greater,
            Operator::LessEqual => ordering != Ordering::Greater,
            Operator::GreaterEqual => ordering != Ordering::Less,
            _ => false,
        }
    }
}
