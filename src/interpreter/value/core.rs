use crate::{
    ast::LiteralValue,
    util::num::{i64_to_f64, u64_to_f64},
};

/// Represents a runtime value in the interpreter.
///
/// This enum models all the possible types that can appear in expressions,
/// assignments, function returns, and conditional evaluations.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A integer value (64 bit integer). Produced by NUMBER literals and by
    /// integer arithmetic that stays exact.
    Integer(i64),
    /// A numeric value (double precision floating-point).
    Real(f64),
    /// A text value.
    Text(String),
    /// A boolean value (`true` or `false`).
    /// Produced by comparison operators, `!`, and the boolean keywords.
    Bool(bool),
    /// The absence of a value. Returned by builtins with nothing to report.
    Null,
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<&LiteralValue> for Value {
    fn from(literal: &LiteralValue) -> Self {
        match literal {
            LiteralValue::Integer(n) => Self::Integer(*n),
            LiteralValue::Real(r) => Self::Real(*r),
            LiteralValue::Text(s) => Self::Text(s.clone()),
            LiteralValue::Bool(b) => Self::Bool(*b),
        }
    }
}

impl Value {
    /// Converts the value to a number the way arithmetic sees it.
    ///
    /// - `Null` is `0`, booleans are `0` or `1`.
    /// - Text is trimmed and parsed as a decimal number; empty text is `0`
    ///   and anything unparsable is NaN.
    ///
    /// # Example
    /// ```
    /// use dav::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::from(" 42 ").to_number(), 42.0);
    /// assert_eq!(Value::Bool(true).to_number(), 1.0);
    /// assert_eq!(Value::from("").to_number(), 0.0);
    /// assert!(Value::from("abc").to_number().is_nan());
    /// ```
    #[must_use]
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Integer(n) => i64_to_f64(*n),
            Self::Real(r) => *r,
            Self::Bool(b) => f64::from(u8::from(*b)),
            Self::Null => 0.0,
            Self::Text(s) => parse_numeric_text(s),
        }
    }

    /// Returns the truthiness of the value.
    ///
    /// `false`, `0`, `0.0`, NaN, empty text and `Null` are falsy; everything
    /// else is truthy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Integer(n) => *n != 0,
            Self::Real(r) => *r != 0.0 && !r.is_nan(),
            Self::Text(s) => !s.is_empty(),
            Self::Bool(b) => *b,
            Self::Null => false,
        }
    }

    /// Compares two values with loose equality.
    ///
    /// Values of the same kind compare directly, with integers and reals
    /// compared numerically. `Null` only equals `Null`. A boolean is turned
    /// into `0` or `1` and the comparison is retried. A number compared with
    /// text compares against the text's numeric value.
    ///
    /// # Example
    /// ```
    /// use dav::interpreter::value::core::Value;
    ///
    /// assert!(Value::Integer(1).loose_eq(&Value::from("1")));
    /// assert!(Value::Bool(true).loose_eq(&Value::Integer(1)));
    /// assert!(Value::from("").loose_eq(&Value::Integer(0)));
    /// assert!(!Value::Null.loose_eq(&Value::Integer(0)));
    /// assert!(!Value::from("a").loose_eq(&Value::from("b")));
    /// ```
    #[allow(clippy::float_cmp)]
    #[must_use]
    pub fn loose_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Null, _) | (_, Self::Null) => false,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Bool(_), _) => Self::Real(self.to_number()).loose_eq(other),
            (_, Self::Bool(_)) => self.loose_eq(&Self::Real(other.to_number())),
            _ => self.to_number() == other.to_number(),
        }
    }

    /// Returns `true` if the value is [`Value::Text`].
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text(..))
    }
}

/// Parses text the way numeric coercion does.
///
/// Accepts optional surrounding whitespace, a sign, decimal digits with an
/// optional fraction and exponent, `Infinity`, and `0x`/`0o`/`0b` prefixed
/// integers.
fn parse_numeric_text(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {},
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = trimmed.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix).map_or(f64::NAN, u64_to_f64);
        }
    }

    let has_digit = trimmed.bytes().any(|b| b.is_ascii_digit());
    let decimal_only =
        trimmed.bytes().all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !has_digit || !decimal_only {
        return f64::NAN;
    }

    trimmed.parse().unwrap_or(f64::NAN)
}

/// Formats a real the way scripts print numbers.
///
/// Integral reals print without a fractional part, negative zero prints as
/// `0`, and infinities print as `Infinity` / `-Infinity`. Magnitudes from
/// `1e21` up or below `1e-6` use exponent form with an explicit sign, e.g.
/// `1e+21` and `1.5e-7`.
fn format_real(f: &mut std::fmt::Formatter<'_>, r: f64) -> std::fmt::Result {
    if r.is_infinite() {
        return f.write_str(if r > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if r == 0.0 {
        return f.write_str("0");
    }

    let magnitude = r.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let rendered = format!("{r:e}");
        return match rendered.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                write!(f, "{mantissa}e+{exponent}")
            },
            _ => f.write_str(&rendered),
        };
    }
    write!(f, "{r}")
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => format_real(f, *r),
            Self::Text(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Null => f.write_str("null"),
        }
    }
}
