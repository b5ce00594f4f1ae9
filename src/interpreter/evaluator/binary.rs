/// Operator dispatch.
///
/// Routes every binary operator to its arithmetic, power or comparison
/// handler.
pub mod core;

/// Addition, subtraction, multiplication and division.
///
/// Integer arithmetic is exact and falls back to real arithmetic when it
/// overflows or, for division, when the quotient is not an integer.
pub mod arithmetic;

/// Exponentiation.
pub mod power;

/// Equality and relational comparisons.
///
/// Equality is loose; relational operators compare texts lexicographically
/// and everything else numerically.
pub mod comparison;
