/// Converts an `i64` to `f64`.
///
/// Values beyond `2^53` in magnitude are rounded to the nearest representable
/// real.
///
/// ## Example
/// ```
/// use dav::util::num::i64_to_f64;
///
/// assert_eq!(i64_to_f64(42), 42.0);
/// ```
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn i64_to_f64(value: i64) -> f64 {
    value as f64
}

/// Converts a `u64` to `f64`, rounding beyond `2^53` like [`i64_to_f64`].
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn u64_to_f64(value: u64) -> f64 {
    value as f64
}

/// Converts an `f64` to an `i32` process exit code.
///
/// The fractional part is truncated, out-of-range values saturate and NaN
/// becomes `0`.
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub const fn f64_to_exit_code(value: f64) -> i32 {
    value as i32
}
