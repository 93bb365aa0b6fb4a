/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Safely converts an `i64` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds `MAX_SAFE_U64_INT` in absolute
/// value.
///
/// ## Example
/// ```
/// use operanda::util::num::{MAX_SAFE_U64_INT, i64_to_f64_checked};
///
/// let result = i64_to_f64_checked(42, "too big!");
/// assert_eq!(result.unwrap(), 42.0);
///
/// let big = MAX_SAFE_U64_INT as i64 + 1;
/// assert!(i64_to_f64_checked(big, "too big!").is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn i64_to_f64_checked<E>(value: i64, error: E) -> Result<f64, E> {
    if value.unsigned_abs() > MAX_SAFE_U64_INT {
        return Err(error);
    }
    Ok(value as f64)
}

/// Converts an `f64` to `i64` only when nothing is lost: the value must be
/// finite, in range and have no fractional part.
///
/// `2.0` converts, `2.5` does not. Truncation never happens silently.
///
/// ## Errors
/// Returns `Err(error)` for non-finite, out-of-range or fractional values.
///
/// ## Example
/// ```
/// use operanda::util::num::f64_to_i64_exact;
///
/// assert_eq!(f64_to_i64_exact(3.0, ()), Ok(3));
/// assert_eq!(f64_to_i64_exact(2.5, ()), Err(()));
/// assert_eq!(f64_to_i64_exact(f64::NAN, ()), Err(()));
/// assert_eq!(f64_to_i64_exact(1e20, ()), Err(()));
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub fn f64_to_i64_exact<E>(value: f64, error: E) -> Result<i64, E> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(error);
    }
    if value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return Err(error);
    }
    Ok(value as i64)
}

/// Converts a collection length to `i64`, saturating at `i64::MAX`.
///
/// ## Example
/// ```
/// use operanda::util::num::len_to_i64;
///
/// assert_eq!(len_to_i64(3), 3);
/// ```
#[must_use]
pub fn len_to_i64(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}
