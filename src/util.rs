/// Numeric conversion helpers.
///
/// Safe conversions between `i64`, `usize` and `f64` that never lose data
/// silently. Each helper either converts exactly or reports the caller's
/// error.
pub mod num;
