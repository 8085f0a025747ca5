//! Approximate float comparison
//!
//! Population scripts compare recomputed percentages against stored ones;
//! exact float equality is never the right test for that.

/// Default comparison tolerance.
pub const DEFAULT_TOLERANCE: f64 = 0.0001;

/// Check whether two values are at most [`DEFAULT_TOLERANCE`] apart.
///
/// # Example
/// ```
/// use queryable_populate::approx::approx_equal;
/// assert!(approx_equal(1.0, 1.00005));
/// assert!(!approx_equal(1.0, 1.001));
/// ```
#[inline]
pub fn approx_equal(first: f64, second: f64) -> bool {
    approx_equal_within(first, second, DEFAULT_TOLERANCE)
}

/// Check whether `first` and `second` are at most `tolerance` apart.
///
/// Symmetric in its first two arguments. NaN never compares approximately
/// equal to anything, itself included.
#[inline]
pub fn approx_equal_within(first: f64, second: f64, tolerance: f64) -> bool {
    (first - second).abs() <= tolerance
}
