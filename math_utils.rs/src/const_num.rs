//! `<num>::round` is currently not available in const contexts.
//! This module provides the rounding used to quantize real-valued coefficients.

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

/// Round to the nearest integer, halfway cases away from zero (same as `f64::round`).
///
/// Values outside the `i64` range saturate, as `as` casts do.
///
/// ```
/// use math_utils::const_num::round_f64_to_i64;
///
/// const Q: i64 = round_f64_to_i64(0.5434783 * 32767.);
/// assert_eq!(Q, 17808);
/// assert_eq!(round_f64_to_i64(-2.5), -3);
/// ```
#[must_use]
pub const fn round_f64_to_i64(val: f64) -> i64 {
	let truncated = val as i64;
	let fraction = val - truncated as f64;
	if fraction >= 0.5 {
		truncated + 1
	} else if fraction <= -0.5 {
		truncated - 1
	} else {
		truncated
	}
}
