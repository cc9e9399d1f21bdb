use std::{borrow::Cow, f64::consts::TAU};

use cordic::{atan_lut::HEADROOM_BITS, FixedPoint};
use math_utils::const_num::round_f64_to_i64;

use crate::{WindowError, WindowingFn};

/// Width of the register the weighted harmonics are summed in.
pub const ACCUMULATOR_WIDTH: u32 = 64;

/// Right shift that takes `a_h · cos` back to the scale of `a_h`: `cos(0)` is about `2^(W-2)`.
#[must_use]
pub const fn product_shift(data_width: u32) -> u32 {
	data_width - HEADROOM_BITS
}

/// A window `w[i] = a0 - a1·cos(2πi/N) + a2·cos(4πi/N) - a3·cos(6πi/N) + ...`
///
/// Coefficients are quantized to `2^(W - headroom_bits) - 1`: one headroom bit keeps
/// the sign, more are needed when the coefficients add up to more than one or the
/// window goes negative. No coefficients at all gives an all-zero window.
#[derive(Debug, Clone, PartialEq)]
pub struct CosineSum {
	coefficients: Cow<'static, [f64]>,
	headroom_bits: u32,
}

impl CosineSum {
	#[must_use]
	pub fn new(coefficients: impl Into<Cow<'static, [f64]>>, headroom_bits: u32) -> Self {
		Self {
			coefficients: coefficients.into(),
			headroom_bits,
		}
	}

	#[must_use]
	pub fn coefficients(&self) -> &[f64] {
		&self.coefficients
	}

	#[must_use]
	pub const fn headroom_bits(&self) -> u32 {
		self.headroom_bits
	}

	/// Number of cosine terms after `a0`.
	#[must_use]
	pub fn harmonics(&self) -> usize {
		self.coefficients.len().saturating_sub(1)
	}

	/// Full-scale value of a `data_width`-bit table of this window.
	///
	/// # Errors
	/// - if the headroom leaves no bits for the value, or none for the sign
	#[allow(clippy::cast_precision_loss)]
	pub fn scale(&self, data_width: u32) -> Result<f64, WindowError> {
		if self.headroom_bits == 0 || self.headroom_bits >= data_width {
			return Err(WindowError::HeadroomOutOfRange {
				headroom_bits: self.headroom_bits,
				data_width,
			});
		}
		Ok(((1_i64 << (data_width - self.headroom_bits)) - 1) as f64)
	}

	/// `round(a_h · scale)` for every coefficient, in accumulator registers.
	fn quantize_at(&self, scale: f64) -> Vec<FixedPoint> {
		self.coefficients
			.iter()
			.map(|a| FixedPoint::new(round_f64_to_i64(a * scale), ACCUMULATOR_WIDTH))
			.collect()
	}

	/// Coefficients quantized to [`CosineSum::scale`], shrunk just enough that no sample
	/// can leave a `data_width`-bit register when every `|cos|` is at most `cos_peak`.
	///
	/// # Errors
	/// - see [`CosineSum::scale`]
	#[allow(clippy::cast_precision_loss)]
	pub fn quantize_within(
		&self,
		data_width: u32,
		cos_peak: i64,
	) -> Result<Vec<FixedPoint>, WindowError> {
		let nominal = self.scale(data_width)?;
		let limit = (1_i128 << (data_width - 1)) - 1;
		let shift = product_shift(data_width);

		let mut scale = nominal;
		loop {
			let coefficients = self.quantize_at(scale);
			let peak = peak_bound(&coefficients, cos_peak, shift);
			if peak <= limit {
				if scale < nominal {
					log::debug!(
						"coefficient scale lowered from {nominal} to {scale} to fit {data_width} bits"
					);
				}
				return Ok(coefficients);
			}
			let shrunk = (scale * limit as f64 / peak as f64).floor();
			scale = if shrunk < scale { shrunk } else { scale - 1. };
		}
	}
}

/// Largest `|a0 ∓ (a1·cos >> shift) ± ...|` over every `|cos| <= cos_peak`.
///
/// The truncating shift rounds negative products away from zero, hence the ceiling.
fn peak_bound(coefficients: &[FixedPoint], cos_peak: i64, shift: u32) -> i128 {
	let Some((a0, harmonics)) = coefficients.split_first() else {
		return 0;
	};
	let rounding = (1_i128 << shift) - 1;
	harmonics.iter().fold(i128::from(a0.raw()).abs(), |acc, a| {
		let product = i128::from(a.raw()).abs() * i128::from(cos_peak).abs();
		acc + ((product + rounding) >> shift)
	})
}

impl WindowingFn for CosineSum {
	#[allow(clippy::cast_precision_loss)]
	fn ratio_at(&self, index: usize, n_of_samples: usize) -> f64 {
		let Some((a0, harmonics)) = self.coefficients.split_first() else {
			return 0.;
		};
		harmonics
			.iter()
			.zip(1_usize..)
			.fold(*a0, |acc, (a, h)| {
				let term = a * f64::cos(TAU * (h * index) as f64 / n_of_samples as f64);
				if h % 2 == 1 {
					acc - term
				} else {
					acc + term
				}
			})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_hann_ratio() {
		let hann = CosineSum::new(vec![0.5, 0.5], 1);
		assert!(hann.ratio_at(0, 1024).abs() < 1e-12);
		assert!((hann.ratio_at(256, 1024) - 0.5).abs() < 1e-12);
		assert!((hann.ratio_at(512, 1024) - 1.).abs() < 1e-12);
		assert_eq!(hann.harmonics(), 1);
	}

	fn raw(coefficients: &[FixedPoint]) -> Vec<i64> {
		coefficients.iter().map(FixedPoint::raw).collect()
	}

	#[test]
	fn test_empty_window() {
		let empty = CosineSum::new(Vec::new(), 1);
		assert_eq!(empty.harmonics(), 0);
		assert!(empty.ratio_at(3, 16).abs() < f64::EPSILON);
		assert!(empty.quantize_within(16, 16384).unwrap().is_empty());
	}

	#[test]
	fn test_quantize_nominal_scale() {
		let hamming = CosineSum::new(vec![0.543_478_3, 1. - 0.543_478_3], 1);
		assert_eq!(raw(&hamming.quantize_within(16, 16383).unwrap()), [17808, 14959]);

		let hann = CosineSum::new(vec![0.5, 0.5], 1);
		assert_eq!(raw(&hann.quantize_within(16, 16383).unwrap()), [16384, 16384]);

		let wide = CosineSum::new(vec![0.5, 0.5], 2);
		assert!((wide.scale(16).unwrap() - 16383.).abs() < f64::EPSILON);
	}

	#[test]
	fn test_quantize_shrinks_to_fit_the_cosine_peak() {
		let hann = CosineSum::new(vec![0.5, 0.5], 1);
		// a full-scale cosine would take 16384 + 16384 one past the largest 16-bit value
		assert_eq!(raw(&hann.quantize_within(16, 16384).unwrap()), [16383, 16383]);
		assert_eq!(raw(&hann.quantize_within(12, 1024).unwrap()), [1023, 1023]);

		let hamming = CosineSum::new(vec![0.543_478_3, 1. - 0.543_478_3], 1);
		let coefficients = hamming.quantize_within(16, 16384).unwrap();
		assert!(peak_bound(&coefficients, 16384, 14) <= 32767);
	}

	#[test]
	fn test_quantize_leaves_headroom_alone_when_it_fits() {
		let nuttall = CosineSum::new(vec![0.355_768, 0.487_396, 0.144_323, 0.012_604], 2);
		let at_peak = nuttall.quantize_within(16, 16384).unwrap();
		let below_peak = nuttall.quantize_within(16, 16383).unwrap();
		assert_eq!(at_peak, below_peak);
		assert_eq!(raw(&at_peak), [5829, 7985, 2364, 206]);
	}

	#[test]
	fn test_peak_bound() {
		let coefficients: Vec<FixedPoint> = [100, -3, 5]
			.into_iter()
			.map(|a| FixedPoint::new(a, ACCUMULATOR_WIDTH))
			.collect();
		// 100 + ceil(3 * 10 / 4) + ceil(5 * 10 / 4)
		assert_eq!(peak_bound(&coefficients, 10, 2), 100 + 8 + 13);
		assert_eq!(peak_bound(&coefficients, -10, 2), 100 + 8 + 13);
		assert_eq!(peak_bound(&[], 10, 2), 0);
	}

	#[test]
	fn test_headroom_out_of_range() {
		for headroom_bits in [0, 16, 17] {
			assert_eq!(
				CosineSum::new(vec![1.], headroom_bits).quantize_within(16, 16384),
				Err(WindowError::HeadroomOutOfRange {
					headroom_bits,
					data_width: 16
				})
			);
		}
	}
}
