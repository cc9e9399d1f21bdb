use std::sync::Arc;

use cordic::{AtanLut, FixedPoint, Negation, Rotator};
use derive_more::derive::{Deref, From};
use math_utils::bit_manipulation::ExactLog2;

use crate::{
	cosine_sum::{product_shift, ACCUMULATOR_WIDTH},
	CosineSum, WindowError, WindowKind,
};

/// Smallest table the quadrant folding of the rotator can address.
pub const MIN_SAMPLES: usize = 4;

/// `log2(n_samples)`, the phase width that enumerates one full turn in `n_samples` steps.
///
/// # Errors
/// - if `n_samples` is not a power of two, or is below [`MIN_SAMPLES`]
pub fn sample_count_log2(n_samples: usize) -> Result<u32, WindowError> {
	let log2 = n_samples
		.exact_log2()
		.ok_or(WindowError::SampleCountNotPowerOfTwo(n_samples))?;
	if n_samples < MIN_SAMPLES {
		return Err(WindowError::TooFewSamples {
			n_samples,
			min: MIN_SAMPLES,
		});
	}
	Ok(log2)
}

/// A synthesized window, one `W`-bit sample per entry.
#[derive(Debug, Clone, PartialEq, Eq, Deref, From)]
pub struct WindowTable(Vec<FixedPoint>);

impl WindowTable {
	#[must_use]
	pub fn raw_values(&self) -> Vec<i64> {
		self.0.iter().copied().map(i64::from).collect()
	}
}

/// Builds cosine-sum windows out of the harmonics produced by a [`Rotator`].
///
/// Every table shares the same arctangent LUT, the phase width of the rotator follows
/// the number of samples.
#[derive(Debug, Clone)]
pub struct WindowSynthesizer {
	negation: Negation,
	lut: Arc<AtanLut>,
}

impl WindowSynthesizer {
	/// # Errors
	/// - if the rotator can't be built at `data_width`, see [`AtanLut::new`]
	pub fn new(data_width: u32) -> Result<Self, WindowError> {
		Ok(Self {
			negation: Negation::default(),
			lut: Arc::new(AtanLut::new(data_width)?),
		})
	}

	#[must_use]
	pub fn with_negation(self, negation: Negation) -> Self {
		Self { negation, ..self }
	}

	#[must_use]
	pub fn data_width(&self) -> u32 {
		self.lut.data_width()
	}

	#[must_use]
	pub const fn negation(&self) -> Negation {
		self.negation
	}

	/// The rotator enumerating a full turn in `n_samples` phases.
	///
	/// # Errors
	/// - see [`sample_count_log2`]
	/// - if `log2(n_samples)` is not a valid phase width
	pub fn rotator(&self, n_samples: usize) -> Result<Rotator, WindowError> {
		let phase_width = sample_count_log2(n_samples)?;
		Ok(Rotator::with_lut(
			phase_width,
			self.negation,
			Arc::clone(&self.lut),
		)?)
	}

	/// # Errors
	/// - see [`WindowSynthesizer::build_cosine_sum`]
	pub fn build_window(
		&self,
		kind: WindowKind,
		n_samples: usize,
	) -> Result<WindowTable, WindowError> {
		log::debug!(
			"building a {n_samples}-sample {kind} window at {} bits",
			self.data_width()
		);
		self.build_cosine_sum(&kind.cosine_sum(), n_samples)
	}

	/// `w[i] = a0 - a1·cos(i) + a2·cos(2i) - ...`, where `cos(h·i)` is the rotator output at
	/// phase `h·i mod n_samples`.
	///
	/// Each product is rescaled by the amplitude of the rotator and summed in a
	/// [`ACCUMULATOR_WIDTH`]-bit register, the sum is then truncated to `W` bits.
	/// The coefficients are fitted to the largest cosine the rotator outputs (see
	/// [`CosineSum::quantize_within`]), so the truncation never wraps a sample.
	///
	/// # Errors
	/// - if `n_samples` is not a power of two or is too small
	/// - if the headroom of the window doesn't fit the data width
	pub fn build_cosine_sum(
		&self,
		window: &CosineSum,
		n_samples: usize,
	) -> Result<WindowTable, WindowError> {
		let rotator = self.rotator(n_samples)?;
		let width = self.data_width();

		let cosines: Vec<FixedPoint> = if window.harmonics() == 0 {
			Vec::new()
		} else {
			rotator
				.cos_sin_table()
				.into_iter()
				.map(|(cos, _)| cos)
				.collect()
		};
		let cos_peak = cosines.iter().map(|cos| cos.raw().abs()).max().unwrap_or(0);

		let coefficients = window.quantize_within(width, cos_peak)?;
		let Some((&a0, harmonics)) = coefficients.split_first() else {
			return Ok(vec![FixedPoint::zero(width); n_samples].into());
		};

		let shift = product_shift(width);
		let phase_mask = n_samples - 1;

		Ok((0..n_samples)
			.map(|i| {
				harmonics
					.iter()
					.zip(1_usize..)
					.fold(a0, |acc, (&a, h)| {
						let cos = cosines[h.wrapping_mul(i) & phase_mask];
						let term = a.mul_shr(cos, shift, ACCUMULATOR_WIDTH);
						if h % 2 == 1 {
							acc - term
						} else {
							acc + term
						}
					})
					.resize(width)
			})
			.collect::<Vec<_>>()
			.into())
	}
}

#[cfg(test)]
mod tests {
	use cordic::{
		atan_lut::{MAX_DATA_WIDTH, MIN_DATA_WIDTH},
		ConfigError,
	};

	use super::*;
	use crate::reference;

	fn synthesizer() -> WindowSynthesizer {
		WindowSynthesizer::new(16).unwrap()
	}

	fn raw(kind: WindowKind, n_samples: usize) -> Vec<i64> {
		synthesizer()
			.build_window(kind, n_samples)
			.unwrap()
			.raw_values()
	}

	#[test]
	fn test_rectangular_is_all_zeros() {
		let table = raw(WindowKind::Rectangular, 64);
		assert_eq!(table.len(), 64);
		assert!(table.iter().all(|&v| v == 0));
	}

	#[test]
	fn test_smallest_tables() {
		assert_eq!(raw(WindowKind::Hann, 4), [1, 16384, 32767, 16384]);
		assert_eq!(raw(WindowKind::Hamming, 4), [2850, 17808, 32767, 17808]);
	}

	#[test]
	fn test_known_samples() {
		let hann = raw(WindowKind::Hann, 1024);
		assert_eq!((hann[0], hann[512]), (1, 32767));

		let hamming = raw(WindowKind::Hamming, 1024);
		assert_eq!((hamming[0], hamming[512]), (2850, 32767));

		let nuttall = raw(WindowKind::Nuttall, 1024);
		assert_eq!(nuttall[512], 16383);

		let flat_top = raw(WindowKind::FlatTop, 1024);
		assert_eq!((flat_top[0], flat_top[512]), (-7, 16381));
		assert!(flat_top.iter().any(|&v| v < 0));
	}

	#[test]
	fn test_peak_and_symmetry() {
		for kind in WindowKind::ALL.into_iter().skip(1) {
			let table = raw(kind, 1024);
			let max = table.iter().copied().max().unwrap();
			assert_eq!(table[512], max, "{kind}");
			for i in 1..512 {
				assert!(
					(table[i] - table[1024 - i]).abs() <= 2,
					"{kind} is not symmetric at {i}"
				);
			}
		}
	}

	#[test]
	fn test_close_to_reference() {
		let synthesizer = synthesizer();
		for kind in WindowKind::ALL {
			let table = synthesizer.build_window(kind, 1024).unwrap();
			let expected = reference::reference_window(&kind.cosine_sum(), 1024, 16).unwrap();
			let stats = reference::compare(&table, &expected).unwrap();
			assert!(stats.max_abs_error() <= 4, "{kind}: {}", stats.max_abs_error());
			assert!(stats.normalized_error() < 10., "{kind}");
		}
	}

	#[test]
	fn test_ones_complement_keeps_the_center_in_range() {
		let synthesizer = synthesizer().with_negation(Negation::OnesComplement);
		let hann = synthesizer
			.build_window(WindowKind::Hann, 1024)
			.unwrap()
			.raw_values();
		assert_eq!((hann[0], hann[512]), (1, 32766));

		let hamming = synthesizer
			.build_window(WindowKind::Hamming, 1024)
			.unwrap()
			.raw_values();
		assert_eq!(hamming[512], 32767);
	}

	#[test]
	fn test_every_data_width_stays_close_to_reference() {
		for negation in [Negation::TwosComplement, Negation::OnesComplement] {
			for data_width in MIN_DATA_WIDTH..=MAX_DATA_WIDTH {
				let Ok(synthesizer) = WindowSynthesizer::new(data_width) else {
					continue;
				};
				let synthesizer = synthesizer.with_negation(negation);
				for kind in WindowKind::ALL {
					let table = synthesizer.build_window(kind, 1024).unwrap();
					let expected =
						reference::reference_window(&kind.cosine_sum(), 1024, data_width).unwrap();
					let stats = reference::compare(&table, &expected).unwrap();
					assert!(
						stats.max_abs_error() <= 8,
						"{kind} at {data_width} bits ({negation:?}): {}",
						stats.max_abs_error()
					);
					assert!(stats.normalized_error() < 10.);

					if kind != WindowKind::Rectangular {
						let center = table[512].raw();
						assert!(center > 0, "{kind} at {data_width} bits wrapped to {center}");
						assert_eq!(
							table.iter().map(FixedPoint::raw).max(),
							Some(center),
							"{kind} at {data_width} bits"
						);
					}
				}
			}
		}
	}

	#[test]
	fn test_rebuilding_gives_identical_tables() {
		let synthesizer = synthesizer();
		for kind in WindowKind::ALL {
			assert_eq!(
				synthesizer.build_window(kind, 256),
				synthesizer.build_window(kind, 256)
			);
		}
	}

	#[test]
	fn test_custom_cosine_sum() {
		let constant = CosineSum::new(vec![0.25], 1);
		let table = synthesizer().build_cosine_sum(&constant, 8).unwrap();
		assert!(table.iter().all(|v| v.raw() == 8192 && v.width() == 16));
	}

	#[test]
	fn test_invalid_sample_counts() {
		let synthesizer = synthesizer();
		assert_eq!(
			synthesizer.build_window(WindowKind::Hann, 1000),
			Err(WindowError::SampleCountNotPowerOfTwo(1000))
		);
		assert_eq!(
			synthesizer.build_window(WindowKind::Hann, 0),
			Err(WindowError::SampleCountNotPowerOfTwo(0))
		);
		assert_eq!(
			synthesizer.build_window(WindowKind::Hann, 2),
			Err(WindowError::TooFewSamples {
				n_samples: 2,
				min: MIN_SAMPLES
			})
		);
	}

	#[test]
	fn test_invalid_data_width() {
		assert!(matches!(
			WindowSynthesizer::new(4),
			Err(WindowError::Config(
				ConfigError::InsufficientRotationRange { .. }
			))
		));
		assert!(matches!(
			WindowSynthesizer::new(60),
			Err(WindowError::Config(ConfigError::DataWidthOutOfRange { .. }))
		));
		assert_eq!(
			WindowSynthesizer::new(2)
				.unwrap_err()
				.to_string(),
			"invalid rotator configuration"
		);
	}
}
