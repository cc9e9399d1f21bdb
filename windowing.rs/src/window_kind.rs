use std::{fmt::Display, str::FromStr};

use crate::{CosineSum, WindowError};

const HAMMING_A0: f64 = 0.543_478_3;

const RECTANGULAR: [f64; 0] = [];
const HAMMING: [f64; 2] = [HAMMING_A0, 1. - HAMMING_A0];
const HANN: [f64; 2] = [0.5, 0.5];
const BLACKMAN_HARRIS_3: [f64; 3] = [0.42, 0.5, 0.08];
const BLACKMAN_HARRIS_4: [f64; 4] = [0.358_75, 0.488_29, 0.141_28, 0.011_68];
const BLACKMAN_HARRIS_5: [f64; 5] = [
	0.323_215_378_887_734_3,
	0.471_492_143_957_626,
	0.175_534_129_960_197_2,
	0.028_496_990_106_149_9,
	0.001_261_357_088_292_7,
];
const BLACKMAN_HARRIS_7: [f64; 7] = [
	0.271_220_360_585_039,
	0.433_444_612_327_442,
	0.218_004_122_892_930,
	0.065_785_343_295_606,
	0.010_761_867_305_342,
	0.000_770_012_710_581,
	0.000_013_680_883_060,
];
const NUTTALL: [f64; 4] = [0.355_768, 0.487_396, 0.144_323, 0.012_604];
const BLACKMAN_NUTTALL: [f64; 4] = [0.363_581_9, 0.489_177_5, 0.136_599_5, 0.010_641_1];
const FLAT_TOP: [f64; 5] = [
	0.215_578_950,
	0.416_631_580,
	0.277_263_158,
	0.083_578_947,
	0.006_947_368,
];

/// The predefined cosine-sum windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowKind {
	/// All-zero table.
	Rectangular,
	Hamming,
	Hann,
	BlackmanHarris3,
	BlackmanHarris4,
	BlackmanHarris5,
	BlackmanHarris7,
	Nuttall,
	BlackmanNuttall,
	FlatTop,
}

impl WindowKind {
	pub const ALL: [Self; 10] = [
		Self::Rectangular,
		Self::Hamming,
		Self::Hann,
		Self::BlackmanHarris3,
		Self::BlackmanHarris4,
		Self::BlackmanHarris5,
		Self::BlackmanHarris7,
		Self::Nuttall,
		Self::BlackmanNuttall,
		Self::FlatTop,
	];

	/// `a0..aH`
	#[must_use]
	pub const fn coefficients(self) -> &'static [f64] {
		match self {
			Self::Rectangular => &RECTANGULAR,
			Self::Hamming => &HAMMING,
			Self::Hann => &HANN,
			Self::BlackmanHarris3 => &BLACKMAN_HARRIS_3,
			Self::BlackmanHarris4 => &BLACKMAN_HARRIS_4,
			Self::BlackmanHarris5 => &BLACKMAN_HARRIS_5,
			Self::BlackmanHarris7 => &BLACKMAN_HARRIS_7,
			Self::Nuttall => &NUTTALL,
			Self::BlackmanNuttall => &BLACKMAN_NUTTALL,
			Self::FlatTop => &FLAT_TOP,
		}
	}

	#[must_use]
	pub const fn harmonics(self) -> usize {
		self.coefficients().len().saturating_sub(1)
	}

	/// Bits above the full-scale value of the table.
	#[must_use]
	pub const fn headroom_bits(self) -> u32 {
		match self {
			Self::Rectangular
			| Self::Hamming
			| Self::Hann
			| Self::BlackmanHarris3
			| Self::BlackmanHarris4
			| Self::BlackmanNuttall => 1,
			Self::BlackmanHarris5 | Self::BlackmanHarris7 | Self::Nuttall | Self::FlatTop => 2,
		}
	}

	#[must_use]
	pub fn cosine_sum(self) -> CosineSum {
		CosineSum::new(self.coefficients(), self.headroom_bits())
	}

	#[must_use]
	pub const fn name(self) -> &'static str {
		match self {
			Self::Rectangular => "Rectangular",
			Self::Hamming => "Hamming",
			Self::Hann => "Hann",
			Self::BlackmanHarris3 => "Blackman-Harris-3",
			Self::BlackmanHarris4 => "Blackman-Harris-4",
			Self::BlackmanHarris5 => "Blackman-Harris-5",
			Self::BlackmanHarris7 => "Blackman-Harris-7",
			Self::Nuttall => "Nuttall",
			Self::BlackmanNuttall => "Blackman-Nuttall",
			Self::FlatTop => "Flat-top",
		}
	}

	/// Numeric code of the window selector port.
	#[must_use]
	pub const fn selector(self) -> u8 {
		match self {
			Self::Rectangular => 0x0,
			Self::Hamming => 0x1,
			Self::Hann => 0x2,
			Self::BlackmanHarris3 => 0x3,
			Self::BlackmanHarris4 => 0x4,
			Self::BlackmanHarris5 => 0x5,
			Self::BlackmanHarris7 => 0x7,
			Self::Nuttall => 0x8,
			Self::BlackmanNuttall => 0x9,
			Self::FlatTop => 0xA,
		}
	}

	/// Decode a selector, treating unknown codes as [`WindowKind::Rectangular`].
	#[must_use]
	pub fn from_selector_or_rectangular(selector: u8) -> Self {
		Self::try_from(selector).unwrap_or_else(|err| {
			log::warn!("{err}, falling back to a rectangular window");
			Self::Rectangular
		})
	}
}

impl Display for WindowKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		Display::fmt(self.name(), f)
	}
}

impl TryFrom<u8> for WindowKind {
	type Error = WindowError;

	fn try_from(value: u8) -> Result<Self, Self::Error> {
		Self::ALL
			.into_iter()
			.find(|kind| kind.selector() == value)
			.ok_or(WindowError::UnknownSelector(value))
	}
}

/// Accepts the display names as well as `snake_case`, ignoring case.
impl FromStr for WindowKind {
	type Err = WindowError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let normalize = |name: &str| name.trim().to_lowercase().replace(['-', ' '], "_");
		let wanted = normalize(s);
		Self::ALL
			.into_iter()
			.find(|kind| normalize(kind.name()) == wanted)
			.ok_or_else(|| WindowError::UnknownKind(s.to_owned()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_harmonics() {
		let harmonics: Vec<usize> = WindowKind::ALL.iter().map(|k| k.harmonics()).collect();
		assert_eq!(harmonics, [0, 1, 1, 2, 3, 4, 6, 3, 3, 4]);
	}

	#[test]
	fn test_coefficients_add_up_to_one() {
		for kind in WindowKind::ALL.into_iter().skip(1) {
			let sum: f64 = kind.coefficients().iter().sum();
			assert!((sum - 1.).abs() < 1e-3, "{kind}: {sum}");
		}
	}

	#[test]
	fn test_hamming_coefficients() {
		let [a0, a1] = HAMMING;
		assert!((a0 - 0.543_478_3).abs() < f64::EPSILON);
		assert!((a0 + a1 - 1.).abs() < f64::EPSILON);
	}

	#[test]
	fn test_selector_round_trip() {
		for kind in WindowKind::ALL {
			assert_eq!(WindowKind::try_from(kind.selector()), Ok(kind));
		}
	}

	#[test]
	fn test_unknown_selector() {
		assert_eq!(
			WindowKind::try_from(0x6),
			Err(WindowError::UnknownSelector(0x6))
		);
		assert_eq!(
			WindowKind::from_selector_or_rectangular(0x6),
			WindowKind::Rectangular
		);
		assert_eq!(
			WindowKind::from_selector_or_rectangular(0xFF),
			WindowKind::Rectangular
		);
		assert_eq!(
			WindowKind::from_selector_or_rectangular(0x7),
			WindowKind::BlackmanHarris7
		);
	}

	#[test]
	fn test_parse() {
		assert_eq!(
			"Blackman-Harris-7".parse::<WindowKind>(),
			Ok(WindowKind::BlackmanHarris7)
		);
		assert_eq!(
			"blackman_harris_3".parse::<WindowKind>(),
			Ok(WindowKind::BlackmanHarris3)
		);
		assert_eq!("HANN".parse::<WindowKind>(), Ok(WindowKind::Hann));
		assert_eq!("flat top".parse::<WindowKind>(), Ok(WindowKind::FlatTop));
		assert_eq!(
			"kaiser".parse::<WindowKind>(),
			Err(WindowError::UnknownKind("kaiser".to_owned()))
		);
		for kind in WindowKind::ALL {
			assert_eq!(kind.to_string().parse::<WindowKind>(), Ok(kind));
		}
	}
}
