use crate::{ConfigError, FixedPoint};

pub const DEFAULT_PHASE_WIDTH: u32 = 10;
pub const DEFAULT_DATA_WIDTH: u32 = 16;

/// Top phase bits selecting the quadrant.
pub const QUADRANT_BITS: u32 = 2;

pub const MIN_PHASE_WIDTH: u32 = QUADRANT_BITS;
pub const MAX_PHASE_WIDTH: u32 = 32;

/// How the quadrant re-map flips the sign of a result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Negation {
	/// `!x + 1`: exact negation.
	#[default]
	TwosComplement,
	/// `!x`: one LSB below the exact negation, so zero maps to `-1`.
	OnesComplement,
}

impl Negation {
	#[must_use]
	pub fn apply(self, value: FixedPoint) -> FixedPoint {
		match self {
			Self::TwosComplement => -value,
			Self::OnesComplement => !value,
		}
	}
}

/// Construction-time parameters of a [`crate::Rotator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CordicConfig {
	phase_width: u32,
	data_width: u32,
	negation: Negation,
}

impl CordicConfig {
	#[must_use]
	pub const fn new(phase_width: u32, data_width: u32) -> Self {
		Self {
			phase_width,
			data_width,
			negation: Negation::TwosComplement,
		}
	}

	#[must_use]
	pub const fn with_negation(self, negation: Negation) -> Self {
		Self { negation, ..self }
	}

	/// Bits of angle quantization: a full turn is `2^phase_width`.
	#[must_use]
	pub const fn phase_width(&self) -> u32 {
		self.phase_width
	}

	/// Number of micro-rotations and width of the outputs.
	#[must_use]
	pub const fn data_width(&self) -> u32 {
		self.data_width
	}

	#[must_use]
	pub const fn negation(&self) -> Negation {
		self.negation
	}

	/// # Errors
	/// - if `phase_width` is outside `MIN_PHASE_WIDTH..=MAX_PHASE_WIDTH`
	pub fn validate_phase_width(phase_width: u32) -> Result<(), ConfigError> {
		if (MIN_PHASE_WIDTH..=MAX_PHASE_WIDTH).contains(&phase_width) {
			Ok(())
		} else {
			Err(ConfigError::PhaseWidthOutOfRange {
				phase_width,
				min: MIN_PHASE_WIDTH,
				max: MAX_PHASE_WIDTH,
			})
		}
	}
}

impl Default for CordicConfig {
	fn default() -> Self {
		Self::new(DEFAULT_PHASE_WIDTH, DEFAULT_DATA_WIDTH)
	}
}
