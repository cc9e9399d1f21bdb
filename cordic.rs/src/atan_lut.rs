//! Arctangent table and gain constant of the circular CORDIC rotator.
//!
//! Angles use a binary unit where a quarter turn is `2^W` for data width `W`.

use crate::{ConfigError, FixedPoint};

/// Precision of [`MASTER_ATAN_TABLE`] and [`MASTER_GAIN`].
pub const MASTER_WIDTH: u32 = 48;

/// `round(atan(2^-i) * 2^48 / PI)`: `PI / 4` maps to `2^46`.
pub const MASTER_ATAN_TABLE: [i64; 48] = [
	0x4000_0000_0000, 0x25C8_0A3B_3BE6, 0x13F6_70B6_BDC7, 0x0A22_23A8_3BBB,
	0x0516_1A86_1CB1, 0x028B_AFC2_B209, 0x0145_EC3C_B850, 0x00A2_F8AA_23A9,
	0x0051_7CA6_8DA2, 0x0028_BE5D_7661, 0x0014_5F30_0123, 0x000A_2F98_2950,
	0x0005_17CC_19C0, 0x0002_8BE6_0D83, 0x0001_45F3_06D6, 0x0000_A2F9_836D,
	0x0000_517C_C1B7, 0x0000_28BE_60DC, 0x0000_145F_306E, 0x0000_0A2F_9837,
	0x0000_0517_CC1B, 0x0000_028B_E60E, 0x0000_0145_F307, 0x0000_00A2_F983,
	0x0000_0051_7CC2, 0x0000_0028_BE61, 0x0000_0014_5F30, 0x0000_000A_2F98,
	0x0000_0005_17CC, 0x0000_0002_8BE6, 0x0000_0001_45F3, 0x0000_0000_A2FA,
	0x0000_0000_517D, 0x0000_0000_28BE, 0x0000_0000_145F, 0x0000_0000_0A30,
	0x0000_0000_0518, 0x0000_0000_028C, 0x0000_0000_0146, 0x0000_0000_00A3,
	0x0000_0000_0051, 0x0000_0000_0029, 0x0000_0000_0014, 0x0000_0000_000A,
	0x0000_0000_0005, 0x0000_0000_0003, 0x0000_0000_0001, 0x0000_0000_0000,
];

/// `round(2^46 / CORDIC_GAIN)`.
pub const MASTER_GAIN: i64 = 0x26DD_3B6A_10D8;

/// Vector length growth of the circular CORDIC recurrence, `prod(sqrt(1 + 2^-2i))`.
pub const CORDIC_GAIN: f64 = 1.646_760_258_121_065_4;

/// Guard bits between the data width and the rotation registers.
pub const HEADROOM_BITS: u32 = 2;

pub const MIN_DATA_WIDTH: u32 = 2;
pub const MAX_DATA_WIDTH: u32 = MASTER_WIDTH - HEADROOM_BITS;

/// The micro-rotation angles and the pre-compensated gain for one data width.
///
/// Immutable once built: share it (e.g. through an `Arc`) between rotators of the same width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtanLut {
	data_width: u32,
	angles: Box<[FixedPoint]>,
	gain: FixedPoint,
}

impl AtanLut {
	/// Truncate the master table to `data_width`.
	///
	/// Holds `data_width - 1` angles: the last of the `data_width` micro-rotations
	/// only reads the sign of the residual angle.
	///
	/// # Errors
	/// - if `data_width` is outside `MIN_DATA_WIDTH..=MAX_DATA_WIDTH`
	/// - if `data_width` micro-rotations can't sweep a full quadrant
	pub fn new(data_width: u32) -> Result<Self, ConfigError> {
		if !(MIN_DATA_WIDTH..=MAX_DATA_WIDTH).contains(&data_width) {
			return Err(ConfigError::DataWidthOutOfRange {
				data_width,
				min: MIN_DATA_WIDTH,
				max: MAX_DATA_WIDTH,
			});
		}

		let covered = coverage(data_width);
		let quarter_turn = 1_i64 << data_width;
		if covered < quarter_turn {
			return Err(ConfigError::InsufficientRotationRange {
				data_width,
				covered,
				quarter_turn,
			});
		}

		let register_width = data_width + HEADROOM_BITS;
		let angles = MASTER_ATAN_TABLE[..(data_width - 1) as usize]
			.iter()
			.map(|angle| FixedPoint::new(angle >> angle_shift(data_width), register_width))
			.collect();
		let gain = FixedPoint::new(
			MASTER_GAIN >> (MASTER_WIDTH - HEADROOM_BITS - data_width),
			register_width,
		);

		log::debug!(
			"built arctangent table: {} angles, gain {}, quadrant coverage {}/{}",
			data_width - 1,
			gain,
			covered,
			quarter_turn
		);

		Ok(Self {
			data_width,
			angles,
			gain,
		})
	}

	/// Number of micro-rotations and width of the rotator outputs.
	#[must_use]
	pub const fn data_width(&self) -> u32 {
		self.data_width
	}

	/// Width of the `x`, `y`, `z` registers.
	#[must_use]
	pub const fn register_width(&self) -> u32 {
		self.data_width + HEADROOM_BITS
	}

	#[must_use]
	pub fn angles(&self) -> &[FixedPoint] {
		&self.angles
	}

	#[must_use]
	pub fn angle(&self, k: u32) -> Option<FixedPoint> {
		self.angles.get(k as usize).copied()
	}

	/// `x[0]` of every rotation, about `2^W / CORDIC_GAIN`.
	#[must_use]
	pub const fn gain(&self) -> FixedPoint {
		self.gain
	}

	#[must_use]
	pub const fn quarter_turn(&self) -> i64 {
		1 << self.data_width
	}

	/// Sum of the angles of all the micro-rotations.
	#[must_use]
	pub fn coverage(&self) -> i64 {
		coverage(self.data_width)
	}
}

const fn angle_shift(data_width: u32) -> u32 {
	MASTER_WIDTH - 1 - data_width
}

fn coverage(data_width: u32) -> i64 {
	MASTER_ATAN_TABLE[..data_width as usize]
		.iter()
		.map(|angle| angle >> angle_shift(data_width))
		.sum()
}
