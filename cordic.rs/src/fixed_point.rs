use std::{
	fmt::Display,
	ops::{Add, Neg, Not, Shr, Sub},
};

use math_utils::bit_manipulation::SignExtend;

/// Widest register a [`FixedPoint`] can model.
pub const MAX_REGISTER_WIDTH: u32 = i64::BITS;

/// A `width`-bit two's-complement register.
///
/// The binary point is implicit: the same register reads as `raw / 2^f` for whatever
/// fractional scale `f` the context assigns to it. Every operation wraps the result
/// back into the register width, exactly like the hardware it models: nothing saturates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedPoint {
	raw: i64,
	width: u32,
}

impl FixedPoint {
	/// Wraps `raw` into a `width`-bit register.
	#[must_use]
	pub fn new(raw: i64, width: u32) -> Self {
		debug_assert!(
			width > 0 && width <= MAX_REGISTER_WIDTH,
			"register width {width} is out of range 1..={MAX_REGISTER_WIDTH}"
		);
		Self {
			raw: raw.sign_extend(width),
			width,
		}
	}

	#[must_use]
	pub fn zero(width: u32) -> Self {
		Self::new(0, width)
	}

	#[must_use]
	pub const fn raw(&self) -> i64 {
		self.raw
	}

	#[must_use]
	pub const fn width(&self) -> u32 {
		self.width
	}

	#[must_use]
	pub const fn is_negative(&self) -> bool {
		self.raw < 0
	}

	/// Assign to a register of a different width, dropping (or sign-extending into) the top bits.
	#[must_use]
	pub fn resize(self, width: u32) -> Self {
		Self::new(self.raw, width)
	}

	/// `(self * rhs) >> shift`, wrapped into a `width`-bit register.
	///
	/// The product is formed at full precision before the shift.
	#[must_use]
	pub fn mul_shr(self, rhs: Self, shift: u32, width: u32) -> Self {
		let product = i128::from(self.raw) * i128::from(rhs.raw);
		Self::new((product >> shift) as i64, width)
	}
}

impl Display for FixedPoint {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		Display::fmt(&format!("{}/{}b", self.raw, self.width), f)
	}
}

impl From<FixedPoint> for i64 {
	fn from(value: FixedPoint) -> Self {
		value.raw
	}
}

impl Add for FixedPoint {
	type Output = Self;

	fn add(self, rhs: Self) -> Self::Output {
		debug_assert_eq!(self.width, rhs.width, "register width mismatch");
		Self::new(self.raw.wrapping_add(rhs.raw), self.width)
	}
}

impl Sub for FixedPoint {
	type Output = Self;

	fn sub(self, rhs: Self) -> Self::Output {
		debug_assert_eq!(self.width, rhs.width, "register width mismatch");
		Self::new(self.raw.wrapping_sub(rhs.raw), self.width)
	}
}

/// Arithmetic (sign-preserving) shift.
impl Shr<u32> for FixedPoint {
	type Output = Self;

	fn shr(self, rhs: u32) -> Self::Output {
		Self {
			raw: self.raw >> rhs.min(MAX_REGISTER_WIDTH - 1),
			width: self.width,
		}
	}
}

/// One's complement: `-x - 1`.
impl Not for FixedPoint {
	type Output = Self;

	fn not(self) -> Self::Output {
		Self {
			raw: !self.raw,
			width: self.width,
		}
	}
}

/// Two's complement: `!x + 1`. The most negative value maps to itself.
impl Neg for FixedPoint {
	type Output = Self;

	fn neg(self) -> Self::Output {
		Self::new(self.raw.wrapping_neg(), self.width)
	}
}
