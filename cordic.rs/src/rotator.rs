use std::sync::Arc;

use derive_more::derive::From;

use crate::{
	atan_lut::HEADROOM_BITS, config::QUADRANT_BITS, AtanLut, CordicConfig, ConfigError,
	FixedPoint, Negation,
};

/// An angle as a fraction of a full turn, `2π · phase / 2^P`. Wraps modulo `2^P`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash, From)]
pub struct Phase(u64);

impl Phase {
	#[must_use]
	pub const fn new(phase: u64) -> Self {
		Self(phase)
	}

	#[must_use]
	pub const fn inner(&self) -> u64 {
		self.0
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
	First,
	Second,
	Third,
	Fourth,
}

impl Quadrant {
	#[must_use]
	pub const fn from_bits(bits: u64) -> Self {
		match bits & 0b11 {
			0 => Self::First,
			1 => Self::Second,
			2 => Self::Third,
			_ => Self::Fourth,
		}
	}

	/// Map a first-quadrant `(cos, sin)` pair onto this quadrant.
	#[must_use]
	pub fn unfold(
		self,
		cos: FixedPoint,
		sin: FixedPoint,
		negation: Negation,
	) -> (FixedPoint, FixedPoint) {
		match self {
			Self::First => (cos, sin),
			Self::Second => (negation.apply(sin), cos),
			Self::Third => (negation.apply(cos), negation.apply(sin)),
			Self::Fourth => (sin, negation.apply(cos)),
		}
	}
}

/// `(x, y, z)` after some micro-rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RotationState {
	pub x: FixedPoint,
	pub y: FixedPoint,
	/// Residual angle, driven toward zero.
	pub z: FixedPoint,
}

/// Yields the state after each of the `W` micro-rotations.
#[derive(Debug, Clone)]
pub struct MicroRotations<'a> {
	lut: &'a AtanLut,
	state: RotationState,
	k: u32,
}

impl Iterator for MicroRotations<'_> {
	type Item = RotationState;

	fn next(&mut self) -> Option<Self::Item> {
		if self.k >= self.lut.data_width() {
			return None;
		}

		let k = self.k;
		let RotationState { x, y, z } = self.state;
		let (dx, dy) = (y >> k, x >> k);
		// `None` on the last micro-rotation: z[W] is never read
		let angle = self.lut.angle(k);

		self.state = if z.is_negative() {
			RotationState {
				x: x + dx,
				y: y - dy,
				z: angle.map_or(z, |a| z + a),
			}
		} else {
			RotationState {
				x: x - dx,
				y: y + dy,
				z: angle.map_or(z, |a| z - a),
			}
		};
		self.k += 1;

		Some(self.state)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let remaining = self.lut.data_width().saturating_sub(self.k) as usize;
		(remaining, Some(remaining))
	}
}

impl ExactSizeIterator for MicroRotations<'_> {}

/// Shift-and-add sine/cosine of a quantized phase.
///
/// The phase is folded onto the first quadrant, rotated by `W` micro-rotations starting
/// from the gain-compensated vector `(GAIN, 0)`, and unfolded by symmetry.
/// Outputs are `W`-bit values with amplitude `2^(W-2)`.
#[derive(Debug, Clone)]
pub struct Rotator {
	phase_width: u32,
	negation: Negation,
	lut: Arc<AtanLut>,
}

impl Rotator {
	/// # Errors
	/// - if either width is out of range, see [`AtanLut::new`] and [`CordicConfig::validate_phase_width`]
	pub fn new(config: CordicConfig) -> Result<Self, ConfigError> {
		let lut = Arc::new(AtanLut::new(config.data_width())?);
		Self::with_lut(config.phase_width(), config.negation(), lut)
	}

	/// Build a rotator around an existing table.
	///
	/// # Errors
	/// - if `phase_width` is out of range
	pub fn with_lut(
		phase_width: u32,
		negation: Negation,
		lut: Arc<AtanLut>,
	) -> Result<Self, ConfigError> {
		CordicConfig::validate_phase_width(phase_width)?;
		Ok(Self {
			phase_width,
			negation,
			lut,
		})
	}

	#[must_use]
	pub const fn phase_width(&self) -> u32 {
		self.phase_width
	}

	#[must_use]
	pub fn data_width(&self) -> u32 {
		self.lut.data_width()
	}

	#[must_use]
	pub const fn negation(&self) -> Negation {
		self.negation
	}

	#[must_use]
	pub fn lut(&self) -> &Arc<AtanLut> {
		&self.lut
	}

	/// Number of distinct phases in a full turn.
	#[must_use]
	pub const fn phase_count(&self) -> u64 {
		1 << self.phase_width
	}

	/// Nominal magnitude of the outputs: `cos(0)` is about this value.
	#[must_use]
	pub fn amplitude(&self) -> i64 {
		1 << (self.data_width() - HEADROOM_BITS)
	}

	#[must_use]
	pub fn quadrant(&self, phase: Phase) -> Quadrant {
		Quadrant::from_bits(phase.inner() >> (self.phase_width - QUADRANT_BITS))
	}

	/// The sub-quadrant angle aligned to the residual angle unit.
	///
	/// A quarter turn spans `2^(P - QUADRANT_BITS)` phases and `2^W` angle units.
	fn residual(&self, phase: Phase) -> FixedPoint {
		let sub_quadrant_bits = self.phase_width - QUADRANT_BITS;
		#[allow(clippy::cast_possible_wrap)]
		let angle = (phase.inner() & ((1 << sub_quadrant_bits) - 1)) as i64;

		let (p, w) = (self.phase_width, self.data_width());
		let z = if p <= w {
			angle << (w - p + QUADRANT_BITS)
		} else {
			(angle >> (p - w)) << QUADRANT_BITS
		};
		FixedPoint::new(z, self.lut.register_width())
	}

	#[must_use]
	pub fn initial_state(&self, phase: Phase) -> RotationState {
		RotationState {
			x: self.lut.gain(),
			y: FixedPoint::zero(self.lut.register_width()),
			z: self.residual(phase),
		}
	}

	#[must_use]
	pub fn micro_rotations(&self, phase: Phase) -> MicroRotations<'_> {
		MicroRotations {
			lut: &self.lut,
			state: self.initial_state(phase),
			k: 0,
		}
	}

	/// All the `W + 1` states of a rotation, from the initial one to the final one.
	#[must_use]
	pub fn trajectory(&self, phase: impl Into<Phase>) -> Vec<RotationState> {
		let phase = phase.into();
		std::iter::once(self.initial_state(phase))
			.chain(self.micro_rotations(phase))
			.collect()
	}

	/// `(cos, sin)` of `2π · phase / 2^P`.
	#[must_use]
	pub fn rotate(&self, phase: impl Into<Phase>) -> (FixedPoint, FixedPoint) {
		let phase = phase.into();
		let last = self
			.micro_rotations(phase)
			.fold(self.initial_state(phase), |_, state| state);

		let (cos, sin) = self.quadrant(phase).unfold(
			last.x >> HEADROOM_BITS,
			last.y >> HEADROOM_BITS,
			self.negation,
		);
		let width = self.data_width();
		(cos.resize(width), sin.resize(width))
	}

	/// `(cos, sin)` for every phase of a full turn, in phase order.
	#[must_use]
	pub fn cos_sin_table(&self) -> Vec<(FixedPoint, FixedPoint)> {
		(0..self.phase_count())
			.map(|phase| self.rotate(phase))
			.collect()
	}
}
