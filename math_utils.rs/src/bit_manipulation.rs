pub trait SignExtend
where
	Self: Sized,
{
	/// Keep the lowest `width` bits and sign-extend them, i.e. the value a
	/// `width`-bit two's-complement register would hold after the assignment.
	/// Bits above `width` are discarded (wraparound), never saturated.
	///
	/// `width` must be in `1..=BITS`.
	///
	/// Example:
	///
	/// ```
	/// use math_utils::bit_manipulation::SignExtend;
	///
	/// assert_eq!(0x7F_i64.sign_extend(8), 127);
	/// assert_eq!(0x80_i64.sign_extend(8), -128);
	/// assert_eq!(0x1FF_i64.sign_extend(8), -1);
	/// assert_eq!(0x100_i64.sign_extend(8), 0);
	/// assert_eq!((-129_i32).sign_extend(8), 127);
	/// assert_eq!(i64::MIN.sign_extend(64), i64::MIN);
	/// ```
	#[must_use]
	fn sign_extend(self, width: u32) -> Self;
}

macro_rules! impl_sign_extend_for_signed {
	($t:ty) => {
		impl SignExtend for $t {
			fn sign_extend(self, width: u32) -> Self {
				debug_assert!(
					width > 0 && width <= Self::BITS,
					"width {} is out of range 1..={}",
					width,
					Self::BITS
				);
				let shift = Self::BITS - width;
				(self << shift) >> shift
			}
		}
	};
	($t:ty, $($others:ty),+) => {
		impl_sign_extend_for_signed!($t);
		impl_sign_extend_for_signed!($($others),+);
	};
}

impl_sign_extend_for_signed!(i8, i16, i32, i64, i128, isize);

pub trait ExactLog2
where
	Self: Sized,
{
	/// Return `Some(k)` when the number is exactly `2^k`, `None` otherwise.
	///
	/// Example:
	///
	/// ```
	/// use math_utils::bit_manipulation::ExactLog2;
	///
	/// assert_eq!(1_usize.exact_log2(), Some(0));
	/// assert_eq!(1024_usize.exact_log2(), Some(10));
	/// assert_eq!(1000_usize.exact_log2(), None);
	/// assert_eq!(0_u32.exact_log2(), None);
	/// ```
	#[must_use]
	fn exact_log2(&self) -> Option<u32>;
}

macro_rules! impl_exact_log2_for_unsigned {
	($t:ty) => {
		impl ExactLog2 for $t {
			fn exact_log2(&self) -> Option<u32> {
				if self.is_power_of_two() {
					Some(self.trailing_zeros())
				} else {
					None
				}
			}
		}
	};
	($t:ty, $($others:ty),+) => {
		impl_exact_log2_for_unsigned!($t);
		impl_exact_log2_for_unsigned!($($others),+);
	};
}

impl_exact_log2_for_unsigned!(u8, u16, u32, u64, u128, usize);
