//! Floating-point golden model of the synthesized windows.

use math_utils::{const_num::round_f64_to_i64, stats::ErrorStatistics};

use crate::{synthesizer::sample_count_log2, CosineSum, WindowError, WindowTable, WindowingFn};

/// `round(w(i) · scale)` for every sample, with the same full-scale value as the
/// synthesized table.
///
/// # Errors
/// - see [`sample_count_log2`] and [`CosineSum::scale`]
pub fn reference_window(
	window: &CosineSum,
	n_samples: usize,
	data_width: u32,
) -> Result<Vec<i64>, WindowError> {
	sample_count_log2(n_samples)?;
	let scale = window.scale(data_width)?;
	Ok(window
		.ratios(n_samples)
		.into_iter()
		.map(|ratio| round_f64_to_i64(ratio * scale))
		.collect())
}

/// Error statistics of a synthesized table against its golden model.
///
/// # Errors
/// - if the two tables have different lengths
pub fn compare<'a>(
	table: &WindowTable,
	expected: &'a [i64],
) -> Result<ErrorStatistics<Vec<i64>, &'a [i64]>, WindowError> {
	Ok(ErrorStatistics::new(table.raw_values(), expected)?)
}
