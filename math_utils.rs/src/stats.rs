use std::{borrow::Borrow, cell::RefCell};

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatisticsError {
	#[error("error stats are undefined on empty series")]
	EmptySeries,
	#[error("series length mismatch: {actual} actual values against {expected} expected values")]
	LengthMismatch { actual: usize, expected: usize },
}

/// Deviation of a series of integer results from a golden series of the same length.
///
/// Every metric is computed on first access and cached.
#[derive(Debug, Clone)]
pub struct ErrorStatistics<Actual: Borrow<[i64]>, Expected: Borrow<[i64]>> {
	actual: Actual,
	expected: Expected,
	sum_of_squares: RefCell<Option<f64>>,
	mean_abs_error: RefCell<Option<f64>>,
	max_abs_error: RefCell<Option<u64>>,
}

impl<Actual: Borrow<[i64]>, Expected: Borrow<[i64]>> ErrorStatistics<Actual, Expected> {
	/// # Errors
	/// - on empty series
	/// - if the two series have different lengths
	pub fn new(actual: Actual, expected: Expected) -> Result<Self, StatisticsError> {
		let (actual_len, expected_len) = (actual.borrow().len(), expected.borrow().len());
		if actual_len != expected_len {
			Err(StatisticsError::LengthMismatch {
				actual: actual_len,
				expected: expected_len,
			})
		} else if actual_len == 0 {
			Err(StatisticsError::EmptySeries)
		} else {
			Ok(Self {
				actual,
				expected,
				sum_of_squares: RefCell::default(),
				mean_abs_error: RefCell::default(),
				max_abs_error: RefCell::default(),
			})
		}
	}

	pub fn actual(&self) -> &[i64] {
		self.actual.borrow()
	}

	pub fn expected(&self) -> &[i64] {
		self.expected.borrow()
	}

	fn len(&self) -> usize {
		self.actual().len()
	}

	fn abs_errors(&self) -> impl Iterator<Item = u64> + '_ {
		self.actual()
			.iter()
			.zip(self.expected())
			.map(|(a, e)| a.abs_diff(*e))
	}

	#[must_use]
	pub fn max_abs_error(&self) -> u64 {
		*self
			.max_abs_error
			.borrow_mut()
			.get_or_insert_with(|| self.abs_errors().max().unwrap_or_default())
	}

	#[must_use]
	#[allow(clippy::cast_precision_loss)]
	pub fn mean_abs_error(&self) -> f64 {
		*self.mean_abs_error.borrow_mut().get_or_insert_with(|| {
			self.abs_errors().map(|e| e as f64).sum::<f64>() / self.len() as f64
		})
	}

	#[must_use]
	#[allow(clippy::cast_precision_loss)]
	fn sum_of_squares(&self) -> f64 {
		*self.sum_of_squares.borrow_mut().get_or_insert_with(|| {
			self.abs_errors()
				.map(|e| {
					let e = e as f64;
					e * e
				})
				.sum()
		})
	}

	/// `sqrt(Σ(actual − expected)²) / N`: the square root of the total squared
	/// error divided by the series length.
	#[must_use]
	#[allow(clippy::cast_precision_loss)]
	pub fn normalized_error(&self) -> f64 {
		self.sum_of_squares().sqrt() / self.len() as f64
	}
}
