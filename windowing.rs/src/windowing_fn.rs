/// Floating-point evaluation of a window.
pub trait WindowingFn {
	/// Weight of sample `index` in a window of `n_of_samples` samples, nominally in `0..=1`.
	fn ratio_at(&self, index: usize, n_of_samples: usize) -> f64;

	/// Every weight of the window, in sample order.
	fn ratios(&self, n_of_samples: usize) -> Vec<f64> {
		(0..n_of_samples)
			.map(|index| self.ratio_at(index, n_of_samples))
			.collect()
	}
}
