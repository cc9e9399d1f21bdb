use cordic::ConfigError;
use math_utils::stats::StatisticsError;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
	#[error("invalid rotator configuration")]
	Config(#[from] ConfigError),
	#[error("unable to compare window tables")]
	Statistics(#[from] StatisticsError),
	#[error("sample count {0} is not a power of two")]
	SampleCountNotPowerOfTwo(usize),
	#[error("sample count {n_samples} is below the minimum of {min}")]
	TooFewSamples { n_samples: usize, min: usize },
	#[error("{headroom_bits} headroom bits don't fit a {data_width}-bit window")]
	HeadroomOutOfRange { headroom_bits: u32, data_width: u32 },
	#[error("unknown window selector {0:#04x}")]
	UnknownSelector(u8),
	#[error("unknown window kind \"{0}\"")]
	UnknownKind(String),
}
