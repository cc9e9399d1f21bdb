#[derive(thiserror::Error, Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum ConfigError {
	#[error("data width {data_width} is out of range {min}..={max}")]
	DataWidthOutOfRange { data_width: u32, min: u32, max: u32 },
	#[error("phase width {phase_width} is out of range {min}..={max}")]
	PhaseWidthOutOfRange { phase_width: u32, min: u32, max: u32 },
	#[error("{data_width} micro-rotations cover {covered} angle units, less than a quarter turn ({quarter_turn})")]
	InsufficientRotationRange {
		data_width: u32,
		covered: i64,
		quarter_turn: i64,
	},
}
