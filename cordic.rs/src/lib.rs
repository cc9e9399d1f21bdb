#![allow(clippy::cast_possible_truncation)]

mod error;
pub use error::*;

mod fixed_point;
pub use fixed_point::*;

pub mod atan_lut;
pub use atan_lut::AtanLut;

mod config;
pub use config::*;

mod rotator;
pub use rotator::*;
