mod error;
pub use error::*;

mod windowing_fn;
pub use windowing_fn::*;

mod cosine_sum;
pub use cosine_sum::*;

mod window_kind;
pub use window_kind::*;

mod synthesizer;
pub use synthesizer::*;

pub mod reference;
