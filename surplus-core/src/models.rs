mod config;
mod curve;
pub mod geometry;
pub mod label;
mod map;
mod style;

pub use config::SamplingConfig;
pub use curve::*;
pub use label::Labels;
pub use map::Map;
pub use style::{Color, ColorError, Colors, LineStyle, LineStyleError};
