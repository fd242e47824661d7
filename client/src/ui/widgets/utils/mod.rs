pub mod animation;
pub mod render;

pub use render::{CairoShapesExt, Rgba};
