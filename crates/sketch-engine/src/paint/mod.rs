//! Color model for debug geometry.
//!
//! Debug overlays are drawn unlit with straight alpha, so a single color type covers
//! both the queue and the GPU binding.

pub mod color;

pub use color::Color;
