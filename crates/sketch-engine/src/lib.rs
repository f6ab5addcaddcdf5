//! Sketch engine crate.
//!
//! Frame-scoped debug drawing: shape emitters record jobs into a [`draw::DrawQueue`],
//! the render boundary flushes them once per frame through a [`draw::DrawBackend`].

pub mod device;
pub mod draw;
pub mod logging;
pub mod paint;
pub mod render;
