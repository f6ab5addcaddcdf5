//! GPU device management without a window.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue with no surface attached
//! - allocating offscreen color targets the gizmo renderer can draw into

mod gpu;
mod offscreen;

pub use gpu::{Gpu, GpuInit};
pub use offscreen::OffscreenTarget;
