//! Debug-draw batching core.
//!
//! Responsibilities:
//! - record per-frame draw jobs from arbitrary call sites (`DrawQueue`)
//! - generate primitive geometry (`shapes`, one file per shape family)
//! - drain the queue once per frame through a host binding (`DrawBackend`)
//!
//! Extending the emitters:
//! - add a module under `draw::shapes::*`
//! - implement its `impl DrawQueue` methods there in terms of `submit` / `emit`
//! - reuse `Template`s where the shape is an affine copy of a unit shape

mod backend;
mod config;
mod error;
mod flush;
mod job;
mod queue;
mod shared;
mod templates;

pub mod shapes;

pub use backend::{DrawBackend, DrawCall, RecordingBackend};
pub use config::{DrawConfig, Palette, DEFAULT_SEGMENTS, MAX_SEGMENTS, MAX_SPHERE_RADIAL_SEGMENTS, MIN_SEGMENTS};
pub use error::{BackendError, DrawError};
pub use flush::{FlushStats, MAX_DASHES_PER_SEGMENT};
pub use job::{DrawJob, JobDesc, PrimitiveKind, VertexSource, Vertices};
pub use queue::DrawQueue;
pub use shared::SharedDrawQueue;
pub use templates::{GeometryTemplates, Template};
