//! GPU rendering of flushed draw jobs.
//!
//! [`GizmoRenderer`] is the wgpu host binding: it implements
//! [`DrawBackend`](crate::draw::DrawBackend), batches everything a flush hands it into
//! one line-list and one triangle-list stream, and uploads both at the end of the frame.
//!
//! Convention:
//! - CPU geometry is in world space (+Y up).
//! - Vertex shader converts to clip space using a view-projection uniform.

mod ctx;
mod gizmo;
mod vertex;

pub use ctx::{RenderCtx, RenderTarget};
pub use gizmo::{GizmoRenderer, DEFAULT_MAX_VERTICES};
pub use vertex::GpuVertex;
