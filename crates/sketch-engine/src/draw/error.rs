use thiserror::Error;

use super::PrimitiveKind;

/// Reasons a job is refused by [`DrawQueue::submit`](super::DrawQueue::submit).
///
/// Emitters never surface these to callers; the job is logged and dropped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DrawError {
    #[error("{kind:?} needs at least {min} vertices, got {got}")]
    TooFewVertices {
        kind: PrimitiveKind,
        min: usize,
        got: usize,
    },

    #[error("{kind:?} needs exactly {expected} vertices, got {got}")]
    WrongVertexCount {
        kind: PrimitiveKind,
        expected: usize,
        got: usize,
    },

    #[error("vertex {index} is not finite")]
    NonFiniteVertex { index: usize },

    #[error("job transform is not finite")]
    NonFiniteTransform,

    #[error("vertex arena full: {len} + {extra} vertices exceed u32 indexing")]
    ArenaOverflow { len: usize, extra: usize },
}

/// Failure reported by a host binding for a single draw call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BackendError {
    #[error("draw rejected by backend: {0}")]
    Rejected(String),

    #[error("graphics device error: {0}")]
    Device(String),
}
