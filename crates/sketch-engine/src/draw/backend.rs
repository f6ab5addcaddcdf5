use glam::Vec3;

use crate::paint::Color;

use super::BackendError;

/// Host binding the queue flushes into.
///
/// This is the only rendering dependency of the core: any graphics API that can draw
/// colored line lists and filled triangles can implement it.
pub trait DrawBackend {
    /// Draws independent segments: `vertices[0..2]`, `vertices[2..4]`, ...
    fn draw_lines(&mut self, vertices: &[Vec3], color: Color) -> Result<(), BackendError>;

    /// Draws one filled triangle.
    fn draw_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3, color: Color) -> Result<(), BackendError>;
}

/// One call received by a [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Lines { vertices: Vec<Vec3>, color: Color },
    Triangle { vertices: [Vec3; 3], color: Color },
}

impl DrawCall {
    #[inline]
    pub fn color(&self) -> Color {
        match self {
            DrawCall::Lines { color, .. } | DrawCall::Triangle { color, .. } => *color,
        }
    }

    #[inline]
    pub fn is_lines(&self) -> bool {
        matches!(self, DrawCall::Lines { .. })
    }
}

/// Backend that records every call in order.
///
/// Used for headless runs, diagnostics and tests.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: Vec<DrawCall>,
}

impl RecordingBackend {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Total number of line segments recorded.
    pub fn segment_count(&self) -> usize {
        self.calls
            .iter()
            .map(|c| match c {
                DrawCall::Lines { vertices, .. } => vertices.len() / 2,
                DrawCall::Triangle { .. } => 0,
            })
            .sum()
    }

    pub fn triangle_count(&self) -> usize {
        self.calls.iter().filter(|c| !c.is_lines()).count()
    }

    /// Returns recorded calls and resets the recorder.
    #[inline]
    pub fn take(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }
}

impl DrawBackend for RecordingBackend {
    fn draw_lines(&mut self, vertices: &[Vec3], color: Color) -> Result<(), BackendError> {
        self.calls.push(DrawCall::Lines { vertices: vertices.to_vec(), color });
        Ok(())
    }

    fn draw_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3, color: Color) -> Result<(), BackendError> {
        self.calls.push(DrawCall::Triangle { vertices: [a, b, c], color });
        Ok(())
    }
}
