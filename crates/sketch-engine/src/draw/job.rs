use glam::{Mat4, Vec3};

use crate::paint::Color;

use super::{DrawError, Template};

/// Primitive topology of a draw job.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PrimitiveKind {
    /// Independent segments: vertices `(0, 1)`, `(2, 3)`, ...
    Lines,
    /// Connected polyline through every vertex.
    LineStrip,
    /// One filled triangle.
    Triangle,
}

impl PrimitiveKind {
    /// Minimum vertex count accepted for this kind.
    #[inline]
    pub const fn min_vertices(self) -> usize {
        match self {
            PrimitiveKind::Lines => 2,
            PrimitiveKind::LineStrip => 3,
            PrimitiveKind::Triangle => 3,
        }
    }

    pub(crate) fn check_count(self, got: usize) -> Result<(), DrawError> {
        match self {
            PrimitiveKind::Triangle if got != 3 => Err(DrawError::WrongVertexCount {
                kind: self,
                expected: 3,
                got,
            }),
            _ if got < self.min_vertices() => Err(DrawError::TooFewVertices {
                kind: self,
                min: self.min_vertices(),
                got,
            }),
            _ => Ok(()),
        }
    }
}

/// Vertex payload of a [`JobDesc`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Vertices<'a> {
    /// World-space points, copied into the queue's vertex arena on submit.
    Explicit(&'a [Vec3]),
    /// A shared unit shape, instantiated through the job transform at flush time.
    Template(Template),
}

/// Borrowed description of a job, consumed by [`DrawQueue::submit`](super::DrawQueue::submit).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct JobDesc<'a> {
    pub kind: PrimitiveKind,
    pub color: Color,
    pub transform: Option<Mat4>,
    pub vertices: Vertices<'a>,
    pub dotted: bool,
}

impl<'a> JobDesc<'a> {
    #[inline]
    pub fn new(kind: PrimitiveKind, color: Color, vertices: Vertices<'a>) -> Self {
        Self { kind, color, transform: None, vertices, dotted: false }
    }

    #[inline]
    pub fn lines(points: &'a [Vec3], color: Color) -> Self {
        Self::new(PrimitiveKind::Lines, color, Vertices::Explicit(points))
    }

    #[inline]
    pub fn line_strip(points: &'a [Vec3], color: Color) -> Self {
        Self::new(PrimitiveKind::LineStrip, color, Vertices::Explicit(points))
    }

    #[inline]
    pub fn triangle(points: &'a [Vec3; 3], color: Color) -> Self {
        Self::new(PrimitiveKind::Triangle, color, Vertices::Explicit(points))
    }

    #[inline]
    pub fn template(kind: PrimitiveKind, template: Template, color: Color, transform: Mat4) -> Self {
        Self::new(kind, color, Vertices::Template(template)).with_transform(transform)
    }

    #[inline]
    pub fn with_transform(mut self, transform: Mat4) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Marks line segments to be rendered as dashes.
    #[inline]
    pub fn dotted(mut self) -> Self {
        self.dotted = true;
        self
    }
}

/// Where a recorded job reads its vertices from.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum VertexSource {
    /// Range in the owning queue's vertex arena.
    Span { start: u32, len: u32 },
    Template(Template),
}

/// A recorded draw job. Immutable; owned by the [`DrawQueue`](super::DrawQueue)
/// until the next flush.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawJob {
    pub(crate) kind: PrimitiveKind,
    pub(crate) color: Color,
    pub(crate) transform: Option<Mat4>,
    pub(crate) source: VertexSource,
    pub(crate) dotted: bool,
}

impl DrawJob {
    #[inline]
    pub fn kind(&self) -> PrimitiveKind {
        self.kind
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn transform(&self) -> Option<Mat4> {
        self.transform
    }

    #[inline]
    pub fn source(&self) -> VertexSource {
        self.source
    }

    #[inline]
    pub fn is_dotted(&self) -> bool {
        self.dotted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_requires_exactly_three() {
        assert!(PrimitiveKind::Triangle.check_count(3).is_ok());
        assert_eq!(
            PrimitiveKind::Triangle.check_count(4),
            Err(DrawError::WrongVertexCount { kind: PrimitiveKind::Triangle, expected: 3, got: 4 })
        );
    }

    #[test]
    fn strip_and_lines_minimums() {
        assert!(PrimitiveKind::Lines.check_count(2).is_ok());
        assert!(PrimitiveKind::Lines.check_count(1).is_err());
        assert!(PrimitiveKind::LineStrip.check_count(3).is_ok());
        assert!(PrimitiveKind::LineStrip.check_count(2).is_err());
    }

    #[test]
    fn desc_builders_set_flags() {
        let pts = [Vec3::ZERO, Vec3::X];
        let desc = JobDesc::lines(&pts, Color::RED).dotted().with_transform(Mat4::IDENTITY);
        assert!(desc.dotted);
        assert_eq!(desc.transform, Some(Mat4::IDENTITY));
        assert_eq!(desc.kind, PrimitiveKind::Lines);
    }
}
