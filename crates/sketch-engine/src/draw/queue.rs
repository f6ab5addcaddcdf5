use std::sync::Arc;

use glam::Vec3;

use super::{DrawConfig, DrawError, DrawJob, GeometryTemplates, JobDesc, VertexSource, Vertices};

/// Per-frame batching queue of debug draw jobs.
///
/// Lifecycle: jobs are appended by the shape emitters (or [`submit`](Self::submit))
/// during a frame and drained exactly once by [`flush`](Self::flush), which clears the
/// queue afterwards.
///
/// Performance characteristics:
/// - `submit()` is O(vertices); explicit vertices go into one shared arena
/// - all buffers keep their capacity, so a warmed queue does not allocate per frame
/// - template shapes (circles, cubes) store no vertices at all
#[derive(Debug)]
pub struct DrawQueue {
    config: DrawConfig,
    templates: Arc<GeometryTemplates>,

    pub(super) jobs: Vec<DrawJob>,
    pub(super) vertices: Vec<Vec3>,

    /// Flush-time staging for resolved / expanded vertices.
    pub(super) scratch: Vec<Vec3>,
    pub(super) pairs: Vec<Vec3>,
    pub(super) dashes: Vec<Vec3>,

    /// Emit-time staging for shapes that build their vertex list incrementally.
    pub(super) build: Vec<Vec3>,

    pub(super) frame_index: u64,
}

impl Default for DrawQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawQueue {
    #[inline]
    pub fn new() -> Self {
        Self::with_config(DrawConfig::default())
    }

    /// Creates a queue with `config`, sanitized first.
    pub fn with_config(config: DrawConfig) -> Self {
        let config = config.sanitized();
        let templates = GeometryTemplates::shared(config.segments);
        Self {
            config,
            templates,
            jobs: Vec::new(),
            vertices: Vec::new(),
            scratch: Vec::new(),
            pairs: Vec::new(),
            dashes: Vec::new(),
            build: Vec::new(),
            frame_index: 0,
        }
    }

    #[inline]
    pub fn config(&self) -> &DrawConfig {
        &self.config
    }

    #[inline]
    pub fn templates(&self) -> &Arc<GeometryTemplates> {
        &self.templates
    }

    /// Tessellation shared by circles, arcs and spheres.
    #[inline]
    pub fn segments(&self) -> u32 {
        self.config.segments
    }

    /// Number of flushes performed so far.
    #[inline]
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Returns recorded jobs in submission order.
    #[inline]
    pub fn jobs(&self) -> &[DrawJob] {
        &self.jobs
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Drops every pending job. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.jobs.clear();
        self.vertices.clear();
    }

    /// Validates and records a job.
    ///
    /// Explicit vertices are copied into the queue; the caller's slice is not retained.
    /// Color channels are clamped to `[0, 1]` (NaN becomes 0). On error the queue is
    /// left unchanged.
    pub fn submit(&mut self, desc: JobDesc<'_>) -> Result<(), DrawError> {
        if let Some(m) = desc.transform {
            if !m.is_finite() {
                return Err(DrawError::NonFiniteTransform);
            }
        }

        let source = match desc.vertices {
            Vertices::Explicit(points) => {
                desc.kind.check_count(points.len())?;
                if let Some(index) = points.iter().position(|p| !p.is_finite()) {
                    return Err(DrawError::NonFiniteVertex { index });
                }
                let (start, len) = span_for(self.vertices.len(), points.len())?;
                self.vertices.extend_from_slice(points);
                VertexSource::Span { start, len }
            }
            Vertices::Template(template) => {
                desc.kind.check_count(self.templates.points(template).len())?;
                VertexSource::Template(template)
            }
        };

        let color = desc.color.clamped();
        if color != desc.color {
            log::trace!("debug draw color {:?} clamped to {:?}", desc.color, color);
        }

        self.jobs.push(DrawJob {
            kind: desc.kind,
            color,
            transform: desc.transform,
            source,
            dotted: desc.dotted,
        });
        Ok(())
    }

    /// Emitter path: a rejected job is logged and dropped.
    #[inline]
    pub(crate) fn emit(&mut self, desc: JobDesc<'_>) {
        if let Err(err) = self.submit(desc) {
            log::debug!("dropping debug draw job: {err}");
        }
    }

    /// Returns the job's vertices as they will be drawn (templates transformed).
    pub fn vertices_of(&self, job: &DrawJob) -> Vec<Vec3> {
        let mut out = Vec::new();
        resolve_into(job, &self.vertices, &self.templates, &mut out);
        out
    }
}

/// Arena range for `extra` vertices appended after `len`; both ends must fit `u32`.
fn span_for(len: usize, extra: usize) -> Result<(u32, u32), DrawError> {
    let overflow = || DrawError::ArenaOverflow { len, extra };
    let end = len.checked_add(extra).ok_or_else(overflow)?;
    u32::try_from(end).map_err(|_| overflow())?;
    let start = u32::try_from(len).map_err(|_| overflow())?;
    let count = u32::try_from(extra).map_err(|_| overflow())?;
    Ok((start, count))
}

/// Writes `job`'s world-space vertices into `out` (cleared first).
pub(super) fn resolve_into(
    job: &DrawJob,
    arena: &[Vec3],
    templates: &GeometryTemplates,
    out: &mut Vec<Vec3>,
) {
    out.clear();
    let points: &[Vec3] = match job.source {
        VertexSource::Span { start, len } => {
            let start = start as usize;
            arena.get(start..start + len as usize).unwrap_or(&[])
        }
        VertexSource::Template(t) => templates.points(t),
    };
    match job.transform {
        Some(m) => out.extend(points.iter().map(|&p| m.transform_point3(p))),
        None => out.extend_from_slice(points),
    }
}

#[cfg(test)]
mod tests {
    use glam::Mat4;

    use super::*;
    use crate::draw::{PrimitiveKind, Template};
    use crate::paint::Color;

    #[test]
    fn new_queue_is_empty() {
        let q = DrawQueue::new();
        assert!(q.is_empty());
        assert_eq!(q.frame_index(), 0);
        assert_eq!(q.segments(), crate::draw::DEFAULT_SEGMENTS);
    }

    #[test]
    fn submit_copies_explicit_vertices() {
        let mut q = DrawQueue::new();
        let pts = [Vec3::ZERO, Vec3::ONE];
        q.submit(JobDesc::lines(&pts, Color::RED)).unwrap();
        assert_eq!(q.len(), 1);
        assert_eq!(q.vertices_of(&q.jobs()[0]), pts.to_vec());
    }

    #[test]
    fn submit_rejects_short_strip_and_leaves_queue_unchanged() {
        let mut q = DrawQueue::new();
        let pts = [Vec3::ZERO, Vec3::ONE];
        let err = q.submit(JobDesc::line_strip(&pts, Color::RED)).unwrap_err();
        assert!(matches!(err, DrawError::TooFewVertices { min: 3, got: 2, .. }));
        assert!(q.is_empty());
        assert!(q.vertices.is_empty());
    }

    #[test]
    fn submit_rejects_non_finite_input() {
        let mut q = DrawQueue::new();
        let pts = [Vec3::ZERO, Vec3::new(f32::NAN, 0.0, 0.0)];
        assert_eq!(
            q.submit(JobDesc::lines(&pts, Color::RED)),
            Err(DrawError::NonFiniteVertex { index: 1 })
        );

        let ok = [Vec3::ZERO, Vec3::X];
        let bad = Mat4::from_translation(Vec3::splat(f32::INFINITY));
        assert_eq!(
            q.submit(JobDesc::lines(&ok, Color::RED).with_transform(bad)),
            Err(DrawError::NonFiniteTransform)
        );
        assert!(q.is_empty());
    }

    #[test]
    fn template_job_resolves_through_transform() {
        let mut q = DrawQueue::with_config(DrawConfig::default().with_segments(4));
        let m = Mat4::from_translation(Vec3::new(0.0, 2.0, 0.0)) * Mat4::from_scale(Vec3::splat(3.0));
        q.submit(JobDesc::template(PrimitiveKind::LineStrip, Template::UnitCircle, Color::WHITE, m))
            .unwrap();

        let verts = q.vertices_of(&q.jobs()[0]);
        assert_eq!(verts.len(), 5);
        assert!((verts[0] - Vec3::new(0.0, 2.0, 3.0)).length() < 1e-5);
        // Template itself untouched.
        assert_eq!(q.templates().points(Template::UnitCircle)[0], Vec3::Z);
    }

    #[test]
    fn submit_clamps_color_before_it_reaches_the_backend() {
        let mut q = DrawQueue::new();
        q.line(Vec3::ZERO, Vec3::X, Some(Color::new(f32::NAN, 2.0, -1.0, f32::INFINITY)));
        assert_eq!(q.jobs()[0].color(), Color::new(0.0, 1.0, 0.0, 1.0));

        let mut backend = crate::draw::RecordingBackend::new();
        q.flush(&mut backend);
        let c = backend.calls()[0].color().to_array();
        assert!(c.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn arena_span_rejects_counts_past_u32() {
        assert_eq!(span_for(10, 4), Ok((10, 4)));
        let max = u32::MAX as usize;
        assert_eq!(span_for(max - 2, 2), Ok((u32::MAX - 2, 2)));
        assert_eq!(span_for(max - 1, 2), Err(DrawError::ArenaOverflow { len: max - 1, extra: 2 }));
        assert!(span_for(0, max + 1).is_err());
        assert!(span_for(usize::MAX, 1).is_err());
    }

    #[test]
    fn oversized_segment_count_builds_capped_template() {
        let q = DrawQueue::with_config(DrawConfig::default().with_segments(u32::MAX));
        assert_eq!(q.segments(), crate::draw::MAX_SEGMENTS);
        let circle = q.templates().points(Template::UnitCircle);
        assert_eq!(circle.len(), crate::draw::MAX_SEGMENTS as usize + 1);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut q = DrawQueue::new();
        let pts = [Vec3::ZERO, Vec3::ONE];
        for _ in 0..16 {
            q.submit(JobDesc::lines(&pts, Color::RED)).unwrap();
        }
        let cap = q.jobs.capacity();
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.jobs.capacity(), cap);
    }
}
