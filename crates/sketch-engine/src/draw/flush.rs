use std::sync::Arc;

use glam::Vec3;

use super::queue::resolve_into;
use super::{DrawBackend, DrawQueue, PrimitiveKind};

/// Upper bound on dashes emitted for one dotted segment; longer segments get longer dashes.
pub const MAX_DASHES_PER_SEGMENT: usize = 1024;

/// Summary of one [`DrawQueue::flush`].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FlushStats {
    /// Jobs drained from the queue.
    pub jobs: usize,
    pub line_calls: usize,
    pub triangle_calls: usize,
    /// Calls the backend reported as failed.
    pub failed: usize,
    /// Jobs skipped before reaching the backend (non-finite after transform).
    pub skipped: usize,
}

impl FlushStats {
    #[inline]
    pub fn draw_calls(&self) -> usize {
        self.line_calls + self.triangle_calls
    }
}

impl DrawQueue {
    /// Issues every pending job to `backend` in submission order, then clears the queue.
    ///
    /// Called once per frame by the render boundary, never by emitters. Each job is
    /// isolated: a failed or skipped job is logged and counted, later jobs still draw,
    /// and the queue is emptied regardless.
    pub fn flush(&mut self, backend: &mut dyn DrawBackend) -> FlushStats {
        let mut stats = FlushStats::default();
        let dash_length = self.config().dash_length;
        let templates = Arc::clone(self.templates());

        for job in &self.jobs {
            stats.jobs += 1;
            resolve_into(job, &self.vertices, &templates, &mut self.scratch);

            if !self.scratch.iter().all(|p| p.is_finite()) {
                log::debug!("skipping {:?} job: non-finite vertices after transform", job.kind);
                stats.skipped += 1;
                continue;
            }

            let result = match job.kind {
                PrimitiveKind::Triangle => {
                    let [a, b, c] = [self.scratch[0], self.scratch[1], self.scratch[2]];
                    stats.triangle_calls += 1;
                    backend.draw_triangle(a, b, c, job.color)
                }
                PrimitiveKind::Lines | PrimitiveKind::LineStrip => {
                    let segments: &[Vec3] = if job.kind == PrimitiveKind::LineStrip {
                        strip_to_pairs(&self.scratch, &mut self.pairs);
                        &self.pairs
                    } else {
                        let even = self.scratch.len() & !1;
                        &self.scratch[..even]
                    };

                    let segments: &[Vec3] = if job.dotted {
                        dash_pairs(segments, dash_length, &mut self.dashes);
                        &self.dashes
                    } else {
                        segments
                    };

                    if segments.is_empty() {
                        // Fully degenerate dotted job; nothing to draw.
                        continue;
                    }
                    stats.line_calls += 1;
                    backend.draw_lines(segments, job.color)
                }
            };

            if let Err(err) = result {
                log::warn!("debug draw {:?} job failed: {err}", job.kind);
                stats.failed += 1;
            }
        }

        self.clear();
        self.frame_index = self.frame_index.wrapping_add(1);

        log::trace!("debug draw frame {} flushed: {:?}", self.frame_index, stats);
        stats
    }
}

/// Expands a polyline into independent segments.
fn strip_to_pairs(strip: &[Vec3], out: &mut Vec<Vec3>) {
    out.clear();
    for w in strip.windows(2) {
        out.push(w[0]);
        out.push(w[1]);
    }
}

/// Splits each segment into alternating drawn / skipped dashes of `dash` length.
///
/// Every segment starts with a drawn dash; the last dash is cut at the segment end.
fn dash_pairs(segments: &[Vec3], dash: f32, out: &mut Vec<Vec3>) {
    out.clear();
    for seg in segments.chunks_exact(2) {
        let (a, b) = (seg[0], seg[1]);
        let len = a.distance(b);
        if len <= f32::EPSILON {
            continue;
        }
        let dir = (b - a) / len;

        let dash = dash.max(len / (2.0 * MAX_DASHES_PER_SEGMENT as f32));
        let count = ((len / (2.0 * dash)).ceil() as usize).clamp(1, MAX_DASHES_PER_SEGMENT);
        for i in 0..count {
            let t0 = i as f32 * 2.0 * dash;
            if t0 >= len {
                break;
            }
            let t1 = (t0 + dash).min(len);
            out.push(a + dir * t0);
            out.push(a + dir * t1);
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::{Mat4, Quat};

    use super::*;
    use crate::draw::{BackendError, DrawCall, DrawConfig, JobDesc, RecordingBackend, Template};
    use crate::paint::Color;

    /// Fails every triangle, records everything else.
    #[derive(Default)]
    struct FailingTriangles {
        inner: RecordingBackend,
    }

    impl DrawBackend for FailingTriangles {
        fn draw_lines(&mut self, v: &[Vec3], color: Color) -> Result<(), BackendError> {
            self.inner.draw_lines(v, color)
        }

        fn draw_triangle(&mut self, _: Vec3, _: Vec3, _: Vec3, _: Color) -> Result<(), BackendError> {
            Err(BackendError::Rejected("no fill pipeline".into()))
        }
    }

    const TRI: [Vec3; 3] = [Vec3::ZERO, Vec3::X, Vec3::Y];

    // ── ordering ──────────────────────────────────────────────────────────

    #[test]
    fn flush_issues_draws_in_submission_order() {
        let mut q = DrawQueue::new();
        q.submit(JobDesc::lines(&[Vec3::ZERO, Vec3::X], Color::RED)).unwrap();
        q.submit(JobDesc::triangle(&TRI, Color::BLUE)).unwrap();

        let mut backend = RecordingBackend::new();
        let stats = q.flush(&mut backend);

        let calls = backend.take();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].is_lines() && calls[0].color() == Color::RED);
        assert!(matches!(calls[1], DrawCall::Triangle { .. }));
        assert_eq!(calls[1].color(), Color::BLUE);
        assert_eq!(stats, FlushStats { jobs: 2, line_calls: 1, triangle_calls: 1, failed: 0, skipped: 0 });

        // Queue was cleared: an empty flush issues nothing.
        assert!(q.is_empty());
        let stats = q.flush(&mut backend);
        assert_eq!(stats.draw_calls(), 0);
        assert!(backend.calls().is_empty());
        assert_eq!(q.frame_index(), 2);
    }

    // ── isolation ─────────────────────────────────────────────────────────

    #[test]
    fn failing_job_does_not_block_later_jobs_or_leak() {
        let mut q = DrawQueue::new();
        q.submit(JobDesc::triangle(&TRI, Color::BLUE)).unwrap();
        q.submit(JobDesc::lines(&[Vec3::ZERO, Vec3::X], Color::GREEN)).unwrap();

        let mut backend = FailingTriangles::default();
        let stats = q.flush(&mut backend);

        assert_eq!(stats.failed, 1);
        assert_eq!(backend.inner.calls().len(), 1);
        assert_eq!(backend.inner.calls()[0].color(), Color::GREEN);
        assert!(q.is_empty());
    }

    #[test]
    fn overflowing_transform_is_skipped() {
        let mut q = DrawQueue::new();
        let big = Vec3::splat(f32::MAX);
        let m = Mat4::from_scale_rotation_translation(big, Quat::IDENTITY, big);
        q.submit(JobDesc::template(PrimitiveKind::Lines, Template::UnitCube, Color::WHITE, m))
            .unwrap();
        q.submit(JobDesc::lines(&[Vec3::ZERO, Vec3::X], Color::RED)).unwrap();

        let mut backend = RecordingBackend::new();
        let stats = q.flush(&mut backend);
        assert_eq!(stats.skipped, 1);
        assert_eq!(backend.calls().len(), 1);
        assert_eq!(backend.calls()[0].color(), Color::RED);
        assert!(q.is_empty());
    }

    // ── strips ────────────────────────────────────────────────────────────

    #[test]
    fn strip_becomes_one_line_list_call() {
        let mut q = DrawQueue::new();
        let strip = [Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::ZERO];
        q.submit(JobDesc::line_strip(&strip, Color::WHITE)).unwrap();

        let mut backend = RecordingBackend::new();
        q.flush(&mut backend);
        assert_eq!(backend.calls().len(), 1);
        assert_eq!(backend.segment_count(), 3);
    }

    #[test]
    fn template_circle_flushes_segments_lines_and_leaves_template_intact() {
        let mut q = DrawQueue::with_config(DrawConfig::default().with_segments(16));
        let before = q.templates().points(Template::UnitCircle).to_vec();
        let m = Mat4::from_scale(Vec3::splat(5.0));
        q.submit(JobDesc::template(PrimitiveKind::LineStrip, Template::UnitCircle, Color::WHITE, m))
            .unwrap();

        let mut backend = RecordingBackend::new();
        q.flush(&mut backend);
        assert_eq!(backend.segment_count(), 16);
        assert_eq!(q.templates().points(Template::UnitCircle), before.as_slice());
    }

    // ── dotted ────────────────────────────────────────────────────────────

    #[test]
    fn dotted_line_is_split_into_dashes_on_the_segment() {
        let mut q = DrawQueue::with_config(DrawConfig::default().with_dash_length(0.1));
        let (a, b) = (Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
        q.submit(JobDesc::lines(&[a, b], Color::WHITE).dotted()).unwrap();

        let mut backend = RecordingBackend::new();
        q.flush(&mut backend);

        let calls = backend.take();
        assert_eq!(calls.len(), 1);
        let DrawCall::Lines { vertices, .. } = &calls[0] else { panic!("expected lines") };
        assert_eq!(vertices.len() / 2, 5);
        for v in vertices {
            assert!(v.y == 0.0 && v.z == 0.0 && v.x >= 0.0 && v.x <= 1.0 + 1e-6);
        }
        // First dash starts at the line start; gaps are skipped.
        assert_eq!(vertices[0], a);
        assert!((vertices[2].x - 0.2).abs() < 1e-6);
    }

    #[test]
    fn dash_count_is_capped_for_long_lines() {
        let mut out = Vec::new();
        dash_pairs(&[Vec3::ZERO, Vec3::new(1.0e6, 0.0, 0.0)], 0.01, &mut out);
        assert!(out.len() / 2 <= MAX_DASHES_PER_SEGMENT);
        assert!(!out.is_empty());
    }

    #[test]
    fn zero_length_dotted_line_draws_nothing() {
        let mut q = DrawQueue::new();
        q.submit(JobDesc::lines(&[Vec3::ONE, Vec3::ONE], Color::WHITE).dotted()).unwrap();
        let mut backend = RecordingBackend::new();
        let stats = q.flush(&mut backend);
        assert_eq!(stats.draw_calls(), 0);
        assert!(q.is_empty());
    }
}
