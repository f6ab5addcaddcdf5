use glam::Vec3;

use crate::draw::{DrawQueue, JobDesc};
use crate::paint::Color;

impl DrawQueue {
    /// Records a single solid segment.
    #[inline]
    pub fn line(&mut self, a: Vec3, b: Vec3, color: Option<Color>) {
        let color = color.unwrap_or(self.config().palette.line);
        self.emit(JobDesc::lines(&[a, b], color));
    }

    /// Records a segment rendered as alternating dashes.
    #[inline]
    pub fn dotted_line(&mut self, a: Vec3, b: Vec3, color: Option<Color>) {
        let color = color.unwrap_or(self.config().palette.line);
        self.emit(JobDesc::lines(&[a, b], color).dotted());
    }

    /// Records a connected polyline.
    ///
    /// Fewer than two points draw nothing; two points become a plain line.
    pub fn polyline(&mut self, points: &[Vec3], color: Option<Color>) {
        match points {
            [] | [_] => {}
            [a, b] => self.line(*a, *b, color),
            _ => {
                let color = color.unwrap_or(self.config().palette.line);
                self.emit(JobDesc::line_strip(points, color));
            }
        }
    }

    /// Records one dotted segment between each consecutive pair of `points`.
    pub fn dotted_polyline(&mut self, points: &[Vec3], color: Option<Color>) {
        for w in points.windows(2) {
            self.dotted_line(w[0], w[1], color);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::draw::{DrawQueue, PrimitiveKind};
    use crate::paint::Color;
    use glam::Vec3;

    #[test]
    fn line_uses_palette_default() {
        let mut q = DrawQueue::new();
        q.line(Vec3::ZERO, Vec3::X, None);
        assert_eq!(q.jobs()[0].color(), q.config().palette.line);
        assert_eq!(q.jobs()[0].kind(), PrimitiveKind::Lines);
        assert!(!q.jobs()[0].is_dotted());
    }

    #[test]
    fn dotted_line_flags_job() {
        let mut q = DrawQueue::new();
        q.dotted_line(Vec3::ZERO, Vec3::X, Some(Color::RED));
        assert!(q.jobs()[0].is_dotted());
        assert_eq!(q.jobs()[0].color(), Color::RED);
    }

    #[test]
    fn polyline_picks_kind_by_length() {
        let mut q = DrawQueue::new();
        q.polyline(&[Vec3::ZERO], None);
        assert!(q.is_empty());

        q.polyline(&[Vec3::ZERO, Vec3::X], None);
        q.polyline(&[Vec3::ZERO, Vec3::X, Vec3::Y], None);
        assert_eq!(q.jobs()[0].kind(), PrimitiveKind::Lines);
        assert_eq!(q.jobs()[1].kind(), PrimitiveKind::LineStrip);
    }

    #[test]
    fn dotted_polyline_emits_one_job_per_pair() {
        let mut q = DrawQueue::new();
        q.dotted_polyline(&[Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z], None);
        assert_eq!(q.len(), 3);
        assert!(q.jobs().iter().all(|j| j.is_dotted()));
    }

    #[test]
    fn non_finite_line_is_dropped() {
        let mut q = DrawQueue::new();
        q.line(Vec3::ZERO, Vec3::splat(f32::NAN), None);
        assert!(q.is_empty());
    }
}
