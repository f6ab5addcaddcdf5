use glam::{Mat4, Quat, Vec3};

use crate::draw::{DrawQueue, JobDesc, PrimitiveKind, Template};
use crate::paint::Color;

use super::{rotation_or_identity, usable_point};

impl DrawQueue {
    /// Records a box wireframe with edge lengths `size`, centered on `center`.
    ///
    /// One line-list job over the shared unit-cube template.
    pub fn cube(&mut self, center: Vec3, size: Vec3, color: Option<Color>, rotation: Option<Quat>) {
        if !usable_point("cube", center) || !size.is_finite() || size.cmple(Vec3::ZERO).any() {
            log::trace!("skipping cube: size {size}");
            return;
        }
        let color = color.unwrap_or(self.config().palette.cube);
        let transform = Mat4::from_scale_rotation_translation(size, rotation_or_identity(rotation), center);
        self.emit(JobDesc::template(PrimitiveKind::Lines, Template::UnitCube, color, transform));
    }

    #[inline]
    pub fn cube_uniform(&mut self, center: Vec3, size: f32, color: Option<Color>, rotation: Option<Quat>) {
        self.cube(center, Vec3::splat(size), color, rotation);
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_4;

    use glam::{Quat, Vec3};

    use crate::draw::shapes::test_util::{approx, EPS};
    use crate::draw::{DrawQueue, PrimitiveKind, RecordingBackend, VertexSource};

    #[test]
    fn cube_is_one_line_list_of_twelve_edges() {
        let mut q = DrawQueue::new();
        let c = Vec3::new(0.0, 1.0, -2.0);
        let size = Vec3::new(2.0, 1.0, 4.0);
        q.cube(c, size, None, None);

        assert_eq!(q.len(), 1);
        let job = &q.jobs()[0];
        assert_eq!(job.kind(), PrimitiveKind::Lines);
        assert!(matches!(job.source(), VertexSource::Template(_)));
        assert_eq!(job.color(), q.config().palette.cube);

        let v = q.vertices_of(job);
        assert_eq!(v.len(), 24);
        for p in &v {
            let local = (*p - c).abs();
            assert!(approx(local, size * 0.5));
        }

        let mut corners: Vec<Vec3> = Vec::new();
        for p in v {
            if !corners.iter().any(|&q| approx(q, p)) {
                corners.push(p);
            }
        }
        assert_eq!(corners.len(), 8);

        let mut backend = RecordingBackend::new();
        q.flush(&mut backend);
        assert_eq!(backend.segment_count(), 12);
    }

    #[test]
    fn rotated_cube_keeps_its_corner_distance() {
        let mut q = DrawQueue::new();
        q.cube_uniform(Vec3::ZERO, 2.0, None, Some(Quat::from_rotation_y(FRAC_PI_4)));
        let half_diagonal = 3f32.sqrt();
        for p in q.vertices_of(&q.jobs()[0]) {
            assert!((p.length() - half_diagonal).abs() < EPS);
        }
    }

    #[test]
    fn flat_or_invalid_cube_is_skipped() {
        let mut q = DrawQueue::new();
        q.cube(Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0), None, None);
        q.cube(Vec3::ZERO, Vec3::new(1.0, f32::NAN, 1.0), None, None);
        q.cube_uniform(Vec3::ZERO, -1.0, None, None);
        assert!(q.is_empty());
    }
}
