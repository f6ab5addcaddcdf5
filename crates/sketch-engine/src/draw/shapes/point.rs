use glam::{Quat, Vec3};

use crate::draw::{DrawQueue, JobDesc};
use crate::paint::Color;

use super::{rotation_or_identity, usable_point, usable_size, FORWARD, RIGHT, UP};

impl DrawQueue {
    /// Records a 3-axis cross of length `size` centered at `position`.
    ///
    /// Each axis uses its palette color unless `color` overrides all three.
    pub fn point(&mut self, position: Vec3, size: Option<f32>, color: Option<Color>, rotation: Option<Quat>) {
        let size = size.unwrap_or(self.config().point_size);
        if !usable_point("point", position) || !usable_size(size) {
            return;
        }
        let rot = rotation_or_identity(rotation);
        let half = size * 0.5;
        let palette = &self.config().palette;
        let axes = [
            (RIGHT, color.unwrap_or(palette.axis_x)),
            (UP, color.unwrap_or(palette.axis_y)),
            (FORWARD, color.unwrap_or(palette.axis_z)),
        ];

        for (axis, c) in axes {
            let offset = rot * axis * half;
            self.emit(JobDesc::lines(&[position + offset, position - offset], c));
        }
    }

    /// Records a [`point`](Self::point) for every position.
    pub fn points<I>(&mut self, positions: I, size: Option<f32>, color: Option<Color>, rotation: Option<Quat>)
    where
        I: IntoIterator<Item = Vec3>,
    {
        for p in positions {
            self.point(p, size, color, rotation);
        }
    }

    /// Records a transform gizmo: one line of length `size` from `position` along each
    /// rotated axis, in the axis colors.
    pub fn axes(&mut self, position: Vec3, rotation: Quat, size: f32) {
        if !usable_point("axes", position) || !usable_size(size) {
            return;
        }
        let rot = rotation_or_identity(Some(rotation));
        let palette = &self.config().palette;
        let axes = [(RIGHT, palette.axis_x), (UP, palette.axis_y), (FORWARD, palette.axis_z)];

        for (axis, c) in axes {
            self.emit(JobDesc::lines(&[position, position + rot * axis * size], c));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use glam::{Quat, Vec3};

    use crate::draw::shapes::test_util::approx;
    use crate::draw::DrawQueue;
    use crate::paint::Color;

    #[test]
    fn point_emits_three_axis_lines_with_axis_colors() {
        let mut q = DrawQueue::new();
        let p = Vec3::new(1.0, 2.0, 3.0);
        q.point(p, Some(2.0), None, None);

        assert_eq!(q.len(), 3);
        let palette = q.config().palette.clone();
        let colors: Vec<_> = q.jobs().iter().map(|j| j.color()).collect();
        assert_eq!(colors, vec![palette.axis_x, palette.axis_y, palette.axis_z]);

        let x = q.vertices_of(&q.jobs()[0]);
        assert!(approx(x[0], p + Vec3::X) && approx(x[1], p - Vec3::X));
        for job in q.jobs() {
            let v = q.vertices_of(job);
            assert!((v[0].distance(v[1]) - 2.0).abs() < 1e-5);
            assert!(approx((v[0] + v[1]) * 0.5, p));
        }
    }

    #[test]
    fn explicit_color_overrides_all_axes() {
        let mut q = DrawQueue::new();
        q.point(Vec3::ZERO, None, Some(Color::WHITE), None);
        assert!(q.jobs().iter().all(|j| j.color() == Color::WHITE));
    }

    #[test]
    fn rotation_turns_the_cross() {
        let mut q = DrawQueue::new();
        q.point(Vec3::ZERO, Some(2.0), None, Some(Quat::from_rotation_z(FRAC_PI_2)));
        let x = q.vertices_of(&q.jobs()[0]);
        // X axis rotated onto Y.
        assert!(approx(x[0], Vec3::Y));
    }

    #[test]
    fn degenerate_points_are_skipped() {
        let mut q = DrawQueue::new();
        q.point(Vec3::ZERO, Some(0.0), None, None);
        q.point(Vec3::splat(f32::INFINITY), None, None, None);
        q.points([Vec3::ZERO, Vec3::ONE], Some(-1.0), None, None);
        assert!(q.is_empty());
    }

    #[test]
    fn axes_start_at_position() {
        let mut q = DrawQueue::new();
        q.axes(Vec3::ONE, Quat::IDENTITY, 0.5);
        assert_eq!(q.len(), 3);
        let z = q.vertices_of(&q.jobs()[2]);
        assert!(approx(z[0], Vec3::ONE) && approx(z[1], Vec3::new(1.0, 1.0, 1.5)));
    }
}
