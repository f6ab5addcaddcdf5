use std::f32::consts::{FRAC_PI_2, PI};
use std::sync::Arc;

use glam::{Mat4, Quat, Vec3};

use crate::draw::{DrawQueue, JobDesc, PrimitiveKind, Template};
use crate::paint::Color;

use super::{rotation_or_identity, usable_point, usable_size};

impl DrawQueue {
    /// Records a circle outline in the (rotated) XZ plane.
    ///
    /// Instantiates the shared unit-circle template; no vertices are stored.
    pub fn circle(&mut self, center: Vec3, radius: f32, color: Option<Color>, rotation: Option<Quat>) {
        if !usable_point("circle", center) || !usable_size(radius) {
            return;
        }
        let color = color.unwrap_or(self.config().palette.circle);
        let transform = Mat4::from_scale_rotation_translation(
            Vec3::splat(radius),
            rotation_or_identity(rotation),
            center,
        );
        self.emit(JobDesc::template(PrimitiveKind::LineStrip, Template::UnitCircle, color, transform));
    }

    /// Records a filled circle as a fan of exactly `segments` triangles around `center`.
    ///
    /// Rim points come from the shared unit-circle template; the closing triangle reuses
    /// the angle-zero rim point so the fan has no seam.
    pub fn solid_circle(&mut self, center: Vec3, radius: f32, color: Option<Color>, rotation: Option<Quat>) {
        if !usable_point("solid circle", center) || !usable_size(radius) {
            return;
        }
        let color = Some(color.unwrap_or(self.config().palette.circle));
        let rot = rotation_or_identity(rotation);
        let templates = Arc::clone(self.templates());
        let unit = templates.points(Template::UnitCircle);
        let rim = |local: Vec3| center + rot * (local * radius);

        let Some(&start) = unit.first() else { return };
        let first = rim(start);
        let mut prev = first;
        for &local in unit.iter().take(self.segments() as usize).skip(1) {
            let next = rim(local);
            self.solid_triangle(center, prev, next, color);
            prev = next;
        }
        self.solid_triangle(center, prev, first, color);
    }

    /// Records a low-fidelity wireframe sphere: one horizontal circle plus
    /// `sphere_radial_segments` vertical circles spread over 180° about the up axis.
    pub fn sphere(&mut self, center: Vec3, radius: f32, color: Option<Color>, rotation: Option<Quat>) {
        if !usable_point("sphere", center) || !usable_size(radius) {
            return;
        }
        let color = Some(color.unwrap_or(self.config().palette.sphere));
        let rot = rotation_or_identity(rotation);
        let meridians = self.config().sphere_radial_segments;
        let step = PI / meridians as f32;

        self.circle(center, radius, color, Some(rot));

        // Stand the unit circle up (XZ -> XY), then spin it about Y.
        let upright = Quat::from_rotation_x(FRAC_PI_2);
        for i in 0..meridians {
            let spin = Quat::from_rotation_y(step * i as f32);
            self.circle(center, radius, color, Some(rot * spin * upright));
        }
    }
}
