use glam::{Quat, Vec3};

use crate::draw::DrawQueue;
use crate::paint::Color;

use super::{rotation_or_identity, usable_point, usable_size, FORWARD, RIGHT, UP};

impl DrawQueue {
    /// Records an octahedron wireframe whose six tips lie `size` away from `center`.
    ///
    /// Eight triangle outlines: four around the top tip, four around the bottom one.
    pub fn diamond(&mut self, center: Vec3, size: Option<f32>, color: Option<Color>, rotation: Option<Quat>) {
        let size = size.unwrap_or(self.config().diamond_size);
        if !usable_point("diamond", center) || !usable_size(size) {
            return;
        }
        let color = Some(color.unwrap_or(self.config().palette.diamond));
        let rot = rotation_or_identity(rotation);
        let tip = |axis: Vec3| center + rot * (axis * size);

        let (u, d) = (tip(UP), tip(-UP));
        let (r, l) = (tip(RIGHT), tip(-RIGHT));
        let (f, b) = (tip(FORWARD), tip(-FORWARD));

        for (p, q) in [(r, f), (f, l), (l, b), (b, r)] {
            self.triangle(u, p, q, color);
        }
        for (p, q) in [(f, r), (r, b), (b, l), (l, f)] {
            self.triangle(d, p, q, color);
        }
    }
}
