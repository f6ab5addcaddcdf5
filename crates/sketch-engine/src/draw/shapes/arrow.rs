use glam::{Quat, Vec3};

use crate::draw::DrawQueue;
use crate::paint::Color;

use super::{rotation_or_identity, usable_point, usable_size, FORWARD, UP};

impl DrawQueue {
    /// Records an arrow of length `size` from `start` along `rotation * +Z`.
    ///
    /// The shaft stops where the head begins; the head is a solid triangle whose back
    /// corners sit `arrow_head_length * size` behind the tip and
    /// `arrow_head_width * size` to either side.
    pub fn arrow(&mut self, start: Vec3, rotation: Quat, size: Option<f32>, color: Option<Color>) {
        let cfg = self.config();
        let size = size.unwrap_or(cfg.arrow_size);
        let (head_length, head_width) = (cfg.arrow_head_length, cfg.arrow_head_width);
        let color = color.unwrap_or(cfg.palette.arrow);
        if !usable_point("arrow", start) || !usable_size(size) {
            return;
        }

        let dir = rotation_or_identity(Some(rotation)) * FORWARD;
        let end = start + dir * size;
        let back = dir * (-size * head_length);
        // Straight up/down arrows have no cross product with up; any perpendicular works.
        let side_axis = dir.cross(UP).try_normalize().unwrap_or_else(|| dir.any_orthonormal_vector());
        let side = side_axis * (size * head_width);

        self.line(start, start + dir * (size * (1.0 - head_length)), Some(color));
        self.solid_triangle(end, end + back - side, end + back + side, Some(color));
    }
}
