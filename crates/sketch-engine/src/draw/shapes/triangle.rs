use glam::Vec3;

use crate::draw::{DrawQueue, JobDesc};
use crate::paint::Color;

impl DrawQueue {
    /// Records a triangle outline as the closed strip `a, b, c, a`.
    #[inline]
    pub fn triangle(&mut self, a: Vec3, b: Vec3, c: Vec3, color: Option<Color>) {
        let color = color.unwrap_or(self.config().palette.triangle);
        self.emit(JobDesc::line_strip(&[a, b, c, a], color));
    }

    /// Records a filled triangle.
    #[inline]
    pub fn solid_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3, color: Option<Color>) {
        let color = color.unwrap_or(self.config().palette.triangle);
        self.emit(JobDesc::triangle(&[a, b, c], color));
    }
}
