use glam::{Quat, Vec3};

use crate::draw::{DrawQueue, JobDesc};
use crate::paint::Color;

use super::{rotation_or_identity, usable_point, usable_size, FORWARD, UP};

/// Arc sweep parameters shared by the wireframe and solid variants.
#[derive(Debug, Copy, Clone)]
struct Sweep {
    center: Vec3,
    forward: Vec3,
    radius: f32,
    angle_deg: f32,
    rotation: Quat,
}

impl DrawQueue {
    /// Records an arc outline: `segments` samples over `angle_deg` degrees centered on
    /// `forward`, closed back to `center` at both ends (one strip job).
    pub fn arc(
        &mut self,
        center: Vec3,
        forward: Vec3,
        radius: f32,
        angle_deg: f32,
        color: Option<Color>,
        rotation: Option<Quat>,
    ) {
        let color = color.unwrap_or(self.config().palette.arc);
        let Some(sweep) = Sweep::new(center, forward, radius, angle_deg, rotation) else { return };

        let mut points = std::mem::take(&mut self.build);
        points.clear();
        points.push(center);
        sample_arc(&sweep, self.segments(), &mut points);
        points.push(center);

        self.emit(JobDesc::line_strip(&points, color));
        self.build = points;
    }

    /// Records a filled arc as `segments - 1` triangles anchored at `center`.
    pub fn solid_arc(
        &mut self,
        center: Vec3,
        forward: Vec3,
        radius: f32,
        angle_deg: f32,
        color: Option<Color>,
        rotation: Option<Quat>,
    ) {
        let color = color.unwrap_or(self.config().palette.arc);
        let Some(sweep) = Sweep::new(center, forward, radius, angle_deg, rotation) else { return };

        let mut points = std::mem::take(&mut self.build);
        points.clear();
        sample_arc(&sweep, self.segments(), &mut points);

        for w in points.windows(2) {
            self.emit(JobDesc::triangle(&[center, w[0], w[1]], color));
        }
        self.build = points;
    }
}

impl Sweep {
    fn new(center: Vec3, forward: Vec3, radius: f32, angle_deg: f32, rotation: Option<Quat>) -> Option<Self> {
        if !usable_point("arc", center) || !usable_size(radius) || !angle_deg.is_finite() {
            log::trace!("skipping arc: radius {radius}, angle {angle_deg}");
            return None;
        }
        let forward = if forward.is_finite() {
            forward.try_normalize().unwrap_or(FORWARD)
        } else {
            FORWARD
        };
        Some(Self {
            center,
            forward,
            radius,
            angle_deg,
            rotation: rotation_or_identity(rotation),
        })
    }
}

/// Appends `segments` arc samples to `out`.
///
/// Samples are produced by repeatedly applying one fixed step rotation, so float error
/// accumulates along the sweep instead of each sample being computed from its own angle.
fn sample_arc(sweep: &Sweep, segments: u32, out: &mut Vec<Vec3>) {
    let segments = segments.max(2);
    let step = Quat::from_axis_angle(UP, (sweep.angle_deg / (segments - 1) as f32).to_radians());
    let mut surface =
        Quat::from_axis_angle(UP, (sweep.angle_deg * -0.5).to_radians()) * (sweep.forward * sweep.radius);

    for _ in 0..segments {
        out.push(sweep.center + sweep.rotation * surface);
        surface = step * surface;
    }
}
