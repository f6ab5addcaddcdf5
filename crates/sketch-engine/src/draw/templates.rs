use std::f32::consts::TAU;
use std::sync::{Arc, LazyLock};

use glam::Vec3;

use super::DEFAULT_SEGMENTS;

/// Shared unit shapes a job may reference instead of carrying its own vertices.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Template {
    /// Closed strip of `segments + 1` unit-radius samples in the XZ plane.
    /// Sample 0 (and the closing sample) is `+Z`; angles grow towards `+X`.
    UnitCircle,
    /// 12 edges (24 points) of the axis-aligned cube `[-0.5, 0.5]^3`.
    UnitCube,
}

static DEFAULT_TEMPLATES: LazyLock<Arc<GeometryTemplates>> =
    LazyLock::new(|| Arc::new(GeometryTemplates::new(DEFAULT_SEGMENTS)));

/// Precomputed unit geometry for one segment count.
///
/// Built once and only ever read afterwards; jobs instantiate it through their own
/// transform at flush time.
#[derive(Debug, PartialEq)]
pub struct GeometryTemplates {
    segments: u32,
    circle: Vec<Vec3>,
    cube: Vec<Vec3>,
}

impl GeometryTemplates {
    pub fn new(segments: u32) -> Self {
        Self {
            segments,
            circle: unit_circle(segments),
            cube: unit_cube_edges(),
        }
    }

    /// Returns the templates for `segments`, reusing the process-wide set for the
    /// default count.
    pub fn shared(segments: u32) -> Arc<Self> {
        if segments == DEFAULT_SEGMENTS {
            Arc::clone(&DEFAULT_TEMPLATES)
        } else {
            Arc::new(Self::new(segments))
        }
    }

    #[inline]
    pub fn segments(&self) -> u32 {
        self.segments
    }

    #[inline]
    pub fn points(&self, template: Template) -> &[Vec3] {
        match template {
            Template::UnitCircle => &self.circle,
            Template::UnitCube => &self.cube,
        }
    }
}

/// Unit-circle sample `i` of `segments`.
#[inline]
fn circle_sample(i: u32, segments: u32) -> Vec3 {
    let (sin, cos) = (i as f32 * TAU / segments as f32).sin_cos();
    Vec3::new(sin, 0.0, cos)
}

fn unit_circle(segments: u32) -> Vec<Vec3> {
    let mut points: Vec<Vec3> = (0..segments).map(|i| circle_sample(i, segments)).collect();
    // Close on the exact first sample rather than on sin/cos(TAU).
    points.push(Vec3::Z);
    points
}

fn unit_cube_edges() -> Vec<Vec3> {
    let c = [
        Vec3::new(-0.5, -0.5, -0.5),
        Vec3::new(0.5, -0.5, -0.5),
        Vec3::new(0.5, 0.5, -0.5),
        Vec3::new(-0.5, 0.5, -0.5),
        Vec3::new(-0.5, -0.5, 0.5),
        Vec3::new(0.5, -0.5, 0.5),
        Vec3::new(0.5, 0.5, 0.5),
        Vec3::new(-0.5, 0.5, 0.5),
    ];
    const EDGES: [(usize, usize); 12] = [
        // Back face
        (0, 1), (1, 2), (2, 3), (3, 0),
        // Front face
        (4, 5), (5, 6), (6, 7), (7, 4),
        // Connecting edges
        (0, 4), (1, 5), (2, 6), (3, 7),
    ];
    EDGES.iter().flat_map(|&(a, b)| [c[a], c[b]]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_has_segments_plus_one_points_on_unit_radius() {
        let t = GeometryTemplates::new(12);
        let circle = t.points(Template::UnitCircle);
        assert_eq!(circle.len(), 13);
        for p in circle {
            assert!((p.length() - 1.0).abs() < 1e-5);
            assert_eq!(p.y, 0.0);
        }
        assert_eq!(circle.first(), circle.last());
    }

    #[test]
    fn cube_is_twelve_unit_edges() {
        let t = GeometryTemplates::new(8);
        let cube = t.points(Template::UnitCube);
        assert_eq!(cube.len(), 24);
        for edge in cube.chunks_exact(2) {
            assert!((edge[0].distance(edge[1]) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn default_segment_count_is_shared() {
        let a = GeometryTemplates::shared(DEFAULT_SEGMENTS);
        let b = GeometryTemplates::shared(DEFAULT_SEGMENTS);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(GeometryTemplates::shared(7).segments(), 7);
    }
}
