use crate::paint::Color;

/// Default tessellation for circles, arcs and sphere circles.
pub const DEFAULT_SEGMENTS: u32 = 32;

/// Smallest accepted segment count. Arcs divide by `segments - 1`.
pub const MIN_SEGMENTS: u32 = 2;

/// Largest accepted segment count; bounds the circle template allocation.
pub const MAX_SEGMENTS: u32 = 4096;

/// Largest accepted number of sphere meridians.
pub const MAX_SPHERE_RADIAL_SEGMENTS: u32 = 64;

/// Default colors used when an emitter is called without an explicit color.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub axis_x: Color,
    pub axis_y: Color,
    pub axis_z: Color,
    pub line: Color,
    pub arrow: Color,
    pub triangle: Color,
    pub circle: Color,
    pub sphere: Color,
    pub arc: Color,
    pub cube: Color,
    pub diamond: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            axis_x: Color::RED,
            axis_y: Color::GREEN,
            axis_z: Color::BLUE,
            line: Color::WHITE,
            arrow: Color::YELLOW,
            triangle: Color::CYAN,
            circle: Color::WHITE,
            sphere: Color::GREY,
            arc: Color::YELLOW.with_alpha(0.5),
            cube: Color::WHITE,
            diamond: Color::MAGENTA,
        }
    }
}

/// Draw queue configuration.
///
/// Fixed for the lifetime of a queue: `segments` drives the circle template size and
/// every vertex count derived from it. Values are sanitized by [`DrawConfig::sanitized`]
/// when a queue is built, so degenerate settings never reach the emitters.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawConfig {
    /// Circle / arc / sphere tessellation. Clamped to [`MIN_SEGMENTS`]..=[`MAX_SEGMENTS`].
    pub segments: u32,

    /// Number of vertical circles in a wireframe sphere.
    /// Clamped to `1..=`[`MAX_SPHERE_RADIAL_SEGMENTS`].
    pub sphere_radial_segments: u32,

    /// Arrow head length as a fraction of the arrow size, in `[0, 1]`.
    pub arrow_head_length: f32,

    /// Arrow head half-width as a fraction of the arrow size, in `[0, 1]`.
    pub arrow_head_width: f32,

    pub point_size: f32,
    pub arrow_size: f32,
    pub diamond_size: f32,

    /// Length of each drawn (and each skipped) dash of a dotted line.
    pub dash_length: f32,

    pub palette: Palette,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            segments: DEFAULT_SEGMENTS,
            sphere_radial_segments: 4,
            arrow_head_length: 0.25,
            arrow_head_width: 0.1,
            point_size: 0.2,
            arrow_size: 1.0,
            diamond_size: 0.1,
            dash_length: 0.1,
            palette: Palette::default(),
        }
    }
}

impl DrawConfig {
    pub fn with_segments(mut self, segments: u32) -> Self {
        self.segments = segments;
        self
    }

    pub fn with_sphere_radial_segments(mut self, count: u32) -> Self {
        self.sphere_radial_segments = count;
        self
    }

    pub fn with_arrow_head(mut self, length: f32, width: f32) -> Self {
        self.arrow_head_length = length;
        self.arrow_head_width = width;
        self
    }

    pub fn with_dash_length(mut self, dash_length: f32) -> Self {
        self.dash_length = dash_length;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Returns a copy with every value clamped into its valid range.
    ///
    /// Non-finite or non-positive sizes fall back to their defaults.
    pub fn sanitized(mut self) -> Self {
        let defaults = DrawConfig::default();

        let segments = self.segments.clamp(MIN_SEGMENTS, MAX_SEGMENTS);
        if segments != self.segments {
            log::debug!("segments {} clamped to {}", self.segments, segments);
            self.segments = segments;
        }
        let radial = self.sphere_radial_segments.clamp(1, MAX_SPHERE_RADIAL_SEGMENTS);
        if radial != self.sphere_radial_segments {
            log::debug!("sphere radial segments {} clamped to {}", self.sphere_radial_segments, radial);
            self.sphere_radial_segments = radial;
        }

        self.arrow_head_length = unit_fraction(self.arrow_head_length, defaults.arrow_head_length);
        self.arrow_head_width = unit_fraction(self.arrow_head_width, defaults.arrow_head_width);

        self.point_size = positive_or(self.point_size, defaults.point_size);
        self.arrow_size = positive_or(self.arrow_size, defaults.arrow_size);
        self.diamond_size = positive_or(self.diamond_size, defaults.diamond_size);
        self.dash_length = positive_or(self.dash_length, defaults.dash_length);

        self
    }
}

#[inline]
fn positive_or(v: f32, fallback: f32) -> f32 {
    if v.is_finite() && v > 0.0 { v } else { fallback }
}

#[inline]
fn unit_fraction(v: f32, fallback: f32) -> f32 {
    if v.is_finite() { v.clamp(0.0, 1.0) } else { fallback }
}
