use serde::{Deserialize, Serialize};

use crate::foundation::error::{GraphError, GraphResult};

pub use kurbo::{Affine, Point, Rect, Size, Vec2};

/// One of the three spatial axes of a [`Resolution`].
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Axis {
    /// Width.
    Horizontal,
    /// Height.
    Vertical,
    /// Depth (volumes only).
    Depth,
}

impl Axis {
    pub(crate) fn tag(self) -> u8 {
        match self {
            Self::Horizontal => 0,
            Self::Vertical => 1,
            Self::Depth => 2,
        }
    }
}

/// Cross-axis placement of content narrower than its container.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Alignment {
    /// Top / left / front.
    Leading,
    /// Centered.
    #[default]
    Center,
    /// Bottom / right / back.
    Trailing,
}

impl Alignment {
    /// Offset of `content` inside `container`; never negative.
    pub fn offset(self, container: f64, content: f64) -> f64 {
        let rem = (container - content).max(0.0);
        match self {
            Self::Leading => 0.0,
            Self::Center => rem * 0.5,
            Self::Trailing => rem,
        }
    }

    /// Integer variant of [`Alignment::offset`] used on pixel grids.
    pub fn offset_px(self, container: u32, content: u32) -> u32 {
        let rem = container.saturating_sub(content);
        match self {
            Self::Leading => 0,
            Self::Center => rem / 2,
            Self::Trailing => rem,
        }
    }

    /// Position fraction along an axis: 0 for leading, 0.5 for center, 1 for trailing.
    pub fn fraction(self) -> f64 {
        match self {
            Self::Leading => 0.0,
            Self::Center => 0.5,
            Self::Trailing => 1.0,
        }
    }

    pub(crate) fn tag(self) -> u8 {
        match self {
            Self::Leading => 0,
            Self::Center => 1,
            Self::Trailing => 2,
        }
    }
}

/// A concrete resolution in logical units (pixels for images, voxels for volumes).
///
/// Images are resolutions with `depth == 1.0`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl Resolution {
    pub const fn new(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// A flat (image) resolution.
    pub const fn flat(width: f64, height: f64) -> Self {
        Self::new(width, height, 1.0)
    }

    pub fn length(self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
            Axis::Depth => self.depth,
        }
    }

    pub fn with_length(mut self, axis: Axis, length: f64) -> Self {
        match axis {
            Axis::Horizontal => self.width = length,
            Axis::Vertical => self.height = length,
            Axis::Depth => self.depth = length,
        }
        self
    }

    pub fn is_volume(self) -> bool {
        self.depth > 1.0
    }

    /// Smallest spatial dimension. Depth only counts for volumes.
    pub fn minimum_length(self) -> f64 {
        let flat = self.width.min(self.height);
        if self.is_volume() {
            flat.min(self.depth)
        } else {
            flat
        }
    }

    /// Largest spatial dimension. Depth only counts for volumes.
    pub fn maximum_length(self) -> f64 {
        let flat = self.width.max(self.height);
        if self.is_volume() {
            flat.max(self.depth)
        } else {
            flat
        }
    }

    /// Round to a pixel grid.
    pub fn to_extent(self) -> GraphResult<PixelExtent> {
        fn px(v: f64, name: &str) -> GraphResult<u32> {
            if !v.is_finite() || v < 0.0 {
                return Err(GraphError::validation(format!(
                    "resolution {name} must be finite and >= 0, got {v}"
                )));
            }
            let r = v.round();
            if r > f64::from(u32::MAX) {
                return Err(GraphError::validation(format!(
                    "resolution {name} exceeds u32: {v}"
                )));
            }
            Ok(r as u32)
        }

        Ok(PixelExtent {
            width: px(self.width, "width")?,
            height: px(self.height, "height")?,
            depth: px(self.depth, "depth")?,
        })
    }
}

/// Integer size of a buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelExtent {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl PixelExtent {
    pub const fn new(width: u32, height: u32, depth: u32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    pub fn len(self, axis: Axis) -> u32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
            Axis::Depth => self.depth,
        }
    }

    pub fn with_len(mut self, axis: Axis, len: u32) -> Self {
        match axis {
            Axis::Horizontal => self.width = len,
            Axis::Vertical => self.height = len,
            Axis::Depth => self.depth = len,
        }
        self
    }

    pub fn voxel_count(self) -> usize {
        (self.width as usize) * (self.height as usize) * (self.depth as usize)
    }

    pub fn is_empty(self) -> bool {
        self.voxel_count() == 0
    }

    pub fn to_resolution(self) -> Resolution {
        Resolution::new(
            f64::from(self.width),
            f64::from(self.height),
            f64::from(self.depth),
        )
    }
}

/// Signed voxel offset. Regions may start outside a buffer (padded tiles do).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelOffset {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl PixelOffset {
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };

    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    pub fn get(self, axis: Axis) -> i64 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
            Axis::Depth => self.z,
        }
    }

    pub fn with(mut self, axis: Axis, v: i64) -> Self {
        match axis {
            Axis::Horizontal => self.x = v,
            Axis::Vertical => self.y = v,
            Axis::Depth => self.z = v,
        }
        self
    }

    pub fn offset_by(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub fn relative_to(self, origin: Self) -> Self {
        Self::new(self.x - origin.x, self.y - origin.y, self.z - origin.z)
    }
}

/// An axis-aligned box on the voxel grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Region {
    pub origin: PixelOffset,
    pub extent: PixelExtent,
}

impl Region {
    pub const fn new(origin: PixelOffset, extent: PixelExtent) -> Self {
        Self { origin, extent }
    }

    /// The region covering a whole buffer of `extent`.
    pub const fn full(extent: PixelExtent) -> Self {
        Self {
            origin: PixelOffset::ZERO,
            extent,
        }
    }

    pub fn start(self, axis: Axis) -> i64 {
        self.origin.get(axis)
    }

    pub fn end(self, axis: Axis) -> i64 {
        self.origin.get(axis) + i64::from(self.extent.len(axis))
    }

    pub fn is_full(self, extent: PixelExtent) -> bool {
        self == Self::full(extent)
    }

    /// Overlap of two regions, `None` when they do not overlap.
    pub fn intersect(self, other: Self) -> Option<Self> {
        let mut origin = PixelOffset::ZERO;
        let mut extent = PixelExtent::default();
        for axis in [Axis::Horizontal, Axis::Vertical, Axis::Depth] {
            let lo = self.start(axis).max(other.start(axis));
            let hi = self.end(axis).min(other.end(axis));
            if hi <= lo {
                return None;
            }
            origin = origin.with(axis, lo);
            extent = extent.with_len(axis, (hi - lo) as u32);
        }
        Some(Self { origin, extent })
    }

    /// Same region expressed relative to `origin`.
    pub fn relative_to(self, origin: PixelOffset) -> Self {
        Self {
            origin: self.origin.relative_to(origin),
            extent: self.extent,
        }
    }
}

/// A planar angle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Angle {
    pub degrees: f64,
}

impl Angle {
    pub const ZERO: Self = Self { degrees: 0.0 };

    pub const fn degrees(degrees: f64) -> Self {
        Self { degrees }
    }

    pub fn radians(radians: f64) -> Self {
        Self {
            degrees: radians.to_degrees(),
        }
    }

    pub fn to_radians(self) -> f64 {
        self.degrees.to_radians()
    }
}

/// Per-axis rotation for volumes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Angle3 {
    pub x: Angle,
    pub y: Angle,
    pub z: Angle,
}

impl Angle3 {
    pub const fn uniform(angle: Angle) -> Self {
        Self {
            x: angle,
            y: angle,
            z: angle,
        }
    }
}

/// Straight-alpha color with unit-range channels.
///
/// Channels are not clamped; scaling or extrapolating may leave the unit range and buffers clamp
/// when they quantize.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub opacity: f64,
}

impl Color {
    pub const CLEAR: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    pub const fn rgba(red: f64, green: f64, blue: f64, opacity: f64) -> Self {
        Self {
            red,
            green,
            blue,
            opacity,
        }
    }

    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Quantize to premultiplied RGBA8.
    pub fn to_premul_rgba8(self) -> [u8; 4] {
        fn q(v: f64) -> u8 {
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        let a = self.opacity.clamp(0.0, 1.0);
        [
            q(self.red * a),
            q(self.green * a),
            q(self.blue * a),
            q(a),
        ]
    }
}

/// A point in a volume.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// A size in a volume.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size3 {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl Size3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }
}

/// One color stop of a gradient ramp.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the ramp, nominally in `0..=1`.
    pub location: f64,
    pub color: Color,
}

impl GradientStop {
    pub const fn new(location: f64, color: Color) -> Self {
        Self { location, color }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
