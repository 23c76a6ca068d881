//! Strongly-typed, resolution-aware effect parameters.
//!
//! Every parameter payload implements [`GraphicValue`]: identity elements, resolution-relative
//! default/min/max metadata, unclamped linear interpolation and uniform scaling. Effects declare
//! parameters as [`Parameter<T>`] and evaluate them against the concrete resolution at render
//! time, so the same tree renders correctly at any size.

pub(crate) mod metadata;

use crate::foundation::core::{Angle, Angle3, Color, GradientStop, Point, Point3, Rect, Size, Size3};
use crate::foundation::math::StableHasher;

pub use metadata::{EnumParameter, Extent, GraphicEnum, MetadataValue, Parameter, ResolutionRule};

/// Identifies a parameter's payload type for persistence and tooling.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ValueType {
    Bool,
    Int,
    Double,
    Angle,
    Angle3,
    Point,
    Size,
    Rect,
    Color,
    Point3,
    Size3,
    Gradient,
}

/// Contract shared by every parameter payload type.
///
/// Implementations must keep `lerp` unclamped (fractions outside `0..=1` extrapolate) and make
/// `scaled(1.0)` the identity.
pub trait GraphicValue: Clone + std::fmt::Debug + PartialEq + Send + Sync + 'static {
    const VALUE_TYPE: ValueType;

    fn zero() -> Self;

    fn one() -> Self;

    fn default_value() -> MetadataValue<Self>;

    fn minimum() -> MetadataValue<Self>;

    fn maximum() -> MetadataValue<Self>;

    fn lerp(fraction: f64, from: &Self, to: &Self) -> Self;

    fn scaled(&self, by: f64) -> Self;

    /// Value of a resolution-derived rule, given the rule's per-axis extent.
    ///
    /// Non-spatial types fall back to `one` scaled by the extent's uniform length.
    fn from_extent(extent: Extent) -> Self {
        Self::one().scaled(extent.uniform())
    }

    fn fingerprint(&self, h: &mut StableHasher);
}

fn lerp_f64(fraction: f64, from: f64, to: f64) -> f64 {
    from * (1.0 - fraction) + to * fraction
}

impl GraphicValue for bool {
    const VALUE_TYPE: ValueType = ValueType::Bool;

    fn zero() -> Self {
        false
    }

    fn one() -> Self {
        true
    }

    fn default_value() -> MetadataValue<Self> {
        MetadataValue::Fixed(false)
    }

    fn minimum() -> MetadataValue<Self> {
        MetadataValue::Fixed(false)
    }

    fn maximum() -> MetadataValue<Self> {
        MetadataValue::Fixed(true)
    }

    /// Step function: anything past zero snaps to `to`.
    fn lerp(fraction: f64, from: &Self, to: &Self) -> Self {
        if fraction > 0.0 { *to } else { *from }
    }

    fn scaled(&self, _by: f64) -> Self {
        *self
    }

    fn fingerprint(&self, h: &mut StableHasher) {
        h.write_bool(*self);
    }
}

impl GraphicValue for i64 {
    const VALUE_TYPE: ValueType = ValueType::Int;

    fn zero() -> Self {
        0
    }

    fn one() -> Self {
        1
    }

    fn default_value() -> MetadataValue<Self> {
        MetadataValue::Fixed(1)
    }

    fn minimum() -> MetadataValue<Self> {
        MetadataValue::Fixed(1)
    }

    fn maximum() -> MetadataValue<Self> {
        MetadataValue::Fixed(10)
    }

    // Truncates toward zero.
    fn lerp(fraction: f64, from: &Self, to: &Self) -> Self {
        lerp_f64(fraction, *from as f64, *to as f64) as i64
    }

    fn scaled(&self, by: f64) -> Self {
        ((*self as f64) * by) as i64
    }

    fn fingerprint(&self, h: &mut StableHasher) {
        h.write_i64(*self);
    }
}

impl GraphicValue for f64 {
    const VALUE_TYPE: ValueType = ValueType::Double;

    fn zero() -> Self {
        0.0
    }

    fn one() -> Self {
        1.0
    }

    fn default_value() -> MetadataValue<Self> {
        MetadataValue::Fixed(0.0)
    }

    fn minimum() -> MetadataValue<Self> {
        MetadataValue::Fixed(0.0)
    }

    fn maximum() -> MetadataValue<Self> {
        MetadataValue::Fixed(1.0)
    }

    fn lerp(fraction: f64, from: &Self, to: &Self) -> Self {
        lerp_f64(fraction, *from, *to)
    }

    fn scaled(&self, by: f64) -> Self {
        self * by
    }

    fn fingerprint(&self, h: &mut StableHasher) {
        h.write_f64(*self);
    }
}

impl GraphicValue for Angle {
    const VALUE_TYPE: ValueType = ValueType::Angle;

    fn zero() -> Self {
        Angle::ZERO
    }

    fn one() -> Self {
        Angle::degrees(360.0)
    }

    fn default_value() -> MetadataValue<Self> {
        MetadataValue::Zero
    }

    fn minimum() -> MetadataValue<Self> {
        MetadataValue::Fixed(Angle::degrees(-180.0))
    }

    fn maximum() -> MetadataValue<Self> {
        MetadataValue::Fixed(Angle::degrees(180.0))
    }

    fn lerp(fraction: f64, from: &Self, to: &Self) -> Self {
        Angle::degrees(lerp_f64(fraction, from.degrees, to.degrees))
    }

    fn scaled(&self, by: f64) -> Self {
        Angle::degrees(self.degrees * by)
    }

    fn fingerprint(&self, h: &mut StableHasher) {
        h.write_f64(self.degrees);
    }
}

impl GraphicValue for Angle3 {
    const VALUE_TYPE: ValueType = ValueType::Angle3;

    fn zero() -> Self {
        Angle3::uniform(Angle::ZERO)
    }

    fn one() -> Self {
        Angle3::uniform(Angle::degrees(360.0))
    }

    fn default_value() -> MetadataValue<Self> {
        MetadataValue::Zero
    }

    fn minimum() -> MetadataValue<Self> {
        MetadataValue::Fixed(Angle3::uniform(Angle::degrees(-180.0)))
    }

    fn maximum() -> MetadataValue<Self> {
        MetadataValue::Fixed(Angle3::uniform(Angle::degrees(180.0)))
    }

    fn lerp(fraction: f64, from: &Self, to: &Self) -> Self {
        Angle3 {
            x: Angle::lerp(fraction, &from.x, &to.x),
            y: Angle::lerp(fraction, &from.y, &to.y),
            z: Angle::lerp(fraction, &from.z, &to.z),
        }
    }

    fn scaled(&self, by: f64) -> Self {
        Angle3 {
            x: self.x.scaled(by),
            y: self.y.scaled(by),
            z: self.z.scaled(by),
        }
    }

    fn fingerprint(&self, h: &mut StableHasher) {
        self.x.fingerprint(h);
        self.y.fingerprint(h);
        self.z.fingerprint(h);
    }
}

impl GraphicValue for Point {
    const VALUE_TYPE: ValueType = ValueType::Point;

    fn zero() -> Self {
        Point::ZERO
    }

    fn one() -> Self {
        Point::new(1.0, 1.0)
    }

    fn default_value() -> MetadataValue<Self> {
        MetadataValue::Resolution(ResolutionRule::Aligned(crate::Alignment::Center))
    }

    fn minimum() -> MetadataValue<Self> {
        MetadataValue::Zero
    }

    fn maximum() -> MetadataValue<Self> {
        MetadataValue::Resolution(ResolutionRule::Full)
    }

    fn lerp(fraction: f64, from: &Self, to: &Self) -> Self {
        Point::new(
            lerp_f64(fraction, from.x, to.x),
            lerp_f64(fraction, from.y, to.y),
        )
    }

    fn scaled(&self, by: f64) -> Self {
        Point::new(self.x * by, self.y * by)
    }

    fn from_extent(extent: Extent) -> Self {
        Point::new(extent.x, extent.y)
    }

    fn fingerprint(&self, h: &mut StableHasher) {
        h.write_f64(self.x);
        h.write_f64(self.y);
    }
}

impl GraphicValue for Size {
    const VALUE_TYPE: ValueType = ValueType::Size;

    fn zero() -> Self {
        Size::ZERO
    }

    fn one() -> Self {
        Size::new(1.0, 1.0)
    }

    fn default_value() -> MetadataValue<Self> {
        MetadataValue::Resolution(ResolutionRule::Full)
    }

    fn minimum() -> MetadataValue<Self> {
        MetadataValue::Zero
    }

    fn maximum() -> MetadataValue<Self> {
        MetadataValue::Resolution(ResolutionRule::Full)
    }

    fn lerp(fraction: f64, from: &Self, to: &Self) -> Self {
        Size::new(
            lerp_f64(fraction, from.width, to.width),
            lerp_f64(fraction, from.height, to.height),
        )
    }

    fn scaled(&self, by: f64) -> Self {
        Size::new(self.width * by, self.height * by)
    }

    fn from_extent(extent: Extent) -> Self {
        Size::new(extent.x, extent.y)
    }

    fn fingerprint(&self, h: &mut StableHasher) {
        h.write_f64(self.width);
        h.write_f64(self.height);
    }
}

impl GraphicValue for Rect {
    const VALUE_TYPE: ValueType = ValueType::Rect;

    fn zero() -> Self {
        Rect::ZERO
    }

    fn one() -> Self {
        Rect::from_origin_size(Point::ZERO, Size::new(1.0, 1.0))
    }

    fn default_value() -> MetadataValue<Self> {
        MetadataValue::Resolution(ResolutionRule::Full)
    }

    fn minimum() -> MetadataValue<Self> {
        MetadataValue::Zero
    }

    fn maximum() -> MetadataValue<Self> {
        MetadataValue::Resolution(ResolutionRule::Full)
    }

    fn lerp(fraction: f64, from: &Self, to: &Self) -> Self {
        Rect::from_origin_size(
            <Point as GraphicValue>::lerp(fraction, &from.origin(), &to.origin()),
            <Size as GraphicValue>::lerp(fraction, &from.size(), &to.size()),
        )
    }

    fn scaled(&self, by: f64) -> Self {
        Rect::from_origin_size(
            GraphicValue::scaled(&self.origin(), by),
            GraphicValue::scaled(&self.size(), by),
        )
    }

    fn from_extent(extent: Extent) -> Self {
        Rect::from_origin_size(Point::ZERO, <Size as GraphicValue>::from_extent(extent))
    }

    fn fingerprint(&self, h: &mut StableHasher) {
        h.write_f64(self.x0);
        h.write_f64(self.y0);
        h.write_f64(self.x1);
        h.write_f64(self.y1);
    }
}

impl GraphicValue for Color {
    const VALUE_TYPE: ValueType = ValueType::Color;

    fn zero() -> Self {
        Color::CLEAR
    }

    fn one() -> Self {
        Color::WHITE
    }

    fn default_value() -> MetadataValue<Self> {
        MetadataValue::Fixed(Color::WHITE)
    }

    fn minimum() -> MetadataValue<Self> {
        MetadataValue::Fixed(Color::CLEAR)
    }

    fn maximum() -> MetadataValue<Self> {
        MetadataValue::Fixed(Color::WHITE)
    }

    fn lerp(fraction: f64, from: &Self, to: &Self) -> Self {
        Color::rgba(
            lerp_f64(fraction, from.red, to.red),
            lerp_f64(fraction, from.green, to.green),
            lerp_f64(fraction, from.blue, to.blue),
            lerp_f64(fraction, from.opacity, to.opacity),
        )
    }

    fn scaled(&self, by: f64) -> Self {
        Color::rgba(
            self.red * by,
            self.green * by,
            self.blue * by,
            self.opacity * by,
        )
    }

    fn fingerprint(&self, h: &mut StableHasher) {
        h.write_f64(self.red);
        h.write_f64(self.green);
        h.write_f64(self.blue);
        h.write_f64(self.opacity);
    }
}

impl GraphicValue for Point3 {
    const VALUE_TYPE: ValueType = ValueType::Point3;

    fn zero() -> Self {
        Point3::ZERO
    }

    fn one() -> Self {
        Point3::new(1.0, 1.0, 1.0)
    }

    fn default_value() -> MetadataValue<Self> {
        MetadataValue::Resolution(ResolutionRule::Aligned(crate::Alignment::Center))
    }

    fn minimum() -> MetadataValue<Self> {
        MetadataValue::Zero
    }

    fn maximum() -> MetadataValue<Self> {
        MetadataValue::Resolution(ResolutionRule::Full)
    }

    fn lerp(fraction: f64, from: &Self, to: &Self) -> Self {
        Point3::new(
            lerp_f64(fraction, from.x, to.x),
            lerp_f64(fraction, from.y, to.y),
            lerp_f64(fraction, from.z, to.z),
        )
    }

    fn scaled(&self, by: f64) -> Self {
        Point3::new(self.x * by, self.y * by, self.z * by)
    }

    fn from_extent(extent: Extent) -> Self {
        Point3::new(extent.x, extent.y, extent.z)
    }

    fn fingerprint(&self, h: &mut StableHasher) {
        h.write_f64(self.x);
        h.write_f64(self.y);
        h.write_f64(self.z);
    }
}

impl GraphicValue for Size3 {
    const VALUE_TYPE: ValueType = ValueType::Size3;

    fn zero() -> Self {
        Size3::ZERO
    }

    fn one() -> Self {
        Size3::new(1.0, 1.0, 1.0)
    }

    fn default_value() -> MetadataValue<Self> {
        MetadataValue::Resolution(ResolutionRule::Full)
    }

    fn minimum() -> MetadataValue<Self> {
        MetadataValue::Zero
    }

    fn maximum() -> MetadataValue<Self> {
        MetadataValue::Resolution(ResolutionRule::Full)
    }

    fn lerp(fraction: f64, from: &Self, to: &Self) -> Self {
        Size3::new(
            lerp_f64(fraction, from.width, to.width),
            lerp_f64(fraction, from.height, to.height),
            lerp_f64(fraction, from.depth, to.depth),
        )
    }

    fn scaled(&self, by: f64) -> Self {
        Size3::new(self.width * by, self.height * by, self.depth * by)
    }

    fn from_extent(extent: Extent) -> Self {
        Size3::new(extent.x, extent.y, extent.z)
    }

    fn fingerprint(&self, h: &mut StableHasher) {
        h.write_f64(self.width);
        h.write_f64(self.height);
        h.write_f64(self.depth);
    }
}

fn unit_ramp() -> Vec<GradientStop> {
    vec![
        GradientStop::new(0.0, Color::CLEAR),
        GradientStop::new(1.0, Color::WHITE),
    ]
}

impl GraphicValue for Vec<GradientStop> {
    const VALUE_TYPE: ValueType = ValueType::Gradient;

    fn zero() -> Self {
        Vec::new()
    }

    fn one() -> Self {
        unit_ramp()
    }

    fn default_value() -> MetadataValue<Self> {
        MetadataValue::Fixed(unit_ramp())
    }

    fn minimum() -> MetadataValue<Self> {
        MetadataValue::Fixed(Vec::new())
    }

    fn maximum() -> MetadataValue<Self> {
        MetadataValue::Fixed(unit_ramp())
    }

    /// Stop-wise interpolation. Ramps with different stop counts do not interpolate: `from` is
    /// returned unchanged.
    fn lerp(fraction: f64, from: &Self, to: &Self) -> Self {
        if from.len() != to.len() {
            return from.clone();
        }
        from.iter()
            .zip(to)
            .map(|(a, b)| {
                GradientStop::new(
                    lerp_f64(fraction, a.location, b.location),
                    Color::lerp(fraction, &a.color, &b.color),
                )
            })
            .collect()
    }

    fn scaled(&self, by: f64) -> Self {
        self.iter()
            .map(|stop| GradientStop::new(stop.location * by, stop.color.scaled(by)))
            .collect()
    }

    fn fingerprint(&self, h: &mut StableHasher) {
        h.write_usize(self.len());
        for stop in self {
            h.write_f64(stop.location);
            stop.color.fingerprint(h);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/value/value.rs"]
mod tests;
