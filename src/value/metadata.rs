use std::fmt;

use strum::IntoEnumIterator;

use crate::foundation::core::{Alignment, Resolution};
use crate::foundation::math::StableHasher;
use crate::value::GraphicValue;

/// A resolution-derived rule, evaluated lazily against the render resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ResolutionRule {
    /// Equal to the resolution.
    Full,
    /// A position within the resolution: 0 (leading), half (center) or full (trailing) per axis.
    Aligned(Alignment),
    /// A fraction of the smallest dimension, on every axis.
    MinimumFraction(f64),
    /// A fraction of the largest dimension, on every axis.
    MaximumFraction(f64),
}

impl ResolutionRule {
    /// Per-axis extent this rule selects at `resolution`.
    pub fn extent(self, resolution: Resolution) -> Extent {
        match self {
            Self::Full => Extent::new(resolution.width, resolution.height, resolution.depth),
            Self::Aligned(alignment) => {
                let f = alignment.fraction();
                Extent::new(
                    resolution.width * f,
                    resolution.height * f,
                    resolution.depth * f,
                )
            }
            Self::MinimumFraction(fraction) => {
                Extent::uniform_of(resolution.minimum_length() * fraction)
            }
            Self::MaximumFraction(fraction) => {
                Extent::uniform_of(resolution.maximum_length() * fraction)
            }
        }
    }

    fn fingerprint(self, h: &mut StableHasher) {
        match self {
            Self::Full => h.write_u8(0),
            Self::Aligned(a) => {
                h.write_u8(1);
                h.write_u8(a.tag());
            }
            Self::MinimumFraction(f) => {
                h.write_u8(2);
                h.write_f64(f);
            }
            Self::MaximumFraction(f) => {
                h.write_u8(3);
                h.write_f64(f);
            }
        }
    }
}

/// Per-axis lengths handed to [`GraphicValue::from_extent`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Extent {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub const fn uniform_of(v: f64) -> Self {
        Self::new(v, v, v)
    }

    /// Scalar view of the extent (the smaller planar axis).
    pub fn uniform(self) -> f64 {
        self.x.min(self.y)
    }
}

/// A parameter's declared value or bound: either a literal or a resolution-derived rule.
///
/// Never stored pre-evaluated; call [`MetadataValue::eval`] with the concrete resolution.
#[derive(Clone, Debug, PartialEq)]
pub enum MetadataValue<T> {
    Fixed(T),
    Zero,
    One,
    Resolution(ResolutionRule),
}

impl<T: GraphicValue> MetadataValue<T> {
    pub fn resolution() -> Self {
        Self::Resolution(ResolutionRule::Full)
    }

    pub fn aligned(alignment: Alignment) -> Self {
        Self::Resolution(ResolutionRule::Aligned(alignment))
    }

    pub fn resolution_minimum(fraction: f64) -> Self {
        Self::Resolution(ResolutionRule::MinimumFraction(fraction))
    }

    pub fn resolution_maximum(fraction: f64) -> Self {
        Self::Resolution(ResolutionRule::MaximumFraction(fraction))
    }

    pub fn is_resolution_derived(&self) -> bool {
        matches!(self, Self::Resolution(_))
    }

    /// Evaluate against a concrete resolution. Pure: reads only `resolution`.
    pub fn eval(&self, resolution: Resolution) -> T {
        match self {
            Self::Fixed(v) => v.clone(),
            Self::Zero => T::zero(),
            Self::One => T::one(),
            Self::Resolution(rule) => T::from_extent(rule.extent(resolution)),
        }
    }

    pub fn fingerprint(&self, h: &mut StableHasher) {
        match self {
            Self::Fixed(v) => {
                h.write_u8(0);
                v.fingerprint(h);
            }
            Self::Zero => h.write_u8(1),
            Self::One => h.write_u8(2),
            Self::Resolution(rule) => {
                h.write_u8(3);
                rule.fingerprint(h);
            }
        }
    }
}

/// Declaration of one effect parameter.
///
/// `spatial` marks values that should visually track changes in target resolution; the core only
/// carries the flag.
#[derive(Clone, Debug, PartialEq)]
pub struct Parameter<T> {
    pub value: MetadataValue<T>,
    pub minimum: MetadataValue<T>,
    pub maximum: MetadataValue<T>,
    pub spatial: bool,
}

impl<T: GraphicValue> Default for Parameter<T> {
    fn default() -> Self {
        Self {
            value: T::default_value(),
            minimum: T::minimum(),
            maximum: T::maximum(),
            spatial: false,
        }
    }
}

impl<T: GraphicValue> Parameter<T> {
    pub fn new(value: MetadataValue<T>) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }

    pub fn fixed(value: T) -> Self {
        Self::new(MetadataValue::Fixed(value))
    }

    pub fn with_minimum(mut self, minimum: MetadataValue<T>) -> Self {
        self.minimum = minimum;
        self
    }

    pub fn with_maximum(mut self, maximum: MetadataValue<T>) -> Self {
        self.maximum = maximum;
        self
    }

    pub fn spatial(mut self) -> Self {
        self.spatial = true;
        self
    }

    pub fn set(&mut self, value: MetadataValue<T>) {
        self.value = value;
    }

    pub fn eval(&self, resolution: Resolution) -> T {
        self.value.eval(resolution)
    }

    /// `(minimum, maximum)` evaluated at `resolution`.
    pub fn bounds(&self, resolution: Resolution) -> (T, T) {
        (self.minimum.eval(resolution), self.maximum.eval(resolution))
    }

    /// Interpolate between this parameter and `other`, both evaluated at `resolution`.
    pub fn lerp_at(&self, fraction: f64, other: &Self, resolution: Resolution) -> T {
        T::lerp(fraction, &self.eval(resolution), &other.eval(resolution))
    }

    pub fn fingerprint(&self, h: &mut StableHasher) {
        h.write_str(&T::VALUE_TYPE.to_string());
        self.value.fingerprint(h);
        self.minimum.fingerprint(h);
        self.maximum.fingerprint(h);
        h.write_bool(self.spatial);
    }
}

/// Enumerated parameter payloads (styles, directions, extend modes).
pub trait GraphicEnum:
    Copy + PartialEq + fmt::Debug + fmt::Display + IntoEnumIterator + Send + Sync + 'static
{
}

impl<E> GraphicEnum for E where
    E: Copy + PartialEq + fmt::Debug + fmt::Display + IntoEnumIterator + Send + Sync + 'static
{
}

/// An enumerated parameter. Enumerations do not scale or depend on resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnumParameter<E> {
    pub value: E,
}

impl<E: GraphicEnum> EnumParameter<E> {
    pub fn new(value: E) -> Self {
        Self { value }
    }

    /// Every variant, in declaration order.
    pub fn options() -> Vec<E> {
        E::iter().collect()
    }

    /// Step interpolation, like booleans.
    pub fn lerp(fraction: f64, from: E, to: E) -> E {
        if fraction > 0.0 { to } else { from }
    }

    pub fn fingerprint(&self, h: &mut StableHasher) {
        h.write_str(&self.value.to_string());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/value/metadata.rs"]
mod tests;
