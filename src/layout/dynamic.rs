use crate::foundation::core::{Axis, Resolution};
use crate::foundation::math::StableHasher;

/// Size request for one axis of a node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AxisLength {
    /// An exact length.
    Fixed(f64),
    /// Takes whatever the ambient specification offers.
    Auto,
    /// Flexible, but never shorter than `minimum`.
    Spacer { minimum: f64 },
}

impl AxisLength {
    pub fn fixed(self) -> Option<f64> {
        match self {
            Self::Fixed(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }

    /// Merge two siblings along the stacking axis.
    ///
    /// `Auto` absorbs everything; otherwise lengths add up and any spacer keeps the result
    /// flexible.
    pub fn merge_stacking(self, other: Self) -> Self {
        match (self, other) {
            (Self::Auto, _) | (_, Self::Auto) => Self::Auto,
            (Self::Fixed(a), Self::Fixed(b)) => Self::Fixed(a + b),
            (Self::Fixed(a), Self::Spacer { minimum: m })
            | (Self::Spacer { minimum: m }, Self::Fixed(a)) => Self::Spacer { minimum: a + m },
            (Self::Spacer { minimum: a }, Self::Spacer { minimum: b }) => {
                Self::Spacer { minimum: a + b }
            }
        }
    }

    /// Merge two siblings across the stacking axis.
    ///
    /// `Auto` absorbs everything; otherwise the longest wins and a fixed length pins the axis.
    pub fn merge_cross(self, other: Self) -> Self {
        match (self, other) {
            (Self::Auto, _) | (_, Self::Auto) => Self::Auto,
            (Self::Fixed(a), Self::Fixed(b)) => Self::Fixed(a.max(b)),
            (Self::Fixed(a), Self::Spacer { minimum: m })
            | (Self::Spacer { minimum: m }, Self::Fixed(a)) => Self::Fixed(a.max(m)),
            (Self::Spacer { minimum: a }, Self::Spacer { minimum: b }) => {
                Self::Spacer { minimum: a.max(b) }
            }
        }
    }

    /// Resolve against the ambient length.
    pub fn concretize(self, ambient: f64) -> f64 {
        match self {
            Self::Fixed(v) => v,
            Self::Auto => ambient,
            Self::Spacer { minimum } => minimum.max(ambient),
        }
    }

    pub(crate) fn fingerprint(self, h: &mut StableHasher) {
        match self {
            Self::Fixed(v) => {
                h.write_u8(0);
                h.write_f64(v);
            }
            Self::Auto => h.write_u8(1),
            Self::Spacer { minimum } => {
                h.write_u8(2);
                h.write_f64(minimum);
            }
        }
    }
}

/// Per-axis size request reported by a node before concretization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DynamicResolution {
    pub width: AxisLength,
    pub height: AxisLength,
    pub depth: AxisLength,
}

impl Default for DynamicResolution {
    fn default() -> Self {
        Self::AUTO
    }
}

impl DynamicResolution {
    pub const AUTO: Self = Self {
        width: AxisLength::Auto,
        height: AxisLength::Auto,
        depth: AxisLength::Auto,
    };

    pub const fn new(width: AxisLength, height: AxisLength, depth: AxisLength) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    pub fn fixed(resolution: Resolution) -> Self {
        Self::new(
            AxisLength::Fixed(resolution.width),
            AxisLength::Fixed(resolution.height),
            AxisLength::Fixed(resolution.depth),
        )
    }

    pub fn spacer(minimum: f64) -> Self {
        let s = AxisLength::Spacer { minimum };
        Self::new(s, s, s)
    }

    pub fn axis(self, axis: Axis) -> AxisLength {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
            Axis::Depth => self.depth,
        }
    }

    pub fn with_axis(mut self, axis: Axis, length: AxisLength) -> Self {
        match axis {
            Axis::Horizontal => self.width = length,
            Axis::Vertical => self.height = length,
            Axis::Depth => self.depth = length,
        }
        self
    }

    /// All three axes fixed.
    pub fn is_concrete(self) -> bool {
        self.concrete().is_some()
    }

    pub fn concrete(self) -> Option<Resolution> {
        Some(Resolution::new(
            self.width.fixed()?,
            self.height.fixed()?,
            self.depth.fixed()?,
        ))
    }

    /// Merge `other` into `self` as the next sibling along `axis`.
    pub fn merged(self, other: Self, axis: Axis) -> Self {
        let mut out = self;
        for a in [Axis::Horizontal, Axis::Vertical, Axis::Depth] {
            let merged = if a == axis {
                self.axis(a).merge_stacking(other.axis(a))
            } else {
                self.axis(a).merge_cross(other.axis(a))
            };
            out = out.with_axis(a, merged);
        }
        out
    }

    /// Fold the resolutions of stacked siblings in one left-to-right pass.
    ///
    /// An empty sibling list fills the ambient resolution (`AUTO`).
    pub fn stacked<I>(children: I, axis: Axis) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let mut children = children.into_iter();
        let Some(first) = children.next() else {
            return Self::AUTO;
        };
        children.fold(first, |acc, child| acc.merged(child, axis))
    }

    pub fn concretize(self, ambient: Resolution) -> Resolution {
        Resolution::new(
            self.width.concretize(ambient.width),
            self.height.concretize(ambient.height),
            self.depth.concretize(ambient.depth),
        )
    }

    pub(crate) fn fingerprint(self, h: &mut StableHasher) {
        self.width.fingerprint(h);
        self.height.fingerprint(h);
        self.depth.fingerprint(h);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/dynamic.rs"]
mod tests;
