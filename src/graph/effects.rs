//! Built-in effects.

use crate::foundation::core::{
    Affine, Angle, Axis, PixelExtent, PixelOffset, Point, Region, Resolution, Vec2,
};
use crate::foundation::error::{GraphError, GraphResult};
use crate::foundation::math::StableHasher;
use crate::graph::node::{Effect, EffectContext};
use crate::render::backend::Buffer;
use crate::render::blur::{blur_rgba8_premul, box_kernel_q16, gaussian_kernel_q16};
use crate::render::composite::crop_buffer;
use crate::value::{EnumParameter, MetadataValue, Parameter};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumIter, strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum BlurStyle {
    Gaussian,
    Box,
}

/// Planar blur, applied to each depth slice.
#[derive(Clone, Debug, PartialEq)]
pub struct BlurEffect {
    pub style: EnumParameter<BlurStyle>,
    /// Radius in pixels. Defaults to 2% of the smaller side.
    pub radius: Parameter<f64>,
}

impl Default for BlurEffect {
    fn default() -> Self {
        Self {
            style: EnumParameter::new(BlurStyle::Gaussian),
            radius: Parameter::new(MetadataValue::resolution_minimum(0.02))
                .with_maximum(MetadataValue::resolution_minimum(0.5))
                .spatial(),
        }
    }
}

impl BlurEffect {
    pub fn new(style: BlurStyle, radius: MetadataValue<f64>) -> Self {
        let mut effect = Self {
            style: EnumParameter::new(style),
            ..Self::default()
        };
        effect.radius.set(radius);
        effect
    }

    fn pixel_radius(&self, resolution: Resolution) -> u32 {
        let r = self.radius.eval(resolution);
        if r.is_finite() && r > 0.0 {
            r.round() as u32
        } else {
            0
        }
    }
}

impl Effect for BlurEffect {
    fn name(&self) -> &'static str {
        "blur"
    }

    fn input_region(
        &self,
        resolution: Resolution,
        region: Region,
        extent: PixelExtent,
    ) -> Option<Region> {
        let r = i64::from(self.pixel_radius(resolution));
        let mut grown = region;
        for axis in [Axis::Horizontal, Axis::Vertical] {
            grown.origin = grown.origin.with(axis, region.start(axis) - r);
            grown.extent = grown
                .extent
                .with_len(axis, (i64::from(region.extent.len(axis)) + 2 * r) as u32);
        }
        grown.intersect(Region::full(extent))
    }

    fn apply(&self, input: Buffer, ctx: &EffectContext) -> GraphResult<Buffer> {
        let radius = self.pixel_radius(ctx.resolution);
        let kernel = match self.style.value {
            BlurStyle::Gaussian => gaussian_kernel_q16(radius, (radius as f32 / 2.0).max(0.5))?,
            BlurStyle::Box => box_kernel_q16(radius)?,
        };
        let blurred = blur_rgba8_premul(&input, &kernel)?;
        Ok(crop_buffer(blurred, ctx.region.relative_to(ctx.input_region.origin)))
    }

    fn fingerprint(&self, h: &mut StableHasher) {
        self.style.fingerprint(h);
        self.radius.fingerprint(h);
    }
}

/// Planar translate / rotate / scale around the center, nearest-neighbour sampled.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformEffect {
    /// Offset in pixels.
    pub translation: Parameter<Point>,
    pub rotation: Parameter<Angle>,
    pub scale: Parameter<f64>,
}

impl Default for TransformEffect {
    fn default() -> Self {
        Self {
            translation: Parameter::new(MetadataValue::Zero).spatial(),
            rotation: Parameter::new(MetadataValue::Zero),
            scale: Parameter::new(MetadataValue::One),
        }
    }
}

impl TransformEffect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translation(mut self, translation: MetadataValue<Point>) -> Self {
        self.translation.set(translation);
        self
    }

    pub fn rotation(mut self, angle: Angle) -> Self {
        self.rotation.set(MetadataValue::Fixed(angle));
        self
    }

    pub fn scale(mut self, scale: f64) -> Self {
        self.scale.set(MetadataValue::Fixed(scale));
        self
    }

    /// Output-to-input mapping, `None` when the transform collapses the image.
    fn inverse(&self, resolution: Resolution) -> Option<Affine> {
        let scale = self.scale.eval(resolution);
        if !scale.is_finite() || scale.abs() < f64::EPSILON {
            return None;
        }
        let center = Vec2::new(resolution.width / 2.0, resolution.height / 2.0);
        let t = self.translation.eval(resolution);
        let forward = Affine::translate(center + t.to_vec2())
            * Affine::rotate(self.rotation.eval(resolution).to_radians())
            * Affine::scale(scale)
            * Affine::translate(-center);
        Some(forward.inverse())
    }
}

impl Effect for TransformEffect {
    fn name(&self) -> &'static str {
        "transform"
    }

    fn input_region(
        &self,
        resolution: Resolution,
        region: Region,
        extent: PixelExtent,
    ) -> Option<Region> {
        let inverse = self.inverse(resolution)?;
        let (x0, x1) = (
            region.start(Axis::Horizontal) as f64,
            region.end(Axis::Horizontal) as f64,
        );
        let (y0, y1) = (
            region.start(Axis::Vertical) as f64,
            region.end(Axis::Vertical) as f64,
        );
        let corners =
            [(x0, y0), (x1, y0), (x0, y1), (x1, y1)].map(|(x, y)| inverse * Point::new(x, y));

        let min_x = corners.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let max_x = corners.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        let min_y = corners.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max_y = corners.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        let limit = f64::from(u32::MAX) / 2.0;
        let clamp = |v: f64| v.clamp(-limit, limit) as i64;
        let (sx0, sx1) = (clamp(min_x.floor()) - 1, clamp(max_x.ceil()) + 1);
        let (sy0, sy1) = (clamp(min_y.floor()) - 1, clamp(max_y.ceil()) + 1);

        let bounds = Region::new(
            PixelOffset::new(sx0, sy0, region.origin.z),
            PixelExtent::new(
                (sx1 - sx0) as u32,
                (sy1 - sy0) as u32,
                region.extent.depth,
            ),
        );
        bounds.intersect(Region::full(extent))
    }

    fn apply(&self, input: Buffer, ctx: &EffectContext) -> GraphResult<Buffer> {
        if input.extent != ctx.input_region.extent {
            return Err(GraphError::render(
                "transform input does not cover its input region",
            ));
        }
        let Some(inverse) = self.inverse(ctx.resolution) else {
            return Ok(Buffer::cleared(ctx.region.extent));
        };
        let src = ctx.input_region;
        let origin = ctx.region.origin;

        Ok(Buffer::from_fn(ctx.region.extent, |x, y, z| {
            let p = inverse
                * Point::new(
                    (origin.x + i64::from(x)) as f64 + 0.5,
                    (origin.y + i64::from(y)) as f64 + 0.5,
                );
            let sx = p.x.floor() as i64 - src.origin.x;
            let sy = p.y.floor() as i64 - src.origin.y;
            let sz = origin.z + i64::from(z) - src.origin.z;
            let inside = (0..i64::from(src.extent.width)).contains(&sx)
                && (0..i64::from(src.extent.height)).contains(&sy)
                && (0..i64::from(src.extent.depth)).contains(&sz);
            if inside {
                input.pixel(sx as u32, sy as u32, sz as u32)
            } else {
                [0; 4]
            }
        }))
    }

    fn fingerprint(&self, h: &mut StableHasher) {
        self.translation.fingerprint(h);
        self.rotation.fingerprint(h);
        self.scale.fingerprint(h);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/effects.rs"]
mod tests;
