//! Built-in leaf content.

use crate::foundation::core::{Alignment, Color, GradientStop, Point, Resolution};
use crate::foundation::error::{GraphError, GraphResult};
use crate::foundation::math::{StableHasher, over, scale_premul};
use crate::graph::node::{Content, ContentContext, Specification};
use crate::layout::dynamic::DynamicResolution;
use crate::render::backend::Buffer;
use crate::value::{EnumParameter, GraphicValue, MetadataValue, Parameter};

/// A solid fill.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorContent {
    pub color: Parameter<Color>,
}

impl ColorContent {
    pub fn new(color: Color) -> Self {
        Self {
            color: Parameter::fixed(color),
        }
    }
}

impl Content for ColorContent {
    fn name(&self) -> &'static str {
        "color"
    }

    fn render(&self, ctx: &ContentContext) -> GraphResult<Buffer> {
        let rgba = self.color.eval(ctx.resolution).to_premul_rgba8();
        Ok(Buffer::filled(ctx.region.extent, rgba))
    }

    fn fingerprint(&self, h: &mut StableHasher) {
        self.color.fingerprint(h);
    }
}

/// An anti-aliased disc over a background, repeated on every depth slice.
#[derive(Clone, Debug, PartialEq)]
pub struct CircleContent {
    /// Defaults to a quarter of the smaller side.
    pub radius: Parameter<f64>,
    /// Defaults to the center.
    pub position: Parameter<Point>,
    pub color: Parameter<Color>,
    pub background: Parameter<Color>,
}

impl Default for CircleContent {
    fn default() -> Self {
        Self {
            radius: Parameter::new(MetadataValue::resolution_minimum(0.25))
                .with_maximum(MetadataValue::resolution_maximum(1.0))
                .spatial(),
            position: Parameter::new(MetadataValue::aligned(Alignment::Center)).spatial(),
            color: Parameter::fixed(Color::WHITE),
            background: Parameter::fixed(Color::CLEAR),
        }
    }
}

impl CircleContent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn radius(mut self, radius: MetadataValue<f64>) -> Self {
        self.radius.set(radius);
        self
    }

    pub fn position(mut self, position: MetadataValue<Point>) -> Self {
        self.position.set(position);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color.set(MetadataValue::Fixed(color));
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background.set(MetadataValue::Fixed(color));
        self
    }
}

impl Content for CircleContent {
    fn name(&self) -> &'static str {
        "circle"
    }

    fn render(&self, ctx: &ContentContext) -> GraphResult<Buffer> {
        let radius = self.radius.eval(ctx.resolution);
        if !radius.is_finite() {
            return Err(GraphError::validation("circle radius must be finite"));
        }
        let center = self.position.eval(ctx.resolution);
        let fg = self.color.eval(ctx.resolution).to_premul_rgba8();
        let bg = self.background.eval(ctx.resolution).to_premul_rgba8();

        Ok(ctx.rasterize(|x, y, _| {
            let dist = (x - center.x).hypot(y - center.y);
            // One-pixel ramp centered on the edge.
            let coverage = (radius - dist + 0.5).clamp(0.0, 1.0);
            over(bg, scale_premul(fg, coverage))
        }))
    }

    fn fingerprint(&self, h: &mut StableHasher) {
        self.radius.fingerprint(h);
        self.position.fingerprint(h);
        self.color.fingerprint(h);
        self.background.fingerprint(h);
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumIter, strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum GradientDirection {
    Horizontal,
    Vertical,
    Radial,
}

/// What a gradient does outside `0..=1`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumIter, strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum GradientExtend {
    Clamp,
    Repeat,
    Mirror,
}

impl GradientExtend {
    fn apply(self, t: f64) -> f64 {
        match self {
            Self::Clamp => t.clamp(0.0, 1.0),
            Self::Repeat => t.rem_euclid(1.0),
            Self::Mirror => {
                let m = t.rem_euclid(2.0);
                if m > 1.0 { 2.0 - m } else { m }
            }
        }
    }
}

/// A color ramp along an axis or radiating from a point.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientContent {
    pub direction: EnumParameter<GradientDirection>,
    pub extend: EnumParameter<GradientExtend>,
    pub stops: Parameter<Vec<GradientStop>>,
    /// Radial center.
    pub position: Parameter<Point>,
    pub scale: Parameter<f64>,
    pub offset: Parameter<f64>,
}

impl GradientContent {
    pub fn new(direction: GradientDirection, stops: Vec<GradientStop>) -> Self {
        Self {
            direction: EnumParameter::new(direction),
            extend: EnumParameter::new(GradientExtend::Clamp),
            stops: Parameter::fixed(stops),
            position: Parameter::new(MetadataValue::aligned(Alignment::Center)).spatial(),
            scale: Parameter::new(MetadataValue::One),
            offset: Parameter::new(MetadataValue::Zero),
        }
    }

    pub fn extend(mut self, extend: GradientExtend) -> Self {
        self.extend = EnumParameter::new(extend);
        self
    }

    pub fn scale(mut self, scale: f64) -> Self {
        self.scale.set(MetadataValue::Fixed(scale));
        self
    }

    pub fn offset(mut self, offset: f64) -> Self {
        self.offset.set(MetadataValue::Fixed(offset));
        self
    }

    fn ramp_position(
        &self,
        (x, y): (f64, f64),
        resolution: Resolution,
        scale: f64,
        center: Point,
    ) -> f64 {
        match self.direction.value {
            GradientDirection::Horizontal => (x / resolution.width - 0.5) / scale + 0.5,
            GradientDirection::Vertical => (y / resolution.height - 0.5) / scale + 0.5,
            GradientDirection::Radial => {
                let half = resolution.width.max(resolution.height) / 2.0;
                (x - center.x).hypot(y - center.y) / (half * scale)
            }
        }
    }
}

/// Color of a sorted ramp at `t`. Outside the stops the nearest end stop wins.
pub(crate) fn sample_stops(stops: &[GradientStop], t: f64) -> Color {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return Color::CLEAR;
    };
    if t <= first.location {
        return first.color;
    }
    if t >= last.location {
        return last.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if t <= b.location {
            let span = b.location - a.location;
            let f = if span > 0.0 {
                (t - a.location) / span
            } else {
                1.0
            };
            return <Color as GraphicValue>::lerp(f, &a.color, &b.color);
        }
    }
    last.color
}

impl Content for GradientContent {
    fn name(&self) -> &'static str {
        "gradient"
    }

    fn render(&self, ctx: &ContentContext) -> GraphResult<Buffer> {
        let mut stops = self.stops.eval(ctx.resolution);
        stops.sort_by(|a, b| a.location.total_cmp(&b.location));
        let scale = self.scale.eval(ctx.resolution);
        if scale == 0.0 || !scale.is_finite() {
            return Err(GraphError::validation("gradient scale must be finite and non-zero"));
        }
        let offset = self.offset.eval(ctx.resolution);
        let center = self.position.eval(ctx.resolution);
        let extend = self.extend.value;

        Ok(ctx.rasterize(|x, y, _| {
            let t = self.ramp_position((x, y), ctx.resolution, scale, center) - offset;
            sample_stops(&stops, extend.apply(t)).to_premul_rgba8()
        }))
    }

    fn fingerprint(&self, h: &mut StableHasher) {
        self.direction.fingerprint(h);
        self.extend.fingerprint(h);
        self.stops.fingerprint(h);
        self.position.fingerprint(h);
        self.scale.fingerprint(h);
        self.offset.fingerprint(h);
    }
}

/// Transparent, flexible space. Never shorter than `minimum` on any axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpacerContent {
    pub minimum: f64,
}

impl SpacerContent {
    pub fn new(minimum: f64) -> Self {
        Self { minimum }
    }
}

impl Content for SpacerContent {
    fn name(&self) -> &'static str {
        "spacer"
    }

    fn resolution(&self, _spec: &Specification) -> DynamicResolution {
        DynamicResolution::spacer(self.minimum)
    }

    fn render(&self, ctx: &ContentContext) -> GraphResult<Buffer> {
        Ok(Buffer::cleared(ctx.region.extent))
    }

    fn fingerprint(&self, h: &mut StableHasher) {
        h.write_f64(self.minimum);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/content.rs"]
mod tests;
