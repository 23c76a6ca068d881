use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::foundation::core::{Alignment, Axis, PixelExtent, Region, Resolution};
use crate::foundation::error::GraphResult;
use crate::foundation::math::{Fingerprint, StableHasher};
use crate::layout::dynamic::{AxisLength, DynamicResolution};
use crate::layout::stack::{StackLayout, negotiate, stack_regions};
use crate::render::backend::Buffer;

/// The ambient request a node is resolved against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Specification {
    pub resolution: Resolution,
}

impl Specification {
    pub const fn new(resolution: Resolution) -> Self {
        Self { resolution }
    }
}

/// What a leaf is asked to draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContentContext {
    /// Concrete resolution the parameters evaluate against.
    pub resolution: Resolution,
    /// The voxels to produce, in the coordinates of the full `resolution`.
    pub region: Region,
}

impl ContentContext {
    pub fn full(resolution: Resolution) -> GraphResult<Self> {
        Ok(Self {
            resolution,
            region: Region::full(resolution.to_extent()?),
        })
    }

    /// Build the region's buffer from a function of voxel-center coordinates in full-resolution
    /// space.
    pub fn rasterize(&self, mut shade: impl FnMut(f64, f64, f64) -> [u8; 4]) -> Buffer {
        let o = self.region.origin;
        Buffer::from_fn(self.region.extent, |x, y, z| {
            shade(
                (o.x + i64::from(x)) as f64 + 0.5,
                (o.y + i64::from(y)) as f64 + 0.5,
                (o.z + i64::from(z)) as f64 + 0.5,
            )
        })
    }
}

/// A leaf that draws pixels from its own parameters.
///
/// Implementations must be deterministic: the same resolution and region always yield the same
/// buffer, and rendering a region must match cropping a full render.
pub trait Content: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    /// Size request. Most content fills whatever it is offered.
    fn resolution(&self, _spec: &Specification) -> DynamicResolution {
        DynamicResolution::AUTO
    }

    /// Produce exactly `ctx.region.extent` voxels.
    fn render(&self, ctx: &ContentContext) -> GraphResult<Buffer>;

    fn fingerprint(&self, h: &mut StableHasher);
}

/// What an effect is asked to produce.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectContext {
    pub resolution: Resolution,
    /// Full size of the input (and output).
    pub extent: PixelExtent,
    /// Output voxels to produce.
    pub region: Region,
    /// Voxels the input buffer covers, as returned by [`Effect::input_region`].
    pub input_region: Region,
}

/// A filter applied to the rendered output of one input node.
pub trait Effect: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    /// Input voxels needed to produce `region`, clipped to `extent`.
    ///
    /// Effects that sample neighbours grow the region; the default is a pointwise effect.
    fn input_region(
        &self,
        _resolution: Resolution,
        region: Region,
        _extent: PixelExtent,
    ) -> Option<Region> {
        Some(region)
    }

    /// Produce exactly `ctx.region.extent` voxels from `input`, which covers `ctx.input_region`
    /// (transparent and empty when `input_region` returned `None`).
    fn apply(&self, input: Buffer, ctx: &EffectContext) -> GraphResult<Buffer>;

    fn fingerprint(&self, h: &mut StableHasher);
}

/// A leaf node with an optional frame overriding the content's own size request.
#[derive(Clone, Debug)]
pub struct ContentNode {
    pub content: Arc<dyn Content>,
    pub frame: Option<DynamicResolution>,
}

#[derive(Clone, Debug)]
pub struct EffectNode {
    pub input: Box<Node>,
    pub effect: Arc<dyn Effect>,
}

/// Children composed along one axis.
#[derive(Clone, Debug)]
pub struct StackNode {
    pub axis: Axis,
    pub alignment: Alignment,
    pub children: Vec<Node>,
}

impl StackNode {
    /// Negotiate every child's concrete resolution inside `resolution`.
    pub fn layout(&self, resolution: Resolution) -> StackLayout {
        let spec = Specification::new(resolution);
        let requests: Vec<DynamicResolution> =
            self.children.iter().map(|c| c.resolution(&spec)).collect();
        let layout = negotiate(&requests, resolution, self.axis, self.alignment);
        tracing::debug!(
            axis = %self.axis,
            children = self.children.len(),
            width = layout.resolution.width,
            height = layout.resolution.height,
            depth = layout.resolution.depth,
            "stack layout"
        );
        layout
    }

    /// Negotiate, then place every child's rendered output along the axis.
    ///
    /// Returns the layout, the composited extent and one region per child.
    pub fn arrange(
        &self,
        resolution: Resolution,
    ) -> GraphResult<(StackLayout, PixelExtent, Vec<Region>)> {
        let layout = self.layout(resolution);
        let extents = self
            .children
            .iter()
            .zip(&layout.children)
            .map(|(child, res)| child.output_extent(*res))
            .collect::<GraphResult<Vec<_>>>()?;
        let (total, regions) = stack_regions(&extents, self.axis, self.alignment);
        Ok((layout, total, regions))
    }
}

/// One node of the declarative render tree.
#[derive(Clone, Debug)]
pub enum Node {
    Content(ContentNode),
    Effect(EffectNode),
    Stack(StackNode),
}

impl Node {
    pub fn content(content: impl Content + 'static) -> Self {
        Self::Content(ContentNode {
            content: Arc::new(content),
            frame: None,
        })
    }

    /// Content with a fixed width and height. Depth follows the ambient resolution.
    pub fn framed(content: impl Content + 'static, width: f64, height: f64) -> Self {
        Self::Content(ContentNode {
            content: Arc::new(content),
            frame: Some(DynamicResolution::new(
                AxisLength::Fixed(width),
                AxisLength::Fixed(height),
                AxisLength::Auto,
            )),
        })
    }

    /// Content with an explicit size request.
    pub fn sized(content: impl Content + 'static, frame: DynamicResolution) -> Self {
        Self::Content(ContentNode {
            content: Arc::new(content),
            frame: Some(frame),
        })
    }

    pub fn effect(input: Node, effect: impl Effect + 'static) -> Self {
        Self::Effect(EffectNode {
            input: Box::new(input),
            effect: Arc::new(effect),
        })
    }

    pub fn stack(axis: Axis, alignment: Alignment, children: Vec<Node>) -> Self {
        Self::Stack(StackNode {
            axis,
            alignment,
            children,
        })
    }

    pub fn hstack(children: Vec<Node>) -> Self {
        Self::stack(Axis::Horizontal, Alignment::Center, children)
    }

    pub fn vstack(children: Vec<Node>) -> Self {
        Self::stack(Axis::Vertical, Alignment::Center, children)
    }

    pub fn dstack(children: Vec<Node>) -> Self {
        Self::stack(Axis::Depth, Alignment::Center, children)
    }

    /// Flexible empty space.
    pub fn spacer() -> Self {
        Self::spacer_min(0.0)
    }

    pub fn spacer_min(minimum: f64) -> Self {
        Self::content(crate::graph::content::SpacerContent::new(minimum))
    }

    /// Size request against `spec`.
    pub fn resolution(&self, spec: &Specification) -> DynamicResolution {
        match self {
            Self::Content(node) => node
                .frame
                .unwrap_or_else(|| node.content.resolution(spec)),
            Self::Effect(node) => node.input.resolution(spec),
            Self::Stack(node) => DynamicResolution::stacked(
                node.children.iter().map(|c| c.resolution(spec)),
                node.axis,
            ),
        }
    }

    /// Size of the buffer this node renders at `resolution`.
    ///
    /// Leaves fill their resolution exactly; a stack is as large as its composited children,
    /// which can overflow the resolution it was offered when fixed children do not fit.
    pub fn output_extent(&self, resolution: Resolution) -> GraphResult<PixelExtent> {
        match self {
            Self::Content(_) => resolution.to_extent(),
            Self::Effect(node) => node.input.output_extent(resolution),
            Self::Stack(node) if node.children.is_empty() => resolution.to_extent(),
            Self::Stack(node) => Ok(node.arrange(resolution)?.1),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Content(node) => node.content.name(),
            Self::Effect(node) => node.effect.name(),
            Self::Stack(node) => match node.axis {
                Axis::Horizontal => "hstack",
                Axis::Vertical => "vstack",
                Axis::Depth => "dstack",
            },
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Self::Stack(node) => &node.children,
            Self::Effect(node) => std::slice::from_ref(node.input.as_ref()),
            Self::Content(_) => &[],
        }
    }

    /// Structural fingerprint of the whole subtree.
    pub fn fingerprint(&self) -> Fingerprint {
        let mut h = StableHasher::new();
        self.write_fingerprint(&mut h);
        h.finish()
    }

    fn write_fingerprint(&self, h: &mut StableHasher) {
        match self {
            Self::Content(node) => {
                h.write_u8(0);
                h.write_str(node.content.name());
                node.content.fingerprint(h);
                match node.frame {
                    Some(frame) => {
                        h.write_bool(true);
                        frame.fingerprint(h);
                    }
                    None => h.write_bool(false),
                }
            }
            Self::Effect(node) => {
                h.write_u8(1);
                h.write_str(node.effect.name());
                node.effect.fingerprint(h);
                node.input.write_fingerprint(h);
            }
            Self::Stack(node) => {
                h.write_u8(2);
                h.write_u8(node.axis.tag());
                h.write_u8(node.alignment.tag());
                h.write_usize(node.children.len());
                for child in &node.children {
                    child.write_fingerprint(h);
                }
            }
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.fingerprint() == other.fingerprint()
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fingerprint().hash(state);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/node.rs"]
mod tests;
