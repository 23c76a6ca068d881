//! Stackgraph renders declarative graphics graphs.
//!
//! A caller describes an image (or volume) as a tree of [`Node`]s: content leaves, effects and
//! horizontal/vertical/depth stacks. Nothing is sized up front. Each node reports a
//! [`DynamicResolution`] (fixed, auto or spacer per axis), stacks negotiate concrete sizes for
//! their children, and parameters resolve against the concrete resolution at render time.
//!
//! - Build a tree with [`Node`] and the built-in content and effects
//! - Create a [`Renderer`] (or call [`render_graph`])
//! - Render against a [`Specification`] into a premultiplied RGBA8 [`Buffer`]
//!
//! Oversized targets are split into tiles of the same tree and reassembled; every render can be
//! cancelled cooperatively through a [`CancelToken`].
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod graph;
pub(crate) mod layout;
pub(crate) mod render;
/// Resolution-aware parameter values.
pub mod value;

pub use crate::foundation::core::{
    Affine, Alignment, Angle, Angle3, Axis, Color, GradientStop, PixelExtent, PixelOffset, Point,
    Point3, Rect, Region, Resolution, Size, Size3, Vec2,
};
pub use crate::foundation::error::{GraphError, GraphResult};
pub use crate::foundation::math::{Fingerprint, StableHasher};

pub use crate::graph::content::{
    CircleContent, ColorContent, GradientContent, GradientDirection, GradientExtend, SpacerContent,
};
pub use crate::graph::effects::{BlurEffect, BlurStyle, TransformEffect};
pub use crate::graph::node::{
    Content, ContentContext, ContentNode, Effect, EffectContext, EffectNode, Node, Specification,
    StackNode,
};
pub use crate::layout::dynamic::{AxisLength, DynamicResolution};
pub use crate::layout::stack::{StackLayout, negotiate, stack_regions};
pub use crate::render::backend::{Buffer, CpuBackend, RenderBackend};
pub use crate::render::blur::{blur_rgba8_premul, box_kernel_q16, gaussian_kernel_q16};
pub use crate::render::composite::{crop_buffer, stack_buffers};
pub use crate::render::pipeline::{CancelToken, RenderOptions, Renderer, render_graph};
pub use crate::render::tile::{Tile, TileCount, TileIndex, check_tile_count, tile_grid, tiled};
