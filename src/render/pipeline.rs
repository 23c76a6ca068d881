use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;

use crate::foundation::core::{PixelExtent, PixelOffset, Region, Resolution};
use crate::foundation::error::{GraphError, GraphResult};
use crate::graph::node::{ContentContext, EffectContext, Node, Specification, StackNode};
use crate::render::backend::{Buffer, CpuBackend, RenderBackend};
use crate::render::tile::{TileCount, tiled};

/// Cooperative cancellation flag shared between a caller and a running render.
///
/// Renders check it before starting every node and every tile; work already in flight finishes
/// but its output is discarded.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// `Err(GraphError::Cancelled)` once cancelled.
    pub fn check(&self) -> GraphResult<()> {
        if self.is_cancelled() {
            Err(GraphError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Render scheduling configuration.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Render sibling nodes and tiles on a rayon pool.
    pub parallel: bool,
    /// Pool size; `None` lets rayon pick. Must be >= 1 when set.
    pub threads: Option<usize>,
    /// Largest single-pass extent on any axis, at least 2. Larger targets are tiled.
    pub max_tile_extent: u32,
    /// Pixels rendered around each tile for effects that sample neighbours.
    pub tile_padding: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
            max_tile_extent: 4096,
            tile_padding: 0.0,
        }
    }
}

impl RenderOptions {
    pub fn validate(&self) -> GraphResult<()> {
        if self.threads == Some(0) {
            return Err(GraphError::validation(
                "render option 'threads' must be >= 1 when set",
            ));
        }
        if self.max_tile_extent < 2 {
            return Err(GraphError::validation(
                "render option 'max_tile_extent' must be >= 2",
            ));
        }
        if !self.tile_padding.is_finite() || self.tile_padding < 0.0 {
            return Err(GraphError::validation(
                "render option 'tile_padding' must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// Resolves a node tree against a specification and renders it into one buffer.
pub struct Renderer<B: RenderBackend = CpuBackend> {
    backend: B,
    options: RenderOptions,
    cancel: CancelToken,
    pool: Option<rayon::ThreadPool>,
}

impl Renderer<CpuBackend> {
    pub fn new(options: RenderOptions) -> GraphResult<Self> {
        Self::with_backend(CpuBackend::new(), options)
    }
}

impl<B: RenderBackend> Renderer<B> {
    pub fn with_backend(backend: B, options: RenderOptions) -> GraphResult<Self> {
        options.validate()?;
        let pool = if options.parallel {
            Some(build_thread_pool(options.threads)?)
        } else {
            None
        };
        Ok(Self {
            backend,
            options,
            cancel: CancelToken::new(),
            pool,
        })
    }

    /// Share an existing token instead of the renderer's own.
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Resolve `node` against `spec` and render it.
    ///
    /// Targets larger than [`RenderOptions::max_tile_extent`] on any axis render as tiles of
    /// the same tree. Cancellation yields [`GraphError::Cancelled`] and never a partial buffer.
    #[tracing::instrument(skip(self, node), fields(node = node.name()))]
    pub fn render(&self, node: &Node, spec: Specification) -> GraphResult<Buffer> {
        let result = match &self.pool {
            Some(pool) => pool.install(|| self.render_root(node, spec)),
            None => self.render_root(node, spec),
        };
        if let Err(err) = &result
            && err.is_cancelled()
        {
            tracing::debug!("render cancelled");
        }
        result
    }

    fn render_root(&self, node: &Node, spec: Specification) -> GraphResult<Buffer> {
        self.cancel.check()?;
        let resolution = node.resolution(&spec).concretize(spec.resolution);
        let target = node.output_extent(resolution)?;

        let max = self.options.max_tile_extent;
        if [target.width, target.height, target.depth]
            .iter()
            .all(|len| *len <= max)
        {
            return self.render_region(node, resolution, Region::full(target));
        }

        let count = TileCount::new(
            target.width.div_ceil(max).max(1) as usize,
            target.height.div_ceil(max).max(1) as usize,
            target.depth.div_ceil(max).max(1) as usize,
        );
        tracing::debug!(
            width = target.width,
            height = target.height,
            depth = target.depth,
            tiles = count.total(),
            "target exceeds single-pass extent, tiling"
        );
        tiled(
            count,
            self.options.tile_padding,
            target,
            &self.backend,
            &self.cancel,
            self.options.parallel,
            |tile| self.render_region(node, resolution, tile.region),
        )
    }

    /// Render the voxels of `region` of `node` at `resolution`.
    ///
    /// `region` is in the coordinates of the node's full output; the returned buffer has exactly
    /// `region.extent`.
    fn render_region(
        &self,
        node: &Node,
        resolution: Resolution,
        region: Region,
    ) -> GraphResult<Buffer> {
        self.cancel.check()?;
        let buffer = match node {
            Node::Content(leaf) => leaf.content.render(&ContentContext { resolution, region })?,
            Node::Effect(effect) => {
                let extent = effect.input.output_extent(resolution)?;
                let input_region = effect.effect.input_region(resolution, region, extent);
                let (input, input_region) = match input_region {
                    Some(r) => (self.render_region(&effect.input, resolution, r)?, r),
                    None => (self.backend.clear(PixelExtent::default()), Region::default()),
                };
                self.cancel.check()?;
                let ctx = EffectContext {
                    resolution,
                    extent,
                    region,
                    input_region,
                };
                effect.effect.apply(input, &ctx)?
            }
            Node::Stack(stack) => self.render_stack(stack, resolution, region)?,
        };

        if buffer.extent != region.extent {
            return Err(GraphError::render(format!(
                "{} rendered {}x{}x{}, expected {}x{}x{}",
                node.name(),
                buffer.extent.width,
                buffer.extent.height,
                buffer.extent.depth,
                region.extent.width,
                region.extent.height,
                region.extent.depth
            )));
        }
        Ok(buffer)
    }

    fn render_stack(
        &self,
        stack: &StackNode,
        resolution: Resolution,
        region: Region,
    ) -> GraphResult<Buffer> {
        if stack.children.is_empty() {
            return Ok(self.backend.clear(region.extent));
        }

        let (layout, total, placements) = stack.arrange(resolution)?;

        if region.is_full(total) {
            let jobs: Vec<(&Node, Resolution, Region)> = stack
                .children
                .iter()
                .zip(&layout.children)
                .zip(&placements)
                .map(|((child, res), placed)| (child, *res, Region::full(placed.extent)))
                .collect();
            let buffers = self.render_children(&jobs)?;
            self.cancel.check()?;
            return self.backend.stack(buffers, stack.axis, stack.alignment);
        }

        // Only children overlapping the region render, each restricted to its overlap.
        let mut jobs = Vec::new();
        let mut offsets = Vec::new();
        let children = stack.children.iter().zip(&layout.children).zip(&placements);
        for ((child, res), placed) in children {
            if let Some(hit) = placed.intersect(region) {
                jobs.push((child, *res, hit.relative_to(placed.origin)));
                offsets.push(hit.origin.relative_to(region.origin));
            }
        }
        let buffers = self.render_children(&jobs)?;
        self.cancel.check()?;
        let parts: Vec<(Buffer, PixelOffset)> = buffers.into_iter().zip(offsets).collect();
        self.backend.place(region.extent, parts)
    }

    /// Render siblings, possibly concurrently. Output order always matches `jobs`.
    fn render_children(&self, jobs: &[(&Node, Resolution, Region)]) -> GraphResult<Vec<Buffer>> {
        if self.options.parallel {
            jobs.par_iter()
                .map(|(child, res, region)| self.render_region(child, *res, *region))
                .collect()
        } else {
            jobs.iter()
                .map(|(child, res, region)| self.render_region(child, *res, *region))
                .collect()
        }
    }
}

/// Render `node` with default options.
pub fn render_graph(node: &Node, spec: Specification) -> GraphResult<Buffer> {
    Renderer::new(RenderOptions::default())?.render(node, spec)
}

fn build_thread_pool(threads: Option<usize>) -> GraphResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(GraphError::validation(
            "render option 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| GraphError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
