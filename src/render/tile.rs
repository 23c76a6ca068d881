use rayon::prelude::*;

use crate::foundation::core::{Alignment, Axis, PixelExtent, Region};
use crate::foundation::error::{GraphError, GraphResult};
use crate::render::backend::{Buffer, RenderBackend};
use crate::render::pipeline::CancelToken;

/// Number of tiles along each axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileCount {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
}

impl TileCount {
    pub const fn new(width: usize, height: usize, depth: usize) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    pub fn len(self, axis: Axis) -> usize {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
            Axis::Depth => self.depth,
        }
    }

    pub fn total(self) -> usize {
        self.width * self.height * self.depth
    }
}

/// Position of one tile in the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileIndex {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl TileIndex {
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    fn get(self, axis: Axis) -> usize {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
            Axis::Depth => self.z,
        }
    }
}

/// Descriptor handed to the per-tile render callback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tile {
    pub origin: TileIndex,
    pub count: TileCount,
    /// Padding in tile-local units.
    pub padding: f64,
    /// The voxels this tile contributes to the target.
    pub slot: Region,
    /// What the callback must render: `slot` grown by the padding, clipped to the target.
    pub region: Region,
}

const AXES: [Axis; 3] = [Axis::Horizontal, Axis::Vertical, Axis::Depth];

/// Validate `count` against `target`.
///
/// A split axis must be strictly longer than its tile count. An unsplit axis (count 1) only needs
/// one voxel, so flat images keep depth 1.
pub fn check_tile_count(count: TileCount, target: PixelExtent) -> GraphResult<()> {
    if AXES.iter().any(|a| count.len(*a) == 0) {
        return Err(GraphError::InvalidTileCount {
            width: count.width,
            height: count.height,
            depth: count.depth,
        });
    }
    let too_small = |a: Axis| {
        let (len, n) = (target.len(a) as usize, count.len(a));
        if n == 1 { len < 1 } else { len <= n }
    };
    if AXES.into_iter().any(too_small) {
        return Err(GraphError::ResolutionTooSmall {
            width: target.width,
            height: target.height,
            depth: target.depth,
            count_width: count.width,
            count_height: count.height,
            count_depth: count.depth,
        });
    }
    Ok(())
}

/// Every tile of the grid in assembly order (x fastest, then y, then z).
pub fn tile_grid(count: TileCount, padding: f64, target: PixelExtent) -> GraphResult<Vec<Tile>> {
    check_tile_count(count, target)?;

    let tile_height = f64::from(target.height) / count.height as f64;
    let local_padding = if padding > 0.0 {
        padding / tile_height
    } else {
        0.0
    };
    let pad = padding.max(0.0).ceil() as i64;
    let full = Region::full(target);

    let mut tiles = Vec::with_capacity(count.total());
    for z in 0..count.depth {
        for y in 0..count.height {
            for x in 0..count.width {
                let origin = TileIndex::new(x, y, z);
                let mut slot = Region::default();
                let mut grown = Region::default();
                for axis in AXES {
                    let (start, end) =
                        slot_bounds(origin.get(axis), count.len(axis), target.len(axis));
                    let p = if axis == Axis::Depth && target.depth <= 1 {
                        0
                    } else {
                        pad
                    };
                    slot.origin = slot.origin.with(axis, start);
                    slot.extent = slot.extent.with_len(axis, (end - start) as u32);
                    grown.origin = grown.origin.with(axis, start - p);
                    grown.extent = grown.extent.with_len(axis, (end - start + 2 * p) as u32);
                }
                tiles.push(Tile {
                    origin,
                    count,
                    padding: local_padding,
                    slot,
                    region: grown.intersect(full).unwrap_or(slot),
                });
            }
        }
    }
    Ok(tiles)
}

fn slot_bounds(index: usize, count: usize, len: u32) -> (i64, i64) {
    let len = len as u64;
    let (i, n) = (index as u64, count as u64);
    ((i * len / n) as i64, ((i + 1) * len / n) as i64)
}

/// Render `target` as a grid of `count` tiles and reassemble the result.
///
/// `render` receives each [`Tile`] and must return a buffer covering `tile.region`. Tiles may
/// render concurrently when `parallel` is set; assembly is sequential: rows stack horizontally,
/// rows stack vertically into a grid slice, slices stack along depth.
#[tracing::instrument(level = "debug", skip(backend, cancel, render), fields(tiles = count.total()))]
pub fn tiled<B, F>(
    count: TileCount,
    padding: f64,
    target: PixelExtent,
    backend: &B,
    cancel: &CancelToken,
    parallel: bool,
    render: F,
) -> GraphResult<Buffer>
where
    B: RenderBackend + ?Sized,
    F: Fn(&Tile) -> GraphResult<Buffer> + Sync,
{
    let tiles = tile_grid(count, padding, target)?;

    let render_tile = |tile: &Tile| -> GraphResult<Buffer> {
        cancel.check()?;
        let buffer = render(tile)?;
        cancel.check()?;
        if buffer.extent != tile.region.extent {
            return Err(GraphError::render(format!(
                "tile {:?} rendered {:?}, expected {:?}",
                tile.origin, buffer.extent, tile.region.extent
            )));
        }
        backend.crop(buffer, tile.slot.relative_to(tile.region.origin))
    };

    let rendered = if parallel {
        tiles.par_iter().map(render_tile).collect::<GraphResult<Vec<_>>>()?
    } else {
        tiles.iter().map(render_tile).collect::<GraphResult<Vec<_>>>()?
    };
    tracing::debug!(rendered = rendered.len(), "tiles rendered, assembling");

    let mut buffers = rendered.into_iter();
    let mut volume: Option<Buffer> = None;
    for _ in 0..count.depth {
        let mut grid: Option<Buffer> = None;
        for _ in 0..count.height {
            let mut row: Option<Buffer> = None;
            for _ in 0..count.width {
                let tile = buffers.next().expect("one rendered buffer per tile");
                row = Some(append(backend, row, tile, Axis::Horizontal)?);
            }
            let row = row.expect("tile row produced no output");
            grid = Some(append(backend, grid, row, Axis::Vertical)?);
        }
        let grid = grid.expect("tile grid produced no output");
        volume = Some(append(backend, volume, grid, Axis::Depth)?);
    }
    Ok(volume.expect("tile volume produced no output"))
}

fn append<B: RenderBackend + ?Sized>(
    backend: &B,
    acc: Option<Buffer>,
    next: Buffer,
    axis: Axis,
) -> GraphResult<Buffer> {
    match acc {
        None => Ok(next),
        Some(acc) => backend.stack(vec![acc, next], axis, Alignment::Leading),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/tile.rs"]
mod tests;
