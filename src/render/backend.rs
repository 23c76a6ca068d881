use crate::foundation::core::{Alignment, Axis, PixelExtent, PixelOffset, Region};
use crate::foundation::error::{GraphError, GraphResult};
use crate::render::composite;

/// A rendered image or volume as RGBA8 pixels.
///
/// Pixels are **premultiplied alpha**, tightly packed with x fastest, then y, then z.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Buffer {
    /// Size in voxels.
    pub extent: PixelExtent,
    /// RGBA8 bytes, `extent.voxel_count() * 4` long.
    pub data: Vec<u8>,
}

impl Buffer {
    /// A fully transparent buffer.
    pub fn cleared(extent: PixelExtent) -> Self {
        Self {
            extent,
            data: vec![0; extent.voxel_count() * 4],
        }
    }

    pub fn from_raw(extent: PixelExtent, data: Vec<u8>) -> GraphResult<Self> {
        if data.len() != extent.voxel_count() * 4 {
            return Err(GraphError::render(format!(
                "buffer data is {} bytes, expected {} for {}x{}x{}",
                data.len(),
                extent.voxel_count() * 4,
                extent.width,
                extent.height,
                extent.depth
            )));
        }
        Ok(Self { extent, data })
    }

    /// A buffer where every voxel has the same premultiplied color.
    pub fn filled(extent: PixelExtent, rgba: [u8; 4]) -> Self {
        Self {
            extent,
            data: rgba.repeat(extent.voxel_count()),
        }
    }

    /// Build a buffer by evaluating `f(x, y, z)` for every voxel.
    pub fn from_fn(extent: PixelExtent, mut f: impl FnMut(u32, u32, u32) -> [u8; 4]) -> Self {
        let mut data = Vec::with_capacity(extent.voxel_count() * 4);
        for z in 0..extent.depth {
            for y in 0..extent.height {
                for x in 0..extent.width {
                    data.extend_from_slice(&f(x, y, z));
                }
            }
        }
        Self { extent, data }
    }

    pub fn width(&self) -> u32 {
        self.extent.width
    }

    pub fn height(&self) -> u32 {
        self.extent.height
    }

    pub fn depth(&self) -> u32 {
        self.extent.depth
    }

    pub(crate) fn index(&self, x: u32, y: u32, z: u32) -> usize {
        let w = self.extent.width as usize;
        let h = self.extent.height as usize;
        (((z as usize) * h + y as usize) * w + x as usize) * 4
    }

    pub fn pixel(&self, x: u32, y: u32, z: u32) -> [u8; 4] {
        let i = self.index(x, y, z);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, z: u32, rgba: [u8; 4]) {
        let i = self.index(x, y, z);
        self.data[i..i + 4].copy_from_slice(&rgba);
    }

    /// Bytes of one depth slice.
    pub fn slice(&self, z: u32) -> &[u8] {
        let len = self.extent.width as usize * self.extent.height as usize * 4;
        let start = z as usize * len;
        &self.data[start..start + len]
    }

    /// True when every voxel is fully transparent.
    pub fn is_clear(&self) -> bool {
        self.data.iter().all(|b| *b == 0)
    }
}

/// Compositing primitives consumed by the orchestrator and the tiling decomposer.
///
/// Implementations never need to inspect the node tree; they only move pixels between buffers.
pub trait RenderBackend: Send + Sync {
    /// A transparent buffer of `extent`.
    fn clear(&self, extent: PixelExtent) -> Buffer;

    /// Concatenate `buffers` along `axis` in order, aligning narrower buffers on the cross axes.
    fn stack(&self, buffers: Vec<Buffer>, axis: Axis, alignment: Alignment)
    -> GraphResult<Buffer>;

    /// Cut `region` out of `buffer`. Parts of `region` outside the buffer come back transparent.
    fn crop(&self, buffer: Buffer, region: Region) -> GraphResult<Buffer>;

    /// Copy each part into a transparent buffer of `extent` at its offset, clipping at the edges.
    fn place(&self, extent: PixelExtent, parts: Vec<(Buffer, PixelOffset)>)
    -> GraphResult<Buffer>;
}

/// Reference backend operating on CPU memory.
#[derive(Clone, Copy, Debug, Default)]
pub struct CpuBackend;

impl CpuBackend {
    pub fn new() -> Self {
        Self
    }
}

impl RenderBackend for CpuBackend {
    fn clear(&self, extent: PixelExtent) -> Buffer {
        Buffer::cleared(extent)
    }

    fn stack(
        &self,
        buffers: Vec<Buffer>,
        axis: Axis,
        alignment: Alignment,
    ) -> GraphResult<Buffer> {
        composite::stack_buffers(buffers, axis, alignment)
    }

    fn crop(&self, buffer: Buffer, region: Region) -> GraphResult<Buffer> {
        Ok(composite::crop_buffer(buffer, region))
    }

    fn place(
        &self,
        extent: PixelExtent,
        parts: Vec<(Buffer, PixelOffset)>,
    ) -> GraphResult<Buffer> {
        let mut out = Buffer::cleared(extent);
        for (part, offset) in &parts {
            composite::blit(&mut out, part, *offset);
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
