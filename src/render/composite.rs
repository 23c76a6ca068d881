use crate::foundation::core::{Alignment, Axis, PixelExtent, PixelOffset, Region};
use crate::foundation::error::{GraphError, GraphResult};
use crate::layout::stack::stack_regions;
use crate::render::backend::Buffer;

/// Copy `src` into `dst` with its origin at `offset`, clipping whatever falls outside `dst`.
pub(crate) fn blit(dst: &mut Buffer, src: &Buffer, offset: PixelOffset) {
    let dst_region = Region::full(dst.extent);
    let Some(hit) = Region::new(offset, src.extent).intersect(dst_region) else {
        return;
    };

    let row_bytes = hit.extent.width as usize * 4;
    let sx = (hit.origin.x - offset.x) as u32;
    for dz in 0..hit.extent.depth {
        let z = hit.origin.z as u32 + dz;
        let sz = (hit.origin.z - offset.z) as u32 + dz;
        for dy in 0..hit.extent.height {
            let y = hit.origin.y as u32 + dy;
            let sy = (hit.origin.y - offset.y) as u32 + dy;
            let di = dst.index(hit.origin.x as u32, y, z);
            let si = src.index(sx, sy, sz);
            dst.data[di..di + row_bytes].copy_from_slice(&src.data[si..si + row_bytes]);
        }
    }
}

/// Concatenate buffers along `axis` in the order given.
pub fn stack_buffers(
    mut buffers: Vec<Buffer>,
    axis: Axis,
    alignment: Alignment,
) -> GraphResult<Buffer> {
    if buffers.is_empty() {
        return Err(GraphError::render("stack requires at least one buffer"));
    }
    if buffers.len() == 1 {
        return Ok(buffers.swap_remove(0));
    }

    let extents: Vec<PixelExtent> = buffers.iter().map(|b| b.extent).collect();
    let (total, regions) = stack_regions(&extents, axis, alignment);
    let mut out = Buffer::cleared(total);
    for (buffer, region) in buffers.iter().zip(&regions) {
        blit(&mut out, buffer, region.origin);
    }
    Ok(out)
}

/// Cut `region` out of `buffer`; voxels outside the source stay transparent.
pub fn crop_buffer(buffer: Buffer, region: Region) -> Buffer {
    if region.is_full(buffer.extent) {
        return buffer;
    }
    let mut out = Buffer::cleared(region.extent);
    blit(&mut out, &buffer, PixelOffset::ZERO.relative_to(region.origin));
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
