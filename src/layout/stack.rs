use crate::foundation::core::{Alignment, Axis, PixelExtent, PixelOffset, Region, Resolution};
use crate::foundation::error::GraphResult;
use crate::layout::dynamic::{AxisLength, DynamicResolution};

const AXES: [Axis; 3] = [Axis::Horizontal, Axis::Vertical, Axis::Depth];

/// Concrete sizes for every child of one stack.
#[derive(Clone, Debug, PartialEq)]
pub struct StackLayout {
    pub axis: Axis,
    pub alignment: Alignment,
    /// Concrete resolution per child, in declared order.
    pub children: Vec<Resolution>,
    /// Resolution of the composited result.
    pub resolution: Resolution,
}

/// Derive each child's concrete resolution from the children's requests and the ambient
/// resolution.
///
/// Stacking axis: fixed children keep their length, spacers get their minimum, and the remaining
/// budget is split among auto children in whole pixels that differ by at most one. Without auto
/// children the spacers split it on top of their minimum. Flexible children therefore fill
/// `ambient` exactly, while fixed lengths are never clamped, so the result may overflow it.
///
/// Cross axes: fixed children keep their length; every other child gets the longest fixed cross
/// length among its siblings, or the ambient length when no sibling has one.
pub fn negotiate(
    children: &[DynamicResolution],
    ambient: Resolution,
    axis: Axis,
    alignment: Alignment,
) -> StackLayout {
    let mut resolved = vec![ambient; children.len()];

    for cross in AXES.into_iter().filter(|a| *a != axis) {
        let cross_len = children
            .iter()
            .filter_map(|c| c.axis(cross).fixed())
            .reduce(f64::max)
            .unwrap_or_else(|| ambient.length(cross));
        for (slot, child) in resolved.iter_mut().zip(children) {
            *slot = slot.with_length(cross, child.axis(cross).concretize(cross_len));
        }
    }

    // Flexible shares are whole pixels so the children tile the ambient length exactly.
    let mut fixed_px = 0.0;
    let mut spacer_px = 0.0;
    let mut auto_count = 0usize;
    let mut spacer_count = 0usize;
    for child in children {
        match child.axis(axis) {
            AxisLength::Fixed(v) => fixed_px += v.round(),
            AxisLength::Spacer { minimum } => {
                spacer_px += minimum.round();
                spacer_count += 1;
            }
            AxisLength::Auto => auto_count += 1,
        }
    }
    let remaining = (ambient.length(axis).round() - fixed_px - spacer_px).max(0.0) as u64;
    let (flex_count, flex_is_auto) = if auto_count > 0 {
        (auto_count, true)
    } else {
        (spacer_count, false)
    };
    tracing::trace!(
        %axis,
        fixed_px,
        spacer_px,
        auto_count,
        spacer_count,
        remaining,
        "stack negotiation"
    );

    let mut flex_index = 0usize;
    let mut next_share = || {
        let share = share_bounds(flex_index + 1, flex_count, remaining)
            - share_bounds(flex_index, flex_count, remaining);
        flex_index += 1;
        share as f64
    };
    for (slot, child) in resolved.iter_mut().zip(children) {
        let len = match child.axis(axis) {
            AxisLength::Fixed(v) => v,
            AxisLength::Spacer { minimum } if flex_is_auto => minimum,
            AxisLength::Spacer { minimum } => minimum + next_share(),
            AxisLength::Auto => next_share(),
        };
        *slot = slot.with_length(axis, len);
    }

    let mut resolution = Resolution::new(0.0, 0.0, 0.0);
    for child in &resolved {
        for a in AXES {
            let merged = if a == axis {
                resolution.length(a) + child.length(a)
            } else {
                resolution.length(a).max(child.length(a))
            };
            resolution = resolution.with_length(a, merged);
        }
    }
    if resolved.is_empty() {
        resolution = ambient;
    }

    StackLayout {
        axis,
        alignment,
        children: resolved,
        resolution,
    }
}

/// Boundary of share `i` when `total` pixels are split into `n` nearly equal parts.
fn share_bounds(i: usize, n: usize, total: u64) -> u64 {
    if n == 0 {
        return 0;
    }
    (i as u64 * total) / n as u64
}

impl StackLayout {
    /// Pixel extent of every child, in declared order.
    pub fn child_extents(&self) -> GraphResult<Vec<PixelExtent>> {
        self.children.iter().map(|r| r.to_extent()).collect()
    }

    /// Where each child lands inside the composited buffer.
    pub fn placements(&self) -> GraphResult<(PixelExtent, Vec<Region>)> {
        Ok(stack_regions(&self.child_extents()?, self.axis, self.alignment))
    }
}

/// Lay out buffers of `extents` one after another along `axis`, aligned on the cross axes.
///
/// Returns the composited extent and one region per input. This is the single source of truth
/// for stacking geometry, shared by the compositing primitives and region renders.
pub fn stack_regions(
    extents: &[PixelExtent],
    axis: Axis,
    alignment: Alignment,
) -> (PixelExtent, Vec<Region>) {
    let mut total = PixelExtent::default();
    for e in extents {
        for a in AXES {
            let merged = if a == axis {
                total.len(a) + e.len(a)
            } else {
                total.len(a).max(e.len(a))
            };
            total = total.with_len(a, merged);
        }
    }

    let mut cursor = 0i64;
    let mut regions = Vec::with_capacity(extents.len());
    for e in extents {
        let mut origin = PixelOffset::ZERO.with(axis, cursor);
        for a in AXES.into_iter().filter(|a| *a != axis) {
            origin = origin.with(a, i64::from(alignment.offset_px(total.len(a), e.len(a))));
        }
        regions.push(Region::new(origin, *e));
        cursor += i64::from(e.len(axis));
    }
    (total, regions)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/stack.rs"]
mod tests;
