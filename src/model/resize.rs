//! Resizing adjacent groups by dragging the splitter between them
//!
//! Only the two groups touching the boundary change; their combined width
//! stays fixed, so every other group (the last one included) keeps its share.

use super::layout::{Layout, LayoutError, Width};

/// A splitter drag in progress
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeDrag {
    /// Boundary between group `boundary` and `boundary + 1`
    pub boundary: usize,
    /// Pointer x at the last applied delta
    pub last_x: f32,
}

/// Widths after moving a boundary by `delta_px` in a workspace `total_px` wide.
///
/// Each side is clamped to its group's aggregate minimum width.
pub fn resized_widths(
    layout: &Layout,
    boundary: usize,
    delta_px: f32,
    total_px: f32,
) -> Result<Vec<Width>, LayoutError> {
    let count = layout.group_count();
    if boundary + 1 >= count {
        return Err(LayoutError::BoundaryOutOfRange {
            index: boundary,
            count,
        });
    }

    let (left, right) = (boundary, boundary + 1);
    let widths = layout.widths();
    let left_px = widths[left].fraction() * total_px;
    let right_px = widths[right].fraction() * total_px;
    let pair_px = left_px + right_px;

    let min_left = layout.groups()[left].min_width();
    let min_right = layout.groups()[right].min_width();
    if min_left + min_right > pair_px {
        return Err(LayoutError::TooNarrow {
            required: min_left + min_right,
            available: pair_px,
        });
    }

    let new_left_px = (left_px + delta_px).clamp(min_left, pair_px - min_right);

    let pair_bp = widths[left].basis_points() + widths[right].basis_points();
    let new_left_bp = ((new_left_px / pair_px) * pair_bp as f32).round() as u32;
    let new_left_bp = new_left_bp.min(pair_bp);

    let mut result = widths.to_vec();
    result[left] = Width::from_basis_points(new_left_bp);
    result[right] = Width::from_basis_points(pair_bp - new_left_bp);
    Ok(result)
}

/// Move a boundary and store the result
pub fn resize_boundary(
    layout: &mut Layout,
    boundary: usize,
    delta_px: f32,
    total_px: f32,
) -> Result<(), LayoutError> {
    let widths = resized_widths(layout, boundary, delta_px, total_px)?;
    layout.set_widths(widths)
}
