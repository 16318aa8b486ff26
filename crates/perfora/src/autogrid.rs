//! Auto-grid sizing - how many rows and columns fill the preview.

use crate::geometry::effective_row_step;
use crate::params::Params;

/// Number of hole centres that fit along one axis of the preview span.
///
/// One centre sits at the span's start; the rest pack at `step_mm`
/// intervals while the last hole's far edge stays inside the span.
/// Degenerate steps collapse to a single hole rather than erroring.
pub fn auto_count(step_mm: f64, diameter_mm: f64, span_mm: f64) -> u32 {
    if !step_mm.is_finite() || step_mm <= 0.0 {
        return 1;
    }
    let diameter = if diameter_mm.is_finite() && diameter_mm > 0.0 {
        diameter_mm
    } else {
        0.0
    };
    let usable = (span_mm - diameter).max(0.0);
    let steps = (usable / step_mm).floor() as u32;
    steps + 1
}

/// Row and column counts that fill the preview at the current pitch.
///
/// Columns follow the horizontal pitch; rows follow the effective row
/// step, so staggered patterns get twice the rows of a plain grid.
pub fn auto_grid(params: &Params, span_mm: f64) -> (u32, u32) {
    let cols = auto_count(params.x, params.d, span_mm);
    let rows = auto_count(
        effective_row_step(params.y, params.pattern),
        params.d,
        span_mm,
    );
    (rows, cols)
}
