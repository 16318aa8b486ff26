//! Hole layout generation - centre coordinates plus optional grid lines.
//!
//! The pattern's natural footprint is centred inside the drawable box when
//! it fits; when it does not, the box wins and overflowing holes are
//! culled rather than shrunk. Partial holes at the edge are a rendering
//! artifact, not a fault, so they are dropped silently.

use crate::geometry::{effective_row_step, Hole, Line, Rect};
use crate::params::{Params, Pattern};

/// Generated preview geometry, in drawing units.
#[derive(Debug, Clone)]
pub struct Layout {
    pub holes: Vec<Hole>,
    /// Cell boundary lines; empty unless `show_grid` is on. Purely
    /// decorative and never culled.
    pub grid_lines: Vec<Line>,
    /// Content box the pattern actually occupies, centred in the rect.
    pub content: Rect,
}

/// Enumerate hole centres for the current pattern.
///
/// A hole is emitted only when its full circle lies inside the drawable
/// box on both axes. Odd rows of a staggered pattern shift right by half
/// the cell width.
pub fn generate_layout(params: &Params, rect: Rect, px_per_mm: f64) -> Layout {
    let cell_w = params.x * px_per_mm;
    let cell_h = effective_row_step(params.y, params.pattern) * px_per_mm;
    let radius = params.d / 2.0 * px_per_mm;
    let diameter = radius * 2.0;

    let span_cols = params.cols.saturating_sub(1) as f64 * cell_w;
    let span_rows = params.rows.saturating_sub(1) as f64 * cell_h;
    let content_w = (diameter + span_cols).min(rect.width);
    let content_h = (diameter + span_rows).min(rect.height);
    let content_left = rect.left + ((rect.width - content_w) / 2.0).max(0.0);
    let content_top = rect.top + ((rect.height - content_h) / 2.0).max(0.0);
    let content_right = content_left + content_w;
    let content_bottom = content_top + content_h;
    let start_cx = content_left + radius;
    let start_cy = content_top + radius;

    let mut holes = Vec::new();
    for row in 0..params.rows {
        let cy = start_cy + row as f64 * cell_h;
        let offset = if params.pattern == Pattern::Staggered && row % 2 == 1 {
            cell_w / 2.0
        } else {
            0.0
        };
        for col in 0..params.cols {
            let cx = start_cx + col as f64 * cell_w + offset;
            if cx - radius < content_left || cx + radius > content_right {
                continue;
            }
            if cy - radius < content_top || cy + radius > content_bottom {
                continue;
            }
            holes.push(Hole { cx, cy, r: radius });
        }
    }

    let mut grid_lines = Vec::new();
    if params.show_grid {
        for col in 0..=params.cols {
            let x = start_cx + col as f64 * cell_w;
            grid_lines.push(Line::new(x, content_top, x, content_bottom));
        }
        for row in 0..=params.rows {
            let y = start_cy + row as f64 * cell_h;
            grid_lines.push(Line::new(content_left, y, content_right, y));
        }
    }

    Layout {
        holes,
        grid_lines,
        content: Rect::new(content_left, content_top, content_w, content_h),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Mode;

    fn preview() -> Rect {
        Rect::new(0.0, 0.0, 500.0, 500.0)
    }

    fn base_params() -> Params {
        Params {
            d: 0.5,
            x: 5.0,
            y: 5.0,
            rows: 10,
            cols: 10,
            show_grid: false,
            pattern: Pattern::Grid,
            mode: Mode::Of,
            of_target: 10.0,
        }
    }

    #[test]
    fn grid_emits_full_count_when_it_fits() {
        let layout = generate_layout(&base_params(), preview(), 10.0);
        assert_eq!(layout.holes.len(), 100);
        // Footprint: 5 + 9*50 = 455 px, centred in 500 px.
        assert_eq!(layout.content.left, 22.5);
        assert_eq!(layout.content.width, 455.0);
        let first = layout.holes[0];
        assert_eq!((first.cx, first.cy, first.r), (25.0, 25.0, 2.5));
    }

    #[test]
    fn staggered_offsets_odd_rows() {
        let params = Params {
            pattern: Pattern::Staggered,
            rows: 2,
            ..base_params()
        };
        let layout = generate_layout(&params, preview(), 10.0);
        // Row 0 keeps all 10 holes; row 1 shifts right by 25 px and its
        // last hole crosses the content edge, so it is culled.
        assert_eq!(layout.holes.len(), 19);
        let row0 = &layout.holes[0];
        let row1 = &layout.holes[10];
        assert_eq!(row1.cx - row0.cx, 25.0);
        // Staggered rows pack at half the nominal pitch: 2.5 mm = 25 px.
        assert_eq!(row1.cy - row0.cy, 25.0);
    }

    #[test]
    fn every_emitted_hole_lies_inside_content() {
        let params = Params {
            rows: 40,
            cols: 40,
            ..base_params()
        };
        let layout = generate_layout(&params, preview(), 10.0);
        assert!(layout.holes.len() < 40 * 40);
        for hole in &layout.holes {
            assert!(hole.cx - hole.r >= layout.content.left);
            assert!(hole.cx + hole.r <= layout.content.right());
            assert!(hole.cy - hole.r >= layout.content.top);
            assert!(hole.cy + hole.r <= layout.content.bottom());
        }
    }

    #[test]
    fn oversize_pattern_is_bounded_to_box() {
        let params = Params {
            rows: 40,
            cols: 40,
            ..base_params()
        };
        let layout = generate_layout(&params, preview(), 10.0);
        assert_eq!(layout.content.width, 500.0);
        assert_eq!(layout.content.left, 0.0);
    }

    #[test]
    fn grid_lines_follow_counts() {
        let params = Params {
            show_grid: true,
            ..base_params()
        };
        let layout = generate_layout(&params, preview(), 10.0);
        assert_eq!(layout.grid_lines.len(), (10 + 1) + (10 + 1));
        // Vertical lines span the content height.
        let vertical = layout.grid_lines[0];
        assert_eq!(vertical.y1, layout.content.top);
        assert_eq!(vertical.y2, layout.content.bottom());
    }

    #[test]
    fn grid_lines_off_by_default() {
        let layout = generate_layout(&base_params(), preview(), 10.0);
        assert!(layout.grid_lines.is_empty());
    }

    #[test]
    fn single_hole_centres_in_box() {
        let params = Params {
            rows: 1,
            cols: 1,
            ..base_params()
        };
        let layout = generate_layout(&params, preview(), 10.0);
        assert_eq!(layout.holes.len(), 1);
        let hole = layout.holes[0];
        assert_eq!((hole.cx, hole.cy), (250.0, 250.0));
    }
}
