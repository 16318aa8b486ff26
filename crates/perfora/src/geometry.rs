//! Geometry math for hole patterns.
//!
//! Pure functions over millimetre quantities plus the small primitive
//! types the rest of the crate shares. Nothing here holds state.
//!
//! ## Rust Lesson #2: Structs & Derives
//!
//! In JS a point is `{ x: 1.0, y: 2.0 }`. Here we declare the shape once
//! with explicit types, and `#[derive(...)]` generates printing (`Debug`),
//! duplication (`Clone`/`Copy`) and comparison (`PartialEq`) for free.

use std::f64::consts::PI;

use crate::params::Pattern;

/// A 2D point in drawing units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A straight line segment (the preview's cell boundary lines).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Line {
    #[inline]
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Length of the line segment.
    #[inline]
    pub fn length(&self) -> f64 {
        let dx = self.x2 - self.x1;
        let dy = self.y2 - self.y1;
        (dx * dx + dy * dy).sqrt()
    }
}

/// An axis-aligned box, used for the drawable preview area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[inline]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// A box that cannot be drawn into: non-finite or non-positive extent.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !self.width.is_finite() || !self.height.is_finite() || self.width <= 0.0 || self.height <= 0.0
    }
}

/// A hole to punch: centre plus radius, in drawing units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hole {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
}

/// Open-area result as both a 0..1 fraction and a percentage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpenArea {
    pub decimal: f64,
    pub percent: f64,
}

/// Area of a single hole of diameter `d`.
#[inline]
pub fn hole_area(d: f64) -> f64 {
    PI * (d / 2.0).powi(2)
}

/// Area of one pattern cell. Returns 0 when either pitch is non-finite.
pub fn cell_area(x: f64, y: f64, pattern: Pattern) -> f64 {
    if !x.is_finite() || !y.is_finite() {
        return 0.0;
    }
    x * y * pattern.area_factor()
}

/// Vertical distance between consecutive rows.
///
/// Staggered rows pack at half the nominal pitch. Floored at zero, so a
/// negative or non-finite pitch can never produce a negative step.
pub fn effective_row_step(y: f64, pattern: Pattern) -> f64 {
    let step = match pattern {
        Pattern::Staggered => y / 2.0,
        Pattern::Grid => y,
    };
    step.max(0.0)
}

/// Open-area fraction of the pattern.
///
/// The ratio is capped at 1 so pathological inputs (a hole larger than its
/// cell) read as 100% instead of a nonsense figure above it.
pub fn open_area_fraction(d: f64, x: f64, y: f64, pattern: Pattern) -> OpenArea {
    let cell = cell_area(x, y, pattern);
    let hole = hole_area(d);
    let raw = if cell > 0.0 { hole / cell } else { 0.0 };
    let decimal = raw.min(1.0);
    OpenArea {
        decimal,
        percent: decimal * 100.0,
    }
}

/// Overlap advisory: true when neighbouring holes touch or cross.
///
/// Heuristic threshold - for staggered layouts the true nearest-neighbour
/// distance also depends on the diagonal spacing, which this ignores.
pub fn collision(d: f64, x: f64, y: f64, pattern: Pattern) -> bool {
    d >= x.min(effective_row_step(y, pattern))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn line_length() {
        let line = Line::new(0.0, 0.0, 3.0, 4.0);
        assert_eq!(line.length(), 5.0); // 3-4-5 triangle
    }

    #[test]
    fn rect_edges() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.right(), 110.0);
        assert_eq!(rect.bottom(), 70.0);
        assert!(!rect.is_degenerate());
        assert!(Rect::new(0.0, 0.0, 0.0, 50.0).is_degenerate());
        assert!(Rect::new(0.0, 0.0, f64::NAN, 50.0).is_degenerate());
    }

    #[test]
    fn grid_cell_open_area() {
        // d=0.5, x=y=5, grid: hole 0.19635 mm2, cell 25 mm2, OF 0.7854%
        assert!(close(hole_area(0.5), 0.19635));
        assert!(close(cell_area(5.0, 5.0, Pattern::Grid), 25.0));
        let of = open_area_fraction(0.5, 5.0, 5.0, Pattern::Grid);
        assert!(close(of.percent, 0.7854));
    }

    #[test]
    fn staggered_cell_open_area() {
        // Same hole on a staggered layout: cell 12.5 mm2, OF 1.5708%
        assert!(close(cell_area(5.0, 5.0, Pattern::Staggered), 12.5));
        let of = open_area_fraction(0.5, 5.0, 5.0, Pattern::Staggered);
        assert!(close(of.percent, 1.5708));
    }

    #[test]
    fn staggered_halves_row_step() {
        for y in [0.0, 0.5, 5.0, 20.0] {
            assert_eq!(effective_row_step(y, Pattern::Staggered), y / 2.0);
            assert_eq!(effective_row_step(y, Pattern::Grid), y);
        }
    }

    #[test]
    fn row_step_floors_at_zero() {
        assert_eq!(effective_row_step(-3.0, Pattern::Grid), 0.0);
        assert_eq!(effective_row_step(f64::NAN, Pattern::Staggered), 0.0);
    }

    #[test]
    fn open_area_caps_at_one() {
        // Hole far bigger than its cell still reads as 100%.
        let of = open_area_fraction(50.0, 2.0, 2.0, Pattern::Grid);
        assert_eq!(of.decimal, 1.0);
        assert_eq!(of.percent, 100.0);
    }

    #[test]
    fn degenerate_cell_reads_zero() {
        let of = open_area_fraction(1.0, f64::NAN, 5.0, Pattern::Grid);
        assert_eq!(of.decimal, 0.0);
        let of = open_area_fraction(1.0, 0.0, 5.0, Pattern::Grid);
        assert_eq!(of.decimal, 0.0);
    }

    #[test]
    fn collision_threshold() {
        assert!(!collision(0.5, 5.0, 5.0, Pattern::Grid));
        assert!(collision(5.0, 5.0, 5.0, Pattern::Grid));
        // Staggered compares against the halved row step.
        assert!(collision(2.5, 5.0, 5.0, Pattern::Staggered));
        assert!(!collision(2.4, 5.0, 5.0, Pattern::Staggered));
    }
}
