//! Scene assembly - the render coordinator.
//!
//! Pulls the solved parameters, the layout generator and the wave border
//! together into one drawable description. Rendering backends (SVG
//! documents, raster export, the TUI preview) consume a [`Scene`] and
//! nothing else, so all of them agree on the geometry by construction.

use crate::geometry::{
    cell_area, collision, effective_row_step, hole_area, open_area_fraction, OpenArea, Rect,
};
use crate::layout::{generate_layout, Layout};
use crate::params::{Params, PREVIEW_SIZE_MM, PX_PER_MM};
use crate::wave::{wave_amplitude, wave_cycles, wave_frame, WaveFrame};

/// Knobs supplied by the embedding UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneOptions {
    /// Preview area edge length in millimetres.
    pub span_mm: f64,
    /// Linear unit-to-pixel scale.
    pub px_per_mm: f64,
    /// Decorative wave border on/off.
    pub wave: bool,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            span_mm: PREVIEW_SIZE_MM,
            px_per_mm: PX_PER_MM,
            wave: true,
        }
    }
}

/// Border drawn around the preview.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// Plain rectangle: wave off, or wave synthesis degenerate.
    Rect(Rect),
    Wave(WaveFrame),
}

/// Derived readouts for the info panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub of: OpenArea,
    pub hole_area_mm2: f64,
    pub cell_area_mm2: f64,
    /// Diameter over horizontal pitch.
    pub ratio_dx: f64,
    /// Diameter over nominal vertical pitch.
    pub ratio_dy: f64,
    /// Estimated pattern coverage along x, in mm.
    pub coverage_w_mm: f64,
    /// Estimated pattern coverage along y, in mm.
    pub coverage_h_mm: f64,
    /// Non-blocking advisory: holes touch or overlap their neighbours.
    pub collision: bool,
}

/// One drawable scene.
#[derive(Debug, Clone)]
pub struct Scene {
    pub width_px: f64,
    pub height_px: f64,
    /// Full drawable box, origin at (0, 0).
    pub viewport: Rect,
    pub frame: Frame,
    pub layout: Layout,
    pub summary: Summary,
}

impl Scene {
    /// Number of holes that survived culling.
    pub fn holes_drawn(&self) -> usize {
        self.layout.holes.len()
    }

    /// The wave frame, when one is active.
    pub fn wave(&self) -> Option<&WaveFrame> {
        match &self.frame {
            Frame::Wave(frame) => Some(frame),
            Frame::Rect(_) => None,
        }
    }
}

/// Compute the info-panel readouts for a parameter set.
pub fn summarize(params: &Params) -> Summary {
    let row_step = effective_row_step(params.y, params.pattern);
    let cols_span = params.cols.saturating_sub(1) as f64;
    let rows_span = params.rows.saturating_sub(1) as f64;
    Summary {
        of: open_area_fraction(params.d, params.x, params.y, params.pattern),
        hole_area_mm2: hole_area(params.d),
        cell_area_mm2: cell_area(params.x, params.y, params.pattern),
        ratio_dx: params.d / params.x,
        ratio_dy: params.d / params.y,
        coverage_w_mm: (cols_span * params.x + params.d).max(0.0),
        coverage_h_mm: (rows_span * row_step + params.d).max(0.0),
        collision: collision(params.d, params.x, params.y, params.pattern),
    }
}

/// Assemble the drawable scene for the current parameters.
pub fn build_scene(params: &Params, options: SceneOptions) -> Scene {
    let width_px = options.span_mm * options.px_per_mm;
    let height_px = width_px;
    let viewport = Rect::new(0.0, 0.0, width_px, height_px);
    let layout = generate_layout(params, viewport, options.px_per_mm);

    let frame = if options.wave {
        let hole_radius_px = params.d / 2.0 * options.px_per_mm;
        let amplitude = wave_amplitude(hole_radius_px, viewport.width);
        let cycles = wave_cycles(viewport.height);
        match wave_frame(viewport, amplitude, cycles) {
            Some(frame) => Frame::Wave(frame),
            None => Frame::Rect(viewport),
        }
    } else {
        Frame::Rect(viewport)
    };

    Scene {
        width_px,
        height_px,
        viewport,
        frame,
        layout,
        summary: summarize(params),
    }
}
