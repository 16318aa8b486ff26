//! # perfora
//!
//! Core engine for perforated panel hole patterns.
//!
//! A perforated panel is described by three interdependent quantities:
//! hole diameter `d`, hole pitch `x`/`y`, and the open-area fraction (OF) -
//! the share of each cell's area taken up by its hole. Pick a calculation
//! mode and the [`solver`] keeps the dependent quantity consistent while
//! you edit the others; the [`layout`] module places the holes, [`wave`]
//! draws the decorative frame, and [`scene`] assembles it all into one
//! drawable description.
//!
//! The crate is pure geometry and state: no I/O, no rendering backend.
//! Consumers take a [`Scene`] and draw it however they like (the bundled
//! CLI turns it into SVG, PNG and a live terminal preview).

pub mod autogrid;
pub mod geometry;
pub mod layout;
pub mod params;
pub mod scene;
pub mod share;
pub mod solver;
pub mod svg;
pub mod wave;

// Re-export common types at crate root for convenience.
pub use autogrid::{auto_count, auto_grid};
pub use geometry::{
    cell_area, collision, effective_row_step, hole_area, open_area_fraction, Hole, Line, OpenArea,
    Point, Rect,
};
pub use layout::{generate_layout, Layout};
pub use params::{
    Bounds, Field, Mode, Params, Pattern, SliderRange, SolverState, PREVIEW_SIZE_MM, PX_PER_MM,
};
pub use scene::{build_scene, summarize, Frame, Scene, SceneOptions, Summary};
pub use share::{decode_share, encode_share, SharedParams};
pub use solver::{apply_change, solve};
pub use svg::{export_svg, preview_svg};
pub use wave::{
    flatten_commands, serialize_commands, wave_amplitude, wave_cycles, wave_frame,
    wave_frame_commands, Axis, PathCommand, WaveFrame,
};
