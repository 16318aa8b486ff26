//! CLI command implementations.
//!
//! This module contains the implementations for the CLI subcommands:
//! - `render` - emit the pattern scene as SVG, JSON or PNG
//! - `solve` - run the solver once and print the consistent set
//! - `share` - encode/decode shareable parameter strings
//! - `preset` - YAML parameter presets

pub mod common;
pub mod preset;
pub mod render;
pub mod share;
pub mod solve;

pub use preset::cmd_preset;
pub use render::cmd_render;
pub use share::cmd_share;
pub use solve::cmd_solve;
