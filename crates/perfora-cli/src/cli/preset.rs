//! YAML parameter presets.
//!
//! A preset pins any subset of the parameters; everything it leaves out
//! keeps its default and still goes through the solver afterwards, so a
//! preset can never produce an inconsistent set.

use std::fmt;
use std::fs;

use serde::{Deserialize, Serialize};

use perfora::{Mode, Pattern};

use super::common::ParamArgs;

/// A parameter preset as stored on disk. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preset {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub d: Option<f64>,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    /// Pinning rows or cols disables auto-grid sizing.
    #[serde(default)]
    pub rows: Option<u32>,
    #[serde(default)]
    pub cols: Option<u32>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub of: Option<f64>,
    #[serde(default)]
    pub show_grid: Option<bool>,
    #[serde(default)]
    pub wave: Option<bool>,
}

/// Error type for preset loading.
#[derive(Debug)]
pub enum PresetError {
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
    UnknownPattern(String),
    UnknownMode(String),
}

impl fmt::Display for PresetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresetError::Io(e) => write!(f, "read error: {}", e),
            PresetError::Yaml(e) => write!(f, "YAML error: {}", e),
            PresetError::UnknownPattern(name) => write!(f, "unknown pattern: {}", name),
            PresetError::UnknownMode(name) => write!(f, "unknown mode: {}", name),
        }
    }
}

impl std::error::Error for PresetError {}

/// Load a preset from a YAML file.
pub fn load_preset(path: &str) -> Result<Preset, PresetError> {
    let text = fs::read_to_string(path).map_err(PresetError::Io)?;
    serde_yaml::from_str(&text).map_err(PresetError::Yaml)
}

impl Preset {
    /// Overlay the pinned fields onto a parameter set. Non-finite numbers
    /// are dropped rather than propagated.
    pub fn apply(&self, out: &mut ParamArgs) -> Result<(), PresetError> {
        if let Some(d) = self.d.filter(|v| v.is_finite()) {
            out.params.d = d;
        }
        if let Some(x) = self.x.filter(|v| v.is_finite()) {
            out.params.x = x;
        }
        if let Some(y) = self.y.filter(|v| v.is_finite()) {
            out.params.y = y;
        }
        if let Some(of) = self.of.filter(|v| v.is_finite()) {
            out.params.of_target = of;
        }
        if let Some(rows) = self.rows {
            out.params.rows = rows.max(1);
            out.grid_locked = true;
        }
        if let Some(cols) = self.cols {
            out.params.cols = cols.max(1);
            out.grid_locked = true;
        }
        if let Some(name) = &self.pattern {
            out.params.pattern = Pattern::from_name(name)
                .ok_or_else(|| PresetError::UnknownPattern(name.clone()))?;
        }
        if let Some(name) = &self.mode {
            out.params.mode =
                Mode::from_name(name).ok_or_else(|| PresetError::UnknownMode(name.clone()))?;
        }
        if let Some(show_grid) = self.show_grid {
            out.params.show_grid = show_grid;
        }
        if let Some(wave) = self.wave {
            out.wave = wave;
        }
        Ok(())
    }
}

/// Annotated example printed by `perfora preset`.
pub const EXAMPLE_PRESET: &str = "\
# perfora parameter preset - every field is optional
name: speaker grille
d: 1.5          # hole diameter, mm
x: 4.0          # horizontal pitch, mm
y: 4.0          # nominal vertical pitch, mm
pattern: staggered
mode: of        # of | step | diameter
# of: 10.0      # OF target %, used by step/diameter modes
# rows: 8       # pinning rows/cols disables auto-grid sizing
# cols: 8
show_grid: false
wave: true
";

/// Execute the preset command: no args prints the example, a path checks
/// the file and prints the resolved parameter set.
pub fn cmd_preset(args: &[String]) {
    let Some(path) = args.first() else {
        println!("{}", EXAMPLE_PRESET);
        return;
    };

    let preset = match load_preset(path) {
        Ok(preset) => preset,
        Err(e) => {
            eprintln!("Failed to load preset {}: {}", path, e);
            std::process::exit(1);
        }
    };

    let mut flags = ParamArgs::default();
    if let Err(e) = preset.apply(&mut flags) {
        eprintln!("Bad preset {}: {}", path, e);
        std::process::exit(1);
    }

    if let Some(name) = &preset.name {
        eprintln!("Preset: {}", name);
    }
    let (params, state) = super::common::finalize(&flags);
    super::solve::print_params(&params, state, flags.wave);
}
