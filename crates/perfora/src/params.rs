//! Parameter record, calculation modes and slider bounds.
//!
//! ## Rust Lesson #1: Enums as closed sets
//!
//! In JS these would be string constants (`'grid'`, `'staggered'`) compared
//! ad hoc at every use site. A Rust `enum` makes the set closed: `match`
//! forces every variant to be handled, so adding a mode can't leave half
//! the code silently ignoring it.

/// Preview area edge length in millimetres.
pub const PREVIEW_SIZE_MM: f64 = 50.0;

/// Linear scale used by the preview renderer.
pub const PX_PER_MM: f64 = 10.0;

/// Hole layout pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Holes on a rectangular grid.
    Grid,
    /// Alternate rows offset by half the horizontal pitch, rows packed at
    /// half the nominal vertical pitch.
    Staggered,
}

impl Pattern {
    /// Get all available patterns.
    pub fn all() -> &'static [Pattern] {
        &[Pattern::Grid, Pattern::Staggered]
    }

    /// Get pattern name as string.
    pub fn name(&self) -> &'static str {
        match self {
            Pattern::Grid => "grid",
            Pattern::Staggered => "staggered",
        }
    }

    /// Parse pattern from string.
    pub fn from_name(name: &str) -> Option<Pattern> {
        match name.to_lowercase().as_str() {
            "grid" => Some(Pattern::Grid),
            "staggered" => Some(Pattern::Staggered),
            _ => None,
        }
    }

    /// Effective cell-area factor.
    ///
    /// Staggered rows pack at half the nominal row pitch, so each hole's
    /// surrounding cell has half the area of the plain grid cell.
    pub fn area_factor(&self) -> f64 {
        match self {
            Pattern::Grid => 1.0,
            Pattern::Staggered => 0.5,
        }
    }
}

/// Which quantity the solver derives from the other two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Open-area fraction follows diameter and pitch (read-only readout).
    Of,
    /// Pitch follows diameter and the OF target, mirrored so `x == y`.
    Step,
    /// Diameter follows pitch and the OF target.
    Diameter,
}

impl Mode {
    /// Get all available modes.
    pub fn all() -> &'static [Mode] {
        &[Mode::Of, Mode::Step, Mode::Diameter]
    }

    /// Get mode name as string.
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Of => "of",
            Mode::Step => "step",
            Mode::Diameter => "diameter",
        }
    }

    /// Parse mode from string.
    pub fn from_name(name: &str) -> Option<Mode> {
        match name.to_lowercase().as_str() {
            "of" => Some(Mode::Of),
            "step" => Some(Mode::Step),
            "diameter" => Some(Mode::Diameter),
            _ => None,
        }
    }

    /// One-line help for the UI, depending on whether the pitch is
    /// currently solver-owned.
    pub fn help(&self, step_auto: bool) -> &'static str {
        match self {
            Mode::Of => "Computes OF from diameter and pitch.",
            Mode::Step if step_auto => {
                "Computes pitch (x = y) from diameter and OF. Edit x or y to take over manually."
            }
            Mode::Step => "Pitch set manually; change d or OF to recompute automatically.",
            Mode::Diameter => "Computes hole diameter from OF and the x/y pitch.",
        }
    }
}

/// A field the user can touch; passed to the solver as the change hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Mode,
    OfTarget,
    D,
    X,
    Y,
    Pattern,
    Grid,
}

/// The one mutable parameter record.
///
/// Replaced wholesale on every recompute - the solver takes it by reference
/// and returns a fresh copy, so there is never a half-updated set in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Params {
    /// Hole diameter in mm.
    pub d: f64,
    /// Horizontal pitch (centre to centre) in mm.
    pub x: f64,
    /// Nominal vertical pitch in mm.
    pub y: f64,
    /// Row count; derived unless pinned.
    pub rows: u32,
    /// Column count; derived unless pinned.
    pub cols: u32,
    /// Draw cell boundary lines in the preview.
    pub show_grid: bool,
    pub pattern: Pattern,
    pub mode: Mode,
    /// Open-area target in percent, 0..=100.
    pub of_target: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            d: 0.5,
            x: 5.0,
            y: 5.0,
            rows: 12,
            cols: 12,
            show_grid: false,
            pattern: Pattern::Staggered,
            mode: Mode::Of,
            of_target: 10.0,
        }
    }
}

/// Auxiliary solver flags, kept apart from [`Params`] because they are
/// derived bookkeeping rather than user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverState {
    /// Whether the pitch is currently solver-owned (vs pinned by the user).
    pub step_auto: bool,
    /// Whether row/column counts are pinned (e.g. restored from a share
    /// string) instead of auto-computed.
    pub grid_locked: bool,
}

impl Default for SolverState {
    fn default() -> Self {
        Self {
            step_auto: true,
            grid_locked: false,
        }
    }
}

/// Inclusive numeric range for one slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
}

impl SliderRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp `value` into the range; non-finite input falls back to
    /// `fallback` (never propagates NaN).
    pub fn clamp(&self, value: f64, fallback: f64) -> f64 {
        if !value.is_finite() {
            return fallback;
        }
        value.max(self.min).min(self.max)
    }
}

/// Slider metadata for every numeric field, supplied by the embedding UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub of_target: SliderRange,
    pub d: SliderRange,
    pub x: SliderRange,
    pub y: SliderRange,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            of_target: SliderRange::new(0.0, 100.0),
            d: SliderRange::new(0.1, 10.0),
            x: SliderRange::new(0.5, 20.0),
            y: SliderRange::new(0.5, 20.0),
        }
    }
}

impl Bounds {
    /// Clamp one numeric field, falling back to its default when the input
    /// is not a finite number. Non-numeric fields pass through untouched.
    pub fn clamp_field(&self, field: Field, value: f64) -> f64 {
        let defaults = Params::default();
        match field {
            Field::OfTarget => self.of_target.clamp(value, defaults.of_target),
            Field::D => self.d.clamp(value, defaults.d),
            Field::X => self.x.clamp(value, defaults.x),
            Field::Y => self.y.clamp(value, defaults.y),
            _ => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_names_round_trip() {
        for pattern in Pattern::all() {
            assert_eq!(Pattern::from_name(pattern.name()), Some(*pattern));
        }
        assert_eq!(Pattern::from_name("STAGGERED"), Some(Pattern::Staggered));
        assert_eq!(Pattern::from_name("hexagon"), None);
    }

    #[test]
    fn mode_names_round_trip() {
        for mode in Mode::all() {
            assert_eq!(Mode::from_name(mode.name()), Some(*mode));
        }
        assert_eq!(Mode::from_name("bogus"), None);
    }

    #[test]
    fn area_factor_values() {
        assert_eq!(Pattern::Grid.area_factor(), 1.0);
        assert_eq!(Pattern::Staggered.area_factor(), 0.5);
    }

    #[test]
    fn slider_clamp_in_range() {
        let range = SliderRange::new(0.5, 20.0);
        assert_eq!(range.clamp(5.0, 1.0), 5.0);
        assert_eq!(range.clamp(0.1, 1.0), 0.5);
        assert_eq!(range.clamp(99.0, 1.0), 20.0);
    }

    #[test]
    fn slider_clamp_rejects_non_finite() {
        let range = SliderRange::new(0.5, 20.0);
        assert_eq!(range.clamp(f64::NAN, 5.0), 5.0);
        assert_eq!(range.clamp(f64::INFINITY, 5.0), 5.0);
        assert_eq!(range.clamp(f64::NEG_INFINITY, 5.0), 5.0);
    }

    #[test]
    fn defaults_are_within_bounds() {
        let bounds = Bounds::default();
        let params = Params::default();
        assert_eq!(bounds.clamp_field(Field::D, params.d), params.d);
        assert_eq!(bounds.clamp_field(Field::X, params.x), params.x);
        assert_eq!(bounds.clamp_field(Field::Y, params.y), params.y);
        assert_eq!(
            bounds.clamp_field(Field::OfTarget, params.of_target),
            params.of_target
        );
    }
}
