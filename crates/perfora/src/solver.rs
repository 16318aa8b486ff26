//! Mode solver - keeps diameter, pitch and open-area fraction consistent.
//!
//! The three calculation modes form a closed set, so the solver is a
//! dispatch over the mode tag with one pure function per variant. Each
//! function rewrites exactly the field(s) its mode owns and nothing else.
//!
//! ## Rust Lesson #3: Pure reducers
//!
//! The JS habit is to mutate one shared `state.params` object from a dozen
//! event handlers and hope the order works out. Here [`solve`] takes the
//! old record by reference and returns a new one: `(state, event) ->
//! state'`. There is no moment where a caller can observe `x` updated but
//! `y` not yet mirrored.

use std::f64::consts::PI;

use crate::autogrid::auto_grid;
use crate::geometry::{cell_area, hole_area, open_area_fraction};
use crate::params::{Bounds, Field, Mode, Params, SolverState};

/// Recompute the dependent field(s) for the active mode.
///
/// `changed` names the field the user touched, if any; `None` means an
/// initial load or a bulk import. The returned set is fully consistent:
/// every numeric field within bounds, never NaN, and `x == y` whenever the
/// pitch is solver-owned. Degenerate inputs (zero area, zero target) skip
/// the derivation and leave the previous value in place.
pub fn solve(
    params: &Params,
    state: SolverState,
    changed: Option<Field>,
    bounds: &Bounds,
) -> (Params, SolverState) {
    let mut next = *params;
    let mut state = state;
    match next.mode {
        Mode::Of => solve_of(&mut next, &mut state, bounds),
        Mode::Step => solve_step(&mut next, &mut state, changed, bounds),
        Mode::Diameter => solve_diameter(&mut next, &mut state, bounds),
    }
    (next, state)
}

/// Full recompute for one user edit.
///
/// Sanitizes the numeric fields, releases a pinned grid when an explicit
/// change arrives, runs the mode solver, then re-derives row/column counts
/// unless they are pinned. This is the whole
/// field change -> solver -> auto-grid pipeline in one call.
pub fn apply_change(
    params: &Params,
    state: SolverState,
    changed: Option<Field>,
    bounds: &Bounds,
    span_mm: f64,
) -> (Params, SolverState) {
    let mut input = *params;
    input.of_target = bounds.clamp_field(Field::OfTarget, input.of_target);
    input.d = bounds.clamp_field(Field::D, input.d);
    input.x = bounds.clamp_field(Field::X, input.x);
    input.y = bounds.clamp_field(Field::Y, input.y);

    let mut state = state;
    if state.grid_locked && changed.is_some() {
        state.grid_locked = false;
    }

    let (mut next, state) = solve(&input, state, changed, bounds);
    if !state.grid_locked {
        let (rows, cols) = auto_grid(&next, span_mm);
        next.rows = rows;
        next.cols = cols;
    }
    (next, state)
}

/// Mode `of`: the OF readout always follows diameter and pitch.
fn solve_of(params: &mut Params, state: &mut SolverState, bounds: &Bounds) {
    state.step_auto = true;
    let of = open_area_fraction(params.d, params.x, params.y, params.pattern);
    params.of_target = bounds.clamp_field(Field::OfTarget, of.percent);
}

/// Mode `step`: pitch follows diameter and the OF target unless the user
/// has pinned it by editing an axis directly.
fn solve_step(
    params: &mut Params,
    state: &mut SolverState,
    changed: Option<Field>,
    bounds: &Bounds,
) {
    match changed {
        Some(Field::Mode) | Some(Field::D) | Some(Field::OfTarget) | None => {
            state.step_auto = true;
        }
        Some(Field::X) => {
            state.step_auto = false;
            let manual = bounds.clamp_field(Field::X, params.x);
            mirror_step(params, manual, Field::X, bounds);
            return;
        }
        Some(Field::Y) => {
            state.step_auto = false;
            let manual = bounds.clamp_field(Field::Y, params.y);
            mirror_step(params, manual, Field::Y, bounds);
            return;
        }
        _ => {}
    }

    if state.step_auto {
        let of_decimal = if params.of_target > 0.0 {
            params.of_target / 100.0
        } else {
            0.0
        };
        let hole = hole_area(params.d);
        let factor = params.pattern.area_factor();
        if of_decimal > 0.0 && hole > 0.0 && factor > 0.0 {
            let desired = (hole / (of_decimal * factor)).sqrt();
            let clamped = bounds.clamp_field(Field::X, desired);
            mirror_step(params, clamped, Field::X, bounds);
        }
    } else {
        // Pitch stays pinned; just re-assert the mirror.
        let keep = params.x;
        mirror_step(params, keep, Field::X, bounds);
    }
}

/// Mode `diameter`: the hole diameter follows pitch and the OF target.
fn solve_diameter(params: &mut Params, state: &mut SolverState, bounds: &Bounds) {
    state.step_auto = true;
    let of_decimal = if params.of_target > 0.0 {
        params.of_target / 100.0
    } else {
        0.0
    };
    let cell = cell_area(params.x, params.y, params.pattern);
    if of_decimal > 0.0 && cell > 0.0 {
        let desired = (4.0 * cell * of_decimal / PI).sqrt();
        params.d = bounds.clamp_field(Field::D, desired);
    }
}

/// Mirror one pitch value onto both axes. Square pitch is enforced by
/// design: whichever axis is authoritative, the other follows it.
fn mirror_step(params: &mut Params, value: f64, base: Field, bounds: &Bounds) {
    match base {
        Field::Y => {
            params.y = bounds.clamp_field(Field::Y, value);
            params.x = bounds.clamp_field(Field::X, params.y);
        }
        _ => {
            params.x = bounds.clamp_field(Field::X, value);
            params.y = bounds.clamp_field(Field::Y, params.x);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{Pattern, PREVIEW_SIZE_MM};

    fn bounds() -> Bounds {
        Bounds::default()
    }

    fn rel_close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-6 * b.abs().max(1e-12)
    }

    #[test]
    fn of_mode_tracks_computed_percent() {
        let params = Params {
            d: 0.5,
            x: 5.0,
            y: 5.0,
            pattern: Pattern::Grid,
            mode: Mode::Of,
            of_target: 42.0,
            ..Params::default()
        };
        let (next, state) = solve(&params, SolverState::default(), Some(Field::D), &bounds());
        assert!((next.of_target - 0.7854).abs() < 1e-4);
        assert!(state.step_auto);
    }

    #[test]
    fn diameter_mode_concrete_value() {
        // x=y=5 grid, OF target 10% -> d = sqrt(4*25*0.10/pi) ~= 1.784 mm
        let params = Params {
            x: 5.0,
            y: 5.0,
            pattern: Pattern::Grid,
            mode: Mode::Diameter,
            of_target: 10.0,
            ..Params::default()
        };
        let (next, _) = solve(&params, SolverState::default(), None, &bounds());
        assert!((next.d - 1.7841).abs() < 1e-3);
    }

    #[test]
    fn of_diameter_round_trip() {
        for (d, x, y, pattern) in [
            (0.5, 5.0, 5.0, Pattern::Grid),
            (1.25, 4.0, 6.0, Pattern::Staggered),
            (2.0, 8.0, 8.0, Pattern::Grid),
            (0.8, 3.0, 3.0, Pattern::Staggered),
        ] {
            let percent = open_area_fraction(d, x, y, pattern).percent;
            let params = Params {
                d: 9.0, // deliberately wrong; the solver must recover d
                x,
                y,
                pattern,
                mode: Mode::Diameter,
                of_target: percent,
                ..Params::default()
            };
            let (next, _) = solve(&params, SolverState::default(), None, &bounds());
            assert!(
                rel_close(next.d, d),
                "expected d {} got {} for pattern {:?}",
                d,
                next.d,
                pattern
            );
        }
    }

    #[test]
    fn of_step_round_trip() {
        for (d, target, pattern) in [
            (1.0, 15.0, Pattern::Grid),
            (0.5, 2.0, Pattern::Staggered),
            (2.0, 40.0, Pattern::Grid),
        ] {
            let params = Params {
                d,
                pattern,
                mode: Mode::Step,
                of_target: target,
                ..Params::default()
            };
            let (next, state) = solve(&params, SolverState::default(), None, &bounds());
            assert!(state.step_auto);
            assert_eq!(next.x, next.y);
            let solved = open_area_fraction(d, next.x, next.y, next.pattern).percent;
            assert!(
                (solved - target).abs() < 1e-6,
                "target {} came back as {}",
                target,
                solved
            );
        }
    }

    #[test]
    fn manual_pitch_edit_mirrors_axes() {
        let params = Params {
            mode: Mode::Step,
            x: 5.0,
            y: 7.5,
            ..Params::default()
        };
        let (next, state) = solve(&params, SolverState::default(), Some(Field::Y), &bounds());
        assert!(!state.step_auto);
        assert_eq!(next.x, 7.5);
        assert_eq!(next.y, 7.5);
    }

    #[test]
    fn pitch_always_mirrored_in_step_mode() {
        let hints = [
            None,
            Some(Field::Mode),
            Some(Field::D),
            Some(Field::OfTarget),
            Some(Field::X),
            Some(Field::Y),
            Some(Field::Pattern),
            Some(Field::Grid),
        ];
        let mut params = Params {
            mode: Mode::Step,
            x: 3.0,
            y: 9.0,
            ..Params::default()
        };
        let mut state = SolverState::default();
        for hint in hints {
            let (next, next_state) = solve(&params, state, hint, &bounds());
            assert_eq!(next.x, next.y, "hint {:?} broke the mirror", hint);
            params = next;
            state = next_state;
        }
    }

    #[test]
    fn degenerate_target_leaves_pitch_alone() {
        let params = Params {
            mode: Mode::Step,
            of_target: 0.0,
            x: 4.0,
            y: 4.0,
            ..Params::default()
        };
        let (next, _) = solve(&params, SolverState::default(), None, &bounds());
        assert_eq!(next.x, 4.0);
        assert_eq!(next.y, 4.0);
    }

    #[test]
    fn degenerate_target_leaves_diameter_alone() {
        let params = Params {
            mode: Mode::Diameter,
            of_target: 0.0,
            d: 1.5,
            ..Params::default()
        };
        let (next, _) = solve(&params, SolverState::default(), None, &bounds());
        assert_eq!(next.d, 1.5);
    }

    #[test]
    fn solved_step_is_clamped_to_bounds() {
        // A huge hole with a tiny OF target wants an enormous pitch.
        let params = Params {
            mode: Mode::Step,
            d: 10.0,
            of_target: 0.1,
            ..Params::default()
        };
        let (next, _) = solve(&params, SolverState::default(), None, &bounds());
        assert_eq!(next.x, bounds().x.max);
        assert_eq!(next.y, next.x);
    }

    #[test]
    fn apply_change_releases_pinned_grid() {
        let params = Params {
            rows: 3,
            cols: 4,
            pattern: Pattern::Grid,
            ..Params::default()
        };
        let locked = SolverState {
            step_auto: true,
            grid_locked: true,
        };

        // No change hint: the pin survives and counts stay put.
        let (kept, state) = apply_change(&params, locked, None, &bounds(), PREVIEW_SIZE_MM);
        assert!(state.grid_locked);
        assert_eq!((kept.rows, kept.cols), (3, 4));

        // An explicit edit releases the pin and re-derives the counts.
        let (next, state) = apply_change(&params, locked, Some(Field::D), &bounds(), PREVIEW_SIZE_MM);
        assert!(!state.grid_locked);
        assert_eq!(next.cols, 10);
        assert_eq!(next.rows, 10);
    }

    #[test]
    fn apply_change_sanitizes_input() {
        let params = Params {
            d: f64::NAN,
            x: 500.0,
            ..Params::default()
        };
        let (next, _) = apply_change(&params, SolverState::default(), None, &bounds(), PREVIEW_SIZE_MM);
        assert_eq!(next.d, Params::default().d);
        assert_eq!(next.x, bounds().x.max);
        assert!(next.of_target.is_finite());
    }
}
