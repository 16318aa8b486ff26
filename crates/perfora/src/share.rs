//! Share-string codec - a compact `key=value` encoding of the parameters.
//!
//! The string is what an embedding UI puts behind a "copy link" button.
//! Decoding runs through the same validation as any other input:
//! unknown keys are ignored, malformed numbers fall back to defaults and
//! out-of-range targets are clamped, so a hand-edited string can never
//! smuggle a non-finite number into the engine.
//!
//! ## Rust Lesson #5: Option instead of "maybe null"
//!
//! `decode_share` returns `Option<SharedParams>` - either the string held
//! something usable or it didn't. The caller must check; there is no
//! forgetting-the-null-check bug to write.

use crate::params::{Bounds, Mode, Params, Pattern};

/// Decoded share string: the parameters plus whether explicit row/column
/// counts were present (which pins the grid instead of auto-sizing it).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SharedParams {
    pub params: Params,
    pub grid_locked: bool,
}

/// Encode parameters as `d=..&x=..&y=..&n=..&m=..&grid=..&pattern=..&mode=..&t=..`.
///
/// Numeric fields carry fixed two-decimal precision so strings compare
/// stably across platforms.
pub fn encode_share(params: &Params) -> String {
    format!(
        "d={:.2}&x={:.2}&y={:.2}&n={}&m={}&grid={}&pattern={}&mode={}&t={:.2}",
        params.d,
        params.x,
        params.y,
        params.rows,
        params.cols,
        if params.show_grid { 1 } else { 0 },
        params.pattern.name(),
        params.mode.name(),
        params.of_target,
    )
}

/// Decode a share string.
///
/// Returns `None` when nothing recognizable is present. A leading `#` is
/// tolerated so a whole location hash can be pasted verbatim.
pub fn decode_share(raw: &str, bounds: &Bounds) -> Option<SharedParams> {
    let raw = raw.trim().trim_start_matches('#');
    let defaults = Params::default();
    let mut params = defaults;
    let mut has_value = false;
    let mut manual_grid = false;

    for pair in raw.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        match key {
            "d" | "x" | "y" => {
                if let Ok(num) = value.parse::<f64>() {
                    if num.is_finite() {
                        has_value = true;
                        match key {
                            "d" => params.d = num,
                            "x" => params.x = num,
                            _ => params.y = num,
                        }
                    }
                }
            }
            "n" | "m" => {
                if let Ok(num) = value.parse::<i64>() {
                    has_value = true;
                    manual_grid = true;
                    let count = num.clamp(1, u32::MAX as i64) as u32;
                    if key == "n" {
                        params.rows = count;
                    } else {
                        params.cols = count;
                    }
                }
            }
            "grid" => {
                has_value = true;
                params.show_grid = value == "1";
            }
            "pattern" => {
                if let Some(pattern) = Pattern::from_name(value) {
                    has_value = true;
                    params.pattern = pattern;
                }
            }
            "mode" => {
                if let Some(mode) = Mode::from_name(value) {
                    has_value = true;
                    params.mode = mode;
                }
            }
            "t" => {
                if let Ok(num) = value.parse::<f64>() {
                    if num.is_finite() {
                        has_value = true;
                        params.of_target = bounds.of_target.clamp(num, defaults.of_target);
                    }
                }
            }
            _ => {}
        }
    }

    if has_value {
        Some(SharedParams {
            params,
            grid_locked: manual_grid,
        })
    } else {
        None
    }
}
