//! Common utilities shared across CLI commands.

use image::{DynamicImage, RgbaImage};
use serde::Serialize;
use tiny_skia::Pixmap;

use perfora::{
    apply_change, Bounds, Field, Mode, Params, Pattern, SceneOptions, SolverState, Summary,
    PREVIEW_SIZE_MM,
};

use super::preset;

/// Output format for rendered scenes.
#[derive(Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Svg,
    Json,
    Png,
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "svg" => Some(OutputFormat::Svg),
            "json" => Some(OutputFormat::Json),
            "png" => Some(OutputFormat::Png),
            _ => None,
        }
    }
}

/// Parameter flags accepted by `render`, `solve` and `share`.
///
/// Later flags override earlier ones, so `--share` or `--preset` make a
/// good base with individual overrides after them.
pub struct ParamArgs {
    pub params: Params,
    pub grid_locked: bool,
    pub wave: bool,
}

impl Default for ParamArgs {
    fn default() -> Self {
        Self {
            params: Params::default(),
            grid_locked: false,
            wave: true,
        }
    }
}

/// Try to consume one parameter flag at `args[i]`.
///
/// Returns the number of items consumed; 0 means the flag belongs to the
/// calling command. Bad values on explicit flags are command-line misuse
/// and exit with a message, unlike data inputs which fall back silently.
pub fn take_param_flag(out: &mut ParamArgs, args: &[String], i: usize) -> usize {
    let value = args.get(i + 1).map(String::as_str);
    match args[i].as_str() {
        "-d" | "--diameter" => {
            if let Some(v) = parse_num(value) {
                out.params.d = v;
            }
            2
        }
        "-x" | "--pitch-x" => {
            if let Some(v) = parse_num(value) {
                out.params.x = v;
            }
            2
        }
        "-y" | "--pitch-y" => {
            if let Some(v) = parse_num(value) {
                out.params.y = v;
            }
            2
        }
        "-t" | "--of" => {
            if let Some(v) = parse_num(value) {
                out.params.of_target = v;
            }
            2
        }
        "--rows" => {
            if let Some(v) = parse_count(value) {
                out.params.rows = v;
                out.grid_locked = true;
            }
            2
        }
        "--cols" => {
            if let Some(v) = parse_count(value) {
                out.params.cols = v;
                out.grid_locked = true;
            }
            2
        }
        "--pattern" => {
            let name = value.unwrap_or("");
            out.params.pattern = Pattern::from_name(name).unwrap_or_else(|| {
                eprintln!("Unknown pattern: {}. Use 'patterns' to list them.", name);
                std::process::exit(1);
            });
            2
        }
        "--mode" => {
            let name = value.unwrap_or("");
            out.params.mode = Mode::from_name(name).unwrap_or_else(|| {
                eprintln!("Unknown mode: {}. Use 'modes' to list them.", name);
                std::process::exit(1);
            });
            2
        }
        "--share" => {
            let raw = value.unwrap_or("");
            match perfora::decode_share(raw, &Bounds::default()) {
                Some(shared) => {
                    out.params = shared.params;
                    out.grid_locked = shared.grid_locked;
                }
                None => {
                    eprintln!("Share string holds nothing recognizable: {}", raw);
                    std::process::exit(1);
                }
            }
            2
        }
        "--preset" => {
            let path = value.unwrap_or("");
            match preset::load_preset(path) {
                Ok(loaded) => {
                    if let Err(e) = loaded.apply(out) {
                        eprintln!("Bad preset {}: {}", path, e);
                        std::process::exit(1);
                    }
                }
                Err(e) => {
                    eprintln!("Failed to load preset {}: {}", path, e);
                    std::process::exit(1);
                }
            }
            2
        }
        "--grid" => {
            out.params.show_grid = true;
            1
        }
        "--no-wave" => {
            out.wave = false;
            1
        }
        "--wave" => {
            out.wave = true;
            1
        }
        _ => 0,
    }
}

fn parse_num(value: Option<&str>) -> Option<f64> {
    value
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

fn parse_count(value: Option<&str>) -> Option<u32> {
    value.and_then(|v| v.parse::<u32>().ok()).map(|v| v.max(1))
}

/// Parse a change-hint field name for `solve --changed`.
pub fn field_from_name(name: &str) -> Option<Field> {
    match name.to_lowercase().as_str() {
        "mode" => Some(Field::Mode),
        "of" | "oftarget" | "t" => Some(Field::OfTarget),
        "d" | "diameter" => Some(Field::D),
        "x" => Some(Field::X),
        "y" => Some(Field::Y),
        "pattern" => Some(Field::Pattern),
        "grid" => Some(Field::Grid),
        _ => None,
    }
}

/// Run the initial-load solve: sanitize, solve for the active mode and
/// derive the row/column counts unless they are pinned.
pub fn finalize(args: &ParamArgs) -> (Params, SolverState) {
    let bounds = Bounds::default();
    let state = SolverState {
        step_auto: true,
        grid_locked: args.grid_locked,
    };
    apply_change(&args.params, state, None, &bounds, PREVIEW_SIZE_MM)
}

/// Scene options with the wave toggle applied.
pub fn scene_options(wave: bool) -> SceneOptions {
    SceneOptions {
        wave,
        ..SceneOptions::default()
    }
}

/// Render an SVG document to an RGBA image using resvg.
pub fn rasterize_svg(svg: &str, width: u32, height: u32) -> Option<DynamicImage> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &options).ok()?;
    let mut pixmap = Pixmap::new(width, height)?;
    pixmap.fill(tiny_skia::Color::WHITE);
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
    let rgba = RgbaImage::from_raw(width, height, pixmap.take())?;
    Some(DynamicImage::ImageRgba8(rgba))
}

/// Summary readouts in JSON form, shared by `render` and `solve`.
#[derive(Serialize)]
pub struct JsonSummary {
    pub of_percent: f64,
    pub hole_area_mm2: f64,
    pub cell_area_mm2: f64,
    pub ratio_dx: f64,
    pub ratio_dy: f64,
    pub coverage_w_mm: f64,
    pub coverage_h_mm: f64,
    pub collision: bool,
}

impl JsonSummary {
    pub fn from_summary(summary: &Summary) -> Self {
        Self {
            of_percent: summary.of.percent,
            hole_area_mm2: summary.hole_area_mm2,
            cell_area_mm2: summary.cell_area_mm2,
            ratio_dx: summary.ratio_dx,
            ratio_dy: summary.ratio_dy,
            coverage_w_mm: summary.coverage_w_mm,
            coverage_h_mm: summary.coverage_h_mm,
            collision: summary.collision,
        }
    }
}

/// Parameter record in JSON form.
#[derive(Serialize)]
pub struct JsonParams {
    pub d: f64,
    pub x: f64,
    pub y: f64,
    pub rows: u32,
    pub cols: u32,
    pub show_grid: bool,
    pub pattern: &'static str,
    pub mode: &'static str,
    pub of_target: f64,
}

impl JsonParams {
    pub fn from_params(params: &Params) -> Self {
        Self {
            d: params.d,
            x: params.x,
            y: params.y,
            rows: params.rows,
            cols: params.cols,
            show_grid: params.show_grid,
            pattern: params.pattern.name(),
            mode: params.mode.name(),
            of_target: params.of_target,
        }
    }
}
