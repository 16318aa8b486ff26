//! Render command implementation.

use std::fs;

use serde::Serialize;

use perfora::{build_scene, export_svg, preview_svg, Scene};

use super::common::{self, JsonParams, JsonSummary, OutputFormat, ParamArgs};

/// A hole in JSON output format.
#[derive(Serialize)]
struct JsonHole {
    cx: f64,
    cy: f64,
    r: f64,
}

/// A grid line in JSON output format.
#[derive(Serialize)]
struct JsonLine {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

/// Full scene in JSON output format.
#[derive(Serialize)]
struct JsonScene {
    width: f64,
    height: f64,
    params: JsonParams,
    summary: JsonSummary,
    holes: Vec<JsonHole>,
    grid_lines: Vec<JsonLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    wave_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    wave_clip: Option<String>,
}

/// Execute the render command.
pub fn cmd_render(args: &[String]) {
    let mut flags = ParamArgs::default();
    let mut output_path: Option<&str> = None;
    let mut format = OutputFormat::Svg;
    let mut plain = false;

    let mut i = 0;
    while i < args.len() {
        let taken = common::take_param_flag(&mut flags, args, i);
        if taken > 0 {
            i += taken;
            continue;
        }
        match args[i].as_str() {
            "-o" | "--output" => {
                i += 1;
                if i < args.len() {
                    output_path = Some(&args[i]);
                }
            }
            "-f" | "--format" => {
                i += 1;
                if i < args.len() {
                    format = OutputFormat::from_name(&args[i]).unwrap_or_else(|| {
                        eprintln!("Unknown format: {}. Use 'svg', 'json' or 'png'.", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--plain" => plain = true,
            other => {
                eprintln!("Unknown option: {}", other);
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let (params, _state) = common::finalize(&flags);
    let scene = build_scene(&params, common::scene_options(flags.wave));
    eprintln!(
        "{} holes, OF {:.2}%",
        scene.holes_drawn(),
        scene.summary.of.percent
    );

    match format {
        OutputFormat::Svg => {
            let document = if plain {
                export_svg(&scene)
            } else {
                preview_svg(&scene)
            };
            write_text(output_path, &document);
        }
        OutputFormat::Json => {
            let output = json_scene(&params, &scene);
            let text = serde_json::to_string_pretty(&output).expect("Failed to serialize JSON");
            write_text(output_path, &text);
        }
        OutputFormat::Png => {
            let Some(path) = output_path.filter(|p| *p != "-") else {
                eprintln!("PNG output needs a file path: render -f png -o pattern.png");
                std::process::exit(1);
            };
            let document = if plain {
                export_svg(&scene)
            } else {
                preview_svg(&scene)
            };
            let width = scene.width_px.round() as u32;
            let height = scene.height_px.round() as u32;
            let image = common::rasterize_svg(&document, width, height).unwrap_or_else(|| {
                eprintln!("Failed to rasterize the scene");
                std::process::exit(1);
            });
            if let Err(e) = image.save(path) {
                eprintln!("Failed to write {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Wrote: {}", path);
        }
    }
}

fn json_scene(params: &perfora::Params, scene: &Scene) -> JsonScene {
    let wave = scene.wave();
    JsonScene {
        width: scene.width_px,
        height: scene.height_px,
        params: JsonParams::from_params(params),
        summary: JsonSummary::from_summary(&scene.summary),
        holes: scene
            .layout
            .holes
            .iter()
            .map(|h| JsonHole {
                cx: h.cx,
                cy: h.cy,
                r: h.r,
            })
            .collect(),
        grid_lines: scene
            .layout
            .grid_lines
            .iter()
            .map(|l| JsonLine {
                x1: l.x1,
                y1: l.y1,
                x2: l.x2,
                y2: l.y2,
            })
            .collect(),
        wave_path: wave.map(|w| w.path.clone()),
        wave_clip: wave.map(|w| w.css_clip.clone()),
    }
}

fn write_text(output_path: Option<&str>, text: &str) {
    match output_path {
        Some("-") | None => println!("{}", text),
        Some(path) => {
            if let Err(e) = fs::write(path, text) {
                eprintln!("Failed to write {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Wrote: {}", path);
        }
    }
}
