//! Solve command implementation.
//!
//! Runs the solver once, exactly as the interactive preview would on a
//! field edit, and prints the resulting consistent parameter set.

use serde::Serialize;

use perfora::{apply_change, summarize, Bounds, Field, Params, SolverState, PREVIEW_SIZE_MM};

use super::common::{self, JsonParams, JsonSummary, ParamArgs};

#[derive(Serialize)]
struct JsonSolve {
    params: JsonParams,
    step_auto: bool,
    grid_locked: bool,
    summary: JsonSummary,
}

/// Execute the solve command.
pub fn cmd_solve(args: &[String]) {
    let mut flags = ParamArgs::default();
    let mut changed: Option<Field> = None;
    let mut json_output = false;

    let mut i = 0;
    while i < args.len() {
        let taken = common::take_param_flag(&mut flags, args, i);
        if taken > 0 {
            i += taken;
            continue;
        }
        match args[i].as_str() {
            "--changed" => {
                i += 1;
                if i < args.len() {
                    changed = Some(common::field_from_name(&args[i]).unwrap_or_else(|| {
                        eprintln!("Unknown field: {}. Use mode/of/d/x/y/pattern/grid.", args[i]);
                        std::process::exit(1);
                    }));
                }
            }
            "--json" => json_output = true,
            other => {
                eprintln!("Unknown option: {}", other);
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let bounds = Bounds::default();
    let state = SolverState {
        step_auto: true,
        grid_locked: flags.grid_locked,
    };
    let (params, state) = apply_change(&flags.params, state, changed, &bounds, PREVIEW_SIZE_MM);

    if json_output {
        let output = JsonSolve {
            params: JsonParams::from_params(&params),
            step_auto: state.step_auto,
            grid_locked: state.grid_locked,
            summary: JsonSummary::from_summary(&summarize(&params)),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output).expect("Failed to serialize JSON")
        );
    } else {
        print_params(&params, state, flags.wave);
    }
}

/// Print a solved parameter set plus its readouts as an aligned table.
pub fn print_params(params: &Params, state: SolverState, wave: bool) {
    let summary = summarize(params);
    println!("mode:        {}", params.mode.name());
    println!("             {}", params.mode.help(state.step_auto));
    println!("pattern:     {}", params.pattern.name());
    println!("d:           {:.2} mm", params.d);
    println!("x / y:       {:.2} / {:.2} mm", params.x, params.y);
    println!(
        "rows x cols: {} x {}{}",
        params.rows,
        params.cols,
        if state.grid_locked { " (pinned)" } else { "" }
    );
    println!("OF:          {:.2} %", summary.of.percent);
    println!(
        "hole area:   {:.4} mm2   cell area: {:.4} mm2",
        summary.hole_area_mm2, summary.cell_area_mm2
    );
    println!(
        "d/x:         {:.2}   d/y: {:.2}",
        summary.ratio_dx, summary.ratio_dy
    );
    println!(
        "coverage:    {:.1} x {:.1} mm",
        summary.coverage_w_mm, summary.coverage_h_mm
    );
    println!(
        "grid lines:  {}   wave border: {}",
        if params.show_grid { "on" } else { "off" },
        if wave { "on" } else { "off" }
    );
    if summary.collision {
        println!("WARNING: d >= min(x, row step) - holes overlap or touch.");
    } else {
        println!("geometry ok: no collision.");
    }
}
