//! perfora - perforated panel pattern TUI and CLI
//!
//! Usage:
//!   perfora                        Launch interactive preview
//!   perfora render [options]       Emit the pattern as SVG/JSON/PNG
//!   perfora solve [options]        Run the solver once, print the result
//!   perfora share [options]        Encode/decode shareable param strings
//!   perfora preset [file]          Show or check YAML presets
//!   perfora patterns | modes       List available enum values

mod cli;

use std::env;
use std::io::{self, stdout};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use image::DynamicImage;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use ratatui_image::{
    picker::{Picker, ProtocolType},
    protocol::StatefulProtocol,
    StatefulImage,
};

use perfora::{
    apply_change, build_scene, preview_svg, summarize, Bounds, Field, Mode, Params, Pattern,
    SceneOptions, SolverState, PREVIEW_SIZE_MM,
};

use cli::common::rasterize_svg;

/// One adjustable slider row in the TUI.
struct Slider {
    field: Field,
    label: &'static str,
    fine: f64,
    coarse: f64,
}

const SLIDERS: &[Slider] = &[
    Slider {
        field: Field::OfTarget,
        label: "OF target %",
        fine: 0.5,
        coarse: 5.0,
    },
    Slider {
        field: Field::D,
        label: "diameter mm",
        fine: 0.05,
        coarse: 0.5,
    },
    Slider {
        field: Field::X,
        label: "pitch x mm",
        fine: 0.1,
        coarse: 1.0,
    },
    Slider {
        field: Field::Y,
        label: "pitch y mm",
        fine: 0.1,
        coarse: 1.0,
    },
];

/// Result from background scene rendering.
struct RenderResult {
    image: DynamicImage,
    gen_time_ms: f64,
    holes: usize,
}

/// Application state for the TUI.
struct App {
    params: Params,
    state: SolverState,
    bounds: Bounds,
    /// Decorative wave border toggle.
    wave: bool,
    /// Which slider is focused.
    focus: usize,
    /// Cached readouts for the stats panel.
    of_percent: f64,
    collision: bool,
    holes: usize,
    gen_time_ms: f64,
    should_quit: bool,
    /// Is a render in flight?
    is_rendering: bool,
    /// Coalesced follow-up render requested while one was in flight.
    needs_render: bool,
    result_rx: Receiver<RenderResult>,
    result_tx: Sender<RenderResult>,
    /// Animation frame counter for the spinner.
    spinner_frame: usize,
    /// Image picker for terminal protocol detection.
    picker: Picker,
    /// Current rendered image protocol state.
    image_state: Option<Box<dyn StatefulProtocol>>,
}

impl App {
    fn new() -> Self {
        let (result_tx, result_rx) = mpsc::channel();

        // Initialize image picker - force Sixel protocol.
        let mut picker = Picker::from_termios().unwrap_or_else(|_| Picker::new((8, 16)));
        picker.protocol_type = ProtocolType::Sixel;

        let bounds = Bounds::default();
        let (params, state) = apply_change(
            &Params::default(),
            SolverState::default(),
            None,
            &bounds,
            PREVIEW_SIZE_MM,
        );

        let mut app = App {
            params,
            state,
            bounds,
            wave: true,
            focus: 0,
            of_percent: 0.0,
            collision: false,
            holes: 0,
            gen_time_ms: 0.0,
            should_quit: false,
            is_rendering: false,
            needs_render: false,
            result_rx,
            result_tx,
            spinner_frame: 0,
            picker,
            image_state: None,
        };
        app.refresh_readouts();
        app.request_render();
        app
    }

    fn refresh_readouts(&mut self) {
        let summary = summarize(&self.params);
        self.of_percent = summary.of.percent;
        self.collision = summary.collision;
    }

    /// Run one solver pass for a field edit, then schedule a redraw.
    fn apply(&mut self, changed: Option<Field>) {
        let (params, state) = apply_change(
            &self.params,
            self.state,
            changed,
            &self.bounds,
            PREVIEW_SIZE_MM,
        );
        self.params = params;
        self.state = state;
        self.refresh_readouts();
        self.request_render();
    }

    fn adjust(&mut self, direction: f64, coarse: bool) {
        let slider = &SLIDERS[self.focus];
        let step = if coarse { slider.coarse } else { slider.fine };
        let delta = step * direction;
        match slider.field {
            Field::OfTarget => self.params.of_target += delta,
            Field::D => self.params.d += delta,
            Field::X => self.params.x += delta,
            Field::Y => self.params.y += delta,
            _ => {}
        }
        self.apply(Some(slider.field));
    }

    fn next_slider(&mut self) {
        self.focus = (self.focus + 1) % SLIDERS.len();
    }

    fn prev_slider(&mut self) {
        self.focus = if self.focus == 0 {
            SLIDERS.len() - 1
        } else {
            self.focus - 1
        };
    }

    fn cycle_mode(&mut self) {
        let modes = Mode::all();
        let index = modes
            .iter()
            .position(|m| *m == self.params.mode)
            .unwrap_or(0);
        self.params.mode = modes[(index + 1) % modes.len()];
        self.apply(Some(Field::Mode));
    }

    fn toggle_pattern(&mut self) {
        self.params.pattern = match self.params.pattern {
            Pattern::Grid => Pattern::Staggered,
            Pattern::Staggered => Pattern::Grid,
        };
        self.apply(Some(Field::Pattern));
    }

    fn toggle_grid(&mut self) {
        self.params.show_grid = !self.params.show_grid;
        self.apply(Some(Field::Grid));
    }

    fn toggle_wave(&mut self) {
        self.wave = !self.wave;
        self.request_render();
    }

    fn reset(&mut self) {
        self.params = Params::default();
        self.state = SolverState::default();
        self.wave = true;
        self.focus = 0;
        self.apply(None);
    }

    /// Schedule a background render of the current scene.
    ///
    /// Coalescing: at most one render is in flight and at most one is
    /// pending. Any number of parameter edits arriving mid-render collapse
    /// into a single follow-up pass.
    fn request_render(&mut self) {
        if self.is_rendering {
            self.needs_render = true;
            return;
        }

        self.needs_render = false;
        self.is_rendering = true;
        let params = self.params;
        let wave = self.wave;
        let tx = self.result_tx.clone();

        thread::spawn(move || {
            let start = Instant::now();
            let scene = build_scene(
                &params,
                SceneOptions {
                    wave,
                    ..SceneOptions::default()
                },
            );
            let svg = preview_svg(&scene);
            let image = rasterize_svg(&svg, scene.width_px as u32, scene.height_px as u32)
                .unwrap_or_else(|| DynamicImage::new_rgba8(1, 1));
            let gen_time_ms = start.elapsed().as_secs_f64() * 1000.0;
            let _ = tx.send(RenderResult {
                image,
                gen_time_ms,
                holes: scene.holes_drawn(),
            });
        });
    }

    fn check_render_result(&mut self) {
        // Drain all pending results, keep only the latest.
        let mut latest: Option<RenderResult> = None;
        while let Ok(result) = self.result_rx.try_recv() {
            latest = Some(result);
        }

        if let Some(result) = latest {
            self.holes = result.holes;
            self.gen_time_ms = result.gen_time_ms;
            self.image_state = Some(self.picker.new_resize_protocol(result.image));
            self.is_rendering = false;

            // If the user changed something while we were rendering,
            // run the follow-up pass now.
            if self.needs_render {
                self.request_render();
            }
        }
    }

    fn slider_value(&self, field: Field) -> f64 {
        match field {
            Field::OfTarget => self.params.of_target,
            Field::D => self.params.d,
            Field::X => self.params.x,
            Field::Y => self.params.y,
            _ => 0.0,
        }
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() >= 2 {
        match args[1].as_str() {
            "render" => {
                cli::cmd_render(&args[2..]);
                return;
            }
            "solve" => {
                cli::cmd_solve(&args[2..]);
                return;
            }
            "share" => {
                cli::cmd_share(&args[2..]);
                return;
            }
            "preset" => {
                cli::cmd_preset(&args[2..]);
                return;
            }
            "patterns" => {
                cmd_patterns();
                return;
            }
            "modes" => {
                cmd_modes();
                return;
            }
            "tui" => {}
            "help" | "--help" | "-h" => {
                print_usage(&args[0]);
                return;
            }
            other => {
                eprintln!("Unknown command: {}", other);
                eprintln!();
                print_usage(&args[0]);
                std::process::exit(1);
            }
        }
    }

    if let Err(e) = run_tui() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn print_usage(prog: &str) {
    eprintln!("perfora - perforated panel pattern generation");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {}                          Launch interactive preview", prog);
    eprintln!("  {} render [options]         Emit the pattern", prog);
    eprintln!("  {} solve [options]          Print the solved parameter set", prog);
    eprintln!("  {} share [options]          Print a shareable param string", prog);
    eprintln!("  {} share --decode <string>  Decode a share string", prog);
    eprintln!("  {} preset [file]            Show or check a YAML preset", prog);
    eprintln!("  {} patterns | modes         List enum values", prog);
    eprintln!();
    eprintln!("Parameter options (render/solve/share):");
    eprintln!("  -d, --diameter <mm>    Hole diameter");
    eprintln!("  -x, --pitch-x <mm>     Horizontal pitch");
    eprintln!("  -y, --pitch-y <mm>     Nominal vertical pitch");
    eprintln!("  -t, --of <percent>     Open-area target");
    eprintln!("  --rows/--cols <n>      Pin counts (disables auto-grid)");
    eprintln!("  --pattern <name>       grid | staggered");
    eprintln!("  --mode <name>          of | step | diameter");
    eprintln!("  --grid                 Draw cell boundary lines");
    eprintln!("  --wave / --no-wave     Toggle the decorative border");
    eprintln!("  --share <string>       Start from a share string");
    eprintln!("  --preset <file>        Start from a YAML preset");
    eprintln!();
    eprintln!("Render options:");
    eprintln!("  -o, --output <file>    Output file (- for stdout, default: stdout)");
    eprintln!("  -f, --format <fmt>     Output format: svg, json, png (default: svg)");
    eprintln!("  --plain                Plain border, no clip (export flavour)");
    eprintln!();
    eprintln!("TUI controls:");
    eprintln!("  Up/Down or Tab   Select slider");
    eprintln!("  Left/Right       Adjust (fine), [ / ] coarse");
    eprintln!("  m / p            Cycle mode / toggle pattern");
    eprintln!("  g / w            Toggle grid lines / wave border");
    eprintln!("  r                Reset defaults");
    eprintln!("  q / Esc          Quit");
}

fn cmd_patterns() {
    println!("Available patterns:");
    for pattern in Pattern::all() {
        println!("  {}", pattern.name());
    }
}

fn cmd_modes() {
    println!("Available modes:");
    for mode in Mode::all() {
        println!("  {} - {}", mode.name(), mode.help(true));
    }
}

fn run_tui() -> Result<(), String> {
    // Initialize terminal
    enable_raw_mode().map_err(|e| e.to_string())?;
    stdout()
        .execute(EnterAlternateScreen)
        .map_err(|e| e.to_string())?;
    let mut terminal =
        Terminal::new(CrosstermBackend::new(stdout())).map_err(|e| e.to_string())?;

    let mut app = App::new();

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().map_err(|e| e.to_string())?;
    stdout()
        .execute(LeaveAlternateScreen)
        .map_err(|e| e.to_string())?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), String> {
    loop {
        // Check for completed renders (non-blocking).
        app.check_render_result();

        // Animate spinner while rendering.
        if app.is_rendering {
            app.spinner_frame = (app.spinner_frame + 1) % 8;
        }

        terminal
            .draw(|frame| ui(frame, app))
            .map_err(|_| "Draw error".to_string())?;

        if event::poll(Duration::from_millis(50)).map_err(|e| e.to_string())? {
            if let Event::Key(key) = event::read().map_err(|e| e.to_string())? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => {
                            app.should_quit = true;
                        }
                        KeyCode::Up | KeyCode::Char('k') => {
                            app.prev_slider();
                        }
                        KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                            app.next_slider();
                        }
                        KeyCode::Left | KeyCode::Char('h') => {
                            app.adjust(-1.0, false);
                        }
                        KeyCode::Right | KeyCode::Char('l') => {
                            app.adjust(1.0, false);
                        }
                        KeyCode::Char('[') => {
                            app.adjust(-1.0, true);
                        }
                        KeyCode::Char(']') => {
                            app.adjust(1.0, true);
                        }
                        KeyCode::Char('m') => {
                            app.cycle_mode();
                        }
                        KeyCode::Char('p') => {
                            app.toggle_pattern();
                        }
                        KeyCode::Char('g') => {
                            app.toggle_grid();
                        }
                        KeyCode::Char('w') => {
                            app.toggle_wave();
                        }
                        KeyCode::Char('r') => {
                            app.reset();
                        }
                        _ => {}
                    }
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &mut App) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(4)])
        .split(frame.area());

    let top_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(40)])
        .split(main_layout[0]);

    // Split left sidebar into sliders and stats.
    let sidebar_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(SLIDERS.len() as u16 + 2),
            Constraint::Min(8),
        ])
        .split(top_layout[0]);

    // Slider list
    let items: Vec<ListItem> = SLIDERS
        .iter()
        .map(|slider| {
            ListItem::new(format!(
                "{:<12} {:>8.2}",
                slider.label,
                app.slider_value(slider.field)
            ))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Parameters ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("► ");

    let mut list_state = ListState::default();
    list_state.select(Some(app.focus));
    frame.render_stateful_widget(list, sidebar_layout[0], &mut list_state);

    // Stats panel
    let warning = if app.collision {
        "\nWARNING: holes overlap"
    } else {
        ""
    };
    let stats_text = format!(
        "Mode: {}\nPattern: {}\nRows x cols: {} x {}\nOF: {:.2}%\nHoles: {}\nGrid: {}  Wave: {}\nRender: {:.1}ms{}",
        app.params.mode.name(),
        app.params.pattern.name(),
        app.params.rows,
        app.params.cols,
        app.of_percent,
        app.holes,
        if app.params.show_grid { "on" } else { "off" },
        if app.wave { "on" } else { "off" },
        app.gen_time_ms,
        warning
    );
    let stats_style = if app.collision {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::White)
    };
    let stats = Paragraph::new(stats_text)
        .block(
            Block::default()
                .title(" Pattern ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta)),
        )
        .style(stats_style);

    frame.render_widget(stats, sidebar_layout[1]);

    // Spinner animation frames
    let spinner_chars = ['|', '/', '-', '\\', '|', '/', '-', '\\'];
    let spinner = spinner_chars[app.spinner_frame % spinner_chars.len()];

    let image_title = if app.is_rendering {
        format!(" [{}] Rendering... ", spinner)
    } else {
        format!(" {:.0} x {:.0} mm preview ", PREVIEW_SIZE_MM, PREVIEW_SIZE_MM)
    };

    let border_color = if app.is_rendering {
        Color::Yellow
    } else {
        Color::Green
    };

    let image_block = Block::default()
        .title(image_title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner_area = image_block.inner(top_layout[1]);
    frame.render_widget(image_block, top_layout[1]);

    if let Some(ref mut image_state) = app.image_state {
        let image_widget = StatefulImage::new(None);
        frame.render_stateful_widget(image_widget, inner_area, image_state);
    }

    // Help + mode hint
    let help_text = format!(
        "{}\n↑↓/Tab field  ←→ adjust  [ ] coarse  m mode  p pattern  g grid  w wave  r reset  q quit",
        app.params.mode.help(app.state.step_auto)
    );
    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, main_layout[1]);
}
