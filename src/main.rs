use clap::Parser;
use crossterm::terminal;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

mod animation;
mod camera;
mod config;
mod error;
mod input;
mod math;
mod render;
mod scheduler;
mod sphere;
mod terminal_setup;

use config::Config;
use error::AppError;
use input::state::InputState;
use input::thread::InputSubscription;
use render::frame::{run_app_loop, run_headless};
use render::modes::globe::Globe;
use render::modes::motif::{Motif, MotifVariant};
use render::modes::portrait::Portrait;
use render::modes::satellite::Satellite;
use render::modes::saturn::Saturn;
use render::modes::typewriter::{Typewriter, DEFAULT_TEXT};
use render::pipeline::Viewport;
use render::{AppState, Generator, Mode};
use terminal_setup::{install_panic_hook, TerminalGuard};

#[derive(Debug, Parser)]
#[command(name = "glyphorbit", version, about = "Procedural ASCII animations for the terminal")]
struct Cli {
    /// Animation to start with
    #[arg(value_enum, default_value_t = Mode::Saturn)]
    mode: Mode,
    #[arg(long, value_name = "PATH", help = "Image sampled by the portrait mode")]
    image: Option<PathBuf>,
    #[arg(long, help = "Show a single static frame instead of animating")]
    reduced_motion: bool,
    #[arg(long, help = "Start with the HUD hidden")]
    no_hud: bool,
    #[arg(long, value_name = "PATH", help = "Config file (default: <config dir>/glyphorbit/config.toml)")]
    config: Option<PathBuf>,
    #[arg(long, value_name = "N", help = "Print N frames to stdout without a terminal UI")]
    frames: Option<usize>,
    #[arg(long, value_name = "C", requires = "rows", help = "Headless viewport columns")]
    cols: Option<usize>,
    #[arg(long, value_name = "R", requires = "cols", help = "Headless viewport rows")]
    rows: Option<usize>,
    #[arg(long, value_enum, default_value_t = MotifVariant::About)]
    motif: MotifVariant,
    #[arg(long, help = "Text revealed by the typewriter mode")]
    text: Option<String>,
}

fn detect_truecolor() -> bool {
    match std::env::var("COLORTERM") {
        Ok(val) => !val.is_empty() && (val == "truecolor" || val == "24bit"),
        Err(_) => match std::env::var("TERM_PROGRAM") {
            Ok(prog) => prog != "Apple_Terminal",
            Err(_) => match std::env::var("TERM") {
                Ok(term) => term.contains("ghostty") || term.contains("kitty") || term.contains("wezterm"),
                Err(_) => false,
            },
        },
    }
}

/// One generator per mode, in `Mode::ALL` order.
fn build_generators(image: Option<&Path>, motif: MotifVariant, text: &str) -> Vec<Box<dyn Generator>> {
    Mode::ALL
        .iter()
        .map(|mode| -> Box<dyn Generator> {
            match mode {
                Mode::Globe => Box::new(Globe::default()),
                Mode::Saturn => Box::new(Saturn),
                Mode::Satellite => Box::new(Satellite),
                Mode::Portrait => Box::new(Portrait::from_path(image)),
                Mode::Motif => Box::new(Motif::new(motif)),
                Mode::Typewriter => Box::new(Typewriter::new(text)),
            }
        })
        .collect()
}

fn main() -> Result<(), AppError> {
    env_logger::init();
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    let reduced_motion = cli.reduced_motion || config.motion.reduced;
    let show_hud = !cli.no_hud && config.display.hud;
    let image = cli.image.or(config.portrait.image);
    let text = cli
        .text
        .or(config.typewriter.text)
        .unwrap_or_else(|| DEFAULT_TEXT.to_string());

    let generators = build_generators(image.as_deref(), cli.motif, &text);
    let active = Mode::ALL.iter().position(|&m| m == cli.mode).unwrap_or(0);
    let input_state = InputState::with_reduced_motion(reduced_motion);

    if let Some(frames) = cli.frames {
        let viewport = Viewport::new(
            cli.cols.unwrap_or(config.viewport.cols),
            cli.rows.unwrap_or(config.viewport.rows),
        );
        log::info!(
            "headless {} for {frames} frames at {}x{}",
            cli.mode.name(),
            viewport.cols,
            viewport.rows
        );
        let mut app_state = AppState::new(generators, active, viewport, input_state);
        let mut stdout = BufWriter::new(io::stdout().lock());
        return run_headless(&mut app_state, frames, &mut stdout);
    }

    install_panic_hook();
    let guard = TerminalGuard::enter()?;
    let input = InputSubscription::spawn();

    let terminal_size = terminal::size()?;
    let mut app_state = AppState::new(
        generators,
        active,
        Viewport::from_terminal(terminal_size, show_hud),
        input_state,
    );
    app_state.show_hud = show_hud;
    app_state.resize_terminal(terminal_size);
    app_state.use_truecolor = config.display.truecolor.unwrap_or_else(detect_truecolor);
    app_state.color = config.display.color;
    log::info!(
        "starting {} at {}x{}",
        cli.mode.name(),
        terminal_size.0,
        terminal_size.1
    );

    let mut stdout = BufWriter::with_capacity(1024 * 1024, io::stdout());
    let run_result = run_app_loop(&mut app_state, &input, &mut stdout);

    drop(stdout);
    drop(input);
    drop(guard);
    run_result
}
