pub mod frame;
pub mod grid;
pub mod hud;
pub mod modes;
pub mod pipeline;

use std::time::Duration;

use crossterm::style::Color;

use crate::animation::{Animator, StepOutcome};
use crate::input::state::InputState;
use grid::{Grid, GridSize};
use pipeline::Viewport;

pub fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    if r == g && g == b {
        if r < 8 {
            return 16;
        }
        if r > 248 {
            return 231;
        }
        return 232 + ((r as f32 - 8.0) / 247.0 * 24.0) as u8;
    }
    let ri = (r as f32 / 255.0 * 5.0 + 0.5) as u8;
    let gi = (g as f32 / 255.0 * 5.0 + 0.5) as u8;
    let bi = (b as f32 / 255.0 * 5.0 + 0.5) as u8;
    16 + 36 * ri + 6 * gi + bi
}

pub fn make_color(rgb: [u8; 3], use_truecolor: bool) -> Color {
    if use_truecolor {
        Color::Rgb {
            r: rgb[0],
            g: rgb[1],
            b: rgb[2],
        }
    } else {
        Color::AnsiValue(rgb_to_ansi256(rgb[0], rgb[1], rgb[2]))
    }
}

/// Delay before the first scheduled step of any generator.
pub const INITIAL_DELAY: Duration = Duration::from_millis(120);

/// A procedural frame source. Implementations must be pure in (size, tick):
/// the same inputs always produce the same grid.
pub trait Generator {
    fn mode(&self) -> Mode;

    fn label(&self) -> &str;

    fn note(&self) -> &str;

    fn grid_size(&self, viewport: Viewport) -> GridSize;

    /// Decides whether a freshly derived size replaces the current one.
    fn settle(&self, _current: GridSize, next: GridSize) -> GridSize {
        next
    }

    fn step_delay(&self, size: GridSize) -> Duration;

    fn initial_delay(&self) -> Duration {
        INITIAL_DELAY
    }

    /// Tick shown while reduced motion is active.
    fn static_tick(&self) -> u64 {
        0
    }

    fn is_ready(&self) -> bool {
        true
    }

    /// True once the clock has nothing left to show at `tick`; no further steps are scheduled.
    fn is_finished(&self, _tick: u64) -> bool {
        false
    }

    fn build_frame(&mut self, size: GridSize, tick: u64) -> Grid;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    Globe,
    Saturn,
    Satellite,
    Portrait,
    Motif,
    Typewriter,
}

impl Mode {
    pub const ALL: [Mode; 6] = [
        Self::Globe,
        Self::Saturn,
        Self::Satellite,
        Self::Portrait,
        Self::Motif,
        Self::Typewriter,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Globe => "Globe",
            Self::Saturn => "Saturn",
            Self::Satellite => "Satellite",
            Self::Portrait => "Portrait",
            Self::Motif => "Motif",
            Self::Typewriter => "Typewriter",
        }
    }
}

pub struct AppState {
    pub generators: Vec<Box<dyn Generator>>,
    pub active: usize,
    pub animator: Animator,
    pub input_state: InputState,
    pub viewport: Viewport,
    pub terminal_size: (u16, u16),
    pub show_hud: bool,
    pub use_truecolor: bool,
    pub color: [u8; 3],
    pub hud_string_buf: String,
    pub needs_clear: bool,
}

impl AppState {
    /// `generators` must not be empty; `active` is clamped into range.
    pub fn new(
        generators: Vec<Box<dyn Generator>>,
        active: usize,
        viewport: Viewport,
        input_state: InputState,
    ) -> Self {
        let active = active.min(generators.len().saturating_sub(1));
        let size = generators
            .get(active)
            .map(|g| g.grid_size(viewport))
            .unwrap_or_else(|| GridSize::new(1, 1));
        let mut state = Self {
            generators,
            active,
            animator: Animator::new(size),
            input_state,
            viewport,
            terminal_size: (
                u16::try_from(viewport.cols).unwrap_or(u16::MAX),
                u16::try_from(viewport.rows + hud::HUD_ROWS).unwrap_or(u16::MAX),
            ),
            show_hud: true,
            use_truecolor: false,
            color: [200, 220, 255],
            hud_string_buf: String::with_capacity(256),
            needs_clear: true,
        };
        state.input_state.refresh_visibility(viewport);
        state
    }

    pub fn generator(&self) -> &dyn Generator {
        self.generators[self.active].as_ref()
    }

    pub fn mode(&self) -> Mode {
        self.generator().mode()
    }

    /// Switches to the next generator with a fresh clock.
    pub fn cycle_generator(&mut self) {
        if self.generators.is_empty() {
            return;
        }
        self.active = (self.active + 1) % self.generators.len();
        let size = self.generator().grid_size(self.viewport);
        self.animator = Animator::new(size);
        self.needs_clear = true;
        log::debug!("switched to {} at {}x{}", self.mode().name(), size.cols, size.rows);
    }

    /// Returns true when the grid size changed (and the clock restarted).
    pub fn apply_viewport(&mut self, viewport: Viewport) -> bool {
        self.viewport = viewport;
        self.input_state.refresh_visibility(viewport);
        self.needs_clear = true;

        let generator = self.generator();
        let next = generator.settle(self.animator.size(), generator.grid_size(viewport));
        let changed = self.animator.resize(next);
        if changed {
            log::debug!("grid resized to {}x{}", next.cols, next.rows);
        }
        changed
    }

    pub fn resize_terminal(&mut self, terminal_size: (u16, u16)) -> bool {
        self.terminal_size = terminal_size;
        self.apply_viewport(Viewport::from_terminal(terminal_size, self.show_hud))
    }

    pub fn toggle_hud(&mut self) {
        self.show_hud = !self.show_hud;
        self.resize_terminal(self.terminal_size);
    }

    /// One scheduled step of the active generator.
    pub fn step(&mut self) -> StepOutcome {
        let ready = self.generator().is_ready();
        self.animator.step(&self.input_state.signals, ready)
    }

    pub fn is_finished(&self) -> bool {
        self.generator().is_finished(self.animator.tick())
    }

    pub fn render_current(&mut self) -> Grid {
        let signals = self.input_state.signals;
        let generator = self.generators[self.active].as_mut();
        self.animator.render(generator, &signals)
    }
}
