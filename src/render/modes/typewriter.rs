use std::time::Duration;

use crate::render::grid::{Grid, GridSize};
use crate::render::pipeline::Viewport;
use crate::render::{Generator, Mode};

pub const CHAR_DELAY: Duration = Duration::from_millis(26);
pub const START_DELAY: Duration = Duration::from_millis(320);
pub const CARET: char = '|';
pub const DEFAULT_TEXT: &str = "signals in, systems out. building quietly at the edge of the terminal.";

const MIN_COLS: usize = 20;

/// Reveals a line of text one character per tick, trailed by a caret.
#[derive(Debug, Clone)]
pub struct Typewriter {
    text: Vec<char>,
}

impl Typewriter {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.chars().filter(|c| !c.is_control()).collect(),
        }
    }

    pub fn revealed(&self, tick: u64) -> usize {
        usize::try_from(tick).map_or(self.text.len(), |t| t.min(self.text.len()))
    }
}

impl Generator for Typewriter {
    fn mode(&self) -> Mode {
        Mode::Typewriter
    }

    fn label(&self) -> &str {
        "// hero_typewriter"
    }

    fn note(&self) -> &str {
        "cursor: live"
    }

    /// Wraps by character at the viewport width, with room for the caret.
    fn grid_size(&self, viewport: Viewport) -> GridSize {
        let cells = self.text.len() + 1;
        let cols = cells.min(viewport.cols.max(MIN_COLS));
        GridSize::new(cols, cells.div_ceil(cols.max(1)))
    }

    fn step_delay(&self, _size: GridSize) -> Duration {
        CHAR_DELAY
    }

    fn initial_delay(&self) -> Duration {
        START_DELAY
    }

    fn static_tick(&self) -> u64 {
        self.text.len() as u64
    }

    fn is_finished(&self, tick: u64) -> bool {
        self.revealed(tick) == self.text.len()
    }

    fn build_frame(&mut self, size: GridSize, tick: u64) -> Grid {
        let mut grid = Grid::new(size);
        let shown = self.revealed(tick);
        let glyphs = self.text[..shown].iter().copied().chain(std::iter::once(CARET));

        for (i, glyph) in glyphs.enumerate() {
            let x = (i % size.cols) as isize;
            let y = (i / size.cols) as isize;
            grid.set(x, y, glyph);
        }
        grid
    }
}
