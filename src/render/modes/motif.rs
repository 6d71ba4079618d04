use std::time::Duration;

use super::template_width;
use crate::render::grid::{Grid, GridSize, BLANK};
use crate::render::pipeline::Viewport;
use crate::render::{Generator, Mode};

type Frame = &'static [&'static str];

const ABOUT_FRAMES: &[Frame] = &[
    &[
        "      .-====-.",
        "    .'  __  '.",
        "   /  .-..-.  \\",
        "  |  /  ||  \\  |",
        "  | |   ||   | |",
        "  |  \\__||__/  |",
        "   \\    --    /",
        "    '-.____.-'",
    ],
    &[
        "      .-====-.",
        "    .'  __  '.",
        "   /  .-..-.  \\",
        "  |  |  ||  |  |",
        "  | |  _||_  | |",
        "  |  |_/  \\_|  |",
        "   \\    --    /",
        "    '-.____.-'",
    ],
    &[
        "      .-====-.",
        "    .'  __  '.",
        "   /  .-..-.  \\",
        "  |  |\\_||_/|  |",
        "  | |  /||\\  | |",
        "  |  |__||__|  |",
        "   \\    --    /",
        "    '-.____.-'",
    ],
];

const CONTACT_FRAMES: &[Frame] = &[
    &[
        "       @ @ @",
        "      @ @ @ @",
        "     @ @ @ @ @",
        "        |||",
        "       [___]",
        "      |     |",
        "      |_____|",
    ],
    &[
        "     @ @ @ @ @",
        "    @ @ @ @ @ @",
        "   @ @ @ @ @ @ @",
        "        |||",
        "       [___]",
        "      |     |",
        "      |_____|",
    ],
    &[
        "   @ @ @ @ @ @ @",
        "  @ @ @ @ @ @ @ @",
        " @ @ @ @ @ @ @ @ @",
        "        |||",
        "       [___]",
        "      |  *  |",
        "      |_____|",
    ],
    &[
        "     @ @ @ @ @",
        "    @ @ @ @ @ @",
        "   @ @ @ @ @ @ @",
        "        |||",
        "       [___]",
        "      | *** |",
        "      |_____|",
    ],
];

const LAUNCH_FRAMES: &[Frame] = &[
    &[
        "        /\\",
        "       /  \\",
        "      |    |",
        "      | AI |",
        "     /|    |\\",
        "    /_|____|_\\",
        "      |::::|",
        "     /|::::|\\",
        "    /_|::::|_\\",
        "      ^    ^",
    ],
    &[
        "        /\\",
        "       /  \\",
        "      |    |",
        "      | AI |",
        "     /|    |\\",
        "    /_|____|_\\",
        "      |::::|",
        "     /|::::|\\",
        "    * |::::| *",
        "     \\|::::|/",
    ],
    &[
        "        /\\",
        "       /  \\",
        "      |    |",
        "      | AI |",
        "     /|    |\\",
        "    /_|____|_\\",
        "    * |::::| *",
        "   *  |::::|  *",
        "      \\|::|/",
        "       \\||/",
    ],
    &[
        "        /\\",
        "       /  \\",
        "      |    |",
        "      | AI |",
        "     /|    |\\",
        "   * /_|____|_\\ *",
        "  *    |::::|    *",
        "       |::::|",
        "        \\||/",
        "         \\/",
    ],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum MotifVariant {
    #[default]
    About,
    Contact,
    Launch,
}

impl MotifVariant {
    fn frames(self) -> &'static [Frame] {
        match self {
            Self::About => ABOUT_FRAMES,
            Self::Contact => CONTACT_FRAMES,
            Self::Launch => LAUNCH_FRAMES,
        }
    }

    pub fn interval(self) -> Duration {
        match self {
            Self::About => Duration::from_millis(920),
            Self::Contact => Duration::from_millis(700),
            Self::Launch => Duration::from_millis(800),
        }
    }
}

/// Hand-drawn frame sequence that cycles in place.
#[derive(Debug, Clone, Copy)]
pub struct Motif {
    variant: MotifVariant,
}

impl Motif {
    pub fn new(variant: MotifVariant) -> Self {
        Self { variant }
    }

    pub fn frame_count(&self) -> usize {
        self.variant.frames().len()
    }

    /// Smallest grid that holds every frame of the variant.
    fn extent(&self) -> GridSize {
        let frames = self.variant.frames();
        let cols = frames.iter().map(|f| template_width(f)).max().unwrap_or(0);
        let rows = frames.iter().map(|f| f.len()).max().unwrap_or(0);
        GridSize::new(cols, rows)
    }
}

impl Generator for Motif {
    fn mode(&self) -> Mode {
        Mode::Motif
    }

    fn label(&self) -> &str {
        match self.variant {
            MotifVariant::About => "// profile-signal",
            MotifVariant::Contact => "// signal-tower",
            MotifVariant::Launch => "// rocket-launch",
        }
    }

    fn note(&self) -> &str {
        match self.variant {
            MotifVariant::About => "build mode: active",
            MotifVariant::Contact => "status: broadcasting",
            MotifVariant::Launch => "status: ignition",
        }
    }

    fn grid_size(&self, _viewport: Viewport) -> GridSize {
        self.extent()
    }

    fn step_delay(&self, _size: GridSize) -> Duration {
        self.variant.interval()
    }

    fn build_frame(&mut self, size: GridSize, tick: u64) -> Grid {
        let mut grid = Grid::new(size);
        let count = self.frame_count();
        if count == 0 {
            return grid;
        }

        let frame = self.variant.frames()[(tick % count as u64) as usize];
        for (y, line) in frame.iter().enumerate() {
            for (x, glyph) in line.chars().enumerate() {
                if glyph != BLANK {
                    grid.set(x as isize, y as isize, glyph);
                }
            }
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARIANTS: [MotifVariant; 3] = [
        MotifVariant::About,
        MotifVariant::Contact,
        MotifVariant::Launch,
    ];

    #[test]
    fn frames_cycle_by_tick() {
        for variant in VARIANTS {
            let mut motif = Motif::new(variant);
            let size = motif.grid_size(Viewport::new(80, 24));
            let n = motif.frame_count() as u64;
            for tick in 0..n {
                assert_eq!(motif.build_frame(size, tick), motif.build_frame(size, tick + n));
            }
            assert_ne!(motif.build_frame(size, 0), motif.build_frame(size, 1));
        }
    }

    #[test]
    fn grid_holds_widest_frame() {
        let motif = Motif::new(MotifVariant::Launch);
        // "  *    |::::|    *" is the widest launch line.
        assert_eq!(motif.grid_size(Viewport::new(200, 60)), GridSize::new(18, 10));

        let contact = Motif::new(MotifVariant::Contact);
        assert_eq!(contact.grid_size(Viewport::new(10, 5)), GridSize::new(18, 7));
    }

    #[test]
    fn frame_text_matches_template() {
        let mut motif = Motif::new(MotifVariant::Contact);
        let size = motif.grid_size(Viewport::new(80, 24));
        let text = motif.build_frame(size, 0).to_text();
        let first = text.lines().next().unwrap_or_default();
        assert_eq!(first.trim_end(), "       @ @ @");
    }

    #[test]
    fn variants_carry_their_cadence_and_captions() {
        assert_eq!(MotifVariant::About.interval(), Duration::from_millis(920));
        assert_eq!(MotifVariant::Contact.interval(), Duration::from_millis(700));
        assert_eq!(MotifVariant::Launch.interval(), Duration::from_millis(800));
        assert_eq!(Motif::new(MotifVariant::Contact).label(), "// signal-tower");
        assert_eq!(Motif::new(MotifVariant::Launch).note(), "status: ignition");
    }
}
