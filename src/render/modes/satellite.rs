use std::f32::consts::TAU;
use std::time::Duration;

use super::{template_width, BLINK_GLYPH, STAR_GLYPHS, WAVE_GLYPHS};
use crate::render::grid::{Grid, GridSize, BLANK};
use crate::render::pipeline::Viewport;
use crate::render::{Generator, Mode};

pub const COLS: usize = 60;
pub const ROWS: usize = 28;
pub const FRAME_DELAY: Duration = Duration::from_millis(100);

pub const TWINKLE_DIVISOR: u64 = 4;
pub const BLINK_DIVISOR: u64 = 8;
pub const WAVE_PERIOD: u64 = 20;

const SATELLITE: [&str; 11] = [
    "      \u{2571}\u{2594}\u{2594}\u{2594}\u{2594}\u{2572}",
    "     \u{2571}  \u{2593}\u{2593}  \u{2572}",
    "    \u{2571}  \u{2593}\u{2593}\u{2593}\u{2593}  \u{2572}",
    "   \u{251C}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2524}",
    "   \u{2502}  \u{2591}\u{2588}\u{2591}\u{2588}\u{2591}\u{2588}  \u{2502}",
    "   \u{2502}  \u{2591}\u{2591}\u{2591}\u{2591}\u{2591}\u{2591}  \u{2502}",
    "   \u{2502}  \u{2593}\u{2593}\u{2593}\u{2593}\u{2593}\u{2593}  \u{2502}",
    "   \u{2570}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{256F}",
    "        \u{2551}",
    "      \u{2571}\u{2550}\u{256C}\u{2550}\u{2572}",
    "     \u{2571}  \u{2551}  \u{2572}",
];

/// Antenna row inside the template, where the blink indicator sits.
const ANTENNA_ROW: isize = 8;

const STARS: [(isize, isize); 6] = [
    (5, 2),
    (14, 4),
    (48, 3),
    (55, 7),
    (3, ROWS as isize - 4),
    (56, ROWS as isize - 5),
];

struct DataStream {
    x: isize,
    start_y: isize,
    digits: [char; 5],
    speed: f64,
}

const STREAMS: [DataStream; 2] = [
    DataStream {
        x: 8,
        start_y: ROWS as isize - 8,
        digits: ['1', '0', '1', '1', '0'],
        speed: 0.4,
    },
    DataStream {
        x: 52,
        start_y: ROWS as isize - 6,
        digits: ['0', '1', '0', '1', '1'],
        speed: 0.35,
    },
];

pub fn star_glyph(star_index: usize, tick: u64) -> char {
    let phase = (tick / TWINKLE_DIVISOR + star_index as u64) % STAR_GLYPHS.len() as u64;
    STAR_GLYPHS[phase as usize]
}

pub fn blink_on(tick: u64) -> bool {
    (tick / BLINK_DIVISOR) % 2 == 0
}

fn draw_stars(grid: &mut Grid, tick: u64) {
    for (i, &(x, y)) in STARS.iter().enumerate() {
        grid.set(x, y, star_glyph(i, tick));
    }
}

/// Radius and opacity of one signal ring at `tick`.
fn wave_state(tick: u64, wave_idx: usize) -> (f32, f32) {
    let t = (tick + wave_idx as u64 * 7) % WAVE_PERIOD;
    let radius = 4.0 + t as f32 * 0.8;
    let opacity = 1.0 - t as f32 / WAVE_PERIOD as f32;
    (radius, opacity)
}

/// Cells of one ring. Fading rings thin out: dense, then every other point, then nothing.
fn wave_points(radius: f32, opacity: f32, cx: isize, cy: isize) -> Vec<(isize, isize)> {
    if opacity < 0.15 {
        return Vec::new();
    }
    let points = (radius * 3.5).floor() as usize;
    (0..points)
        .filter(|&i| opacity > 0.6 || (opacity > 0.3 && i % 2 == 0))
        .map(|i| {
            let angle = i as f32 / points as f32 * TAU;
            let x = (cx as f32 + angle.cos() * radius).round() as isize;
            let y = (cy as f32 + angle.sin() * radius * 0.5).round() as isize;
            (x, y)
        })
        .collect()
}

fn draw_signal_waves(grid: &mut Grid, tick: u64, cx: isize, cy: isize) {
    for (wave_idx, &glyph) in WAVE_GLYPHS.iter().enumerate() {
        let (radius, opacity) = wave_state(tick, wave_idx);
        for (x, y) in wave_points(radius, opacity, cx, cy) {
            grid.set(x, y, glyph);
        }
    }
}

/// Row of digit `i` in `stream`, wrapped into `[0, rows)`.
fn stream_row(stream: &DataStream, i: usize, tick: u64, rows: usize) -> isize {
    let travelled = (stream.start_y + i as isize * 2) as f64 - tick as f64 * stream.speed;
    travelled.rem_euclid(rows as f64).floor() as isize
}

fn draw_data_streams(grid: &mut Grid, tick: u64) {
    let rows = grid.height();
    for stream in &STREAMS {
        for (i, &digit) in stream.digits.iter().enumerate() {
            let y = stream_row(stream, i, tick, rows);
            // The bottom two rows stay clear of stream digits.
            if y < rows as isize - 2 {
                grid.set(stream.x, y, digit);
            }
        }
    }
}

fn draw_satellite(grid: &mut Grid, tick: u64, cx: isize, cy: isize) {
    let start_x = cx - (template_width(&SATELLITE[..1]) / 2) as isize;
    let start_y = cy - (SATELLITE.len() / 2) as isize;

    for (row, line) in SATELLITE.iter().enumerate() {
        for (col, glyph) in line.chars().enumerate() {
            if glyph != BLANK {
                grid.set(start_x + col as isize, start_y + row as isize, glyph);
            }
        }
    }

    if blink_on(tick) {
        grid.set(cx, start_y + ANTENNA_ROW, BLINK_GLYPH);
    }
}

// --- Satellite ---

/// Comms satellite over a starfield, broadcasting signal rings and data streams.
#[derive(Debug, Clone, Copy)]
pub struct Satellite;

impl Generator for Satellite {
    fn mode(&self) -> Mode {
        Mode::Satellite
    }

    fn label(&self) -> &str {
        "// comms_satellite"
    }

    fn note(&self) -> &str {
        "status: transmitting"
    }

    fn grid_size(&self, _viewport: Viewport) -> GridSize {
        GridSize::new(COLS, ROWS)
    }

    fn step_delay(&self, _size: GridSize) -> Duration {
        FRAME_DELAY
    }

    fn build_frame(&mut self, size: GridSize, tick: u64) -> Grid {
        let mut grid = Grid::new(size);
        let cx = (size.cols / 2) as isize;
        let cy = (size.rows as f32 * 0.38).floor() as isize;

        // Back to front: stars, waves, streams, hull, blink.
        draw_stars(&mut grid, tick);
        draw_signal_waves(&mut grid, tick, cx, cy + 2);
        draw_data_streams(&mut grid, tick);
        draw_satellite(&mut grid, tick, cx, cy);

        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(tick: u64) -> Grid {
        Satellite.build_frame(GridSize::new(COLS, ROWS), tick)
    }

    #[test]
    fn each_star_cycles_three_glyphs_with_period_twelve() {
        let period = STAR_GLYPHS.len() as u64 * TWINKLE_DIVISOR;
        for star in 0..STARS.len() {
            let mut seen: Vec<char> = (0..period).map(|t| star_glyph(star, t)).collect();
            for t in 0..period * 4 {
                assert_eq!(star_glyph(star, t), star_glyph(star, t + period));
            }
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(seen.len(), 3);
        }
    }

    #[test]
    fn neighbouring_stars_twinkle_out_of_phase() {
        for t in 0..24 {
            assert_ne!(star_glyph(0, t), star_glyph(1, t));
            assert_ne!(star_glyph(1, t), star_glyph(2, t));
        }
    }

    #[test]
    fn stars_render_at_fixed_positions() {
        let grid = frame(0);
        for (i, &(x, y)) in STARS.iter().enumerate() {
            assert_eq!(grid.get(x, y), Some(star_glyph(i, 0)));
        }
    }

    #[test]
    fn blink_indicator_toggles_every_eight_ticks() {
        let cx = (COLS / 2) as isize;
        let cy = (ROWS as f32 * 0.38).floor() as isize;
        let antenna_y = cy - (SATELLITE.len() / 2) as isize + ANTENNA_ROW;

        assert_eq!(frame(0).get(cx, antenna_y), Some(BLINK_GLYPH));
        assert_eq!(frame(7).get(cx, antenna_y), Some(BLINK_GLYPH));
        assert_ne!(frame(8).get(cx, antenna_y), Some(BLINK_GLYPH));
        assert_eq!(frame(16).get(cx, antenna_y), Some(BLINK_GLYPH));
    }

    #[test]
    fn hull_overwrites_background_layers() {
        let cx = (COLS / 2) as isize;
        let cy = (ROWS as f32 * 0.38).floor() as isize;
        let start_x = cx - (template_width(&SATELLITE[..1]) / 2) as isize;
        let start_y = cy - (SATELLITE.len() / 2) as isize;

        for tick in 0..40 {
            let grid = frame(tick);
            for (row, line) in SATELLITE.iter().enumerate() {
                for (col, glyph) in line.chars().enumerate() {
                    let (x, y) = (start_x + col as isize, start_y + row as isize);
                    if glyph == BLANK || (row as isize == ANTENNA_ROW && x == cx) {
                        continue;
                    }
                    assert_eq!(grid.get(x, y), Some(glyph), "tick {tick} at ({x},{y})");
                }
            }
        }
    }

    #[test]
    fn data_streams_wrap_instead_of_vanishing() {
        let stream_cells = |grid: &Grid| {
            (0..ROWS as isize)
                .filter(|&y| matches!(grid.get(8, y), Some('0') | Some('1')))
                .count()
        };
        assert!(stream_cells(&frame(0)) > 0);
        assert!(stream_cells(&frame(500)) > 0);
    }

    #[test]
    fn fading_wave_drops_every_other_point() {
        let (radius, opacity) = wave_state(10, 0);
        assert!(opacity > 0.3 && opacity <= 0.6);
        let full = wave_points(radius, 1.0, 30, 12);
        let thinned = wave_points(radius, opacity, 30, 12);
        assert_eq!(thinned.len(), full.len().div_ceil(2));
        assert!(thinned.iter().eq(full.iter().step_by(2)));

        let (radius, opacity) = wave_state(2, 0);
        assert!(opacity > 0.6);
        assert_eq!(wave_points(radius, opacity, 30, 12), wave_points(radius, 1.0, 30, 12));

        let (radius, opacity) = wave_state(15, 0);
        assert!(opacity < 0.3);
        assert!(wave_points(radius, opacity, 30, 12).is_empty());
    }

    #[test]
    fn stream_digits_skip_bottom_two_rows() {
        let mut gated = 0;
        for tick in 0..300 {
            let grid = frame(tick);
            for stream in &STREAMS {
                for i in 0..stream.digits.len() {
                    if stream_row(stream, i, tick, ROWS) >= ROWS as isize - 2 {
                        gated += 1;
                    }
                }
                for y in [ROWS as isize - 2, ROWS as isize - 1] {
                    assert_eq!(grid.get(stream.x, y), Some(BLANK), "tick {tick} at ({}, {y})", stream.x);
                }
            }
        }
        assert!(gated > 0);
    }

    #[test]
    fn faded_wave_is_not_drawn() {
        // At tick 19 the leading wave is at opacity 0.05 and must be skipped.
        let grid = frame(19);
        assert!(!grid.cells().contains(&WAVE_GLYPHS[0]));
    }
}
