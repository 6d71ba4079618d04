use std::path::Path;
use std::time::Duration;

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use rayon::prelude::*;

use crate::math::{cell_noise, clamp01};
use crate::render::grid::{map_intensity_to_glyph, Grid, GridSize, BLANK};
use crate::render::pipeline::Viewport;
use crate::render::{Generator, Mode};

pub const FRAME_DELAY: Duration = Duration::from_millis(180);
pub const ALPHA_CUTOFF: u8 = 12;

const CHAR_SETS: [&str; 3] = [
    " .'`^\",:;Il!i~+_-?][}{1)(|\\/*tfjrxnuvczXYUJCLQ0OZmwqpdbkhao*#MW&8%B@$",
    " .,:;-~=+*xX#%@",
    " `'.,:^!il~+_-?1)(|/\\tfjrxnuvczXYUCLQ0OZmwqpkhao*#MW&8%B@$",
];

const PAD_X: f32 = 0.08;
const PAD_Y: f32 = 0.04;
/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f32 = 2.0;
const SCAN_BOOST: f32 = 0.14;
const NOISE_AMPLITUDE: f32 = 0.09;

/// Decodes an image file, or logs why it could not and returns `None`.
pub fn load_source(path: &Path) -> Option<RgbaImage> {
    match image::open(path) {
        Ok(img) => {
            let rgba = img.to_rgba8();
            if rgba.width() == 0 || rgba.height() == 0 {
                log::warn!("portrait source {} is empty", path.display());
                return None;
            }
            log::debug!(
                "portrait source {} decoded at {}x{}",
                path.display(),
                rgba.width(),
                rgba.height()
            );
            Some(rgba)
        }
        Err(err) => {
            log::warn!("portrait source {} could not be decoded: {err}", path.display());
            None
        }
    }
}

/// Fits `source` into a transparent `size` canvas, padded and corrected for cell aspect.
fn fit_to_grid(source: &RgbaImage, size: GridSize) -> RgbaImage {
    let cols = size.cols as f32;
    let rows = size.rows as f32;
    let target_w = cols - cols * PAD_X * 2.0;
    let target_h = rows - rows * PAD_Y * 2.0;

    let src_w = source.width() as f32;
    let src_h = source.height() as f32 / CELL_ASPECT;
    let scale = (target_w / src_w).min(target_h / src_h);

    let draw_w = ((src_w * scale).round() as u32).max(1);
    let draw_h = ((src_h * scale).round() as u32).max(1);
    let draw_x = ((cols - draw_w as f32) * 0.5).round() as i64;
    let draw_y = ((rows - draw_h as f32) * 0.5).round() as i64;

    let scaled = imageops::resize(source, draw_w, draw_h, FilterType::Triangle);
    let mut canvas = RgbaImage::new(size.cols as u32, size.rows as u32);
    imageops::overlay(&mut canvas, &scaled, draw_x, draw_y);
    canvas
}

fn sample_glyph(pixel: &Rgba<u8>, x: usize, y: usize, tick: u64, scan_row: usize, ramp: &[char]) -> char {
    let [r, g, b, a] = pixel.0;
    if a < ALPHA_CUTOFF {
        return BLANK;
    }

    let luminance = (r as f32 * 0.299 + g as f32 * 0.587 + b as f32 * 0.114) / 255.0;
    let mut lit = (1.0 - luminance) * 0.9 + (a as f32 / 255.0) * 0.1;
    if y.abs_diff(scan_row) < 2 {
        lit = clamp01(lit + SCAN_BOOST);
    }
    lit = clamp01(lit + (cell_noise(x, y, tick) - 0.5) * NOISE_AMPLITUDE);

    map_intensity_to_glyph(ramp, lit)
}

// --- Portrait ---

/// Luminance sampler over a decoded image, with a rolling scan band and grain.
pub struct Portrait {
    source: Option<RgbaImage>,
    note: String,
    resampled: Option<(GridSize, RgbaImage)>,
}

impl Portrait {
    pub fn new(source: Option<RgbaImage>, note: impl Into<String>) -> Self {
        Self {
            source,
            note: note.into(),
            resampled: None,
        }
    }

    pub fn from_path(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::new(load_source(path), format!("source: {}", path.display())),
            None => {
                log::debug!("no portrait source configured");
                Self::new(None, "source: none")
            }
        }
    }

    fn canvas(&mut self, size: GridSize) -> Option<&RgbaImage> {
        let source = self.source.as_ref()?;
        let stale = !matches!(&self.resampled, Some((cached, _)) if *cached == size);
        if stale {
            self.resampled = Some((size, fit_to_grid(source, size)));
        }
        self.resampled.as_ref().map(|(_, canvas)| canvas)
    }
}

impl Generator for Portrait {
    fn mode(&self) -> Mode {
        Mode::Portrait
    }

    fn label(&self) -> &str {
        "// profile_matrix"
    }

    fn note(&self) -> &str {
        &self.note
    }

    fn grid_size(&self, viewport: Viewport) -> GridSize {
        let cols = viewport.cols.clamp(52, 126);
        let rows = ((cols as f32 * 0.72).floor() as usize).clamp(32, 78);
        GridSize::new(cols, rows)
    }

    fn step_delay(&self, _size: GridSize) -> Duration {
        FRAME_DELAY
    }

    fn is_ready(&self) -> bool {
        self.source.is_some()
    }

    fn build_frame(&mut self, size: GridSize, tick: u64) -> Grid {
        let mut grid = Grid::new(size);
        let Some(canvas) = self.canvas(size) else {
            return grid;
        };

        let ramp: Vec<char> = CHAR_SETS[(tick % CHAR_SETS.len() as u64) as usize]
            .chars()
            .collect();
        let scan_row = ((tick.wrapping_mul(2)) % size.rows as u64) as usize;

        grid.cells_mut()
            .par_chunks_mut(size.cols)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, cell) in row.iter_mut().enumerate() {
                    let pixel = canvas.get_pixel(x as u32, y as u32);
                    *cell = sample_glyph(pixel, x, y, tick, scan_row, &ramp);
                }
            });

        grid
    }
}
