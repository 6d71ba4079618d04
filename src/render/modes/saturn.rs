use std::time::Duration;

use rayon::prelude::*;

use super::SATURN_RAMP;
use crate::math::{clamp01, hash2d, smoothstep};
use crate::render::grid::{Grid, GridSize, BLANK};
use crate::render::pipeline::{settle_grid_size, Viewport};
use crate::render::{Generator, Mode};

pub const PHONE_MAX_COLS: usize = 104;
pub const TABLET_MAX_COLS: usize = 180;
pub const DITHER_AMPLITUDE: f32 = 0.045;
pub const BLANK_CUTOFF: f32 = 0.035;

/// Planet shading direction (screen space, z toward the viewer).
const PLANET_LIGHT: (f32, f32, f32) = (-0.55, -0.34, 1.02);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Phone,
    Tablet,
    Desktop,
}

impl Layout {
    pub fn for_cols(cols: usize) -> Self {
        if cols < PHONE_MAX_COLS {
            Self::Phone
        } else if cols < TABLET_MAX_COLS {
            Self::Tablet
        } else {
            Self::Desktop
        }
    }
}

/// Per-frame geometry derived from grid size, layout and tick.
#[derive(Debug, Clone, Copy)]
struct RingedPlanet {
    phase: f32,
    center_x: f32,
    center_y: f32,
    planet_rx: f32,
    planet_ry: f32,
    ring_a: f32,
    ring_b: f32,
    ring_thickness: f32,
    ring_feather: f32,
    cos_tilt: f32,
    sin_tilt: f32,
    edge_fade_start: f32,
    edge_fade_end: f32,
}

impl RingedPlanet {
    fn new(size: GridSize, tick: u64) -> Self {
        let cols = size.cols as f32;
        let rows = size.rows as f32;
        let layout = Layout::for_cols(size.cols);
        let phone = layout == Layout::Phone;
        let t = tick as f32;

        let phase = t * if phone { 0.12 } else { 0.09 };
        let center_x = cols * if phone { 0.56 } else { 0.58 };
        let center_y = rows * if phone { 1.05 } else { 0.56 };

        let planet_scale = match layout {
            Layout::Phone => 0.14,
            Layout::Tablet => 0.104,
            Layout::Desktop => 0.098,
        };
        let planet_rx = (cols * planet_scale).min(cols * 0.15).max(11.0);
        let planet_ry = planet_rx * if phone { 0.66 } else { 0.6 };

        let (ring_scale, ring_flatten) = match layout {
            Layout::Phone => (0.52, 0.22),
            Layout::Tablet => (0.42, 0.185),
            Layout::Desktop => (0.4, 0.17),
        };
        let ring_a = (cols * ring_scale).min(cols * 0.6).max(40.0);
        let ring_b = ring_a * ring_flatten;

        let base_tilt: f32 = if phone { -0.44 } else { -0.34 };
        let tilt = base_tilt + (t * 0.012).sin() * 0.03;
        let (sin_tilt, cos_tilt) = tilt.sin_cos();

        Self {
            phase,
            center_x,
            center_y,
            planet_rx,
            planet_ry,
            ring_a,
            ring_b,
            ring_thickness: if phone { 0.046 } else { 0.038 },
            ring_feather: if phone { 0.024 } else { 0.02 },
            cos_tilt,
            sin_tilt,
            edge_fade_start: if phone { 0.01 } else { 0.008 },
            edge_fade_end: if phone { 0.08 } else { 0.06 },
        }
    }

    fn ring(&self, dx: f32, dy: f32) -> f32 {
        let rx = dx * self.cos_tilt - dy * self.sin_tilt;
        let ry = dx * self.sin_tilt + dy * self.cos_tilt;

        let norm = (rx / self.ring_a).hypot(ry / self.ring_b);
        let distance = (norm - 1.0).abs();
        let mask = 1.0
            - smoothstep(
                self.ring_thickness,
                self.ring_thickness + self.ring_feather,
                distance,
            );
        let angle = (ry / self.ring_b).atan2(rx / self.ring_a);
        let banding = 0.86 + 0.14 * (angle * 6.8 + self.phase).sin();
        let grain = 0.96 + 0.04 * ((norm - 1.0) * 36.0 - self.phase * 0.55).sin();

        let base = mask * 0.26 * grain;
        if ry > 0.0 {
            base.max(mask * (0.25 + 0.13 * banding) * grain)
        } else {
            base.max(mask * (0.16 + 0.1 * banding) * grain)
        }
    }

    fn planet(&self, dx: f32, dy: f32) -> f32 {
        let px = dx / self.planet_rx;
        let py = dy / self.planet_ry;
        let eq = px * px + py * py;
        if eq > 1.0 {
            return 0.0;
        }
        let pz = (1.0 - eq).sqrt();
        let (lx, ly, lz) = PLANET_LIGHT;
        let diffuse = px * lx + py * ly + pz * lz;
        let stripes = (py * 17.0 + self.phase * 0.42).sin() * 0.07;
        let rim = (1.0 - pz).powf(2.1) * 0.2;
        clamp01((diffuse + 1.0) * 0.38 + 0.24 + stripes + rim)
    }

    fn halo(&self, dx: f32, dy: f32) -> f32 {
        let hx = dx / (self.planet_rx * 2.6);
        let hy = dy / (self.planet_ry * 2.6);
        (-(hx * hx) - hy * hy).exp() * 0.04
    }

    fn intensity(&self, x: usize, y: usize, size: GridSize) -> f32 {
        let cols = size.cols as f32;
        let rows = size.rows as f32;
        let cx = x as f32 + 0.5;
        let cy = y as f32 + 0.5;
        let dx = cx - self.center_x;
        let dy = cy - self.center_y;

        let edge = (cx / cols)
            .min((cols - cx) / cols)
            .min(cy / rows)
            .min((rows - cy) / rows);
        let fade = smoothstep(self.edge_fade_start, self.edge_fade_end, edge);

        // Edge fade dims the planet and halo only; the ring runs off-frame.
        clamp01(self.ring(dx, dy).max(self.planet(dx, dy) * fade) + self.halo(dx, dy) * fade)
    }
}

/// Ramp index is `floor(v * len)` clamped to the last glyph, so `@` covers `[11/12, 1]`.
pub fn ramp_glyph(value: f32) -> char {
    let last = SATURN_RAMP.len() - 1;
    let idx = (clamp01(value) * SATURN_RAMP.len() as f32).floor() as usize;
    SATURN_RAMP[idx.min(last)]
}

/// Dithered ramp lookup; dither breaks up contour bands in smooth gradients.
pub fn dithered_glyph(value: f32, x: usize, y: usize, size: GridSize, tick: u64) -> char {
    let noise = hash2d(
        x as f64 / size.cols as f64,
        y as f64 / size.rows as f64,
        tick as f64,
    );
    let v = clamp01(value + (noise - 0.5) * DITHER_AMPLITUDE);
    if v < BLANK_CUTOFF {
        return BLANK;
    }
    ramp_glyph(v)
}

// --- Saturn ---

/// Tilted ringed planet with halo, sized from the viewport.
#[derive(Debug, Clone, Copy)]
pub struct Saturn;

impl Generator for Saturn {
    fn mode(&self) -> Mode {
        Mode::Saturn
    }

    fn label(&self) -> &str {
        "// orbital_hero"
    }

    fn note(&self) -> &str {
        "ring system: nominal"
    }

    fn grid_size(&self, viewport: Viewport) -> GridSize {
        GridSize::new(
            (viewport.cols + 2).clamp(56, 280),
            (viewport.rows + 2).clamp(34, 140),
        )
    }

    fn settle(&self, current: GridSize, next: GridSize) -> GridSize {
        settle_grid_size(current, next)
    }

    fn step_delay(&self, size: GridSize) -> Duration {
        match Layout::for_cols(size.cols) {
            Layout::Phone => Duration::from_millis(190),
            _ => Duration::from_millis(220),
        }
    }

    fn build_frame(&mut self, size: GridSize, tick: u64) -> Grid {
        let scene = RingedPlanet::new(size, tick);
        let mut grid = Grid::new(size);

        grid.cells_mut()
            .par_chunks_mut(size.cols)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, cell) in row.iter_mut().enumerate() {
                    let value = scene.intensity(x, y, size);
                    *cell = dithered_glyph(value, x, y, size, tick);
                }
            });

        grid
    }
}
