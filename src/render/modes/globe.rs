use std::f32::consts::TAU;
use std::time::Duration;

use super::{GLOBE_AMBIENT, GLOBE_RAMP};
use crate::camera::Camera;
use crate::math::Vec3;
use crate::render::grid::{map_intensity_to_glyph, Grid, GridSize};
use crate::render::pipeline::Viewport;
use crate::render::{Generator, Mode};
use crate::sphere::{generate_sphere_points, ANGULAR_STEP};

/// Ticks per full revolution (about 0.015 rad per tick).
pub const SPIN_PERIOD_TICKS: u64 = 420;
pub const DEFAULT_LIGHT: Vec3 = Vec3::new(0.5, -0.5, -1.0);
pub const FRAME_DELAY: Duration = Duration::from_millis(16);

// --- Globe ---

/// Rotating unit sphere, z-buffered at cell granularity and lit by one directional light.
#[derive(Debug, Clone)]
pub struct Globe {
    points: Vec<Vec3>,
    light: Vec3,
    depth_buffer: Vec<f32>,
}

impl Default for Globe {
    fn default() -> Self {
        Self::new(generate_sphere_points(ANGULAR_STEP), DEFAULT_LIGHT)
    }
}

impl Globe {
    pub fn new(points: Vec<Vec3>, light: Vec3) -> Self {
        Self {
            points,
            light: light.normalize(),
            depth_buffer: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn rotation_angle(tick: u64) -> f32 {
        TAU * (tick % SPIN_PERIOD_TICKS) as f32 / SPIN_PERIOD_TICKS as f32
    }

    fn shade(&self, normal: Vec3) -> char {
        let lambert = normal.dot(self.light);
        if lambert > 0.0 {
            map_intensity_to_glyph(GLOBE_RAMP, lambert)
        } else {
            GLOBE_AMBIENT
        }
    }
}

impl Generator for Globe {
    fn mode(&self) -> Mode {
        Mode::Globe
    }

    fn label(&self) -> &str {
        "// global_systems"
    }

    fn note(&self) -> &str {
        "projection: orthographic"
    }

    fn grid_size(&self, viewport: Viewport) -> GridSize {
        let rows = viewport.rows.clamp(10, 30);
        GridSize::new(rows * 2, rows)
    }

    fn step_delay(&self, _size: GridSize) -> Duration {
        FRAME_DELAY
    }

    fn build_frame(&mut self, size: GridSize, tick: u64) -> Grid {
        let mut grid = Grid::new(size);
        let camera = Camera::for_grid(size);
        let angle = Self::rotation_angle(tick);

        self.depth_buffer.clear();
        self.depth_buffer.resize(size.cell_count(), f32::NEG_INFINITY);

        for &point in &self.points {
            // On a unit sphere the rotated position doubles as the surface normal.
            let rotated = point.rotate_y(angle);
            let Some(screen) = camera.project(rotated) else {
                continue;
            };
            let Some(idx) = grid.index_of(screen.x, screen.y) else {
                continue;
            };
            if screen.inv_depth <= self.depth_buffer[idx] {
                continue;
            }
            self.depth_buffer[idx] = screen.inv_depth;
            grid.cells_mut()[idx] = self.shade(rotated);
        }

        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::grid::BLANK;

    fn lit_cells(grid: &Grid) -> Vec<usize> {
        grid.cells()
            .iter()
            .enumerate()
            .filter(|(_, &c)| c != BLANK)
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn full_revolution_repeats_frame() {
        let mut globe = Globe::default();
        let size = GridSize::new(60, 30);
        let first = globe.build_frame(size, 0);
        let again = globe.build_frame(size, SPIN_PERIOD_TICKS);
        assert_eq!(lit_cells(&first), lit_cells(&again));
        assert_eq!(first, again);
        assert!(!lit_cells(&first).is_empty());
    }

    #[test]
    fn rotation_changes_frame_mid_period() {
        let mut globe = Globe::default();
        let size = GridSize::new(60, 30);
        assert_ne!(globe.build_frame(size, 0), globe.build_frame(size, 37));
    }

    #[test]
    fn single_facing_point_renders_brightest_glyph_at_center() {
        let toward_viewer = Vec3::new(0.0, 0.0, -1.0);
        let mut globe = Globe::new(vec![toward_viewer], toward_viewer);
        let grid = globe.build_frame(GridSize::new(10, 5), 0);

        assert_eq!(grid.get(5, 2), Some('@'));
        assert_eq!(lit_cells(&grid), vec![2 * 10 + 5]);
    }

    #[test]
    fn nearer_point_wins_regardless_of_order() {
        let near = Vec3::new(0.0, 0.0, -1.0);
        let far = Vec3::new(0.0, 0.0, 1.0);
        let light = Vec3::new(0.0, 0.0, -1.0);
        let size = GridSize::new(10, 5);

        let mut near_first = Globe::new(vec![near, far], light);
        let mut far_first = Globe::new(vec![far, near], light);
        let a = near_first.build_frame(size, 0);
        let b = far_first.build_frame(size, 0);

        assert_eq!(a.get(5, 2), Some('@'));
        assert_eq!(a, b);
    }

    #[test]
    fn back_lit_points_use_ambient_glyph() {
        let p = Vec3::new(0.0, 0.0, -1.0);
        let mut globe = Globe::new(vec![p], Vec3::new(0.0, 0.0, 1.0));
        let grid = globe.build_frame(GridSize::new(10, 5), 0);
        assert_eq!(grid.get(5, 2), Some(GLOBE_AMBIENT));
    }

    #[test]
    fn resize_keeps_point_set() {
        let mut globe = Globe::default();
        let count = globe.point_count();
        globe.build_frame(GridSize::new(60, 30), 3);
        globe.build_frame(GridSize::new(24, 12), 4);
        assert_eq!(globe.point_count(), count);
    }

    #[test]
    fn grid_follows_viewport_height() {
        let globe = Globe::default();
        assert_eq!(globe.grid_size(Viewport::new(110, 36)), GridSize::new(60, 30));
        assert_eq!(globe.grid_size(Viewport::new(80, 20)), GridSize::new(40, 20));
        assert_eq!(globe.grid_size(Viewport::new(80, 2)), GridSize::new(20, 10));
    }
}
