use crate::math::Vec3;
use crate::render::grid::GridSize;

/// Projection factor for the reference 60x30 globe frame.
pub const BASE_PROJECTION: f32 = 40.0;
pub const BASE_ROWS: f32 = 30.0;
pub const CAMERA_OFFSET: f32 = 2.5;
/// Character cells are roughly twice as tall as they are wide.
pub const ASPECT_STRETCH: f32 = 1.8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: isize,
    pub y: isize,
    /// One over camera depth; larger is nearer.
    pub inv_depth: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub offset: f32,
    pub scale: f32,
    pub aspect_stretch: f32,
    half_w: f32,
    half_h: f32,
}

impl Camera {
    pub fn for_grid(size: GridSize) -> Self {
        Self {
            offset: CAMERA_OFFSET,
            scale: BASE_PROJECTION * size.rows as f32 / BASE_ROWS,
            aspect_stretch: ASPECT_STRETCH,
            half_w: size.cols as f32 * 0.5,
            half_h: size.rows as f32 * 0.5,
        }
    }

    pub fn project(&self, point: Vec3) -> Option<ScreenPoint> {
        let depth = point.z + self.offset;
        if depth <= 1e-5 {
            return None;
        }
        let inv_depth = 1.0 / depth;
        let sx = self.half_w + self.scale * inv_depth * point.x * self.aspect_stretch;
        let sy = self.half_h - self.scale * inv_depth * point.y;
        if !sx.is_finite() || !sy.is_finite() {
            return None;
        }
        Some(ScreenPoint {
            x: sx.floor() as isize,
            y: sy.floor() as isize,
            inv_depth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_projects_to_grid_center() {
        let cam = Camera::for_grid(GridSize::new(10, 5));
        let p = cam.project(Vec3::ZERO).expect("origin is in front of the camera");
        assert_eq!((p.x, p.y), (5, 2));
    }

    #[test]
    fn nearer_points_have_larger_inverse_depth() {
        let cam = Camera::for_grid(GridSize::new(60, 30));
        let near = cam.project(Vec3::new(0.0, 0.0, -1.0)).expect("near");
        let far = cam.project(Vec3::new(0.0, 0.0, 1.0)).expect("far");
        assert!(near.inv_depth > far.inv_depth);
    }

    #[test]
    fn projection_scale_tracks_grid_height() {
        assert_eq!(Camera::for_grid(GridSize::new(60, 30)).scale, 40.0);
        assert_eq!(Camera::for_grid(GridSize::new(30, 15)).scale, 20.0);
    }

    #[test]
    fn points_behind_camera_are_dropped() {
        let cam = Camera::for_grid(GridSize::new(60, 30));
        assert!(cam.project(Vec3::new(0.0, 0.0, -3.0)).is_none());
    }
}
