use std::ops::Mul;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    pub fn normalize(self) -> Self {
        let len = self.length();
        if len <= 1e-8 {
            return Self::ZERO;
        }
        self * (1.0 / len)
    }

    /// Rotation about the vertical (Y) axis.
    pub fn rotate_y(self, angle: f32) -> Self {
        let (sin_a, cos_a) = angle.sin_cos();
        Self::new(
            self.x * cos_a - self.z * sin_a,
            self.y,
            self.x * sin_a + self.z * cos_a,
        )
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Clamps to [0, 1]; NaN collapses to 0.
pub fn clamp01(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

pub fn smoothstep(edge0: f32, edge1: f32, value: f32) -> f32 {
    if edge0 == edge1 {
        return if value < edge0 { 0.0 } else { 1.0 };
    }
    let t = clamp01((value - edge0) / (edge1 - edge0));
    t * t * (3.0 - 2.0 * t)
}

fn fract(value: f64) -> f64 {
    value - value.floor()
}

/// Deterministic value noise in [0, 1) keyed on a normalized cell position and a seed.
pub fn hash2d(x: f64, y: f64, seed: f64) -> f32 {
    fract((x * 127.1 + y * 311.7 + seed * 67.9).sin() * 43758.5453) as f32
}

/// Per-cell grain keyed on integer cell coordinates and tick.
pub fn cell_noise(x: usize, y: usize, tick: u64) -> f32 {
    let n = (x as f64 * 12.9898 + y as f64 * 78.233 + tick as f64 * 0.0812).sin() * 43758.5453;
    fract(n) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotate_y_quarter_turn_moves_x_into_z() {
        let p = Vec3::new(1.0, 0.5, 0.0).rotate_y(std::f32::consts::FRAC_PI_2);
        assert!(p.x.abs() < 1e-6);
        assert!((p.y - 0.5).abs() < 1e-6);
        assert!((p.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn smoothstep_saturates_outside_edges() {
        assert_eq!(smoothstep(0.2, 0.4, 0.0), 0.0);
        assert_eq!(smoothstep(0.2, 0.4, 1.0), 1.0);
        assert!((smoothstep(0.2, 0.4, 0.3) - 0.5).abs() < 1e-6);
        assert_eq!(smoothstep(0.5, 0.5, 0.4), 0.0);
        assert_eq!(smoothstep(0.5, 0.5, 0.5), 1.0);
    }

    #[test]
    fn noise_helpers_stay_in_unit_range() {
        for i in 0..200u64 {
            let h = hash2d(i as f64 * 0.37, i as f64 * 0.11, i as f64);
            assert!((0.0..1.0).contains(&h));
            let n = cell_noise(i as usize, (i * 3) as usize, i);
            assert!((0.0..1.0).contains(&n));
        }
    }

    #[test]
    fn clamp01_handles_nan() {
        assert_eq!(clamp01(f32::NAN), 0.0);
        assert_eq!(clamp01(-3.0), 0.0);
        assert_eq!(clamp01(7.0), 1.0);
    }
}
