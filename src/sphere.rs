use std::f32::consts::{FRAC_PI_2, TAU};

use crate::math::Vec3;

pub const ANGULAR_STEP: f32 = 0.15;
/// Keeps the longitude step finite at the poles.
pub const POLE_BIAS: f32 = 0.05;

// --- Unit-sphere sampling ---

/// Latitude bands at a fixed step; longitude step widens towards the poles
/// as `step / (cos(lat) + 0.05)` so density stays roughly even.
pub fn generate_sphere_points(step: f32) -> Vec<Vec3> {
    let step = step.max(1e-3);
    let mut points = Vec::new();

    let mut lat = -FRAC_PI_2;
    while lat <= FRAC_PI_2 {
        let ring = lat.cos();
        let y = lat.sin();
        let lon_step = step / (ring + POLE_BIAS);

        let mut lon = 0.0_f32;
        while lon <= TAU {
            points.push(Vec3::new(ring * lon.cos(), y, ring * lon.sin()));
            lon += lon_step;
        }
        lat += step;
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_lie_on_unit_sphere() {
        let points = generate_sphere_points(ANGULAR_STEP);
        assert!(!points.is_empty());
        for p in &points {
            assert!((p.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn equator_band_is_denser_than_polar_band() {
        let points = generate_sphere_points(ANGULAR_STEP);
        let equator = points.iter().filter(|p| p.y.abs() < 0.08).count();
        let polar = points.iter().filter(|p| p.y.abs() > 0.99).count();
        assert!(equator > polar * 4, "equator={equator} polar={polar}");
    }

    #[test]
    fn sampling_is_deterministic() {
        assert_eq!(
            generate_sphere_points(ANGULAR_STEP),
            generate_sphere_points(ANGULAR_STEP)
        );
    }
}
