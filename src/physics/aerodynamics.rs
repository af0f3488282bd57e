use nalgebra::Vector2;

use crate::dynamics::state::SPACE_BOUNDARY_KM;

pub const SEA_LEVEL_DENSITY: f64 = 1.225; // kg/m^3
pub const SCALE_HEIGHT_KM: f64 = 7.0;
pub const DRAG_COEFFICIENT: f64 = 0.3;
pub const REFERENCE_AREA_M2: f64 = 0.5;

/// Exponential atmosphere, kg/m^3. Negative altitudes read as sea level.
pub fn air_density(altitude_km: f64, multiplier: f64) -> f64 {
    let h = altitude_km.max(0.0);
    SEA_LEVEL_DENSITY * (-h / SCALE_HEIGHT_KM).exp() * multiplier
}

/// Quadratic drag opposing velocity, N. Zero at and above the space boundary.
pub fn drag_force(velocity_km_s: &Vector2<f64>, altitude_km: f64, multiplier: f64) -> Vector2<f64> {
    if altitude_km >= SPACE_BOUNDARY_KM {
        return Vector2::zeros();
    }
    let speed_m_s = velocity_km_s.norm() * 1_000.0;
    if speed_m_s > 1e-6 {
        let q_dyn = 0.5 * air_density(altitude_km, multiplier) * speed_m_s * speed_m_s;
        let drag_mag = q_dyn * DRAG_COEFFICIENT * REFERENCE_AREA_M2;
        -velocity_km_s.normalize() * drag_mag
    } else {
        Vector2::zeros()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sea_level_density() {
        assert_relative_eq!(air_density(0.0, 1.0), 1.225);
        assert_relative_eq!(air_density(-3.0, 1.0), 1.225);
    }

    #[test]
    fn density_falls_by_e_per_scale_height() {
        assert_relative_eq!(air_density(7.0, 1.0), 1.225 / std::f64::consts::E, max_relative = 1e-12);
    }

    #[test]
    fn multiplier_scales_density() {
        assert_relative_eq!(air_density(10.0, 2.0), 2.0 * air_density(10.0, 1.0));
        assert_eq!(air_density(10.0, 0.0), 0.0);
    }

    #[test]
    fn drag_opposes_velocity() {
        let v = Vector2::new(0.1, 0.3);
        let f = drag_force(&v, 5.0, 1.0);
        assert_relative_eq!(f.normalize().dot(&v.normalize()), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn drag_magnitude_at_sea_level() {
        // 300 m/s straight up: 0.5 * 0.3 * 1.225 * 0.5 * 300^2 = 8268.75 N
        let f = drag_force(&Vector2::new(0.0, 0.3), 0.0, 1.0);
        assert_relative_eq!(f.y, -8_268.75, max_relative = 1e-9);
    }

    #[test]
    fn no_drag_at_rest() {
        assert_eq!(drag_force(&Vector2::zeros(), 0.0, 1.0), Vector2::zeros());
    }

    #[test]
    fn no_drag_in_space() {
        let v = Vector2::new(7.0, 0.0);
        assert_eq!(drag_force(&v, 100.0, 1.0), Vector2::zeros());
        assert!(drag_force(&v, 99.9, 1.0).norm() > 0.0);
    }
}
