use nalgebra::Vector2;

/// Inverse-square gravity force on a point mass, N.
///
/// `position_km` is measured from Earth's center; the force points back at
/// the origin with magnitude `mu * m / r^2`. Returns zero within 1 m of the
/// center so a degenerate state never turns into NaN.
pub fn gravity_force(position_km: &Vector2<f64>, mass_kg: f64, mu: f64) -> Vector2<f64> {
    let r_m = position_km.norm() * 1_000.0;
    if r_m < 1.0 {
        return Vector2::zeros();
    }
    let magnitude = mu * mass_kg / (r_m * r_m);
    -position_km.normalize() * magnitude
}

/// Local gravitational acceleration magnitude, m/s^2.
pub fn gravity_accel(radius_km: f64, mu: f64) -> f64 {
    let r_m = radius_km * 1_000.0;
    if r_m < 1.0 {
        0.0
    } else {
        mu / (r_m * r_m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::state::{EARTH_RADIUS_KM, EARTH_SURFACE_GRAVITY, MU_EARTH};
    use approx::assert_relative_eq;

    #[test]
    fn surface_weight() {
        let f = gravity_force(&Vector2::new(0.0, EARTH_RADIUS_KM), 1_000.0, MU_EARTH);
        assert_relative_eq!(f.y, -1_000.0 * EARTH_SURFACE_GRAVITY, max_relative = 1e-12);
        assert!(f.x.abs() < 1e-9);
    }

    #[test]
    fn points_at_center() {
        let pos = Vector2::new(4_000.0, -5_500.0);
        let f = gravity_force(&pos, 500.0, MU_EARTH);
        // anti-parallel to position
        assert_relative_eq!(f.normalize().dot(&pos.normalize()), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn gravity_decreases_with_altitude() {
        let g0 = gravity_accel(EARTH_RADIUS_KM, MU_EARTH);
        let g400 = gravity_accel(EARTH_RADIUS_KM + 400.0, MU_EARTH);
        assert!(g400 < g0);
        assert!(g400 > 8.0 && g400 < 9.0, "LEO gravity ~8.7 m/s^2, got {}", g400);
    }

    #[test]
    fn center_is_guarded() {
        let f = gravity_force(&Vector2::zeros(), 1_000.0, MU_EARTH);
        assert_eq!(f, Vector2::zeros());
        assert_eq!(gravity_accel(0.0, MU_EARTH), 0.0);
    }
}
