use nalgebra::Vector2;

use crate::dynamics::state::RocketState;

/// Below this speed the engine follows the pitch program, above it thrust is prograde.
pub const PROGRADE_SPEED_KM_S: f64 = 1.0;

/// Programmed pitch above the local horizontal, degrees.
/// Tilts one degree toward horizontal per 5 km of altitude, never below zero.
pub fn programmed_pitch_deg(launch_angle_deg: f64, altitude_km: f64) -> f64 {
    (launch_angle_deg - altitude_km / 5.0).max(0.0)
}

/// Unit thrust direction for the current state.
///
/// Slow: programmed pitch in the local (horizontal, up) frame, a crude
/// gravity turn. Fast: snap to the velocity vector.
pub fn thrust_direction(state: &RocketState, launch_angle_deg: f64) -> Vector2<f64> {
    let speed = state.speed_km_s();
    if speed >= PROGRADE_SPEED_KM_S {
        return state.velocity_km_s / speed;
    }

    let r = state.radius_km();
    let up = if r > 0.0 {
        state.position_km / r
    } else {
        Vector2::y()
    };
    let horizontal = Vector2::new(up.y, -up.x); // +x at the pad
    let pitch = programmed_pitch_deg(launch_angle_deg, state.altitude_km()).to_radians();
    horizontal * pitch.cos() + up * pitch.sin()
}

/// Thrust force, N. Zero once the tank is empty.
pub fn thrust_force(state: &RocketState, thrust_kn: f64, launch_angle_deg: f64) -> Vector2<f64> {
    if state.fuel_tons <= 0.0 {
        return Vector2::zeros();
    }
    thrust_direction(state, launch_angle_deg) * (thrust_kn * 1_000.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::state::EARTH_RADIUS_KM;
    use crate::vehicle::SimulationConfig;
    use approx::assert_relative_eq;

    fn pad_state() -> RocketState {
        RocketState::launched(&SimulationConfig::default())
    }

    #[test]
    fn pitch_program_flattens_with_altitude() {
        assert_relative_eq!(programmed_pitch_deg(89.0, 0.0), 89.0);
        assert_relative_eq!(programmed_pitch_deg(89.0, 50.0), 79.0);
        assert_relative_eq!(programmed_pitch_deg(89.0, 1_000.0), 0.0);
    }

    #[test]
    fn vertical_launch_points_up() {
        let d = thrust_direction(&pad_state(), 90.0);
        assert_relative_eq!(d.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(d.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn tilted_launch_leans_downrange() {
        let d = thrust_direction(&pad_state(), 45.0);
        assert_relative_eq!(d.x, d.y, epsilon = 1e-12);
        assert!(d.x > 0.0);
    }

    #[test]
    fn fast_rocket_thrusts_prograde() {
        let s = RocketState {
            position_km: Vector2::new(0.0, EARTH_RADIUS_KM + 80.0),
            velocity_km_s: Vector2::new(2.0, 1.0),
            ..pad_state()
        };
        let d = thrust_direction(&s, 89.0);
        assert_relative_eq!(d, Vector2::new(2.0, 1.0).normalize(), epsilon = 1e-12);
    }

    #[test]
    fn no_thrust_without_fuel() {
        let s = RocketState { fuel_tons: 0.0, ..pad_state() };
        assert_eq!(thrust_force(&s, 5_000.0, 89.0), Vector2::zeros());
    }

    #[test]
    fn thrust_magnitude_in_newtons() {
        let f = thrust_force(&pad_state(), 5_000.0, 89.0);
        assert_relative_eq!(f.norm(), 5.0e6, max_relative = 1e-12);
    }
}
