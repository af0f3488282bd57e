use nalgebra::Vector2;

use crate::dynamics::state::{RocketState, Stage};
use crate::physics;
use crate::vehicle::SimulationConfig;

// ---------------------------------------------------------------------------
// Propellant and staging bookkeeping
// ---------------------------------------------------------------------------

/// Advance the clock, separate stage 1 when its time comes, burn propellant
/// and recompute mass. Position and velocity are left alone.
pub fn burn_and_stage(state: &RocketState, config: &SimulationConfig, dt: f64) -> RocketState {
    let sim_time_s = state.sim_time_s + dt;

    let stage = if state.stage == Stage::One && sim_time_s >= config.stage_time_s {
        Stage::Two
    } else {
        state.stage
    };

    let fuel_tons = (state.fuel_tons - config.burn_rate_tons_per_s * dt).max(0.0);

    RocketState {
        sim_time_s,
        stage,
        fuel_tons,
        mass_tons: config.mass_tons(stage, fuel_tons),
        ..state.clone()
    }
}

// ---------------------------------------------------------------------------
// Semi-implicit (symplectic) Euler
// ---------------------------------------------------------------------------

/// Single step: velocity first, then position with the *new* velocity.
pub fn semi_implicit_euler(state: &RocketState, config: &SimulationConfig, dt: f64) -> RocketState {
    let forces = physics::net_force(state, config);
    let mass_kg = state.mass_tons * 1_000.0;
    let acceleration = if mass_kg > 0.0 {
        forces.net() / mass_kg
    } else {
        Vector2::zeros()
    };

    // m/s^2 -> km/s^2
    let velocity = state.velocity_km_s + acceleration * (dt / 1_000.0);
    let position = state.position_km + velocity * dt;

    RocketState {
        position_km: position,
        velocity_km_s: velocity,
        acceleration_m_s2: acceleration,
        ..state.clone()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::state::{EARTH_RADIUS_KM, MU_EARTH};
    use crate::orbital::OrbitalElements;
    use approx::assert_relative_eq;

    #[test]
    fn fuel_clamps_at_zero() {
        let config = SimulationConfig::default();
        let s = RocketState { fuel_tons: 0.5, ..RocketState::launched(&config) };
        let next = burn_and_stage(&s, &config, 0.1); // burns 2 t
        assert_eq!(next.fuel_tons, 0.0);
        assert_relative_eq!(next.mass_tons, config.stage1_dry_mass_tons);
    }

    #[test]
    fn stage_flips_at_separation_time() {
        let config = SimulationConfig::default();
        let s = RocketState { sim_time_s: 119.95, ..RocketState::launched(&config) };
        let next = burn_and_stage(&s, &config, 0.05);
        assert_eq!(next.stage, Stage::Two);
        assert_relative_eq!(next.mass_tons, config.stage2_dry_mass_tons + next.fuel_tons);

        let early = burn_and_stage(&RocketState { sim_time_s: 119.0, ..s }, &config, 0.05);
        assert_eq!(early.stage, Stage::One);
    }

    #[test]
    fn first_step_lifts_off() {
        let config = SimulationConfig::default();
        let s0 = RocketState::launched(&config);
        let s1 = semi_implicit_euler(&burn_and_stage(&s0, &config, 0.05), &config, 0.05);
        assert!(s1.velocity_km_s.y > 0.0);
        assert!(s1.altitude_km() > 0.0);
        assert!(s1.acceleration_m_s2.y > 0.0);
    }

    #[test]
    fn position_uses_updated_velocity() {
        // from rest, semi-implicit Euler moves the rocket in the very first step
        let config = SimulationConfig::default();
        let s0 = RocketState::launched(&config);
        let s1 = semi_implicit_euler(&s0, &config, 0.1);
        let moved = s1.position_km - s0.position_km;
        assert!(s1.velocity_km_s.y > 0.0);
        assert_relative_eq!(moved, s1.velocity_km_s * 0.1, epsilon = 1e-9);
    }

    #[test]
    fn circular_orbit_stays_bounded_for_one_period() {
        // pure coast: no fuel, no drag above 100 km
        let config = SimulationConfig::default();
        let r = EARTH_RADIUS_KM + 400.0;
        let v = (MU_EARTH / (r * 1_000.0)).sqrt() / 1_000.0;
        let mut s = RocketState {
            position_km: Vector2::new(r, 0.0),
            velocity_km_s: Vector2::new(0.0, v),
            fuel_tons: 0.0,
            mass_tons: config.stage2_dry_mass_tons,
            stage: Stage::Two,
            ..RocketState::launched(&config)
        };
        let period = OrbitalElements::from_state(&s).unwrap().period_min * 60.0;
        let steps = (period / 0.1) as usize;
        for _ in 0..steps {
            s = semi_implicit_euler(&s, &config, 0.1);
        }
        let alt = s.altitude_km();
        assert!((alt - 400.0).abs() < 5.0, "altitude drifted to {:.2} km", alt);
    }
}
