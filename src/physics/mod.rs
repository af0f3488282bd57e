//! Force model: thrust, gravity and drag on the point-mass rocket.
//!
//! Everything here is a pure function of `(state, config)` and returns
//! newtons in the same 2D Earth-centered frame as the state.

pub mod aerodynamics;
pub mod gravity;
pub mod thrust;

use nalgebra::Vector2;

use crate::dynamics::state::RocketState;
use crate::vehicle::SimulationConfig;

/// The three forces acting on the rocket at one instant, N.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Forces {
    pub thrust: Vector2<f64>,
    pub gravity: Vector2<f64>,
    pub drag: Vector2<f64>,
}

impl Forces {
    pub fn net(&self) -> Vector2<f64> {
        self.thrust + self.gravity + self.drag
    }
}

/// Evaluate the force model for the given state.
pub fn net_force(state: &RocketState, config: &SimulationConfig) -> Forces {
    let altitude = state.altitude_km();
    let mass_kg = state.mass_tons * 1_000.0;

    Forces {
        thrust: thrust::thrust_force(state, config.thrust_kn, config.launch_angle_deg),
        gravity: gravity::gravity_force(&state.position_km, mass_kg, config.mu()),
        drag: aerodynamics::drag_force(&state.velocity_km_s, altitude, config.density_multiplier),
    }
}
