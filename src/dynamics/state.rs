use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::vehicle::SimulationConfig;

// ---------------------------------------------------------------------------
// Physical constants
// ---------------------------------------------------------------------------

pub const EARTH_RADIUS_KM: f64 = 6_371.0; // mean Earth radius, km
pub const MU_EARTH: f64 = 3.986_004_418e14; // G * M_earth, m^3/s^2

/// Surface gravity consistent with `MU_EARTH` at `EARTH_RADIUS_KM` (~9.82 m/s^2).
pub const EARTH_SURFACE_GRAVITY: f64 =
    MU_EARTH / (EARTH_RADIUS_KM * 1_000.0 * EARTH_RADIUS_KM * 1_000.0);

pub const SPACE_BOUNDARY_KM: f64 = 100.0; // Karman line; drag is zero above it
pub const MAX_STEP_S: f64 = 0.1; // largest dt a single advance will integrate
pub const LIFTOFF_GRACE_S: f64 = 1.0; // no crash detection before this

// ---------------------------------------------------------------------------
// Discrete flight state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    One,
    Two,
}

impl Stage {
    pub fn number(self) -> u8 {
        match self {
            Stage::One => 1,
            Stage::Two => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightPhase {
    Idle,
    Ascending,
    Crashed,
    Orbiting,
    Aborted,
}

impl FlightPhase {
    /// Terminal phases are frozen: `advance` leaves them untouched.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            FlightPhase::Crashed | FlightPhase::Orbiting | FlightPhase::Aborted
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            FlightPhase::Idle => "idle",
            FlightPhase::Ascending => "ascending",
            FlightPhase::Crashed => "crashed",
            FlightPhase::Orbiting => "orbiting",
            FlightPhase::Aborted => "aborted",
        }
    }
}

/// One-way milestone flags. Only a fresh launch starts with them cleared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementSet {
    pub reached_space: bool,
    pub reached_orbit: bool,
    pub completed_mission: bool,
}

// ---------------------------------------------------------------------------
// Rocket state snapshot
// ---------------------------------------------------------------------------

/// Immutable per-tick snapshot of the rocket.
/// Frame: 2D Cartesian, origin at Earth's center, launch pad on +y.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RocketState {
    pub position_km: Vector2<f64>,
    pub velocity_km_s: Vector2<f64>,
    pub acceleration_m_s2: Vector2<f64>,
    pub fuel_tons: f64,
    pub stage: Stage,
    pub mass_tons: f64, // dry mass of `stage` + `fuel_tons`
    pub sim_time_s: f64,
    pub phase: FlightPhase,
    pub achievements: AchievementSet,
    pub max_altitude_km: f64,
}

impl RocketState {
    /// Fully fueled rocket sitting on the pad, waiting for launch.
    pub fn on_pad(config: &SimulationConfig) -> Self {
        let fuel = config.fuel_capacity_tons;
        RocketState {
            position_km: Vector2::new(0.0, EARTH_RADIUS_KM),
            velocity_km_s: Vector2::zeros(),
            acceleration_m_s2: Vector2::zeros(),
            fuel_tons: fuel,
            stage: Stage::One,
            mass_tons: config.mass_tons(Stage::One, fuel),
            sim_time_s: 0.0,
            phase: FlightPhase::Idle,
            achievements: AchievementSet::default(),
            max_altitude_km: 0.0,
        }
    }

    /// Same as `on_pad`, but already ascending with a clean clock.
    pub fn launched(config: &SimulationConfig) -> Self {
        RocketState {
            phase: FlightPhase::Ascending,
            ..Self::on_pad(config)
        }
    }

    pub fn radius_km(&self) -> f64 {
        self.position_km.norm()
    }

    pub fn altitude_km(&self) -> f64 {
        self.radius_km() - EARTH_RADIUS_KM
    }

    pub fn speed_km_s(&self) -> f64 {
        self.velocity_km_s.norm()
    }

    /// Velocity component along the local vertical (positive = climbing).
    pub fn radial_speed_km_s(&self) -> f64 {
        let r = self.radius_km();
        if r > 0.0 {
            self.position_km.dot(&self.velocity_km_s) / r
        } else {
            0.0
        }
    }

    /// Reject snapshots carrying NaN or infinity in any integrated quantity.
    pub fn ensure_finite(&self) -> EngineResult<()> {
        let fields: [(&'static str, bool); 5] = [
            ("position", self.position_km.iter().all(|v| v.is_finite())),
            ("velocity", self.velocity_km_s.iter().all(|v| v.is_finite())),
            (
                "acceleration",
                self.acceleration_m_s2.iter().all(|v| v.is_finite()),
            ),
            ("mass", self.mass_tons.is_finite()),
            ("fuel", self.fuel_tons.is_finite()),
        ];
        match fields.iter().find(|(_, ok)| !ok) {
            Some((quantity, _)) => Err(EngineError::NonFinite {
                quantity: *quantity,
                sim_time_s: self.sim_time_s,
            }),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
