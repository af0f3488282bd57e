use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dynamics::state::{RocketState, Stage, SPACE_BOUNDARY_KM};

// ---------------------------------------------------------------------------
// Flight events
// ---------------------------------------------------------------------------

/// Kinds of flight events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    Launch,
    Staging { from: u8, to: u8 },
    FuelDepleted,
    ReachedSpace,
    Apogee { altitude_km: f64 },
    OrbitAchieved { apogee_km: f64, perigee_km: f64 },
    MissionComplete,
    Crashed { max_altitude_km: f64 },
    Aborted,
}

/// A discrete event raised during a flight, stamped with simulation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightEvent {
    pub time_s: f64,
    pub kind: EventKind,
}

impl FlightEvent {
    pub fn new(time_s: f64, kind: EventKind) -> Self {
        Self { time_s, kind }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Launch => write!(f, "Liftoff"),
            EventKind::Staging { from, to } => write!(f, "Stage {} separation, stage {} active", from, to),
            EventKind::FuelDepleted => write!(f, "Propellant depleted, coasting"),
            EventKind::ReachedSpace => write!(f, "Crossed the Karman line ({:.0} km)", SPACE_BOUNDARY_KM),
            EventKind::Apogee { altitude_km } => write!(f, "Apogee at {:.1} km", altitude_km),
            EventKind::OrbitAchieved { apogee_km, perigee_km } => write!(
                f,
                "Orbit achieved ({:.0} x {:.0} km)",
                apogee_km, perigee_km
            ),
            EventKind::MissionComplete => write!(f, "Target orbit reached, mission complete"),
            EventKind::Crashed { max_altitude_km } => {
                write!(f, "Crashed after reaching {:.1} km", max_altitude_km)
            }
            EventKind::Aborted => write!(f, "Flight aborted"),
        }
    }
}

impl fmt::Display for FlightEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T+{:>7.2}s  {}", self.time_s, self.kind)
    }
}

// ---------------------------------------------------------------------------
// Detectors
// ---------------------------------------------------------------------------

/// Passive detector over two consecutive snapshots.
pub trait EventDetector {
    fn check(&self, prev: &RocketState, current: &RocketState) -> Option<EventKind>;
}

/// Stage 1 -> 2 transition.
pub struct StagingDetector;

impl EventDetector for StagingDetector {
    fn check(&self, prev: &RocketState, current: &RocketState) -> Option<EventKind> {
        if prev.stage == Stage::One && current.stage == Stage::Two {
            Some(EventKind::Staging { from: 1, to: 2 })
        } else {
            None
        }
    }
}

/// Tank runs dry.
pub struct FuelDepletionDetector;

impl EventDetector for FuelDepletionDetector {
    fn check(&self, prev: &RocketState, current: &RocketState) -> Option<EventKind> {
        if prev.fuel_tons > 0.0 && current.fuel_tons <= 0.0 {
            Some(EventKind::FuelDepleted)
        } else {
            None
        }
    }
}

/// First crossing of the space boundary. Fires once per flight because the
/// achievement flag is carried forward in the snapshot.
pub struct SpaceBoundaryDetector;

impl EventDetector for SpaceBoundaryDetector {
    fn check(&self, _prev: &RocketState, current: &RocketState) -> Option<EventKind> {
        if !current.achievements.reached_space && current.altitude_km() >= SPACE_BOUNDARY_KM {
            Some(EventKind::ReachedSpace)
        } else {
            None
        }
    }
}

/// Radial velocity going from climbing to falling.
pub struct ApogeeDetector;

impl EventDetector for ApogeeDetector {
    fn check(&self, prev: &RocketState, current: &RocketState) -> Option<EventKind> {
        if prev.radial_speed_km_s() > 0.0
            && current.radial_speed_km_s() <= 0.0
            && current.altitude_km() > 0.0
        {
            Some(EventKind::Apogee { altitude_km: current.altitude_km() })
        } else {
            None
        }
    }
}

/// Detectors run by the engine after every step, in reporting order.
pub const STANDARD_DETECTORS: [&dyn EventDetector; 4] = [
    &StagingDetector,
    &FuelDepletionDetector,
    &SpaceBoundaryDetector,
    &ApogeeDetector,
];
