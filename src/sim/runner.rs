use std::mem;

use log::error;
use serde::Serialize;

use super::engine::{abort, Engine};
use super::event::{EventKind, FlightEvent};
use crate::dynamics::state::{FlightPhase, RocketState, MAX_STEP_S};
use crate::error::{EngineError, EngineResult};
use crate::orbital::OrbitalElements;
use crate::vehicle::SimulationConfig;

const TRAJECTORY_PREALLOC: usize = 200_000; // snapshots reserved up front, at most

// ---------------------------------------------------------------------------
// Frame-driven host helper
// ---------------------------------------------------------------------------

/// One flight attempt as seen by a frame-driven host.
///
/// Keeps the current and previous snapshots (for interpolation), the event
/// log, and a latched numerical fault. After a fault every `tick` fails
/// until the next `launch`.
#[derive(Debug)]
pub struct Flight {
    engine: Engine,
    state: RocketState,
    previous: RocketState,
    log: Vec<FlightEvent>,
    fault: Option<String>,
}

impl Flight {
    /// Validates `config` and parks the rocket on the pad.
    pub fn new(config: SimulationConfig) -> EngineResult<Self> {
        let engine = Engine::new(config)?;
        let state = engine.on_pad();
        Ok(Self {
            engine,
            previous: state.clone(),
            state,
            log: Vec::new(),
            fault: None,
        })
    }

    pub fn launch(&mut self) {
        self.state = self.engine.launch();
        self.previous = self.state.clone();
        self.log.clear();
        self.fault = None;
        self.log.push(FlightEvent::new(0.0, EventKind::Launch));
    }

    /// Advance by one frame's worth of time, at most `MAX_STEP_S`.
    /// Returns the events raised by this tick.
    pub fn tick(&mut self, frame_dt: f64) -> EngineResult<&[FlightEvent]> {
        if let Some(cause) = &self.fault {
            return Err(EngineError::Halted { cause: cause.clone() });
        }

        let step = match self.engine.advance(&self.state, frame_dt) {
            Ok(step) => step,
            Err(err @ EngineError::NonFinite { .. }) => {
                error!("flight halted: {}", err);
                self.fault = Some(err.to_string());
                return Err(err);
            }
            Err(err) => return Err(err),
        };

        self.previous = mem::replace(&mut self.state, step.state);
        let start = self.log.len();
        self.log.extend(step.events);
        Ok(&self.log[start..])
    }

    pub fn abort(&mut self) {
        if self.state.phase.is_terminal() {
            return;
        }
        self.previous = self.state.clone();
        self.state = abort(&self.state);
        self.log.push(FlightEvent::new(self.state.sim_time_s, EventKind::Aborted));
    }

    pub fn is_running(&self) -> bool {
        self.state.phase == FlightPhase::Ascending && self.fault.is_none()
    }

    pub fn state(&self) -> &RocketState {
        &self.state
    }

    pub fn previous(&self) -> &RocketState {
        &self.previous
    }

    pub fn events(&self) -> &[FlightEvent] {
        &self.log
    }

    pub fn fault(&self) -> Option<&str> {
        self.fault.as_deref()
    }

    pub fn config(&self) -> &SimulationConfig {
        self.engine.config()
    }

    pub fn elements(&self) -> EngineResult<OrbitalElements> {
        self.engine.orbital_elements(&self.state)
    }
}

// ---------------------------------------------------------------------------
// Batch flight
// ---------------------------------------------------------------------------

/// Every snapshot and event of one complete flight.
#[derive(Debug, Clone, Serialize)]
pub struct FlightRecord {
    pub config: SimulationConfig,
    pub dt: f64,
    pub trajectory: Vec<RocketState>,
    pub events: Vec<FlightEvent>,
    pub final_state: RocketState,
}

/// Fly from launch until a terminal phase or `max_time_s`, whichever first.
///
/// `max_time_s` may be infinite to run until the flight ends on its own; a
/// rocket that escapes or never falls back then keeps the loop going.
pub fn simulate(config: &SimulationConfig, dt: f64, max_time_s: f64) -> EngineResult<FlightRecord> {
    if !(dt > 0.0) || !dt.is_finite() {
        return Err(EngineError::InvalidTimeStep(dt));
    }
    if !(max_time_s >= 0.0) {
        return Err(EngineError::config(
            "max_time_s",
            format!("must be non-negative, got {}", max_time_s),
        ));
    }
    let engine = Engine::new(config.clone())?;
    let mut state = engine.launch();

    let capacity = (max_time_s / dt).min(TRAJECTORY_PREALLOC as f64) as usize + 1;
    let mut trajectory = Vec::with_capacity(capacity);
    let mut events = vec![FlightEvent::new(0.0, EventKind::Launch)];
    trajectory.push(state.clone());

    while state.sim_time_s < max_time_s && state.phase == FlightPhase::Ascending {
        let step = engine.advance(&state, dt)?;
        state = step.state;
        events.extend(step.events);
        trajectory.push(state.clone());
    }

    Ok(FlightRecord {
        config: config.clone(),
        dt: dt.min(MAX_STEP_S),
        trajectory,
        events,
        final_state: state,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
