use log::{debug, info, trace, warn};

use super::event::{EventKind, FlightEvent, STANDARD_DETECTORS};
use super::integrator::{burn_and_stage, semi_implicit_euler};
use crate::dynamics::state::{FlightPhase, RocketState, LIFTOFF_GRACE_S, MAX_STEP_S};
use crate::error::{EngineError, EngineResult};
use crate::orbital::{mission_complete, orbit_achieved, OrbitalElements};
use crate::vehicle::SimulationConfig;

/// Result of one `advance`: the new snapshot and whatever happened on the way.
#[derive(Debug, Clone)]
pub struct Step {
    pub state: RocketState,
    pub events: Vec<FlightEvent>,
}

/// The ascent engine for one validated configuration.
#[derive(Debug, Clone)]
pub struct Engine {
    config: SimulationConfig,
}

impl Engine {
    pub fn new(config: SimulationConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn on_pad(&self) -> RocketState {
        RocketState::on_pad(&self.config)
    }

    /// Fresh flight: full tank, stage 1, clock and achievements reset.
    pub fn launch(&self) -> RocketState {
        info!(
            "launch: {:.0} kN, {:.1} t fuel, {:.1} deg, TWR {:.2}",
            self.config.thrust_kn,
            self.config.fuel_capacity_tons,
            self.config.launch_angle_deg,
            self.config.twr()
        );
        RocketState::launched(&self.config)
    }

    /// Advance `state` by `dt` seconds (clamped to `MAX_STEP_S`).
    ///
    /// Anything but an ascending rocket comes back unchanged. A step that
    /// produces NaN or infinity is rejected with `NonFinite`; the caller keeps
    /// the state it passed in.
    pub fn advance(&self, state: &RocketState, dt: f64) -> EngineResult<Step> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(EngineError::InvalidTimeStep(dt));
        }
        if state.phase != FlightPhase::Ascending {
            return Ok(Step { state: state.clone(), events: Vec::new() });
        }
        let dt = dt.min(MAX_STEP_S);

        let staged = burn_and_stage(state, &self.config, dt);
        let mut next = semi_implicit_euler(&staged, &self.config, dt);
        next.ensure_finite()?;

        let altitude = next.altitude_km();
        next.max_altitude_km = next.max_altitude_km.max(altitude);

        let mut events: Vec<FlightEvent> = STANDARD_DETECTORS
            .iter()
            .filter_map(|detector| detector.check(state, &next))
            .map(|kind| FlightEvent::new(next.sim_time_s, kind))
            .collect();
        if events.iter().any(|e| e.kind == EventKind::ReachedSpace) {
            next.achievements.reached_space = true;
        }

        // crash first; orbit insertion only counts above ground
        if altitude < 0.0 && next.sim_time_s > LIFTOFF_GRACE_S {
            next.phase = FlightPhase::Crashed;
            events.push(FlightEvent::new(
                next.sim_time_s,
                EventKind::Crashed { max_altitude_km: next.max_altitude_km },
            ));
        } else if altitude >= 0.0 {
            let mu = self.config.mu();
            let elements = OrbitalElements::from_state_mu(&next, mu)?;
            let criteria = &self.config.orbit;
            if orbit_achieved(&elements, next.radius_km(), mu, criteria) {
                next.phase = FlightPhase::Orbiting;
                next.achievements.reached_orbit = true;
                events.push(FlightEvent::new(
                    next.sim_time_s,
                    EventKind::OrbitAchieved {
                        apogee_km: elements.apogee_km,
                        perigee_km: elements.perigee_km,
                    },
                ));
                if mission_complete(&elements, self.config.target_altitude_km, criteria) {
                    next.achievements.completed_mission = true;
                    events.push(FlightEvent::new(next.sim_time_s, EventKind::MissionComplete));
                }
            }
        }

        trace!(
            "t={:.2}s alt={:.3}km v={:.3}km/s fuel={:.2}t stage={}",
            next.sim_time_s,
            altitude,
            next.speed_km_s(),
            next.fuel_tons,
            next.stage.number()
        );
        for event in &events {
            match event.kind {
                EventKind::Crashed { .. } | EventKind::Staging { .. } => warn!("{}", event),
                EventKind::Apogee { .. } => debug!("{}", event),
                _ => info!("{}", event),
            }
        }

        Ok(Step { state: next, events })
    }

    /// Orbit of a snapshot under this configuration's gravity.
    pub fn orbital_elements(&self, state: &RocketState) -> EngineResult<OrbitalElements> {
        OrbitalElements::from_state_mu(state, self.config.mu())
    }
}

// ---------------------------------------------------------------------------
// Free-function host interface
// ---------------------------------------------------------------------------

/// Validate `config` and return the launched state.
pub fn launch(config: &SimulationConfig) -> EngineResult<RocketState> {
    config.validate()?;
    Ok(RocketState::launched(config))
}

/// Orbit of any snapshot, frozen ones included, under standard Earth gravity.
pub fn compute_orbital_elements(state: &RocketState) -> EngineResult<OrbitalElements> {
    OrbitalElements::from_state(state)
}

/// Force the flight into `Aborted`. Already-terminal states are returned as-is.
pub fn abort(state: &RocketState) -> RocketState {
    if state.phase.is_terminal() {
        return state.clone();
    }
    warn!("abort at t={:.2}s, altitude {:.2} km", state.sim_time_s, state.altitude_km());
    RocketState { phase: FlightPhase::Aborted, ..state.clone() }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
