//! Two-stage rocket ascent on a flat 2-D slice through Earth's center.
//!
//! A host owns the [`RocketState`] and calls [`Engine::advance`] once per
//! frame; the engine never keeps hidden state between calls.

pub mod dynamics;
pub mod error;
pub mod io;
pub mod orbital;
pub mod physics;
pub mod sim;
pub mod vehicle;

pub use dynamics::{AchievementSet, FlightPhase, RocketState, Stage};
pub use error::{EngineError, EngineResult};
pub use orbital::{OrbitalElements, TrajectoryKind};
pub use sim::{abort, compute_orbital_elements, launch, simulate, Engine, EventKind, Flight, FlightEvent, Step};
pub use vehicle::{presets, SimulationConfig, SimulationConfigBuilder};
