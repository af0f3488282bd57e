pub mod engine;
pub mod event;
pub mod integrator;
pub mod runner;

pub use engine::{abort, compute_orbital_elements, launch, Engine, Step};
pub use event::{EventDetector, EventKind, FlightEvent};
pub use runner::{simulate, Flight, FlightRecord};
