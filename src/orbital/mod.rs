pub mod elements;
pub mod insertion;

pub use elements::{DisplayElements, OrbitalElements, TrajectoryKind};
pub use insertion::{circular_speed_km_s, mission_complete, orbit_achieved, OrbitCriteria};
