pub mod state;

pub use state::{AchievementSet, FlightPhase, RocketState, Stage};
