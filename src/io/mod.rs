pub mod csv;
pub mod json;

pub use csv::{write_trajectory, write_trajectory_file};
pub use json::{load_config, write_summary, write_summary_file, FlightSummary};
