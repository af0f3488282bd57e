use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::dynamics::{AchievementSet, FlightPhase};
use crate::error::EngineResult;
use crate::orbital::{DisplayElements, OrbitalElements, TrajectoryKind};
use crate::sim::FlightRecord;
use crate::vehicle::SimulationConfig;

/// Final orbit as reported in a summary, display-clamped so it stays finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryOrbit {
    pub trajectory: TrajectoryKind,
    pub eccentricity: f64,
    #[serde(flatten)]
    pub elements: DisplayElements,
}

/// Summary statistics computed from a flight record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightSummary {
    pub max_altitude_km: f64,
    pub max_altitude_time_s: f64,
    pub max_speed_km_s: f64,
    pub max_accel_m_s2: f64,
    pub flight_time_s: f64,
    pub final_phase: FlightPhase,
    pub final_orbit: Option<SummaryOrbit>,
    pub achievements: AchievementSet,
    pub event_count: usize,
}

impl FlightSummary {
    pub fn from_record(record: &FlightRecord) -> Self {
        let last = &record.final_state;

        let (max_altitude_time_s, max_altitude_km) = record
            .trajectory
            .iter()
            .map(|s| (s.sim_time_s, s.altitude_km()))
            .fold((0.0, f64::NEG_INFINITY), |best, cur| if cur.1 > best.1 { cur } else { best });

        let max_speed_km_s = record
            .trajectory
            .iter()
            .map(|s| s.speed_km_s())
            .fold(0.0_f64, f64::max);

        let max_accel_m_s2 = record
            .trajectory
            .iter()
            .map(|s| s.acceleration_m_s2.norm())
            .fold(0.0_f64, f64::max);

        let mu = record.config.mu();
        let final_orbit = OrbitalElements::from_state_mu(last, mu).ok().map(|el| SummaryOrbit {
            trajectory: el.trajectory,
            eccentricity: el.eccentricity,
            elements: el.display(),
        });

        FlightSummary {
            max_altitude_km: max_altitude_km.max(last.max_altitude_km),
            max_altitude_time_s,
            max_speed_km_s,
            max_accel_m_s2,
            flight_time_s: last.sim_time_s,
            final_phase: last.phase,
            final_orbit,
            achievements: last.achievements,
            event_count: record.events.len(),
        }
    }
}

#[derive(Serialize)]
struct SummaryDocument<'a> {
    config: &'a SimulationConfig,
    summary: &'a FlightSummary,
}

/// Write the configuration and its flight summary as pretty JSON.
pub fn write_summary<W: Write>(
    writer: &mut W,
    config: &SimulationConfig,
    summary: &FlightSummary,
) -> EngineResult<()> {
    serde_json::to_writer_pretty(&mut *writer, &SummaryDocument { config, summary })?;
    writeln!(writer)?;
    Ok(())
}

/// Write flight summary JSON to a file.
pub fn write_summary_file(
    path: impl AsRef<Path>,
    config: &SimulationConfig,
    summary: &FlightSummary,
) -> EngineResult<()> {
    let mut file = File::create(path)?;
    write_summary(&mut file, config, summary)
}

/// Read a configuration from JSON. Missing fields take their defaults.
pub fn load_config(path: impl AsRef<Path>) -> EngineResult<SimulationConfig> {
    let path = path.as_ref();
    let config: SimulationConfig = serde_json::from_reader(BufReader::new(File::open(path)?))?;
    config.validate()?;
    debug!("loaded configuration from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::simulate;

    #[test]
    fn summary_tracks_peak_altitude() {
        let record = simulate(&SimulationConfig::default(), 0.05, 30.0).unwrap();
        let s = FlightSummary::from_record(&record);
        assert!(s.max_altitude_km > 0.0);
        assert!((s.flight_time_s - 30.0).abs() < 0.06);
        assert_eq!(s.final_phase, FlightPhase::Ascending);
        assert_eq!(s.event_count, record.events.len());
        assert_eq!(s.final_orbit.map(|o| o.trajectory), Some(TrajectoryKind::Bound));
    }

    #[test]
    fn json_output_is_valid() {
        let config = SimulationConfig::default();
        let record = simulate(&config, 0.05, 10.0).unwrap();
        let summary = FlightSummary::from_record(&record);

        let mut buf = Vec::new();
        write_summary(&mut buf, &config, &summary).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["summary"]["final_phase"], "Ascending");
        assert!(value["config"]["thrust_kn"].is_number());
        assert!(value["summary"]["final_orbit"]["apogee_km"].is_number());
    }

    #[test]
    fn load_config_rejects_invalid_values() {
        let dir = std::env::temp_dir();
        let good = dir.join("ascent_sim_good_config.json");
        let bad = dir.join("ascent_sim_bad_config.json");
        std::fs::write(&good, r#"{ "thrust_kn": 4200.0 }"#).unwrap();
        std::fs::write(&bad, r#"{ "burn_rate_tons_per_s": -1.0 }"#).unwrap();

        let config = load_config(&good).unwrap();
        assert_eq!(config.thrust_kn, 4200.0);
        assert_eq!(config.fuel_capacity_tons, SimulationConfig::default().fuel_capacity_tons);
        assert!(load_config(&bad).is_err());
        assert!(load_config(dir.join("ascent_sim_missing.json")).is_err());

        let _ = std::fs::remove_file(good);
        let _ = std::fs::remove_file(bad);
    }
}
