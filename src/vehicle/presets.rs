use super::config::SimulationConfig;

// ---------------------------------------------------------------------------
// Preset configurations
// ---------------------------------------------------------------------------

/// Lesson-one rocket: huge thrust, tiny exhaust velocity, falls back after
/// a ~37 km hop. Burns out at 12.5 s, stages at 120 s on the way down.
pub fn classroom() -> SimulationConfig {
    SimulationConfig::default()
}

/// Slow-burning rocket that pitches over early and keeps thrusting prograde
/// until its perigee clears the atmosphere: low orbit at about T+487 s
/// (roughly 254 x 121 km), short of the 400 km target.
pub fn orbital_attempt() -> SimulationConfig {
    SimulationConfig {
        thrust_kn: 4_000.0,
        fuel_capacity_tons: 250.0,
        burn_rate_tons_per_s: 0.2,
        launch_angle_deg: 75.0,
        target_altitude_km: 400.0,
        stage_time_s: 100.0,
        stage1_dry_mass_tons: 10.0,
        stage2_dry_mass_tons: 3.0,
        ..SimulationConfig::default()
    }
}

/// Look a preset up by the name used on the command line.
pub fn by_name(name: &str) -> Option<SimulationConfig> {
    match name {
        "classroom" => Some(classroom()),
        "orbital" | "orbital_attempt" => Some(orbital_attempt()),
        _ => None,
    }
}

pub const NAMES: [&str; 2] = ["classroom", "orbital"];
