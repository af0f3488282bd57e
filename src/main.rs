use std::env;
use std::path::Path;
use std::process::ExitCode;

use log::error;

use ascent_sim::io::{self, FlightSummary};
use ascent_sim::orbital::OrbitalElements;
use ascent_sim::presets;
use ascent_sim::sim::{simulate, FlightRecord};
use ascent_sim::{EngineResult, SimulationConfig};

const DT: f64 = 0.05; // s, one 20 Hz frame
const MAX_TIME: f64 = 3_600.0; // s

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    match run(args.first().map(String::as_str), args.get(1).map(String::as_str)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            eprintln!("ascent-sim: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(source: Option<&str>, output_stem: Option<&str>) -> EngineResult<()> {
    let (name, config) = resolve_config(source)?;

    // -----------------------------------------------------------------------
    // Run simulation
    // -----------------------------------------------------------------------
    let record = simulate(&config, DT, MAX_TIME)?;
    let summary = FlightSummary::from_record(&record);

    print_report(&name, &record, &summary);

    if let Some(stem) = output_stem {
        let csv_path = format!("{}.csv", stem);
        let json_path = format!("{}.json", stem);
        io::write_trajectory_file(&csv_path, &record.trajectory)?;
        io::write_summary_file(&json_path, &config, &summary)?;
        println!("  Wrote {} and {}", csv_path, json_path);
        println!();
    }
    Ok(())
}

/// Preset name, JSON file, or the classroom default.
fn resolve_config(source: Option<&str>) -> EngineResult<(String, SimulationConfig)> {
    match source {
        None => Ok(("classroom".into(), presets::classroom())),
        Some(arg) => match presets::by_name(arg) {
            Some(config) => Ok((arg.to_string(), config)),
            None => {
                let config = io::load_config(arg)?;
                let name = Path::new(arg)
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| arg.to_string());
                Ok((name, config))
            }
        },
    }
}

fn print_report(name: &str, record: &FlightRecord, summary: &FlightSummary) {
    let config = &record.config;
    let last = &record.final_state;

    println!();
    println!("====================================================================");
    println!("  ASCENT SIMULATION: {}", name);
    println!("====================================================================");
    println!();
    println!("  Vehicle Parameters");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Thrust:        {:>8.0} kN    Launch angle: {:>8.1} deg",
        config.thrust_kn, config.launch_angle_deg
    );
    println!(
        "  Propellant:    {:>8.1} t     Burn rate:    {:>8.2} t/s",
        config.fuel_capacity_tons, config.burn_rate_tons_per_s
    );
    println!(
        "  Dry mass S1:   {:>8.1} t     Dry mass S2:  {:>8.1} t",
        config.stage1_dry_mass_tons, config.stage2_dry_mass_tons
    );
    match config.burn_duration_s() {
        Some(burn) => println!(
            "  Burn time:     {:>8.1} s     Staging at:   {:>8.1} s",
            burn, config.stage_time_s
        ),
        None => println!("  Burn time:          n/a     Staging at:   {:>8.1} s", config.stage_time_s),
    }
    println!(
        "  TWR:           {:>8.2}       Target:       {:>8.0} km",
        config.twr(),
        config.target_altitude_km
    );
    println!();

    println!("  Flight Events");
    println!("  ──────────────────────────────────────────────────────────────────");
    for event in &record.events {
        println!("  {}", event);
    }
    println!();

    println!("  Performance Summary");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Max altitude:  {:>8.1} km  (t={:.1}s)",
        summary.max_altitude_km, summary.max_altitude_time_s
    );
    println!("  Max speed:     {:>8.3} km/s", summary.max_speed_km_s);
    println!(
        "  Max accel:     {:>8.1} m/s^2 ({:.1} g)",
        summary.max_accel_m_s2,
        summary.max_accel_m_s2 / config.surface_gravity
    );
    println!("  Flight time:   {:>8.1} s", summary.flight_time_s);
    println!("  Final phase:   {:>8}", last.phase.label());
    println!(
        "  Achievements:  space={} orbit={} mission={}",
        summary.achievements.reached_space,
        summary.achievements.reached_orbit,
        summary.achievements.completed_mission
    );
    if let Ok(el) = OrbitalElements::from_state_mu(last, config.mu()) {
        let shown = el.display();
        println!(
            "  Final orbit:   {:?}  apogee {:.1} km  perigee {:.1} km  period {:.1} min  e={:.3}",
            el.trajectory, shown.apogee_km, shown.perigee_km, shown.period_min, el.eccentricity
        );
    }
    println!();

    // -----------------------------------------------------------------------
    // Trajectory table (sampled)
    // -----------------------------------------------------------------------
    println!("  Trajectory");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>7}  {:>9}  {:>9}  {:>8}  {:>8}  {:>5}  {:>9}",
        "t (s)", "alt (km)", "v (km/s)", "mass (t)", "fuel (t)", "stage", "phase"
    );
    println!("  {}", "─".repeat(66));

    let trajectory = &record.trajectory;
    let sample_interval = (trajectory.len() / 30).max(1);
    for (i, s) in trajectory.iter().enumerate() {
        let staged = i > 0 && trajectory[i - 1].stage != s.stage;
        if i % sample_interval != 0 && !staged && i != trajectory.len() - 1 {
            continue;
        }
        println!(
            "  {:>7.2}  {:>9.3}  {:>9.4}  {:>8.2}  {:>8.2}  {:>5}  {:>9}",
            s.sim_time_s,
            s.altitude_km(),
            s.speed_km_s(),
            s.mass_tons,
            s.fuel_tons,
            s.stage.number(),
            s.phase.label()
        );
    }

    println!();
    println!("  Simulation: {} steps, dt={} s", trajectory.len(), record.dt);
    println!("====================================================================");
    println!();
}
