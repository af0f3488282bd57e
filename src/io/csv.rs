use std::io::{self, Write};
use std::path::Path;

use crate::dynamics::RocketState;

/// Write trajectory data to CSV format.
///
/// Columns: time, x, y, vx, vy, altitude, speed, mass, fuel, stage, phase.
/// Positions and altitude in km, velocities in km/s, masses in tons.
pub fn write_trajectory<W: Write>(writer: &mut W, trajectory: &[RocketState]) -> io::Result<()> {
    writeln!(writer, "time,x,y,vx,vy,altitude,speed,mass,fuel,stage,phase")?;

    for s in trajectory {
        writeln!(
            writer,
            "{:.3},{:.4},{:.4},{:.6},{:.6},{:.4},{:.6},{:.3},{:.3},{},{}",
            s.sim_time_s,
            s.position_km.x, s.position_km.y,
            s.velocity_km_s.x, s.velocity_km_s.y,
            s.altitude_km(),
            s.speed_km_s(),
            s.mass_tons,
            s.fuel_tons,
            s.stage.number(),
            s.phase.label(),
        )?;
    }

    Ok(())
}

/// Write trajectory to a CSV file at the given path.
pub fn write_trajectory_file(path: impl AsRef<Path>, trajectory: &[RocketState]) -> io::Result<()> {
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    write_trajectory(&mut file, trajectory)?;
    file.flush()
}
