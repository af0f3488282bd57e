use std::f64::consts::PI;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::dynamics::state::{RocketState, EARTH_RADIUS_KM, MU_EARTH};
use crate::error::{EngineError, EngineResult};

pub const APOGEE_DISPLAY_CEILING_KM: f64 = 10_000.0;
pub const PERIOD_DISPLAY_CEILING_MIN: f64 = 1_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrajectoryKind {
    Surface, // at or below Earth's radius, orbit math not evaluated
    Bound,   // elliptical, negative specific energy
    Escape,  // parabolic or hyperbolic
}

/// Two-body orbit derived from one position/velocity pair.
///
/// Apogee and perigee are kept raw: perigee goes negative when the orbit
/// intersects Earth. Use [`OrbitalElements::display`] for UI values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    pub trajectory: TrajectoryKind,
    pub altitude_km: f64,
    pub apogee_km: f64,          // +inf on escape
    pub perigee_km: f64,
    pub period_min: f64,         // +inf on escape
    pub speed_km_s: f64,
    pub semi_major_axis_km: f64, // +inf unless bound
    pub eccentricity: f64,
    pub specific_energy: f64,    // J/kg
}

/// Clamped copy of [`OrbitalElements`] for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayElements {
    pub altitude_km: f64,
    pub apogee_km: f64,
    pub perigee_km: f64,
    pub period_min: f64,
    pub speed_km_s: f64,
}

impl OrbitalElements {
    /// Vis-viva orbit determination for a state vector (km, km/s).
    pub fn from_vectors(
        position_km: &Vector2<f64>,
        velocity_km_s: &Vector2<f64>,
        mu: f64,
    ) -> EngineResult<Self> {
        let r_km = position_km.norm();
        let v_km_s = velocity_km_s.norm();
        if !r_km.is_finite() || !v_km_s.is_finite() || r_km * 1_000.0 < 1.0 {
            return Err(EngineError::DegenerateState { radius_km: r_km });
        }

        let altitude_km = r_km - EARTH_RADIUS_KM;
        if altitude_km < 0.0 {
            return Ok(Self::surface(v_km_s));
        }

        let r = r_km * 1_000.0;
        let v = v_km_s * 1_000.0;
        let energy = 0.5 * v * v - mu / r;

        // 2D angular momentum (z component of r x v), m^2/s
        let h = (position_km.x * velocity_km_s.y - position_km.y * velocity_km_s.x) * 1.0e6;
        let ecc = (1.0 + 2.0 * energy * h * h / (mu * mu)).max(0.0).sqrt();

        if energy >= 0.0 {
            return Ok(OrbitalElements {
                trajectory: TrajectoryKind::Escape,
                altitude_km,
                apogee_km: f64::INFINITY,
                perigee_km: altitude_km.max(0.0),
                period_min: f64::INFINITY,
                speed_km_s: v_km_s,
                semi_major_axis_km: f64::INFINITY,
                eccentricity: ecc,
                specific_energy: energy,
            });
        }

        let sma = -mu / (2.0 * energy);
        let period_s = if sma > 0.0 {
            2.0 * PI * (sma.powi(3) / mu).sqrt()
        } else {
            f64::INFINITY
        };
        let r_earth = EARTH_RADIUS_KM * 1_000.0;

        Ok(OrbitalElements {
            trajectory: TrajectoryKind::Bound,
            altitude_km,
            apogee_km: (sma * (1.0 + ecc) - r_earth) / 1_000.0,
            perigee_km: (sma * (1.0 - ecc) - r_earth) / 1_000.0,
            period_min: period_s / 60.0,
            speed_km_s: v_km_s,
            semi_major_axis_km: sma / 1_000.0,
            eccentricity: ecc,
            specific_energy: energy,
        })
    }

    /// Orbit of a rocket snapshot under Earth's standard gravity.
    pub fn from_state(state: &RocketState) -> EngineResult<Self> {
        Self::from_vectors(&state.position_km, &state.velocity_km_s, MU_EARTH)
    }

    pub fn from_state_mu(state: &RocketState, mu: f64) -> EngineResult<Self> {
        Self::from_vectors(&state.position_km, &state.velocity_km_s, mu)
    }

    fn surface(speed_km_s: f64) -> Self {
        OrbitalElements {
            trajectory: TrajectoryKind::Surface,
            altitude_km: 0.0,
            apogee_km: 0.0,
            perigee_km: 0.0,
            period_min: 0.0,
            speed_km_s,
            semi_major_axis_km: 0.0,
            eccentricity: 0.0,
            specific_energy: 0.0,
        }
    }

    pub fn is_bound(&self) -> bool {
        self.trajectory == TrajectoryKind::Bound
    }

    /// Values clamped for a stable readout. Never feed these back into logic.
    pub fn display(&self) -> DisplayElements {
        DisplayElements {
            altitude_km: self.altitude_km.max(0.0),
            apogee_km: self.apogee_km.clamp(0.0, APOGEE_DISPLAY_CEILING_KM),
            perigee_km: self.perigee_km.clamp(0.0, APOGEE_DISPLAY_CEILING_KM),
            period_min: self.period_min.clamp(0.0, PERIOD_DISPLAY_CEILING_MIN),
            speed_km_s: self.speed_km_s,
        }
    }
}
