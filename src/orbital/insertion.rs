use serde::{Deserialize, Serialize};

use super::elements::OrbitalElements;
use crate::dynamics::state::SPACE_BOUNDARY_KM;
use crate::error::{EngineError, EngineResult};
use crate::vehicle::config::{non_negative, positive};

/// Tuning knobs for declaring an orbit. Heuristics, not physics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitCriteria {
    pub min_altitude_km: f64,     // low-orbit band
    pub max_altitude_km: f64,
    pub perigee_margin_km: f64,   // required clearance above the space boundary
    pub speed_tolerance: f64,     // fraction of circular speed
    pub target_tolerance_km: f64, // apogee/perigee slack for mission completion
}

impl Default for OrbitCriteria {
    fn default() -> Self {
        Self {
            min_altitude_km: 150.0,
            max_altitude_km: 2_000.0,
            perigee_margin_km: 20.0,
            speed_tolerance: 0.2,
            target_tolerance_km: 50.0,
        }
    }
}

impl OrbitCriteria {
    /// Lowest acceptable perigee, km.
    pub fn min_perigee_km(&self) -> f64 {
        SPACE_BOUNDARY_KM + self.perigee_margin_km
    }

    pub fn validate(&self) -> EngineResult<()> {
        non_negative("orbit.min_altitude_km", self.min_altitude_km)?;
        if !(self.max_altitude_km > self.min_altitude_km) {
            return Err(EngineError::config(
                "orbit.max_altitude_km",
                format!(
                    "must exceed min_altitude_km ({} <= {})",
                    self.max_altitude_km, self.min_altitude_km
                ),
            ));
        }
        non_negative("orbit.perigee_margin_km", self.perigee_margin_km)?;
        if !(self.speed_tolerance > 0.0 && self.speed_tolerance < 1.0) {
            return Err(EngineError::config(
                "orbit.speed_tolerance",
                format!("must lie in (0, 1), got {}", self.speed_tolerance),
            ));
        }
        positive("orbit.target_tolerance_km", self.target_tolerance_km)
    }
}

/// Speed of a circular orbit at `radius_km`, km/s.
pub fn circular_speed_km_s(radius_km: f64, mu: f64) -> f64 {
    let r_m = radius_km * 1_000.0;
    if r_m <= 0.0 {
        return 0.0;
    }
    (mu / r_m).sqrt() / 1_000.0
}

/// All three must hold at once: inside the altitude band, perigee clear of
/// the atmosphere, speed near circular. A ballistic arc passing through the
/// band fails the perigee test.
pub fn orbit_achieved(
    elements: &OrbitalElements,
    radius_km: f64,
    mu: f64,
    criteria: &OrbitCriteria,
) -> bool {
    if !elements.is_bound() {
        return false;
    }
    let in_band = (criteria.min_altitude_km..=criteria.max_altitude_km).contains(&elements.altitude_km);
    let perigee_clear = elements.perigee_km >= criteria.min_perigee_km();

    let v_circ = circular_speed_km_s(radius_km, mu);
    let near_circular = (elements.speed_km_s - v_circ).abs() <= criteria.speed_tolerance * v_circ;

    in_band && perigee_clear && near_circular
}

/// Apogee and perigee both within tolerance of the requested altitude.
pub fn mission_complete(elements: &OrbitalElements, target_km: f64, criteria: &OrbitCriteria) -> bool {
    elements.is_bound()
        && (elements.apogee_km - target_km).abs() <= criteria.target_tolerance_km
        && (elements.perigee_km - target_km).abs() <= criteria.target_tolerance_km
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::state::{EARTH_RADIUS_KM, MU_EARTH};
    use nalgebra::Vector2;

    fn elements_at(alt_km: f64, speed_factor: f64) -> (OrbitalElements, f64) {
        let r = EARTH_RADIUS_KM + alt_km;
        let v = circular_speed_km_s(r, MU_EARTH) * speed_factor;
        let el = OrbitalElements::from_vectors(&Vector2::new(0.0, r), &Vector2::new(v, 0.0), MU_EARTH)
            .unwrap();
        (el, r)
    }

    #[test]
    fn leo_circular_speed() {
        let v = circular_speed_km_s(EARTH_RADIUS_KM + 400.0, MU_EARTH);
        assert!((v - 7.67).abs() < 0.01, "expected ~7.67 km/s, got {}", v);
    }

    #[test]
    fn circular_400km_is_an_orbit_and_a_mission() {
        let criteria = OrbitCriteria::default();
        let (el, r) = elements_at(400.0, 1.0);
        assert!(orbit_achieved(&el, r, MU_EARTH, &criteria));
        assert!(mission_complete(&el, 400.0, &criteria));
        assert!(!mission_complete(&el, 600.0, &criteria));
    }

    #[test]
    fn ballistic_arc_through_band_is_not_an_orbit() {
        // right altitude, but far too slow: perigee deep inside Earth
        let criteria = OrbitCriteria::default();
        let (el, r) = elements_at(300.0, 0.5);
        assert!(!orbit_achieved(&el, r, MU_EARTH, &criteria));
    }

    #[test]
    fn low_perigee_rejected() {
        // 90% of circular at 200 km puts perigee well below 120 km
        let criteria = OrbitCriteria::default();
        let (el, r) = elements_at(200.0, 0.9);
        assert!(el.perigee_km < criteria.min_perigee_km());
        assert!(!orbit_achieved(&el, r, MU_EARTH, &criteria));
    }

    #[test]
    fn outside_band_rejected() {
        let criteria = OrbitCriteria::default();
        let (el, r) = elements_at(3_000.0, 1.0);
        assert!(!orbit_achieved(&el, r, MU_EARTH, &criteria));
    }

    #[test]
    fn too_fast_rejected() {
        let criteria = OrbitCriteria::default();
        let (el, r) = elements_at(400.0, 1.25);
        assert!(!orbit_achieved(&el, r, MU_EARTH, &criteria));
    }

    #[test]
    fn criteria_validation() {
        assert!(OrbitCriteria::default().validate().is_ok());
        let bad_band = OrbitCriteria { max_altitude_km: 100.0, ..Default::default() };
        assert!(bad_band.validate().is_err());
        let bad_speed = OrbitCriteria { speed_tolerance: 1.5, ..Default::default() };
        assert!(bad_speed.validate().is_err());
    }
}
