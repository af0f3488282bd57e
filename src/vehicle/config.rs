use serde::{Deserialize, Serialize};

use crate::dynamics::state::{Stage, EARTH_RADIUS_KM, EARTH_SURFACE_GRAVITY};
use crate::error::{EngineError, EngineResult};
use crate::orbital::OrbitCriteria;
use crate::physics::gravity::gravity_accel;

// ---------------------------------------------------------------------------
// Simulation configuration (fixed for one flight attempt)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub thrust_kn: f64,
    pub fuel_capacity_tons: f64,
    pub burn_rate_tons_per_s: f64,
    pub launch_angle_deg: f64,      // above local horizontal, 90 = straight up
    pub surface_gravity: f64,       // m/s^2, sets mu = g * R^2
    pub density_multiplier: f64,    // scales the exponential atmosphere
    pub target_altitude_km: f64,
    pub stage_time_s: f64,          // stage 1 -> 2 separation time
    pub stage1_dry_mass_tons: f64,
    pub stage2_dry_mass_tons: f64,
    pub orbit: OrbitCriteria,
}

impl Default for SimulationConfig {
    /// The classroom scenario: fuel is gone after 12.5 s, staging at 120 s.
    fn default() -> Self {
        Self {
            thrust_kn: 5_000.0,
            fuel_capacity_tons: 250.0,
            burn_rate_tons_per_s: 20.0,
            launch_angle_deg: 89.0,
            surface_gravity: EARTH_SURFACE_GRAVITY,
            density_multiplier: 1.0,
            target_altitude_km: 400.0,
            stage_time_s: 120.0,
            stage1_dry_mass_tons: 3.0,
            stage2_dry_mass_tons: 1.0,
            orbit: OrbitCriteria::default(),
        }
    }
}

impl SimulationConfig {
    /// Gravitational parameter implied by the surface gravity reference, m^3/s^2.
    pub fn mu(&self) -> f64 {
        let r_m = EARTH_RADIUS_KM * 1_000.0;
        self.surface_gravity * r_m * r_m
    }

    pub fn dry_mass_tons(&self, stage: Stage) -> f64 {
        match stage {
            Stage::One => self.stage1_dry_mass_tons,
            Stage::Two => self.stage2_dry_mass_tons,
        }
    }

    /// Total mass for a stage and a given amount of remaining propellant.
    pub fn mass_tons(&self, stage: Stage, fuel_tons: f64) -> f64 {
        self.dry_mass_tons(stage) + fuel_tons
    }

    /// Seconds until the tank runs dry, `None` if the burn rate is zero.
    pub fn burn_duration_s(&self) -> Option<f64> {
        if self.burn_rate_tons_per_s > 0.0 {
            Some(self.fuel_capacity_tons / self.burn_rate_tons_per_s)
        } else {
            None
        }
    }

    /// Liftoff thrust-to-weight ratio with a full tank, weighed on the pad.
    pub fn twr(&self) -> f64 {
        let g = gravity_accel(EARTH_RADIUS_KM, self.mu());
        let weight_kn = self.mass_tons(Stage::One, self.fuel_capacity_tons) * g;
        self.thrust_kn / weight_kn
    }

    /// Reject anything that would mislead the learner rather than clamping it.
    pub fn validate(&self) -> EngineResult<()> {
        let finite = [
            ("thrust_kn", self.thrust_kn),
            ("fuel_capacity_tons", self.fuel_capacity_tons),
            ("burn_rate_tons_per_s", self.burn_rate_tons_per_s),
            ("launch_angle_deg", self.launch_angle_deg),
            ("surface_gravity", self.surface_gravity),
            ("density_multiplier", self.density_multiplier),
            ("target_altitude_km", self.target_altitude_km),
            ("stage_time_s", self.stage_time_s),
            ("stage1_dry_mass_tons", self.stage1_dry_mass_tons),
            ("stage2_dry_mass_tons", self.stage2_dry_mass_tons),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(EngineError::config(field, format!("must be finite, got {}", value)));
            }
        }

        positive("thrust_kn", self.thrust_kn)?;
        positive("fuel_capacity_tons", self.fuel_capacity_tons)?;
        non_negative("burn_rate_tons_per_s", self.burn_rate_tons_per_s)?;
        if !(0.0..=90.0).contains(&self.launch_angle_deg) {
            return Err(EngineError::config(
                "launch_angle_deg",
                format!("must lie in [0, 90] degrees, got {}", self.launch_angle_deg),
            ));
        }
        positive("surface_gravity", self.surface_gravity)?;
        non_negative("density_multiplier", self.density_multiplier)?;
        positive("target_altitude_km", self.target_altitude_km)?;
        non_negative("stage_time_s", self.stage_time_s)?;
        positive("stage1_dry_mass_tons", self.stage1_dry_mass_tons)?;
        positive("stage2_dry_mass_tons", self.stage2_dry_mass_tons)?;

        self.orbit.validate()
    }
}

pub(crate) fn positive(field: &'static str, value: f64) -> EngineResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(EngineError::config(field, format!("must be positive, got {}", value)))
    }
}

pub(crate) fn non_negative(field: &'static str, value: f64) -> EngineResult<()> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(EngineError::config(field, format!("must not be negative, got {}", value)))
    }
}

// ---------------------------------------------------------------------------
// Config builder
// ---------------------------------------------------------------------------

pub struct SimulationConfigBuilder {
    config: SimulationConfig,
}

impl SimulationConfigBuilder {
    pub fn new() -> Self {
        Self { config: SimulationConfig::default() }
    }

    pub fn thrust_kn(mut self, v: f64) -> Self { self.config.thrust_kn = v; self }
    pub fn fuel_capacity_tons(mut self, v: f64) -> Self { self.config.fuel_capacity_tons = v; self }
    pub fn burn_rate_tons_per_s(mut self, v: f64) -> Self { self.config.burn_rate_tons_per_s = v; self }
    pub fn launch_angle_deg(mut self, v: f64) -> Self { self.config.launch_angle_deg = v; self }
    pub fn surface_gravity(mut self, v: f64) -> Self { self.config.surface_gravity = v; self }
    pub fn density_multiplier(mut self, v: f64) -> Self { self.config.density_multiplier = v; self }
    pub fn target_altitude_km(mut self, v: f64) -> Self { self.config.target_altitude_km = v; self }
    pub fn stage_time_s(mut self, v: f64) -> Self { self.config.stage_time_s = v; self }
    pub fn stage1_dry_mass_tons(mut self, v: f64) -> Self { self.config.stage1_dry_mass_tons = v; self }
    pub fn stage2_dry_mass_tons(mut self, v: f64) -> Self { self.config.stage2_dry_mass_tons = v; self }
    pub fn orbit(mut self, v: OrbitCriteria) -> Self { self.config.orbit = v; self }

    /// Validates before handing the config out.
    pub fn build(self) -> EngineResult<SimulationConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for SimulationConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rejected_field(config: &SimulationConfig) -> &'static str {
        match config.validate() {
            Err(EngineError::InvalidConfig { field, .. }) => field,
            other => panic!("expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn default_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn default_burns_out_in_twelve_and_a_half_seconds() {
        let c = SimulationConfig::default();
        assert_relative_eq!(c.burn_duration_s().unwrap(), 12.5);
        assert!(c.twr() > 1.0, "default rocket must lift off");
    }

    #[test]
    fn twr_follows_configured_gravity() {
        let c = SimulationConfig::default();
        assert_relative_eq!(c.twr(), 5_000.0 / (253.0 * c.surface_gravity), max_relative = 1e-12);

        let heavy = SimulationConfig { surface_gravity: 2.0 * c.surface_gravity, ..c.clone() };
        assert_relative_eq!(heavy.twr(), c.twr() / 2.0, max_relative = 1e-12);
    }

    #[test]
    fn mu_matches_earth_for_default_gravity() {
        let c = SimulationConfig::default();
        assert_relative_eq!(c.mu(), crate::dynamics::state::MU_EARTH, max_relative = 1e-12);
    }

    #[test]
    fn zero_fuel_rejected() {
        let c = SimulationConfig { fuel_capacity_tons: 0.0, ..Default::default() };
        assert_eq!(rejected_field(&c), "fuel_capacity_tons");
    }

    #[test]
    fn negative_fuel_rejected() {
        let c = SimulationConfig { fuel_capacity_tons: -5.0, ..Default::default() };
        assert_eq!(rejected_field(&c), "fuel_capacity_tons");
    }

    #[test]
    fn zero_burn_rate_allowed() {
        let c = SimulationConfig { burn_rate_tons_per_s: 0.0, ..Default::default() };
        assert!(c.validate().is_ok());
        assert!(c.burn_duration_s().is_none());
    }

    #[test]
    fn angle_out_of_range_rejected() {
        let c = SimulationConfig { launch_angle_deg: 95.0, ..Default::default() };
        assert_eq!(rejected_field(&c), "launch_angle_deg");
    }

    #[test]
    fn nan_thrust_rejected() {
        let c = SimulationConfig { thrust_kn: f64::NAN, ..Default::default() };
        assert_eq!(rejected_field(&c), "thrust_kn");
    }

    #[test]
    fn zero_dry_mass_rejected() {
        let c = SimulationConfig { stage2_dry_mass_tons: 0.0, ..Default::default() };
        assert_eq!(rejected_field(&c), "stage2_dry_mass_tons");
    }

    #[test]
    fn builder_validates() {
        let err = SimulationConfigBuilder::new().thrust_kn(-1.0).build();
        assert!(err.is_err());

        let ok = SimulationConfigBuilder::new()
            .thrust_kn(7_000.0)
            .target_altitude_km(300.0)
            .build()
            .unwrap();
        assert_relative_eq!(ok.thrust_kn, 7_000.0);
        assert_relative_eq!(ok.target_altitude_km, 300.0);
    }

    #[test]
    fn mass_follows_stage() {
        let c = SimulationConfig::default();
        assert_relative_eq!(c.mass_tons(Stage::One, 10.0), 13.0);
        assert_relative_eq!(c.mass_tons(Stage::Two, 10.0), 11.0);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let c: SimulationConfig = serde_json::from_str(r#"{ "thrust_kn": 6000.0 }"#).unwrap();
        assert_relative_eq!(c.thrust_kn, 6_000.0);
        assert_relative_eq!(c.fuel_capacity_tons, 250.0);
    }
}
