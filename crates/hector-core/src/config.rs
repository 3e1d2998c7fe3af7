use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::algebra::PlaneVector;
use crate::errors::{ErrorInfo, HectorError};

/// Immutable run constants describing the reference beam.
///
/// Passed explicitly to every operation that needs the beam energy or the
/// reference particle mass; there is no process-wide instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamConfig {
    /// Energy of the primary beam particles (GeV).
    #[serde(default = "default_beam_energy")]
    pub beam_energy: f64,
    /// Mass of the primary beam particles (GeV/c²).
    #[serde(default = "default_particle_mass")]
    pub particle_mass: f64,
    /// Electric charge of the primary beam particles (e).
    #[serde(default = "default_particle_charge")]
    pub particle_charge: i32,
    /// Half crossing angle of the beams at the interaction point (rad).
    #[serde(default)]
    pub crossing_angle: PlaneVector,
    /// Master seed and substream policy.
    #[serde(default)]
    pub seed_policy: SeedPolicy,
}

fn default_beam_energy() -> f64 {
    6500.0
}

fn default_particle_mass() -> f64 {
    0.938272046
}

fn default_particle_charge() -> i32 {
    1
}

impl Default for BeamConfig {
    fn default() -> Self {
        Self {
            beam_energy: default_beam_energy(),
            particle_mass: default_particle_mass(),
            particle_charge: default_particle_charge(),
            crossing_angle: PlaneVector::ZERO,
            seed_policy: SeedPolicy::default(),
        }
    }
}

/// Deterministic seeding configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedPolicy {
    /// Master seed used for the run.
    #[serde(default = "default_master_seed")]
    pub master_seed: u64,
}

fn default_master_seed() -> u64 {
    0x4845_4354_4F52_u64
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self {
            master_seed: default_master_seed(),
        }
    }
}

impl BeamConfig {
    /// Parses and validates a YAML document.
    pub fn from_yaml_str(contents: &str) -> Result<Self, HectorError> {
        let config: BeamConfig = serde_yaml::from_str(contents).map_err(|err| {
            HectorError::Serde(ErrorInfo::new("yaml-deserialize", err.to_string()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a YAML configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, HectorError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|err| {
            HectorError::Config(
                ErrorInfo::new("config-io", err.to_string())
                    .with_context("path", path.display()),
            )
        })?;
        let config = Self::from_yaml_str(&contents)?;
        debug!(path = %path.display(), beam_energy = config.beam_energy, "loaded beam configuration");
        Ok(config)
    }

    /// Serializes the configuration to YAML.
    pub fn to_yaml_string(&self) -> Result<String, HectorError> {
        serde_yaml::to_string(self)
            .map_err(|err| HectorError::Serde(ErrorInfo::new("yaml-serialize", err.to_string())))
    }

    /// Checks the physical consistency of the constants.
    pub fn validate(&self) -> Result<(), HectorError> {
        if !(self.particle_mass >= 0.0) {
            return Err(HectorError::Config(
                ErrorInfo::new("invalid-config", "particle mass must be non-negative")
                    .with_context("particle_mass", self.particle_mass),
            ));
        }
        if !(self.beam_energy > self.particle_mass) {
            return Err(HectorError::Config(
                ErrorInfo::new("invalid-config", "beam energy must exceed the particle mass")
                    .with_context("beam_energy", self.beam_energy)
                    .with_context("particle_mass", self.particle_mass),
            ));
        }
        Ok(())
    }
}
