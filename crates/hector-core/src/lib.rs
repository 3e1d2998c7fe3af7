#![deny(missing_docs)]
#![doc = "Phase-space state vectors, particle trajectories and beam constants for Hector."]

/// Transverse plane vectors and four-momenta.
pub mod algebra;
/// Beam constants loaded from YAML.
pub mod config;
pub mod errors;
pub mod kinematics;
pub mod particle;
pub mod rng;
pub mod state;

pub use algebra::{FourMomentum, PlaneVector};
pub use config::{BeamConfig, SeedPolicy};
pub use errors::{ErrorInfo, HectorError, Severity};
pub use kinematics::{e_to_xi, photon_recoil, xi_to_e, PhotonEmission, PhotonRecoil};
pub use particle::{EmissionOutcome, Particle, Position};
pub use rng::{derive_substream_seed, RngHandle, EMISSION_SUBSTREAM, GUN_SUBSTREAM_BASE};
pub use state::StateVector;
