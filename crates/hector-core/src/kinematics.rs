//! Energy-loss conversions and photon-emission recoil kinematics.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, HectorError};

/// Relative energy loss `ξ = 1 - E / E0`.
pub fn e_to_xi(energy: f64, beam_energy: f64) -> f64 {
    1.0 - energy / beam_energy
}

/// Energy corresponding to a relative energy loss `ξ`.
pub fn xi_to_e(xi: f64, beam_energy: f64) -> f64 {
    beam_energy * (1.0 - xi)
}

/// Request for an inelastic photon emission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhotonEmission {
    /// Photon energy (GeV).
    pub energy: f64,
    /// Photon virtuality Q² (GeV²); space-like photons have Q² < 0.
    pub virtuality: f64,
    /// Lower bound of the azimuthal angle distribution (rad).
    #[serde(default)]
    pub phi_min: f64,
    /// Upper bound of the azimuthal angle distribution (rad).
    #[serde(default = "two_pi")]
    pub phi_max: f64,
}

fn two_pi() -> f64 {
    2.0 * PI
}

impl PhotonEmission {
    /// Emission with the azimuth sampled over the full circle.
    pub fn new(energy: f64, virtuality: f64) -> Self {
        Self {
            energy,
            virtuality,
            phi_min: 0.0,
            phi_max: two_pi(),
        }
    }

    /// Restricts the azimuth to `[phi_min, phi_max]`.
    pub fn with_azimuth(mut self, phi_min: f64, phi_max: f64) -> Self {
        self.phi_min = phi_min;
        self.phi_max = phi_max;
        self
    }

    pub(crate) fn check_azimuth(&self) -> Result<(), HectorError> {
        let span = (self.phi_max - self.phi_min) * (1.0 + f64::EPSILON);
        if !span.is_finite() || self.phi_min > self.phi_max {
            return Err(HectorError::Kinematics(
                ErrorInfo::new("invalid-azimuth-range", "azimuth bounds must be finite and ordered")
                    .with_context("phi_min", self.phi_min)
                    .with_context("phi_max", self.phi_max),
            ));
        }
        Ok(())
    }

    /// Checks that a particle of energy `e1` and mass `m1` can radiate this
    /// photon, i.e. `0 < energy <= e1 - m1`.
    pub(crate) fn check_energy(&self, e1: f64, m1: f64) -> Result<(), HectorError> {
        if !(self.energy > 0.0 && self.energy <= e1 - m1) {
            return Err(HectorError::Kinematics(
                ErrorInfo::new(
                    "invalid-photon-energy",
                    "photon energy must be positive and leave the particle on shell",
                )
                .with_context("e_gamma", self.energy)
                .with_context("e1", e1)
                .with_context("m1", m1),
            ));
        }
        Ok(())
    }
}

/// Kinematic outcome of a photon emission, before the azimuth is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhotonRecoil {
    /// Lower kinematic bound on Q².
    pub q2_min: f64,
    /// Upper kinematic bound on Q².
    pub q2_max: f64,
    /// Requested virtuality clamped into `[q2_min, q2_max]`.
    pub q2: f64,
    /// Energy of the emitting particle after the emission.
    pub energy_after: f64,
    /// Polar angle between the outgoing particle and the beam axis (rad).
    pub theta: f64,
}

/// Computes the recoil of a particle of energy `e1` and mass `m1` emitting a
/// photon of energy `e_gamma` and virtuality `q2`.
///
/// Out-of-range virtualities are clamped silently; the clamped value is
/// reported in [`PhotonRecoil::q2`]. The result is only defined for
/// `0 < e_gamma <= e1 - m1`; outside that range the fields are NaN.
pub fn photon_recoil(e1: f64, m1: f64, e_gamma: f64, q2: f64, beam_energy: f64) -> PhotonRecoil {
    let e2 = e1 - e_gamma;
    let p1 = (e1 * e1 - m1 * m1).sqrt();
    // e2 may round just below m1 when the photon takes all the kinetic energy
    let p2 = (e2 * e2 - m1 * m1).max(0.0).sqrt();

    // E² - (p1 + p2)²
    let q2_min = e_gamma * e_gamma - (p1 + p2).powi(2);
    // E² - (p1 - p2)², rewritten to avoid the cancellation
    let q2_max = -2.0
        * (m1 * e_gamma / (p1 + p2)).powi(2)
        * (1.0 + (e1 * e1 + e2 * e2 - m1 * m1) / (e1 * e2 + p1 * p2));

    let q2 = if q2 > q2_max {
        q2_max
    } else if q2 < q2_min {
        q2_min
    } else {
        q2
    };

    let gkk = (e_gamma * e_gamma - q2).sqrt();
    // eta is the angle between the photon and the initial particle direction
    let cos_eta = (1.0 + (m1 / p1).powi(2)).sqrt() * (1.0 + q2 / (gkk * gkk)).sqrt()
        - q2 / (2.0 * p1 * gkk);
    // cos(eta) may exceed 1 by rounding at the kinematic bounds
    let sin_eta = (1.0 - cos_eta * cos_eta).max(0.0).sqrt();
    let theta = (sin_eta / (beam_energy / gkk - cos_eta)).atan();

    PhotonRecoil {
        q2_min,
        q2_max,
        q2,
        energy_after: e2,
        theta,
    }
}
