//! Particle acceptance through an aperture.

use hector_core::errors::HectorError;
use hector_core::Particle;

use crate::shape::Aperture;

/// Whether `particle` passes through `aperture` at longitudinal position `s`.
///
/// The particle's transverse position at `s` is interpolated from its
/// trajectory; a failed interpolation is returned as the error.
pub fn accepts(aperture: &dyn Aperture, particle: &Particle, s: f64) -> Result<bool, HectorError> {
    let state = particle.try_state_vector_at(s)?;
    Ok(aperture.contains(state.position()))
}
