use hector_aperture::{accepts, Circular, Rectangular};
use hector_core::{HectorError, Particle, PlaneVector, StateVector};

fn track() -> Result<Particle, HectorError> {
    let start = StateVector::from_components([0.0, 0.0, 0.0, 0.0, 6500.0, 1.0], 0.938);
    let end = StateVector::from_components([0.02, 0.0, 0.0, 0.0, 6500.0, 1.0], 0.938);
    let mut particle = Particle::from_state(start, 0.0);
    particle.add_position(100.0, end)?;
    Ok(particle)
}

#[test]
fn particle_is_accepted_until_it_leaves_the_opening() -> Result<(), HectorError> {
    let particle = track()?;
    let aperture = Circular::new(0.015, PlaneVector::ZERO);
    assert!(accepts(&aperture, &particle, 10.0)?);
    assert!(accepts(&aperture, &particle, 50.0)?);
    assert!(!accepts(&aperture, &particle, 80.0)?);
    Ok(())
}

#[test]
fn failed_interpolation_is_reported() -> Result<(), HectorError> {
    let particle = track()?;
    let aperture = Rectangular::new(0.1, 0.1, PlaneVector::ZERO);
    let err = accepts(&aperture, &particle, 250.0).unwrap_err();
    assert_eq!(err.code(), "interpolation-impossible");
    Ok(())
}
