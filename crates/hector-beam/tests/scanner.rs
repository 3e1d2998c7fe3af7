use hector_beam::{LinearScanner, ScanAxis};
use hector_core::{e_to_xi, BeamConfig, HectorError, PlaneVector, Severity};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-12 * (1.0 + a.abs().max(b.abs()))
}

#[test]
fn horizontal_scan_steps_evenly() -> Result<(), HectorError> {
    let config = BeamConfig::default();
    let mut scanner = LinearScanner::new(ScanAxis::X, 5, -0.01, 0.01, &config)?
        .with_fixed(PlaneVector::new(0.0, 0.002))
        .with_initial_s(12.5);
    let expected = [-0.01, -0.005, 0.0, 0.005, 0.01];
    for x in expected {
        let particle = scanner.shoot()?;
        let state = particle.first_state().copied().unwrap_or_default();
        assert!(close(state.x(), x), "{} != {x}", state.x());
        assert!(close(state.y(), 0.002));
        assert_eq!(state.angles(), PlaneVector::ZERO);
        assert_eq!(state.energy(), config.beam_energy);
        assert_eq!(state.mass(), config.particle_mass);
        assert_eq!(particle.first_s(), Some(12.5));
        assert_eq!(particle.charge(), config.particle_charge);
    }
    assert_eq!(scanner.remaining(), 0);
    Ok(())
}

#[test]
fn angular_scans_hold_the_other_angle() -> Result<(), HectorError> {
    let config = BeamConfig::default();
    let mut scanner = LinearScanner::new(ScanAxis::Ty, 3, 0.0, 100e-6, &config)?
        .with_fixed(PlaneVector::new(20e-6, 0.0))
        .with_energy(6000.0);
    let state = scanner
        .by_ref()
        .last()
        .and_then(|p| p.first_state().copied())
        .unwrap_or_default();
    assert!(close(state.ty(), 100e-6));
    assert!(close(state.tx(), 20e-6));
    assert_eq!(state.position(), PlaneVector::ZERO);
    assert_eq!(state.energy(), 6000.0);
    Ok(())
}

#[test]
fn xi_scan_lowers_the_energy() -> Result<(), HectorError> {
    let config = BeamConfig::default();
    let scanner = LinearScanner::new(ScanAxis::Xi, 4, 0.0, 0.15, &config)?;
    let xis: Vec<f64> = scanner
        .map(|p| e_to_xi(p.first_state().map_or(0.0, |s| s.energy()), config.beam_energy))
        .collect();
    assert_eq!(xis.len(), 4);
    for (xi, expected) in xis.iter().zip([0.0, 0.05, 0.1, 0.15]) {
        assert!((xi - expected).abs() < 1e-12, "{xi} != {expected}");
    }
    Ok(())
}

#[test]
fn exhausted_scan_warns() -> Result<(), HectorError> {
    let mut scanner = LinearScanner::new(ScanAxis::Y, 2, 0.0, 1.0, &BeamConfig::default())?;
    scanner.shoot()?;
    scanner.shoot()?;
    let err = scanner.shoot().unwrap_err();
    assert_eq!(err.code(), "generator-exhausted");
    assert_eq!(err.severity(), Severity::Warning);
    assert!(matches!(err, HectorError::Generator(_)));

    scanner.rewind();
    assert_eq!(scanner.remaining(), 2);
    Ok(())
}

#[test]
fn single_step_scan_uses_the_lower_bound() -> Result<(), HectorError> {
    let mut scanner = LinearScanner::new(ScanAxis::X, 1, 0.003, 0.009, &BeamConfig::default())?;
    let particle = scanner.shoot()?;
    assert_eq!(particle.first_state().map(|s| s.x()), Some(0.003));
    Ok(())
}

#[test]
fn empty_scan_is_rejected() {
    let err = LinearScanner::new(ScanAxis::Tx, 0, 0.0, 1.0, &BeamConfig::default()).unwrap_err();
    assert_eq!(err.code(), "invalid-scan");
    assert!(err.is_fatal());
    match err {
        HectorError::Generator(info) => {
            assert_eq!(info.context.get("axis").map(String::as_str), Some("Tx"))
        }
        other => panic!("unexpected error family: {other:?}"),
    }
}

#[test]
fn overflowing_scan_range_is_rejected() {
    let err = LinearScanner::new(ScanAxis::X, 3, -1e308, 1e308, &BeamConfig::default()).unwrap_err();
    assert_eq!(err.code(), "invalid-scan");
}

#[test]
fn scanned_states_carry_the_requested_kick() -> Result<(), HectorError> {
    let config = BeamConfig::default();
    let mut scanner = LinearScanner::new(ScanAxis::Tx, 2, 0.0, 1e-4, &config)?.with_kick(0.0);
    let state = scanner.shoot()?.first_state().copied().unwrap_or_default();
    assert_eq!(state.kick(), 0.0);

    let mut default_kick = LinearScanner::new(ScanAxis::Tx, 2, 0.0, 1e-4, &config)?;
    let state = default_kick.shoot()?.first_state().copied().unwrap_or_default();
    assert_eq!(state.kick(), 1.0);
    Ok(())
}
