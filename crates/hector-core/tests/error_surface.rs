use hector_core::errors::{ErrorInfo, HectorError, Severity};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("s", 12.5)
        .with_context("reason", "example")
}

#[test]
fn trajectory_error_surface() {
    let err = HectorError::Trajectory(sample_info("mass-not-conserved", "mass changed"));
    assert_eq!(err.code(), "mass-not-conserved");
    assert!(err.is_fatal());
    assert_eq!(err.info().context.get("s"), Some(&"12.5".to_string()));
}

#[test]
fn warnings_are_not_fatal() {
    let err = HectorError::Trajectory(ErrorInfo::warning("interpolation-impossible", "no neighbour"));
    assert_eq!(err.severity(), Severity::Warning);
    assert!(!err.is_fatal());
}

#[test]
fn generator_error_surface() {
    let err = HectorError::Generator(
        sample_info("generator-exhausted", "too many particles")
            .with_severity(Severity::Warning)
            .with_number(3),
    );
    assert_eq!(err.info().number, Some(3));
    assert!(err.info().context.contains_key("reason"));
}

#[test]
fn display_carries_code_context_and_hint() {
    let err = HectorError::Aperture(sample_info("A001", "bad shape").with_hint("check parameters"));
    let rendered = err.to_string();
    assert!(rendered.starts_with("aperture error: [fatal] bad shape (code: A001)"));
    assert!(rendered.contains("reason=example"));
    assert!(rendered.ends_with("hint: check parameters"));
}

#[test]
fn errors_round_trip_json() {
    let err = HectorError::Kinematics(sample_info("invalid-azimuth-range", "min > max"));
    let json = serde_json::to_string(&err).expect("serialize");
    assert!(json.contains("\"family\":\"Kinematics\""));
    let decoded: HectorError = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, err);
}
