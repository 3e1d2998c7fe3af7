use hector_aperture::{
    Aperture, ApertureDescriptor, ApertureKind, Circular, Elliptic, RectElliptic, Rectangular,
    UNUSED_PARAMETER,
};
use hector_core::PlaneVector;

fn boxed(aperture: impl Aperture + 'static) -> Box<dyn Aperture> {
    Box::new(aperture)
}

#[test]
fn identical_apertures_compare_equal() {
    let a = boxed(Rectangular::new(0.35, 0.25, PlaneVector::new(0.01, 0.0)));
    let b = boxed(Rectangular::new(0.35, 0.25, PlaneVector::new(0.01, 0.0)));
    assert!(*a == *b);
}

#[test]
fn any_differing_field_breaks_equality() {
    let reference = boxed(Elliptic::new(0.4, 0.2, PlaneVector::ZERO));
    let other_kind = boxed(Rectangular::new(0.4, 0.2, PlaneVector::ZERO));
    let other_position = boxed(Elliptic::new(0.4, 0.2, PlaneVector::new(0.0, 1e-6)));
    let other_parameter = boxed(Elliptic::new(0.4, 0.21, PlaneVector::ZERO));
    assert!(*reference != *other_kind);
    assert!(*reference != *other_position);
    assert!(*reference != *other_parameter);
}

#[test]
fn circle_is_tagged_apart_from_ellipse() {
    let circle = boxed(Circular::new(0.3, PlaneVector::ZERO));
    let ellipse = boxed(Elliptic::new(0.3, 0.3, PlaneVector::ZERO));
    assert_eq!(circle.kind(), ApertureKind::Circular);
    assert!(*circle != *ellipse);
}

#[test]
fn clones_are_independent() {
    let original = boxed(RectElliptic::new(0.35, 0.25, 0.4, 0.2, PlaneVector::ZERO));
    let mut copy = original.clone();
    assert!(*copy == *original);

    copy.offset(PlaneVector::new(0.1, 0.0));
    assert!(*copy != *original);
    assert_eq!(original.position(), PlaneVector::ZERO);
}

#[test]
fn parameters_follow_the_kind() {
    let rect = Rectangular::new(0.35, 0.25, PlaneVector::ZERO);
    assert_eq!(rect.parameters(), &[0.35, 0.25]);
    assert_eq!(rect.parameter(2), UNUSED_PARAMETER);

    let combined = RectElliptic::new(0.35, 0.25, 0.4, 0.2, PlaneVector::ZERO);
    assert_eq!(combined.parameters(), &[0.35, 0.25, 0.4, 0.2]);
    assert_eq!(combined.parameter(3), 0.2);
}

#[test]
fn display_names_the_shape() {
    let aperture = boxed(RectElliptic::new(0.35, 0.25, 0.4, 0.2, PlaneVector::ZERO));
    let rendered = aperture.to_string();
    assert!(rendered.starts_with("rect-elliptic (param. (0.350, 0.250, 0.400, 0.200)"));

    let circle = boxed(Circular::new(0.05, PlaneVector::ZERO));
    assert!(circle.to_string().contains("0.050, 0.050, -1.000, -1.000"));
}

#[test]
fn descriptors_rebuild_equal_apertures() {
    let apertures = vec![
        boxed(Rectangular::new(0.35, 0.25, PlaneVector::new(0.5, 0.0))),
        boxed(Elliptic::new(0.4, 0.2, PlaneVector::ZERO)),
        boxed(Circular::new(0.05, PlaneVector::new(0.0, -0.25))),
        boxed(RectElliptic::new(0.35, 0.25, 0.4, 0.2, PlaneVector::ZERO)),
    ];
    for aperture in &apertures {
        let rebuilt = ApertureDescriptor::describe(aperture.as_ref()).build();
        assert!(*rebuilt == **aperture);
    }
}

#[test]
fn descriptors_load_from_yaml() {
    let yaml = "\
- type: rectangular
  half_width: 0.35
  half_height: 0.25
- type: circular
  radius: 0.05
  position: { x: 0.001, y: 0.0 }
- type: rect-elliptic
  rect_half_width: 0.035
  rect_half_height: 0.025
  semi_x: 0.04
  semi_y: 0.02
";
    let descriptors = ApertureDescriptor::list_from_yaml_str(yaml).expect("valid yaml");
    assert_eq!(descriptors.len(), 3);
    let circle = descriptors[1].build();
    assert_eq!(circle.kind(), ApertureKind::Circular);
    assert_eq!(circle.position(), PlaneVector::new(0.001, 0.0));
    assert_eq!(descriptors[2].build().limits(), PlaneVector::new(0.035, 0.02));

    let yaml = ApertureDescriptor::list_to_yaml_string(&descriptors).expect("serialize");
    let reparsed = ApertureDescriptor::list_from_yaml_str(&yaml).expect("reparse");
    assert_eq!(reparsed, descriptors);
}

#[test]
fn unknown_shape_is_a_serde_error() {
    let err = ApertureDescriptor::list_from_yaml_str("- type: octagonal\n  size: 1.0\n").unwrap_err();
    assert_eq!(err.code(), "yaml-deserialize");
}

#[test]
fn descriptor_json_uses_kind_tags() {
    let descriptor = ApertureDescriptor::Circular {
        radius: 0.5,
        position: PlaneVector::ZERO,
    };
    let json = serde_json::to_string(&descriptor).expect("serialize");
    assert!(json.contains("\"type\":\"circular\""));
}
