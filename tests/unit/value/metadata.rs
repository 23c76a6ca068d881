use super::*;
use crate::foundation::core::{Color, Point, Point3};

#[derive(Clone, Copy, Debug, PartialEq, strum::Display, strum::EnumIter)]
enum Style {
    Box,
    Zoom,
}

#[test]
fn fixed_zero_one_ignore_resolution() {
    let a = Resolution::flat(10.0, 10.0);
    let b = Resolution::flat(1000.0, 50.0);
    for v in [
        MetadataValue::Fixed(0.3f64),
        MetadataValue::Zero,
        MetadataValue::One,
    ] {
        assert_eq!(v.eval(a), v.eval(b));
    }
    assert_eq!(MetadataValue::<f64>::One.eval(a), 1.0);
}

#[test]
fn resolution_minimum_fraction_tracks_smallest_axis() {
    let radius = MetadataValue::<f64>::resolution_minimum(0.1);
    assert_eq!(radius.eval(Resolution::flat(400.0, 200.0)), 20.0);
    assert_eq!(radius.eval(Resolution::flat(100.0, 1000.0)), 10.0);
}

#[test]
fn resolution_maximum_fraction_applies_to_every_axis() {
    let translation = MetadataValue::<Point>::resolution_maximum(-0.5);
    assert_eq!(
        translation.eval(Resolution::flat(400.0, 200.0)),
        Point::new(-200.0, -200.0)
    );
}

#[test]
fn aligned_positions() {
    let res = Resolution::new(100.0, 50.0, 20.0);
    assert_eq!(
        MetadataValue::<Point3>::aligned(Alignment::Center).eval(res),
        Point3::new(50.0, 25.0, 10.0)
    );
    assert_eq!(
        MetadataValue::<Point>::aligned(Alignment::Leading).eval(res),
        Point::ZERO
    );
    assert_eq!(
        MetadataValue::<Point>::aligned(Alignment::Trailing).eval(res),
        Point::new(100.0, 50.0)
    );
}

#[test]
fn eval_is_repeatable() {
    let v = MetadataValue::<f64>::resolution_minimum(0.25);
    let res = Resolution::flat(64.0, 32.0);
    assert_eq!(v.eval(res), v.eval(res));
}

#[test]
fn parameter_defaults_come_from_the_value_type() {
    let p = Parameter::<Color>::default();
    let res = Resolution::flat(8.0, 8.0);
    assert_eq!(p.eval(res), Color::WHITE);
    assert_eq!(p.bounds(res), (Color::CLEAR, Color::WHITE));
    assert!(!p.spatial);
}

#[test]
fn parameter_builder_overrides_bounds() {
    let p = Parameter::new(MetadataValue::<f64>::resolution_minimum(0.1))
        .with_maximum(MetadataValue::resolution_minimum(0.5))
        .spatial();
    let res = Resolution::flat(100.0, 200.0);
    assert_eq!(p.eval(res), 10.0);
    assert_eq!(p.bounds(res), (0.0, 50.0));
    assert!(p.spatial);
}

#[test]
fn parameter_lerp_evaluates_both_sides_at_resolution() {
    let a = Parameter::<f64>::fixed(0.0);
    let b = Parameter::new(MetadataValue::<f64>::resolution_minimum(1.0));
    assert_eq!(a.lerp_at(0.5, &b, Resolution::flat(40.0, 80.0)), 20.0);
}

#[test]
fn parameter_fingerprints_differ_by_value() {
    let mut a = StableHasher::new();
    Parameter::<f64>::fixed(1.0).fingerprint(&mut a);
    let mut b = StableHasher::new();
    Parameter::<f64>::fixed(2.0).fingerprint(&mut b);
    assert_ne!(a.finish(), b.finish());
}

#[test]
fn enum_parameter_lists_options_and_steps() {
    assert_eq!(EnumParameter::<Style>::options(), vec![Style::Box, Style::Zoom]);
    assert_eq!(EnumParameter::lerp(0.0, Style::Box, Style::Zoom), Style::Box);
    assert_eq!(EnumParameter::lerp(0.5, Style::Box, Style::Zoom), Style::Zoom);
}
