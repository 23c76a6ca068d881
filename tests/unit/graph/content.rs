use std::str::FromStr;

use super::*;
use crate::foundation::core::{PixelExtent, PixelOffset, Region};
use crate::render::composite::crop_buffer;

fn full(w: f64, h: f64) -> ContentContext {
    ContentContext::full(Resolution::flat(w, h)).unwrap()
}

fn sub_region(x: i64, y: i64, w: u32, h: u32) -> Region {
    Region::new(PixelOffset::new(x, y, 0), PixelExtent::new(w, h, 1))
}

#[test]
fn color_fills_with_premultiplied_pixels() {
    let content = ColorContent::new(Color::rgba(1.0, 0.0, 0.0, 0.5));
    let b = content.render(&full(3.0, 2.0)).unwrap();
    assert_eq!(b.extent, PixelExtent::new(3, 2, 1));
    assert!(b.data.chunks_exact(4).all(|px| px == [128, 0, 0, 128]));
}

#[test]
fn circle_covers_center_not_corners() {
    let content = CircleContent::new()
        .color(Color::WHITE)
        .background(Color::BLACK);
    let b = content.render(&full(40.0, 20.0)).unwrap();
    // Default radius is a quarter of the smaller side: 5px around (20, 10).
    assert_eq!(b.pixel(20, 10, 0), [255, 255, 255, 255]);
    assert_eq!(b.pixel(0, 0, 0), [0, 0, 0, 255]);
    assert_eq!(b.pixel(27, 10, 0), [0, 0, 0, 255]);
}

#[test]
fn circle_region_matches_crop_of_full_render() {
    let content = CircleContent::new().radius(MetadataValue::Fixed(7.3));
    let whole = content.render(&full(32.0, 24.0)).unwrap();
    let region = sub_region(9, 5, 11, 13);
    let part = content
        .render(&ContentContext {
            resolution: Resolution::flat(32.0, 24.0),
            region,
        })
        .unwrap();
    assert_eq!(part, crop_buffer(whole, region));
}

#[test]
fn horizontal_gradient_runs_left_to_right() {
    let content = GradientContent::new(
        GradientDirection::Horizontal,
        vec![
            GradientStop::new(0.0, Color::BLACK),
            GradientStop::new(1.0, Color::WHITE),
        ],
    );
    let b = content.render(&full(100.0, 1.0)).unwrap();
    let first = b.pixel(0, 0, 0);
    let last = b.pixel(99, 0, 0);
    assert!(first[0] < 3);
    assert!(last[0] > 252);
    let reds: Vec<u8> = (0..100).map(|x| b.pixel(x, 0, 0)[0]).collect();
    assert!(reds.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn gradient_stops_are_sorted_before_sampling() {
    let unsorted = GradientContent::new(
        GradientDirection::Vertical,
        vec![
            GradientStop::new(1.0, Color::WHITE),
            GradientStop::new(0.0, Color::BLACK),
        ],
    );
    let b = unsorted.render(&full(1.0, 50.0)).unwrap();
    assert!(b.pixel(0, 0, 0)[0] < b.pixel(0, 49, 0)[0]);
}

#[test]
fn sample_stops_clamps_and_interpolates() {
    let stops = vec![
        GradientStop::new(0.25, Color::BLACK),
        GradientStop::new(0.75, Color::WHITE),
    ];
    assert_eq!(sample_stops(&stops, 0.0), Color::BLACK);
    assert_eq!(sample_stops(&stops, 1.0), Color::WHITE);
    assert!((sample_stops(&stops, 0.5).red - 0.5).abs() < 1e-12);
    assert_eq!(sample_stops(&[], 0.5), Color::CLEAR);
}

#[test]
fn extend_modes_fold_into_unit_range() {
    assert_eq!(GradientExtend::Clamp.apply(1.5), 1.0);
    assert!((GradientExtend::Repeat.apply(1.25) - 0.25).abs() < 1e-12);
    assert!((GradientExtend::Mirror.apply(1.25) - 0.75).abs() < 1e-12);
    assert!((GradientExtend::Mirror.apply(-0.25) - 0.25).abs() < 1e-12);
}

#[test]
fn gradient_enums_enumerate_and_parse() {
    assert_eq!(
        EnumParameter::<GradientDirection>::options(),
        vec![
            GradientDirection::Horizontal,
            GradientDirection::Vertical,
            GradientDirection::Radial,
        ]
    );
    assert_eq!(GradientExtend::from_str("mirror").unwrap(), GradientExtend::Mirror);
    assert_eq!(GradientDirection::Radial.to_string(), "radial");
}

#[test]
fn zero_gradient_scale_is_rejected() {
    let content = GradientContent::new(GradientDirection::Radial, Vec::new()).scale(0.0);
    let err = content.render(&full(4.0, 4.0)).unwrap_err();
    assert!(matches!(err, GraphError::Validation(_)));
}

#[test]
fn spacer_is_transparent_and_flexible() {
    let spacer = SpacerContent::new(3.0);
    let r = spacer.resolution(&Specification::new(Resolution::flat(10.0, 10.0)));
    assert_eq!(r, DynamicResolution::spacer(3.0));
    assert!(spacer.render(&full(4.0, 4.0)).unwrap().is_clear());
}

#[test]
fn parameters_follow_resolution() {
    let content = CircleContent::new();
    assert_eq!(content.radius.eval(Resolution::flat(100.0, 40.0)), 10.0);
    assert_eq!(
        content.position.eval(Resolution::flat(100.0, 40.0)),
        Point::new(50.0, 20.0)
    );
    assert!(content.radius.spatial);
}
