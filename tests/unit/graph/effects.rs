use super::*;

fn pattern(extent: PixelExtent) -> Buffer {
    Buffer::from_fn(extent, |x, y, z| {
        let v = ((x * 37 + y * 11 + z * 5) % 256) as u8;
        [v, v / 2, 255 - v, 255]
    })
}

fn full_ctx(resolution: Resolution) -> EffectContext {
    let extent = resolution.to_extent().unwrap();
    EffectContext {
        resolution,
        extent,
        region: Region::full(extent),
        input_region: Region::full(extent),
    }
}

/// Apply `effect` to `region` only, feeding it the input voxels it asks for.
fn apply_region(
    effect: &dyn Effect,
    input: &Buffer,
    resolution: Resolution,
    region: Region,
) -> Buffer {
    let input_region = effect
        .input_region(resolution, region, input.extent)
        .unwrap_or_default();
    let ctx = EffectContext {
        resolution,
        extent: input.extent,
        region,
        input_region,
    };
    effect
        .apply(crop_buffer(input.clone(), input_region), &ctx)
        .unwrap()
}

#[test]
fn blur_input_region_grows_by_radius_and_clips() {
    let blur = BlurEffect::new(BlurStyle::Gaussian, MetadataValue::Fixed(3.0));
    let extent = PixelExtent::new(20, 20, 1);
    let region = Region::new(PixelOffset::new(1, 10, 0), PixelExtent::new(5, 5, 1));
    let grown = blur
        .input_region(Resolution::flat(20.0, 20.0), region, extent)
        .unwrap();
    assert_eq!(grown.origin, PixelOffset::new(0, 7, 0));
    assert_eq!(grown.extent, PixelExtent::new(9, 11, 1));
}

#[test]
fn blur_region_matches_full_blur() {
    let resolution = Resolution::flat(24.0, 18.0);
    let input = pattern(PixelExtent::new(24, 18, 1));
    for style in [BlurStyle::Gaussian, BlurStyle::Box] {
        let blur = BlurEffect::new(style, MetadataValue::Fixed(4.0));
        let whole = blur.apply(input.clone(), &full_ctx(resolution)).unwrap();
        let region = Region::new(PixelOffset::new(7, 3, 0), PixelExtent::new(9, 10, 1));
        let part = apply_region(&blur, &input, resolution, region);
        assert_eq!(part, crop_buffer(whole, region));
    }
}

#[test]
fn zero_radius_blur_is_identity() {
    let resolution = Resolution::flat(6.0, 4.0);
    let input = pattern(PixelExtent::new(6, 4, 1));
    let blur = BlurEffect::new(BlurStyle::Gaussian, MetadataValue::Zero);
    assert_eq!(blur.apply(input.clone(), &full_ctx(resolution)).unwrap(), input);
}

#[test]
fn default_blur_radius_tracks_resolution() {
    let blur = BlurEffect::default();
    assert_eq!(blur.pixel_radius(Resolution::flat(500.0, 300.0)), 6);
    assert!(blur.radius.spatial);
}

#[test]
fn identity_transform_copies_input() {
    let resolution = Resolution::flat(8.0, 6.0);
    let input = pattern(PixelExtent::new(8, 6, 2));
    let ctx = EffectContext {
        resolution,
        extent: input.extent,
        region: Region::full(input.extent),
        input_region: Region::full(input.extent),
    };
    let out = TransformEffect::new().apply(input.clone(), &ctx).unwrap();
    assert_eq!(out, input);
}

#[test]
fn translation_shifts_pixels() {
    let resolution = Resolution::flat(8.0, 4.0);
    let input = pattern(PixelExtent::new(8, 4, 1));
    let shift = TransformEffect::new().translation(MetadataValue::Fixed(Point::new(2.0, 1.0)));
    let out = shift.apply(input.clone(), &full_ctx(resolution)).unwrap();
    assert_eq!(out.pixel(5, 2, 0), input.pixel(3, 1, 0));
    assert_eq!(out.pixel(0, 0, 0), [0; 4]);
    assert_eq!(out.pixel(1, 3, 0), [0; 4]);
}

#[test]
fn rotated_region_matches_full_transform() {
    let resolution = Resolution::flat(30.0, 20.0);
    let input = pattern(PixelExtent::new(30, 20, 1));
    let spin = TransformEffect::new()
        .rotation(Angle::degrees(33.0))
        .scale(1.3)
        .translation(MetadataValue::Fixed(Point::new(-2.5, 1.0)));
    let whole = spin.apply(input.clone(), &full_ctx(resolution)).unwrap();
    for region in [
        Region::new(PixelOffset::new(0, 0, 0), PixelExtent::new(10, 10, 1)),
        Region::new(PixelOffset::new(12, 7, 0), PixelExtent::new(18, 13, 1)),
    ] {
        let part = apply_region(&spin, &input, resolution, region);
        assert_eq!(part, crop_buffer(whole.clone(), region));
    }
}

#[test]
fn collapsed_transform_renders_clear() {
    let resolution = Resolution::flat(4.0, 4.0);
    let flat = TransformEffect::new().scale(0.0);
    let extent = PixelExtent::new(4, 4, 1);
    assert!(flat.input_region(resolution, Region::full(extent), extent).is_none());
    let ctx = EffectContext {
        resolution,
        extent,
        region: Region::full(extent),
        input_region: Region::default(),
    };
    let out = flat.apply(Buffer::cleared(PixelExtent::default()), &ctx).unwrap();
    assert!(out.is_clear());
    assert_eq!(out.extent, extent);
}

#[test]
fn effect_fingerprints_differ_by_parameters() {
    let mut a = StableHasher::new();
    BlurEffect::new(BlurStyle::Box, MetadataValue::Fixed(2.0)).fingerprint(&mut a);
    let mut b = StableHasher::new();
    BlurEffect::new(BlurStyle::Gaussian, MetadataValue::Fixed(2.0)).fingerprint(&mut b);
    assert_ne!(a.finish(), b.finish());
}
