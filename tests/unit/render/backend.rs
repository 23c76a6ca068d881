use super::*;

const RED: [u8; 4] = [255, 0, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];

#[test]
fn buffer_indexing_is_x_then_y_then_z() {
    let mut b = Buffer::cleared(PixelExtent::new(3, 2, 2));
    b.put_pixel(2, 1, 1, RED);
    assert_eq!(b.index(2, 1, 1), ((3 * 2 + 3 + 2) * 4) as usize);
    assert_eq!(b.pixel(2, 1, 1), RED);
    assert_eq!(b.slice(0), &[0u8; 24][..]);
    assert!(!b.is_clear());
}

#[test]
fn from_raw_checks_length() {
    let extent = PixelExtent::new(2, 2, 1);
    assert!(Buffer::from_raw(extent, vec![0; 16]).is_ok());
    let err = Buffer::from_raw(extent, vec![0; 15]).unwrap_err();
    assert!(err.to_string().starts_with("render error:"));
}

#[test]
fn cpu_backend_clear_is_transparent() {
    let b = CpuBackend::new().clear(PixelExtent::new(200, 100, 1));
    assert_eq!(b.extent, PixelExtent::new(200, 100, 1));
    assert!(b.is_clear());
}

#[test]
fn place_clips_parts_to_extent() {
    let backend = CpuBackend::new();
    let red = Buffer::filled(PixelExtent::new(2, 2, 1), RED);
    let blue = Buffer::filled(PixelExtent::new(2, 2, 1), BLUE);
    let out = backend
        .place(
            PixelExtent::new(3, 3, 1),
            vec![
                (red, PixelOffset::new(-1, -1, 0)),
                (blue, PixelOffset::new(2, 2, 0)),
            ],
        )
        .unwrap();
    assert_eq!(out.pixel(0, 0, 0), RED);
    assert_eq!(out.pixel(1, 1, 0), [0; 4]);
    assert_eq!(out.pixel(2, 2, 0), BLUE);
    assert_eq!(out.pixel(2, 1, 0), [0; 4]);
}

#[test]
fn stack_of_nothing_is_an_error() {
    let err = CpuBackend::new()
        .stack(Vec::new(), Axis::Horizontal, Alignment::Center)
        .unwrap_err();
    assert!(matches!(err, GraphError::Render(_)));
}
