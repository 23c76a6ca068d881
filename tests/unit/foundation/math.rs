use super::*;

#[test]
fn split_writes_hash_like_a_single_write() {
    let mut a = StableHasher::new();
    a.write_bytes(b"stackgraph");
    let mut b = StableHasher::new();
    b.write_u8(b's');
    b.write_bytes(b"tackgraph");
    assert_eq!(a.finish(), b.finish());
}

#[test]
fn length_prefixed_strings_do_not_collide() {
    let mut a = StableHasher::new();
    a.write_str("ab");
    a.write_str("c");
    let mut b = StableHasher::new();
    b.write_str("a");
    b.write_str("bc");
    assert_ne!(a.finish(), b.finish());
}

#[test]
fn over_opaque_src_replaces_dst() {
    assert_eq!(over([0, 0, 0, 255], [255, 0, 0, 255]), [255, 0, 0, 255]);
    assert_eq!(over([10, 20, 30, 40], [0, 0, 0, 0]), [10, 20, 30, 40]);
}

#[test]
fn scale_premul_bounds() {
    let px = [200, 100, 50, 200];
    assert_eq!(scale_premul(px, 1.0), px);
    assert_eq!(scale_premul(px, 0.0), [0, 0, 0, 0]);
}
