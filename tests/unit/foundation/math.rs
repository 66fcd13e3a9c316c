use super::*;

#[test]
fn fnv_hash_is_incremental_and_stable() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"starbeams");
    let mut b = Fnv1a64::new_default();
    b.write_bytes(b"star");
    b.write_bytes(b"beams");
    assert_eq!(a.finish(), b.finish());
    assert_eq!(Fnv1a64::new_default().finish(), Fnv1a64::OFFSET_BASIS);
}

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn map_range_extrapolates_and_handles_degenerate_input() {
    assert_eq!(map_range(5.0, 0.0, 10.0, 0.0, 100.0), 50.0);
    assert_eq!(map_range(0.0, 0.0, 10.0, 1.0, 0.0), 1.0);
    assert_eq!(map_range(20.0, 0.0, 10.0, 1.0, 0.0), -1.0);
    assert_eq!(map_range(3.0, 2.0, 2.0, 7.0, 9.0), 7.0);
}
