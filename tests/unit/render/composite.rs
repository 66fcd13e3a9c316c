use super::*;

#[test]
fn opaque_source_replaces_destination() {
    assert_eq!(over([10, 20, 30, 255], [200, 100, 50, 255], 1.0), [200, 100, 50, 255]);
}

#[test]
fn transparent_or_zero_opacity_is_a_no_op() {
    let dst = [10, 20, 30, 255];
    assert_eq!(over(dst, [0, 0, 0, 0], 1.0), dst);
    assert_eq!(over(dst, [255, 255, 255, 255], 0.0), dst);
}

#[test]
fn half_alpha_blends_over_black() {
    let out = over([0, 0, 0, 255], [128, 0, 0, 128], 1.0);
    assert_eq!(out, [128, 0, 0, 255]);
}

#[test]
fn buffer_over_checks_lengths() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4]).is_err());
    over_in_place(&mut dst, &[255, 0, 0, 255, 0, 0, 0, 0]).unwrap();
    assert_eq!(dst, vec![255, 0, 0, 255, 0, 0, 0, 0]);
}

#[test]
fn unpremultiply_restores_straight_channels() {
    let mut px = vec![64, 32, 0, 128, 9, 9, 9, 0, 1, 2, 3, 255];
    unpremultiply_in_place(&mut px);
    assert_eq!(px, vec![128, 64, 0, 128, 9, 9, 9, 0, 1, 2, 3, 255]);
}
