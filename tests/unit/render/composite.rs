use super::*;

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src, 1.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn black_fill_darkens_white_by_alpha() {
    let mut px = vec![255u8, 255, 255, 255];
    fill_over_in_place(&mut px, Rgba8Premul::from_straight_rgba(0, 0, 0, 255), 0.5);
    // 255 * (1 - 128/255) = 127
    assert_eq!(px, vec![127, 127, 127, 255]);
}

#[test]
fn unpremultiply_restores_straight_channels() {
    assert_eq!(unpremultiply([0, 0, 0, 0]), [0, 0, 0, 0]);
    assert_eq!(unpremultiply([10, 20, 30, 255]), [10, 20, 30, 255]);
    let p = Rgba8Premul::from_straight_rgba(200, 100, 50, 128).to_array();
    let s = unpremultiply(p);
    for (a, b) in s.iter().zip([200u8, 100, 50, 128]) {
        assert!((i32::from(*a) - i32::from(b)).abs() <= 2);
    }
}
