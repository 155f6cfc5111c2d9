use super::*;
use crate::foundation::core::Color;
use crate::scene::gradient::ColorStop;

fn luma(px: [u8; 4]) -> u32 {
    u32::from(px[0]) + u32::from(px[1]) + u32::from(px[2])
}

#[test]
fn linear_to_right_runs_from_first_to_last_stop() {
    let mut s = Surface::new(32, 4).unwrap();
    let g = GradientDef::linear(
        "to right",
        vec![ColorStop::new(Color::BLACK), ColorStop::new(Color::WHITE)],
    );
    paint_gradient(&mut s, &g);

    let left = s.pixel(0, 2).unwrap();
    let mid = s.pixel(16, 2).unwrap();
    let right = s.pixel(31, 2).unwrap();
    assert!(luma(left) < 30, "{left:?}");
    assert!(luma(right) > 700, "{right:?}");
    assert!(luma(left) < luma(mid) && luma(mid) < luma(right));
    assert_eq!(right[3], 255);
}

#[test]
fn default_direction_runs_top_to_bottom() {
    let mut s = Surface::new(4, 32).unwrap();
    let g = GradientDef::linear(
        "",
        vec![ColorStop::new(Color::WHITE), ColorStop::new(Color::BLACK)],
    );
    paint_gradient(&mut s, &g);
    assert!(luma(s.pixel(2, 0).unwrap()) > luma(s.pixel(2, 31).unwrap()));
}

#[test]
fn radial_is_brightest_at_center() {
    let mut s = Surface::new(21, 21).unwrap();
    let g = GradientDef::radial(
        "circle",
        vec![ColorStop::new(Color::WHITE), ColorStop::new(Color::BLACK)],
    );
    paint_gradient(&mut s, &g);
    assert!(luma(s.pixel(10, 10).unwrap()) > luma(s.pixel(0, 0).unwrap()));
    assert!(luma(s.pixel(10, 10).unwrap()) > luma(s.pixel(20, 10).unwrap()));
}

#[test]
fn single_stop_is_a_flat_fill() {
    let mut s = Surface::new(5, 5).unwrap();
    let g = GradientDef::linear("45deg", vec![ColorStop::new(Color::rgb(10, 200, 30))]);
    paint_gradient(&mut s, &g);
    assert!(s.data().chunks_exact(4).all(|p| p == [10, 200, 30, 255]));
}

#[test]
fn no_stops_leaves_surface_untouched() {
    let mut s = Surface::new(3, 3).unwrap();
    let before = s.clone();
    paint_gradient(&mut s, &GradientDef::linear("to right", Vec::new()));
    assert_eq!(s, before);
}
