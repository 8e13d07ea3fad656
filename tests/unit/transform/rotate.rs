use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use super::*;
use crate::composite::blend::BlendMode;
use crate::transform::region::copy_region;

fn gradient(w: i32, h: i32) -> Vec<u32> {
    (0..w * h)
        .map(|i| Rgba::new((i * 17) as u8, (i * 5) as u8, 200, 255).0)
        .collect()
}

#[test]
fn to_affine_places_src_origin_on_dst_origin() {
    let params = RotateScale::new(Point::new(1.0, 2.0), Point::new(10.0, 20.0))
        .with_rotation(1.0)
        .with_scale(3.0, 0.5);
    let p = params.to_affine() * Point::new(1.0, 2.0);
    assert!((p.x - 10.0).abs() < 1e-9);
    assert!((p.y - 20.0).abs() < 1e-9);
}

#[test]
fn identity_placement_matches_copy_region() {
    let src_data = gradient(3, 2);
    let src = CanvasView::new(&src_data, 3, 2, 3).unwrap();

    let mut expected = vec![0u32; 30];
    let mut dst = Canvas::new(&mut expected, 6, 5, 6, BlendMode::Overwrite).unwrap();
    copy_region(&src, &mut dst, 2, 1, 5, 3);

    let mut actual = vec![0u32; 30];
    let mut dst = Canvas::new(&mut actual, 6, 5, 6, BlendMode::Overwrite).unwrap();
    copy_rotated_scaled(
        &src,
        &mut dst,
        RotateScale::new(Point::new(1.0, 1.0), Point::new(3.0, 2.0)),
    );

    assert_eq!(actual, expected);
}

#[test]
fn identity_placement_clips_like_copy_region() {
    let src_data = gradient(4, 4);
    let src = CanvasView::new(&src_data, 4, 4, 4).unwrap();

    let mut expected = vec![0u32; 9];
    let mut dst = Canvas::new(&mut expected, 3, 3, 3, BlendMode::Overwrite).unwrap();
    copy_region(&src, &mut dst, -2, 1, 2, 5);

    let mut actual = vec![0u32; 9];
    let mut dst = Canvas::new(&mut actual, 3, 3, 3, BlendMode::Overwrite).unwrap();
    copy_rotated_scaled(
        &src,
        &mut dst,
        RotateScale::new(Point::ORIGIN, Point::new(-2.0, 1.0)),
    );

    assert_eq!(actual, expected);
}

#[test]
fn uniform_scale_two_fills_a_block() {
    let red = Rgba::opaque(255, 0, 0);
    let src_data = vec![red.0];
    let src = CanvasView::new(&src_data, 1, 1, 1).unwrap();
    let mut dst_data = vec![0u32; 16];
    let mut dst = Canvas::new(&mut dst_data, 4, 4, 4, BlendMode::Overwrite).unwrap();
    copy_rotated_scaled(&src, &mut dst, RotateScale::default().with_scale(2.0, 2.0));

    for y in 0..4 {
        for x in 0..4 {
            let expected = if x < 2 && y < 2 { red.0 } else { 0 };
            assert_eq!(dst_data[y * 4 + x], expected, "({x}, {y})");
        }
    }
}

#[test]
fn quarter_turn_stands_a_row_upright() {
    let (a, b) = (Rgba::opaque(255, 0, 0), Rgba::opaque(0, 0, 255));
    let src_data = vec![a.0, b.0];
    let src = CanvasView::new(&src_data, 2, 1, 2).unwrap();
    let mut dst_data = vec![Rgba::WHITE.0; 9];
    let mut dst = Canvas::new(&mut dst_data, 3, 3, 3, BlendMode::AlphaComposite).unwrap();
    copy_rotated_scaled(
        &src,
        &mut dst,
        RotateScale::new(Point::ORIGIN, Point::new(1.0, 2.0)).with_rotation(FRAC_PI_2),
    );

    assert_eq!(dst_data[4], a.0);
    assert_eq!(dst_data[1], b.0);
    let untouched = dst_data.iter().filter(|&&p| p == Rgba::WHITE.0).count();
    assert_eq!(untouched, 7);
}

#[test]
fn positive_rotation_turns_counter_clockwise() {
    let (a, b) = (Rgba::opaque(255, 0, 0), Rgba::opaque(0, 0, 255));
    let src_data = vec![a.0, b.0];
    let src = CanvasView::new(&src_data, 2, 1, 2).unwrap();
    let at = |data: &[u32], x: usize, y: usize| data[y * 5 + x];

    let mut ccw = vec![0u32; 25];
    let mut dst = Canvas::new(&mut ccw, 5, 5, 5, BlendMode::Overwrite).unwrap();
    copy_rotated_scaled(
        &src,
        &mut dst,
        RotateScale::new(Point::ORIGIN, Point::new(2.0, 2.0)).with_rotation(FRAC_PI_2),
    );
    // +x of the source now points up
    assert_eq!(at(&ccw, 2, 1), a.0);
    assert_eq!(at(&ccw, 2, 0), b.0);

    let mut cw = vec![0u32; 25];
    let mut dst = Canvas::new(&mut cw, 5, 5, 5, BlendMode::Overwrite).unwrap();
    copy_rotated_scaled(
        &src,
        &mut dst,
        RotateScale::new(Point::ORIGIN, Point::new(2.0, 2.0)).with_rotation(-FRAC_PI_2),
    );
    assert_eq!(at(&cw, 1, 2), a.0);
    assert_eq!(at(&cw, 1, 3), b.0);
}

#[test]
fn to_affine_maps_unit_x_upward_for_quarter_turn() {
    let forward = RotateScale::default().with_rotation(FRAC_PI_2).to_affine();
    let p = forward * Point::new(1.0, 0.0);
    assert!(p.x.abs() < 1e-9);
    assert!((p.y + 1.0).abs() < 1e-9);
}

#[test]
fn pixels_outside_source_receive_transparent_sentinel() {
    let red = Rgba::opaque(255, 0, 0);
    let src_data = vec![red.0; 16];
    let src = CanvasView::new(&src_data, 4, 4, 4).unwrap();
    let mut dst_data = vec![0u32; 64];
    let mut dst = Canvas::new(&mut dst_data, 8, 8, 8, BlendMode::Overwrite).unwrap();
    copy_rotated_scaled(
        &src,
        &mut dst,
        RotateScale::new(Point::new(2.0, 2.0), Point::new(4.0, 4.0)).with_rotation(FRAC_PI_4),
    );

    assert_eq!(dst_data[4 * 8 + 4], red.0);
    assert_eq!(dst_data[8 + 1], Rgba::new(255, 255, 255, 0).0);
    assert_eq!(dst_data[0], 0);
}

#[test]
fn degenerate_placement_is_noop() {
    let src_data = vec![Rgba::WHITE.0; 4];
    let src = CanvasView::new(&src_data, 2, 2, 2).unwrap();
    let mut dst_data = vec![0u32; 16];
    let mut dst = Canvas::new(&mut dst_data, 4, 4, 4, BlendMode::Overwrite).unwrap();

    copy_rotated_scaled(&src, &mut dst, RotateScale::default().with_scale(0.0, 1.0));
    copy_rotated_scaled(&src, &mut dst, RotateScale::default().with_rotation(f64::NAN));
    assert!(dst_data.iter().all(|&p| p == 0));
}
