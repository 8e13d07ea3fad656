use super::*;

fn buffer(w: i32, h: i32) -> Vec<u32> {
    vec![0u32; (w * h) as usize]
}

#[test]
fn construction_rejects_negative_extent_and_short_stride() {
    let mut data = buffer(4, 4);
    assert!(matches!(
        Canvas::new(&mut data, -1, 4, 4, BlendMode::Overwrite),
        Err(PixmillError::Construction(_))
    ));
    assert!(matches!(
        Canvas::new(&mut data, 4, -1, 4, BlendMode::Overwrite),
        Err(PixmillError::Construction(_))
    ));
    assert!(matches!(
        Canvas::new(&mut data, 4, 4, 3, BlendMode::Overwrite),
        Err(PixmillError::Construction(_))
    ));
}

#[test]
fn construction_rejects_undersized_buffer() {
    let mut data = buffer(4, 3);
    assert!(matches!(
        Canvas::new(&mut data, 4, 4, 4, BlendMode::Overwrite),
        Err(PixmillError::Construction(_))
    ));
}

#[test]
fn last_row_needs_no_stride_padding() {
    // 3 rows of stride 6, width 4: 6 + 6 + 4
    let mut data = vec![0u32; 16];
    let mut canvas = Canvas::new(&mut data, 4, 3, 6, BlendMode::Overwrite).unwrap();
    canvas.fill(Rgba::WHITE);
    assert_eq!(data[15], Rgba::WHITE.0);
    assert_eq!(data[4], 0);

    let mut short = vec![0u32; 15];
    assert!(matches!(
        Canvas::new(&mut short, 4, 3, 6, BlendMode::Overwrite),
        Err(PixmillError::Construction(_))
    ));
}

#[test]
fn zero_sized_canvas_is_empty_and_valid() {
    let mut data: Vec<u32> = Vec::new();
    let canvas = Canvas::new(&mut data, 0, 0, 0, BlendMode::Overwrite).unwrap();
    assert!(canvas.is_empty());
    assert!(canvas.as_bytes().is_empty());
}

#[test]
fn fill_overwrite_sets_every_pixel() {
    let mut data = buffer(4, 4);
    let red = Rgba::new(255, 0, 0, 255);
    let mut canvas = Canvas::new(&mut data, 4, 4, 4, BlendMode::Overwrite).unwrap();
    canvas.fill(red);
    for y in 0..4 {
        for x in 0..4 {
            assert_eq!(canvas.pixel(x, y).unwrap(), red);
        }
    }
}

#[test]
fn blend_pixel_overwrite_round_trips() {
    let mut data = buffer(3, 2);
    let mut canvas = Canvas::new(&mut data, 3, 2, 3, BlendMode::Overwrite).unwrap();
    let c = Rgba::new(9, 8, 7, 6);
    for y in 0..2 {
        for x in 0..3 {
            canvas.blend_pixel(x, y, c).unwrap();
            assert_eq!(canvas.pixel(x, y).unwrap(), c);
        }
    }
}

#[test]
fn strict_accessors_reject_out_of_range() {
    let mut data = buffer(2, 2);
    let mut canvas = Canvas::new(&mut data, 2, 2, 2, BlendMode::Overwrite).unwrap();
    assert!(matches!(
        canvas.pixel(2, 0),
        Err(PixmillError::OutOfBounds { x: 2, y: 0, .. })
    ));
    assert!(canvas.blend_pixel(-1, 0, Rgba::WHITE).is_err());
    assert!(canvas.overwrite_pixel(0, 2, Rgba::WHITE).is_err());
    assert!(data.iter().all(|&p| p == 0));
}

#[test]
fn trusting_accessors_share_indexing() {
    let mut data = buffer(3, 3);
    let opts = CanvasOpts::new(3, 3).with_bounds(BoundsCheck::Trusting);
    let mut canvas = Canvas::with_opts(&mut data, opts).unwrap();
    canvas.overwrite_pixel(2, 1, Rgba::WHITE).unwrap();
    assert_eq!(canvas.pixel(2, 1).unwrap(), Rgba::WHITE);
    // Row 1, column 3 is row 2, column 0 in a tightly packed buffer.
    assert_eq!(canvas.pixel(3, 1).unwrap(), Rgba(data_at(&canvas, 0, 2)));
    drop(canvas);
    assert_eq!(data[5], Rgba::WHITE.0);
}

fn data_at(canvas: &Canvas<'_>, x: i32, y: i32) -> u32 {
    canvas.pixel(x, y).unwrap().0
}

#[test]
fn overwrite_pixel_bypasses_blend_mode() {
    let mut data = vec![Rgba::WHITE.0];
    let mut canvas = Canvas::new(&mut data, 1, 1, 1, BlendMode::AlphaComposite).unwrap();
    let half = Rgba::new(0, 0, 0, 128);
    canvas.overwrite_pixel(0, 0, half).unwrap();
    assert_eq!(canvas.pixel(0, 0).unwrap(), half);
}

#[test]
fn blend_mode_change_affects_only_later_writes() {
    let mut data = vec![Rgba::WHITE.0; 2];
    let mut canvas = Canvas::new(&mut data, 2, 1, 2, BlendMode::Overwrite).unwrap();
    let half = Rgba::new(0, 0, 0, 128);
    canvas.blend_pixel(0, 0, half).unwrap();
    canvas.set_blend_mode(BlendMode::AlphaComposite);
    canvas.blend_pixel(1, 0, half).unwrap();
    assert_eq!(canvas.pixel(0, 0).unwrap(), half);
    assert_eq!(canvas.pixel(1, 0).unwrap(), Rgba::new(127, 127, 127, 255));
}

#[test]
fn blend_mode_guard_restores_previous_mode() {
    let mut data = buffer(1, 1);
    let mut canvas = Canvas::new(&mut data, 1, 1, 1, BlendMode::AlphaComposite).unwrap();
    {
        let mut scoped = canvas.with_blend_mode(BlendMode::Overwrite);
        assert_eq!(scoped.blend_mode(), BlendMode::Overwrite);
        scoped.fill(Rgba::new(1, 2, 3, 4));
    }
    assert_eq!(canvas.blend_mode(), BlendMode::AlphaComposite);
    assert_eq!(canvas.pixel(0, 0).unwrap(), Rgba::new(1, 2, 3, 4));
}

#[test]
fn sub_canvas_aliases_parent_storage() {
    let mut data = buffer(4, 4);
    let mut canvas = Canvas::new(&mut data, 4, 4, 4, BlendMode::Overwrite).unwrap();
    {
        let mut sub = canvas.sub_canvas(1, 1, 3, 3).unwrap();
        assert_eq!((sub.width(), sub.height(), sub.stride()), (2, 2, 4));
        sub.fill(Rgba::WHITE);
    }
    for y in 0..4 {
        for x in 0..4 {
            let inside = (1..3).contains(&x) && (1..3).contains(&y);
            let expected = if inside { Rgba::WHITE } else { Rgba::TRANSPARENT };
            assert_eq!(canvas.pixel(x, y).unwrap(), expected, "({x}, {y})");
        }
    }
}

#[test]
fn sub_canvas_reversed_corners_match_forward() {
    let mut data: Vec<u32> = (0..16).collect();
    let mut canvas = Canvas::new(&mut data, 4, 4, 4, BlendMode::Overwrite).unwrap();
    let forward: Vec<Rgba> = {
        let sub = canvas.sub_canvas(1, 0, 3, 2).unwrap();
        (0..2)
            .flat_map(|y| (0..2).map(move |x| (x, y)))
            .map(|(x, y)| sub.pixel(x, y).unwrap())
            .collect()
    };
    let reversed: Vec<Rgba> = {
        let sub = canvas.sub_canvas(3, 2, 1, 0).unwrap();
        (0..2)
            .flat_map(|y| (0..2).map(move |x| (x, y)))
            .map(|(x, y)| sub.pixel(x, y).unwrap())
            .collect()
    };
    assert_eq!(forward, reversed);
    assert_eq!(forward, vec![Rgba(1), Rgba(2), Rgba(5), Rgba(6)]);
}

#[test]
fn sub_canvas_outside_parent_is_rejected() {
    let mut data = buffer(4, 4);
    let mut canvas = Canvas::new(&mut data, 4, 4, 4, BlendMode::Overwrite).unwrap();
    assert!(matches!(
        canvas.sub_canvas(2, 2, 5, 3),
        Err(PixmillError::OutOfBounds { .. })
    ));
    assert!(canvas.sub_canvas(-1, 0, 2, 2).is_err());
    assert!(canvas.sub_canvas(4, 4, 4, 4).unwrap().is_empty());
}

#[test]
fn sub_canvas_inherits_blend_mode() {
    let mut data = buffer(2, 2);
    let mut canvas = Canvas::new(&mut data, 2, 2, 2, BlendMode::FastAlphaComposite).unwrap();
    let sub = canvas.sub_canvas(0, 0, 1, 1).unwrap();
    assert_eq!(sub.blend_mode(), BlendMode::FastAlphaComposite);
}

#[test]
fn from_bytes_reads_rgba_byte_order() {
    let mut words = vec![0u32; 2];
    let bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut words);
    bytes[4..8].copy_from_slice(&[10, 20, 30, 40]);
    let canvas = Canvas::from_bytes(bytes, CanvasOpts::new(2, 1)).unwrap();
    assert_eq!(canvas.pixel(1, 0).unwrap().channels(), [10, 20, 30, 40]);
    assert_eq!(&canvas.as_bytes()[4..8], &[10, 20, 30, 40]);
}

#[test]
fn from_bytes_rejects_ragged_length() {
    let mut words = vec![0u32; 2];
    let bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut words);
    assert!(matches!(
        Canvas::from_bytes(&mut bytes[..7], CanvasOpts::new(1, 1)),
        Err(PixmillError::Construction(_))
    ));
}
