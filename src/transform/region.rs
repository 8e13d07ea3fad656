use crate::canvas::surface::Canvas;
use crate::canvas::view::CanvasView;
use crate::foundation::math::sort_corners;

/// Nearest-neighbor resample of `src` into the rectangle `[x0, x1) x [y0, y1)` of `dst`.
///
/// Corners may be given in any order; reversing them on an axis mirrors the copy along that
/// axis. The rectangle is clipped to `dst`, and every write goes through the destination's
/// blend mode. Zero-area sources or targets leave `dst` untouched.
pub fn copy_region(
    src: &CanvasView<'_>,
    dst: &mut Canvas<'_>,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
) {
    if src.is_empty() {
        return;
    }

    let mirror_x = x0 > x1;
    let mirror_y = y0 > y1;
    let (left, top, right, bottom) = sort_corners(x0, y0, x1, y1);
    let (left, top, right, bottom) = (
        i64::from(left),
        i64::from(top),
        i64::from(right),
        i64::from(bottom),
    );

    let target_w = right - left;
    let target_h = bottom - top;
    if target_w == 0 || target_h == 0 {
        return;
    }

    let src_w = i64::from(src.width());
    let src_h = i64::from(src.height());

    let y_range = top.max(0)..bottom.min(i64::from(dst.height()));
    let x_range = left.max(0)..right.min(i64::from(dst.width()));

    for y in y_range {
        let mut sy = (y - top) * src_h / target_h;
        if mirror_y {
            sy = src_h - 1 - sy;
        }

        for x in x_range.clone() {
            let mut sx = (x - left) * src_w / target_w;
            if mirror_x {
                sx = src_w - 1 - sx;
            }

            let color = src.pixel_at(sx as i32, sy as i32);
            dst.blend_at(x as i32, y as i32, color);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/region.rs"]
mod tests;
