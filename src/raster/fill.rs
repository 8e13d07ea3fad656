use std::ops::RangeInclusive;

use crate::canvas::surface::Canvas;
use crate::foundation::core::Rgba;
use crate::foundation::error::PixmillResult;

/// Fill the triangle `p0, p1, p2`, clipped to the canvas.
///
/// The triangle is split at the middle vertex into a flat-bottom upper half and a flat-top
/// lower half. A triangle whose vertices all share one row draws nothing. Never fails.
pub fn fill_triangle(
    canvas: &mut Canvas<'_>,
    p0: (i32, i32),
    p1: (i32, i32),
    p2: (i32, i32),
    color: Rgba,
) {
    // i32 deltas reach 2^32, so edge products need 128 bits
    let mut v = [p0, p1, p2].map(|(x, y)| (i128::from(x), i128::from(y)));
    v.sort_by_key(|&(_, y)| y);
    let [(x0, y0), (x1, y1), (x2, y2)] = v;

    if y0 == y2 {
        return;
    }

    if y1 == y2 {
        fill_flat(canvas, (x0, y0), y1, (x1, x2), y0..=y1, color);
        return;
    }

    let xi = x0 + (y1 - y0) * (x2 - x0) / (y2 - y0);
    fill_flat(canvas, (x0, y0), y1, (x1, xi), y0..=y1, color);
    fill_flat(canvas, (x2, y2), y1, (x1, xi), (y1 + 1)..=y2, color);
}

/// Fill the rectangle spanned by two corners (any order, exclusive right/bottom).
pub fn fill_rectangle(
    canvas: &mut Canvas<'_>,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: Rgba,
) -> PixmillResult<()> {
    canvas.sub_canvas(x0, y0, x1, y1)?.fill(color);
    Ok(())
}

/// Scan rows of a triangle with one vertex at `apex` and the other two on row `base_y`.
fn fill_flat(
    canvas: &mut Canvas<'_>,
    (ax, ay): (i128, i128),
    base_y: i128,
    (bx0, bx1): (i128, i128),
    rows: RangeInclusive<i128>,
    color: Rgba,
) {
    let w = i128::from(canvas.width());
    let h = i128::from(canvas.height());
    let first = (*rows.start()).max(0);
    let last = (*rows.end()).min(h - 1);

    for y in first..=last {
        let (left, right) = if base_y == ay {
            (ax.min(bx0).min(bx1), ax.max(bx0).max(bx1))
        } else {
            let xa = ax + (y - ay) * (bx0 - ax) / (base_y - ay);
            let xb = ax + (y - ay) * (bx1 - ax) / (base_y - ay);
            (xa.min(xb), xa.max(xb))
        };

        for x in left.max(0)..=right.min(w - 1) {
            canvas.blend_at(x as i32, y as i32, color);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/fill.rs"]
mod tests;
