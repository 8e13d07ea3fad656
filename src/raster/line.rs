use crate::canvas::surface::Canvas;
use crate::foundation::core::Rgba;
use crate::foundation::error::PixmillResult;

/// Draw a Bresenham line between two inclusive endpoints.
///
/// Endpoints are normalized before stepping, so `line(a, b)` and `line(b, a)` touch the same
/// pixels. Both endpoints are bounds-checked before anything is written.
pub fn line(
    canvas: &mut Canvas<'_>,
    p0: (i32, i32),
    p1: (i32, i32),
    color: Rgba,
) -> PixmillResult<()> {
    canvas.pixel(p0.0, p0.1)?;
    canvas.pixel(p1.0, p1.1)?;
    line_unchecked(canvas, p0, p1, color);
    Ok(())
}

/// Draw a closed outline through `vertices`.
pub fn polygon(
    canvas: &mut Canvas<'_>,
    vertices: &[(i32, i32)],
    color: Rgba,
) -> PixmillResult<()> {
    for &(x, y) in vertices {
        canvas.pixel(x, y)?;
    }
    for (i, &a) in vertices.iter().enumerate() {
        let b = vertices[(i + 1) % vertices.len()];
        line_unchecked(canvas, a, b, color);
    }
    Ok(())
}

fn line_unchecked(
    canvas: &mut Canvas<'_>,
    p0: (i32, i32),
    p1: (i32, i32),
    color: Rgba,
) {
    let (x0, y0) = (i64::from(p0.0), i64::from(p0.1));
    let (x1, y1) = (i64::from(p1.0), i64::from(p1.1));

    if (y1 - y0).abs() < (x1 - x0).abs() {
        if x0 > x1 {
            shallow(canvas, (x1, y1), (x0, y0), color);
        } else {
            shallow(canvas, (x0, y0), (x1, y1), color);
        }
    } else if y0 > y1 {
        steep(canvas, (x1, y1), (x0, y0), color);
    } else {
        steep(canvas, (x0, y0), (x1, y1), color);
    }
}

// x0 <= x1, |dy| < |dx|
fn shallow(canvas: &mut Canvas<'_>, (x0, y0): (i64, i64), (x1, y1): (i64, i64), color: Rgba) {
    let dx = x1 - x0;
    let (dy, step) = if y1 >= y0 { (y1 - y0, 1) } else { (y0 - y1, -1) };

    let mut d = 2 * dy - dx;
    let mut y = y0;
    for x in x0..=x1 {
        canvas.blend_at(x as i32, y as i32, color);
        if d > 0 {
            y += step;
            d += 2 * (dy - dx);
        } else {
            d += 2 * dy;
        }
    }
}

// y0 <= y1, |dx| <= |dy|
fn steep(canvas: &mut Canvas<'_>, (x0, y0): (i64, i64), (x1, y1): (i64, i64), color: Rgba) {
    let (dx, step) = if x1 >= x0 { (x1 - x0, 1) } else { (x0 - x1, -1) };
    let dy = y1 - y0;

    let mut d = 2 * dx - dy;
    let mut x = x0;
    for y in y0..=y1 {
        canvas.blend_at(x as i32, y as i32, color);
        if d > 0 {
            x += step;
            d += 2 * (dx - dy);
        } else {
            d += 2 * dx;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/line.rs"]
mod tests;
