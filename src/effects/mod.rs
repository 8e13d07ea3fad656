pub(crate) mod bloom;
pub(crate) mod brightness;
pub(crate) mod convolve;
pub(crate) mod fx;
pub(crate) mod kernel;

use crate::canvas::surface::Canvas;
use crate::canvas::view::CanvasView;
use crate::foundation::error::{PixmillError, PixmillResult};

pub(crate) fn ensure_same_size(
    op: &str,
    src: &CanvasView<'_>,
    dst: &Canvas<'_>,
) -> PixmillResult<()> {
    if src.width() != dst.width() || src.height() != dst.height() {
        return Err(PixmillError::validation(format!(
            "{op} expects matching sizes, got src {}x{} and dst {}x{}",
            src.width(),
            src.height(),
            dst.width(),
            dst.height()
        )));
    }
    Ok(())
}
