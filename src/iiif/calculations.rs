//! Pure calculation functions for region and size geometry.
//!
//! All functions here are pure and testable without any pipeline. Each takes
//! the current [`Dimensions`] by value; the interpreter threads the result
//! into the next step.

use super::error::ParamError;
use super::grammar::ParamKind;
use super::params::Region;
use super::pipeline::{Dimensions, Rect};

/// `pct` percent of `length`, rounded to the nearest pixel.
///
/// Returns `None` when the result is NaN, infinite, or does not fit a `u32`.
///
/// # Examples
/// ```ignore
/// assert_eq!(percent_of(200, 10.0), Some(20));
/// assert_eq!(percent_of(3, 50.0), Some(2)); // 1.5 rounds up
/// ```
pub fn percent_of(length: u32, pct: f64) -> Option<u32> {
    let pixels = (f64::from(length) * pct / 100.0).round();
    (0.0..=f64::from(u32::MAX))
        .contains(&pixels)
        .then_some(pixels as u32)
}

/// Centered square crop on the shorter side.
///
/// Returns `None` when the image is already square.
pub fn square_crop(dims: Dimensions) -> Option<Rect> {
    let (width, height) = (dims.width(), dims.height());
    let side = width.min(height);
    let offset = width.abs_diff(height) / 2;

    if width > height {
        Some(Rect {
            left: offset,
            top: 0,
            width: side,
            height: side,
        })
    } else if height > width {
        Some(Rect {
            left: 0,
            top: offset,
            width: side,
            height: side,
        })
    } else {
        None
    }
}

/// Convert a percentage region to pixels against the current dimensions.
///
/// x and w scale with the width, y and h with the height. `None` if any
/// side overflows the pixel range.
pub fn percent_rect(dims: Dimensions, x: f64, y: f64, w: f64, h: f64) -> Option<Rect> {
    Some(Rect {
        left: percent_of(dims.width(), x)?,
        top: percent_of(dims.height(), y)?,
        width: percent_of(dims.width(), w)?,
        height: percent_of(dims.height(), h)?,
    })
}

/// The crop rectangle a region selects, or `None` for no crop.
///
/// The rectangle may have a zero side; callers reject those. A percentage
/// region that overflows the pixel range fails with `InvalidParameter`, the
/// same as an oversized pixel region.
pub fn region_rect(
    dims: Dimensions,
    region: Region,
    value: &str,
) -> Result<Option<Rect>, ParamError> {
    match region {
        Region::Full => Ok(None),
        Region::Square => Ok(square_crop(dims)),
        Region::Percent { x, y, w, h } => percent_rect(dims, x, y, w, h)
            .map(Some)
            .ok_or_else(|| {
                ParamError::invalid(ParamKind::Region, value, "percentage region is out of range")
            }),
        Region::Pixels { x, y, w, h } => Ok(Some(Rect {
            left: x,
            top: y,
            width: w,
            height: h,
        })),
    }
}
