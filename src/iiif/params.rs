//! Parameter types parsed from raw request strings.
//!
//! Each type is produced by a single [`FromStr`] step: the grammar match
//! runs once, its capture groups are bound to locals, and the result is a
//! tagged variant. The [`interpreter`](super::interpreter) then dispatches on
//! the variant with one exhaustive `match` instead of re-classifying strings.
//!
//! ## Types
//!
//! - [`Region`] — `full`, `square`, percentage or pixel rectangle.
//! - [`Size`] — `full`, `max`, percentage of width, or explicit sides with a [`Fit`].
//! - [`Rotation`] — degrees plus an optional mirror flag.
//! - [`Quality`] — color, gray, bitonal, default.
//! - [`Format`] — output container.

use super::error::ParamError;
use super::grammar::{ParamKind, grammar, validate};
use regex::Captures;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// How a resize treats the target box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Fit {
    /// Force the given dimensions; aspect ratio may change when both are set.
    Cover,
    /// Preserve aspect ratio, fitting within the given box.
    Inside,
}

impl fmt::Display for Fit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Fit::Cover => "cover",
            Fit::Inside => "inside",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Region {
    Full,
    Square,
    /// Percentages of the current width/height: x, y, w, h.
    Percent { x: f64, y: f64, w: f64, h: f64 },
    /// Pixel rectangle: x, y, w, h.
    Pixels { x: u32, y: u32, w: u32, h: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Size {
    Full,
    Max,
    /// Percentage of the current width.
    Percent(f64),
    /// `None` on a side means "derive from aspect ratio".
    Explicit {
        width: Option<u32>,
        height: Option<u32>,
        fit: Fit,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    /// Mirror horizontally before rotating (`!` prefix).
    pub mirror: bool,
    pub degrees: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quality {
    Color,
    Gray,
    Bitonal,
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Jpg,
    Tif,
    Gif,
    Png,
    Webp,
}

impl Format {
    pub fn extension(self) -> &'static str {
        match self {
            Format::Jpg => "jpg",
            Format::Tif => "tif",
            Format::Gif => "gif",
            Format::Png => "png",
            Format::Webp => "webp",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Match `value` against the grammar for `kind`, returning its captures.
fn captures(kind: ParamKind, value: &str) -> Result<Captures<'_>, ParamError> {
    grammar(kind)
        .captures(value)
        .ok_or_else(|| ParamError::invalid(kind, value, "does not match grammar"))
}

/// Parse a named capture as a number, mapping overflow to `InvalidParameter`.
fn number<T: FromStr>(
    caps: &Captures<'_>,
    name: &str,
    kind: ParamKind,
    value: &str,
) -> Result<Option<T>, ParamError> {
    caps.name(name)
        .map(|m| {
            m.as_str()
                .parse::<T>()
                .map_err(|_| ParamError::invalid(kind, value, format!("'{}' is out of range", m.as_str())))
        })
        .transpose()
}

impl FromStr for Region {
    type Err = ParamError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let kind = ParamKind::Region;
        let caps = captures(kind, value)?;

        if caps.name("full").is_some() {
            return Ok(Region::Full);
        }
        if caps.name("square").is_some() {
            return Ok(Region::Square);
        }
        let pct = (
            number::<f64>(&caps, "px", kind, value)?,
            number::<f64>(&caps, "py", kind, value)?,
            number::<f64>(&caps, "pw", kind, value)?,
            number::<f64>(&caps, "ph", kind, value)?,
        );
        if let (Some(x), Some(y), Some(w), Some(h)) = pct {
            return Ok(Region::Percent { x, y, w, h });
        }
        let px = (
            number::<u32>(&caps, "x", kind, value)?,
            number::<u32>(&caps, "y", kind, value)?,
            number::<u32>(&caps, "w", kind, value)?,
            number::<u32>(&caps, "h", kind, value)?,
        );
        match px {
            (Some(x), Some(y), Some(w), Some(h)) => Ok(Region::Pixels { x, y, w, h }),
            _ => Err(ParamError::invalid(kind, value, "does not match grammar")),
        }
    }
}

impl FromStr for Size {
    type Err = ParamError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let kind = ParamKind::Size;
        let caps = captures(kind, value)?;

        if caps.name("full").is_some() {
            return Ok(Size::Full);
        }
        if caps.name("max").is_some() {
            return Ok(Size::Max);
        }
        if let Some(pct) = number::<f64>(&caps, "pct", kind, value)? {
            return Ok(Size::Percent(pct));
        }
        if let Some(width) = number::<u32>(&caps, "width_only", kind, value)? {
            return Ok(Size::Explicit {
                width: Some(width),
                height: None,
                fit: Fit::Cover,
            });
        }
        if let Some(height) = number::<u32>(&caps, "height_only", kind, value)? {
            return Ok(Size::Explicit {
                width: None,
                height: Some(height),
                fit: Fit::Cover,
            });
        }
        let fit = if caps.name("bang").is_some() {
            Fit::Inside
        } else {
            Fit::Cover
        };
        Ok(Size::Explicit {
            width: number::<u32>(&caps, "w", kind, value)?,
            height: number::<u32>(&caps, "h", kind, value)?,
            fit,
        })
    }
}

impl FromStr for Rotation {
    type Err = ParamError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let kind = ParamKind::Rotation;
        let caps = captures(kind, value)?;
        let degrees = number::<f64>(&caps, "degrees", kind, value)?
            .filter(|d| d.is_finite())
            .ok_or_else(|| ParamError::invalid(kind, value, "rotation is not numeric"))?;
        Ok(Rotation {
            mirror: caps.name("mirror").is_some(),
            degrees,
        })
    }
}

impl FromStr for Quality {
    type Err = ParamError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        validate(ParamKind::Quality, value)?;
        match value {
            "color" => Ok(Quality::Color),
            "gray" => Ok(Quality::Gray),
            "bitonal" => Ok(Quality::Bitonal),
            "default" => Ok(Quality::Default),
            _ => Err(ParamError::invalid(
                ParamKind::Quality,
                value,
                "does not match grammar",
            )),
        }
    }
}

impl FromStr for Format {
    type Err = ParamError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        validate(ParamKind::Format, value)?;
        match value {
            "jpg" => Ok(Format::Jpg),
            "tif" => Ok(Format::Tif),
            "gif" => Ok(Format::Gif),
            "png" => Ok(Format::Png),
            "webp" => Ok(Format::Webp),
            _ => Err(ParamError::invalid(
                ParamKind::Format,
                value,
                "does not match grammar",
            )),
        }
    }
}
