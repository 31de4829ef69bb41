//! Per-request interpretation of IIIF parameters.
//!
//! An [`Interpreter`] holds the current image [`Dimensions`] and a
//! [`TransformPipeline`]. Each parameter method parses its string, computes
//! the geometry against the current dimensions, and only then forwards
//! directives to the pipeline. A rejected parameter emits nothing; directives
//! from earlier successful calls stay emitted.
//!
//! ```
//! # use iiif_plan::iiif::{Directive, DirectiveList, Interpreter, Rect};
//! let mut interp = Interpreter::new(200, 100, DirectiveList::new()).unwrap();
//! interp.region("square").unwrap().size("50,").unwrap();
//!
//! let directives = interp.into_pipeline().into_directives();
//! assert_eq!(
//!     directives[0],
//!     Directive::Extract(Rect { left: 50, top: 0, width: 100, height: 100 })
//! );
//! ```

use super::calculations::{percent_of, region_rect};
use super::error::ParamError;
use super::grammar::ParamKind;
use super::params::{Fit, Format, Quality, Region, Rotation, Size};
use super::pipeline::{Dimensions, TransformPipeline};
use crate::request::ImageRequest;
use tracing::debug;

const ZERO_SIDE: &str = "width and height must both be > 0";

#[derive(Debug)]
pub struct Interpreter<P> {
    dims: Dimensions,
    pipeline: P,
}

impl<P: TransformPipeline> Interpreter<P> {
    /// Start interpreting a request against a `width` x `height` source.
    pub fn new(width: u32, height: u32, pipeline: P) -> Result<Self, ParamError> {
        Ok(Self::with_dimensions(Dimensions::new(width, height)?, pipeline))
    }

    pub fn with_dimensions(dims: Dimensions, pipeline: P) -> Self {
        Self { dims, pipeline }
    }

    /// Dimensions after the transforms applied so far.
    ///
    /// Only crops update these; a resize is left to the pipeline.
    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub fn into_pipeline(self) -> P {
        self.pipeline
    }

    pub fn region(&mut self, value: &str) -> Result<&mut Self, ParamError> {
        let region: Region = value.parse()?;
        let Some(rect) = region_rect(self.dims, region, value)? else {
            debug!(region = value, "region selects whole image");
            return Ok(self);
        };
        let dims = Dimensions::new(rect.width, rect.height).map_err(|_| {
            ParamError::InvalidRegion {
                value: value.to_string(),
            }
        })?;

        debug!(region = value, ?rect, "extract");
        self.pipeline.extract(rect);
        self.dims = dims;
        Ok(self)
    }

    pub fn size(&mut self, value: &str) -> Result<&mut Self, ParamError> {
        let (width, height, fit) = match value.parse::<Size>()? {
            Size::Full | Size::Max => {
                debug!(size = value, "size keeps current dimensions");
                return Ok(self);
            }
            Size::Percent(pct) => {
                if pct <= 0.0 {
                    return Err(ParamError::InvalidSize {
                        value: value.to_string(),
                        reason: "percentage must be > 0".to_string(),
                    });
                }
                let width = percent_of(self.dims.width(), pct).ok_or_else(|| {
                    ParamError::invalid(ParamKind::Size, value, "percentage is out of range")
                })?;
                (Some(width), None, Fit::Cover)
            }
            Size::Explicit { width, height, fit } => (width, height, fit),
        };
        if width == Some(0) || height == Some(0) {
            return Err(ParamError::InvalidSize {
                value: value.to_string(),
                reason: ZERO_SIDE.to_string(),
            });
        }

        debug!(size = value, ?width, ?height, %fit, "resize");
        self.pipeline.resize(width, height, fit);
        Ok(self)
    }

    /// Apply a rotation, mirroring first when the value starts with `!`.
    ///
    /// A zero angle emits no `rotate`; `!0` still mirrors.
    pub fn rotation(&mut self, value: &str) -> Result<&mut Self, ParamError> {
        let Rotation { mirror, degrees } = value.parse::<Rotation>()?;

        if mirror {
            debug!(rotation = value, "flip horizontal");
            self.pipeline.flip_horizontal();
        }
        if degrees != 0.0 {
            debug!(rotation = value, degrees, "rotate");
            self.pipeline.rotate(degrees);
        }
        Ok(self)
    }

    pub fn quality(&mut self, value: &str) -> Result<&mut Self, ParamError> {
        match value.parse::<Quality>()? {
            Quality::Color | Quality::Default => {}
            Quality::Gray => {
                debug!("grayscale");
                self.pipeline.grayscale();
            }
            Quality::Bitonal => {
                debug!("threshold");
                self.pipeline.threshold();
            }
        }
        Ok(self)
    }

    pub fn format(&mut self, value: &str) -> Result<&mut Self, ParamError> {
        let format: Format = value.parse()?;
        debug!(%format, "output format");
        self.pipeline.set_output_format(format);
        Ok(self)
    }

    /// Run every parameter of a request in IIIF order:
    /// region, size, rotation, quality, then format.
    pub fn apply(&mut self, request: &ImageRequest) -> Result<&mut Self, ParamError> {
        self.region(&request.region)?
            .size(&request.size)?
            .rotation(&request.rotation)?
            .quality(&request.quality)?
            .format(&request.format)
    }
}
