//! Transform pipeline trait and the directive types it receives.
//!
//! The [`TransformPipeline`] trait is the seam between parameter
//! interpretation and pixel work. The interpreter forwards one call per
//! directive, in request order; an implementation decodes, crops, resamples
//! and encodes however it likes.
//!
//! [`DirectiveList`] is the recording implementation: it keeps every call as
//! a [`Directive`] so a plan can be inspected, serialized, or replayed
//! against a real pipeline later with [`DirectiveList::replay`].

use super::error::ParamError;
use super::params::{Fit, Format};
use serde::Serialize;

/// Current pixel extent of the image being transformed.
///
/// Only constructible through [`Dimensions::new`], so both sides are
/// always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    width: u32,
    height: u32,
}

impl Dimensions {
    /// Both sides must be non-zero.
    pub fn new(width: u32, height: u32) -> Result<Self, ParamError> {
        if width == 0 || height == 0 {
            return Err(ParamError::EmptyImage { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(self) -> u32 {
        self.width
    }

    pub fn height(self) -> u32 {
        self.height
    }
}

/// A crop rectangle in pixels, relative to the current image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

/// One abstract transform instruction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Directive {
    Extract(Rect),
    Resize {
        width: Option<u32>,
        height: Option<u32>,
        fit: Fit,
    },
    Rotate {
        degrees: f64,
    },
    FlipHorizontal,
    Grayscale,
    Threshold,
    SetOutputFormat {
        format: Format,
    },
}

/// Receiver for transform directives.
///
/// Implementations may be arbitrarily heavy (decode, resample, encode), but
/// calls arrive synchronously and in order; a call never needs to be undone.
pub trait TransformPipeline {
    /// Crop to a pixel rectangle.
    fn extract(&mut self, rect: Rect);

    /// Resize; a `None` side is derived from the aspect ratio.
    fn resize(&mut self, width: Option<u32>, height: Option<u32>, fit: Fit);

    /// Rotate clockwise by `degrees`.
    fn rotate(&mut self, degrees: f64);

    /// Mirror horizontally. Always issued before the matching `rotate`.
    fn flip_horizontal(&mut self);

    fn grayscale(&mut self);

    /// Binarize at the pipeline's default threshold level.
    fn threshold(&mut self);

    fn set_output_format(&mut self, format: Format);
}

impl<P: TransformPipeline + ?Sized> TransformPipeline for &mut P {
    fn extract(&mut self, rect: Rect) {
        (**self).extract(rect)
    }

    fn resize(&mut self, width: Option<u32>, height: Option<u32>, fit: Fit) {
        (**self).resize(width, height, fit)
    }

    fn rotate(&mut self, degrees: f64) {
        (**self).rotate(degrees)
    }

    fn flip_horizontal(&mut self) {
        (**self).flip_horizontal()
    }

    fn grayscale(&mut self) {
        (**self).grayscale()
    }

    fn threshold(&mut self) {
        (**self).threshold()
    }

    fn set_output_format(&mut self, format: Format) {
        (**self).set_output_format(format)
    }
}

/// Pipeline that records directives without executing them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DirectiveList {
    directives: Vec<Directive>,
}

impl DirectiveList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    pub fn into_directives(self) -> Vec<Directive> {
        self.directives
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Forward every recorded directive, in order, to another pipeline.
    pub fn replay(&self, target: &mut impl TransformPipeline) {
        for directive in &self.directives {
            match *directive {
                Directive::Extract(rect) => target.extract(rect),
                Directive::Resize { width, height, fit } => target.resize(width, height, fit),
                Directive::Rotate { degrees } => target.rotate(degrees),
                Directive::FlipHorizontal => target.flip_horizontal(),
                Directive::Grayscale => target.grayscale(),
                Directive::Threshold => target.threshold(),
                Directive::SetOutputFormat { format } => target.set_output_format(format),
            }
        }
    }
}

impl TransformPipeline for DirectiveList {
    fn extract(&mut self, rect: Rect) {
        self.directives.push(Directive::Extract(rect));
    }

    fn resize(&mut self, width: Option<u32>, height: Option<u32>, fit: Fit) {
        self.directives.push(Directive::Resize { width, height, fit });
    }

    fn rotate(&mut self, degrees: f64) {
        self.directives.push(Directive::Rotate { degrees });
    }

    fn flip_horizontal(&mut self) {
        self.directives.push(Directive::FlipHorizontal);
    }

    fn grayscale(&mut self) {
        self.directives.push(Directive::Grayscale);
    }

    fn threshold(&mut self) {
        self.directives.push(Directive::Threshold);
    }

    fn set_output_format(&mut self, format: Format) {
        self.directives.push(Directive::SetOutputFormat { format });
    }
}
