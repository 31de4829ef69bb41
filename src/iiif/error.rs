//! The single error type raised for rejected request parameters.

use super::grammar::ParamKind;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamError {
    #[error("Invalid {kind} parameter '{value}': {reason}")]
    InvalidParameter {
        kind: ParamKind,
        value: String,
        reason: String,
    },
    #[error("Invalid region '{value}': width and height must both be > 0")]
    InvalidRegion { value: String },
    #[error("Invalid size '{value}': {reason}")]
    InvalidSize { value: String, reason: String },
    #[error("Image dimensions must both be > 0, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },
}

impl ParamError {
    pub(crate) fn invalid(kind: ParamKind, value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            kind,
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// The parameter kind this error was raised for.
    ///
    /// `None` only for [`ParamError::EmptyImage`], which is raised before
    /// any parameter is seen.
    pub fn kind(&self) -> Option<ParamKind> {
        match self {
            Self::InvalidParameter { kind, .. } => Some(*kind),
            Self::InvalidRegion { .. } => Some(ParamKind::Region),
            Self::InvalidSize { .. } => Some(ParamKind::Size),
            Self::EmptyImage { .. } => None,
        }
    }

    /// The raw parameter string that was rejected.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::InvalidParameter { value, .. }
            | Self::InvalidRegion { value }
            | Self::InvalidSize { value, .. } => Some(value),
            Self::EmptyImage { .. } => None,
        }
    }
}
