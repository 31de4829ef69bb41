//! IIIF Image API request paths.
//!
//! A request path ends in four segments:
//!
//! ```text
//! {identifier}/{region}/{size}/{rotation}/{quality}.{format}
//! ```
//!
//! [`ImageRequest::from_path`] splits those segments into raw parameter
//! strings without validating them; validation happens when the
//! [`Interpreter`] consumes each one. The identifier is whatever precedes the
//! last four segments and is optional. No percent-decoding is performed.

use crate::iiif::{Dimensions, Directive, DirectiveList, Interpreter, ParamError};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    #[error("Malformed request path '{path}': {reason}")]
    MalformedPath { path: String, reason: &'static str },
    #[error(transparent)]
    Param(#[from] ParamError),
}

/// Raw parameter strings of a single image request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRequest {
    pub identifier: Option<String>,
    pub region: String,
    pub size: String,
    pub rotation: String,
    pub quality: String,
    pub format: String,
}

impl ImageRequest {
    /// Split a request path into its parameter strings.
    ///
    /// Handles these patterns:
    /// - `"full/max/0/default.jpg"` → no identifier
    /// - `"/iiif/abc123/square/50,/!90/gray.png"` → identifier `"iiif/abc123"`
    pub fn from_path(path: &str) -> Result<Self, RequestError> {
        let malformed = |reason| RequestError::MalformedPath {
            path: path.to_string(),
            reason,
        };

        let trimmed = path.trim_start_matches('/');
        let mut segments = trimmed.rsplitn(5, '/');
        let last = segments.next().unwrap_or_default();
        let rotation = segments.next();
        let size = segments.next();
        let region = segments.next();
        let identifier = segments.next();

        let (Some(region), Some(size), Some(rotation)) = (region, size, rotation) else {
            return Err(malformed(
                "expected {region}/{size}/{rotation}/{quality}.{format}",
            ));
        };
        let Some((quality, format)) = last.rsplit_once('.') else {
            return Err(malformed("missing .{format} extension"));
        };
        if [region, size, rotation, quality, format]
            .iter()
            .any(|s| s.is_empty())
        {
            return Err(malformed("empty path segment"));
        }

        Ok(Self {
            identifier: identifier.filter(|id| !id.is_empty()).map(str::to_string),
            region: region.to_string(),
            size: size.to_string(),
            rotation: rotation.to_string(),
            quality: quality.to_string(),
            format: format.to_string(),
        })
    }

    /// Reassemble the parameter part of the path (without identifier).
    pub fn parameter_path(&self) -> String {
        format!(
            "{}/{}/{}/{}.{}",
            self.region, self.size, self.rotation, self.quality, self.format
        )
    }
}

/// Interpret a request against a source image and collect its directives.
#[tracing::instrument(skip(request), fields(params = %request.parameter_path()))]
pub fn plan(dims: Dimensions, request: &ImageRequest) -> Result<Vec<Directive>, RequestError> {
    let mut interp = Interpreter::with_dimensions(dims, DirectiveList::new());
    interp.apply(request)?;
    let directives = interp.into_pipeline().into_directives();
    tracing::debug!(count = directives.len(), "planned directives");
    Ok(directives)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iiif::{Fit, Format, ParamKind, Rect};

    #[test]
    fn parses_bare_parameter_path() {
        let req = ImageRequest::from_path("full/max/0/default.jpg").unwrap();
        assert_eq!(req.identifier, None);
        assert_eq!(req.region, "full");
        assert_eq!(req.size, "max");
        assert_eq!(req.rotation, "0");
        assert_eq!(req.quality, "default");
        assert_eq!(req.format, "jpg");
    }

    #[test]
    fn parses_identifier_prefix() {
        let req = ImageRequest::from_path("/iiif/abc123/square/50,/!90/gray.png").unwrap();
        assert_eq!(req.identifier.as_deref(), Some("iiif/abc123"));
        assert_eq!(req.region, "square");
        assert_eq!(req.size, "50,");
        assert_eq!(req.rotation, "!90");
        assert_eq!(req.quality, "gray");
        assert_eq!(req.format, "png");
    }

    #[test]
    fn decimal_rotation_does_not_confuse_format_split() {
        let req = ImageRequest::from_path("pct:10.5,0,50,50/pct:12.5/22.5/color.webp").unwrap();
        assert_eq!(req.region, "pct:10.5,0,50,50");
        assert_eq!(req.rotation, "22.5");
        assert_eq!(req.format, "webp");
    }

    #[test]
    fn rejects_short_paths() {
        assert!(matches!(
            ImageRequest::from_path("max/0/default.jpg"),
            Err(RequestError::MalformedPath { .. })
        ));
    }

    #[test]
    fn rejects_missing_format() {
        assert!(matches!(
            ImageRequest::from_path("full/max/0/default"),
            Err(RequestError::MalformedPath { .. })
        ));
    }

    #[test]
    fn rejects_empty_segment() {
        assert!(matches!(
            ImageRequest::from_path("full//0/default.jpg"),
            Err(RequestError::MalformedPath { .. })
        ));
    }

    #[test]
    fn parameter_path_round_trips() {
        let path = "square/!50,50/!90/bitonal.tif";
        assert_eq!(
            ImageRequest::from_path(path).unwrap().parameter_path(),
            path
        );
    }

    // =========================================================================
    // plan tests
    // =========================================================================

    #[test]
    fn plan_collects_directives() {
        let req = ImageRequest::from_path("square/50,/0/default.jpg").unwrap();
        let dims = Dimensions::new(200, 100).unwrap();
        assert_eq!(
            plan(dims, &req).unwrap(),
            vec![
                Directive::Extract(Rect {
                    left: 50,
                    top: 0,
                    width: 100,
                    height: 100
                }),
                Directive::Resize {
                    width: Some(50),
                    height: None,
                    fit: Fit::Cover
                },
                Directive::SetOutputFormat {
                    format: Format::Jpg
                },
            ]
        );
    }

    #[test]
    fn plan_surfaces_parameter_errors() {
        let req = ImageRequest::from_path("full/max/0/purple.jpg").unwrap();
        let dims = Dimensions::new(200, 100).unwrap();
        let err = plan(dims, &req).unwrap_err();
        assert!(matches!(
            err,
            RequestError::Param(ParamError::InvalidParameter {
                kind: ParamKind::Quality,
                ..
            })
        ));
    }
}
