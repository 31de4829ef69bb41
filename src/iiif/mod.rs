//! IIIF Image API parameter interpretation — no pixels, only geometry.
//!
//! | Parameter | Grammar | Directives |
//! |---|---|---|
//! | **region** | `full`, `square`, `pct:x,y,w,h`, `x,y,w,h` | `extract` |
//! | **size** | `full`, `max`, `pct:n`, `w,`, `,h`, `!w,h`, `w,h` | `resize` |
//! | **rotation** | `n`, `!n` | `flip_horizontal`, `rotate` |
//! | **quality** | `color`, `gray`, `bitonal`, `default` | `grayscale`, `threshold` |
//! | **format** | `jpg`, `tif`, `gif`, `png`, `webp` | `set_output_format` |
//!
//! The module is split into:
//! - **Grammar**: Anchored regular grammars and the [`validate`] check
//! - **Parameters**: Tagged variants parsed from raw strings ([`Region`], [`Size`], ...)
//! - **Calculations**: Pure functions for crop/resize arithmetic (unit testable)
//! - **Pipeline**: [`TransformPipeline`] trait + the recording [`DirectiveList`]
//! - **Interpreter**: [`Interpreter`], which combines the above per request

mod calculations;
pub mod error;
pub mod grammar;
pub mod interpreter;
pub mod params;
pub mod pipeline;

pub use error::ParamError;
pub use grammar::{ParamKind, matches, validate};
pub use interpreter::Interpreter;
pub use params::{Fit, Format, Quality, Region, Rotation, Size};
pub use pipeline::{Dimensions, Directive, DirectiveList, Rect, TransformPipeline};
