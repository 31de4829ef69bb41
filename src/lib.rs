//! # iiif-plan
//!
//! Interprets IIIF Image API 2.x request parameters into an ordered list of
//! image-transform directives. No pixels are touched: the output is a plan
//! (`extract`, `resize`, `rotate`, ...) that an image pipeline executes.
//!
//! # Architecture
//!
//! ```text
//! {region}/{size}/{rotation}/{quality}.{format}
//!        │
//!        ▼  request::ImageRequest::from_path
//!   raw parameter strings
//!        │
//!        ▼  iiif::Interpreter (grammar → params → calculations)
//!   TransformPipeline calls, in order
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`iiif`] | Grammars, parameter types, geometry, the [`iiif::Interpreter`] and the pipeline trait |
//! | [`request`] | Request path splitting and one-shot [`request::plan`] |
//! | [`config`] | `iiif-plan.toml` loading, merging, and validation |
//! | [`output`] | CLI output formatting for plans |
//!
//! # Design Decisions
//!
//! ## Parse Once, Dispatch Once
//!
//! Every parameter string is matched against its anchored grammar exactly
//! once. Capture groups become a tagged variant ([`iiif::Size`] and friends),
//! and the interpreter handles that variant with one exhaustive `match`.
//!
//! ## Explicit Dimensions
//!
//! Crop geometry is computed by pure functions that take the current
//! dimensions by value. The interpreter stores the result, so the
//! region → size dependency is visible in the data rather than hidden in
//! shared state.
//!
//! ## Validate, Then Emit
//!
//! A parameter is fully parsed and its geometry checked before anything is
//! sent to the pipeline. A rejected parameter leaves no directive behind.

pub mod config;
pub mod iiif;
pub mod output;
pub mod request;
