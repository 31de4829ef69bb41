//! CLI output formatting for directive plans.
//!
//! # Output Format
//!
//! ## Text
//!
//! ```text
//! Source 200x100
//! 001 extract 100x100 at 50,0
//! 002 resize 50x? (cover)
//! 003 flip horizontal
//! 004 rotate 90°
//! 005 format png
//! ```
//!
//! An empty plan prints `(no transforms)` under the header.
//!
//! ## JSON
//!
//! The directive array as serialized by serde, one object per directive
//! tagged with `"op"`.
//!
//! Formatting functions return lines instead of printing so they can be
//! tested without capturing stdout.

use crate::iiif::{Dimensions, Directive};

fn side(value: Option<u32>) -> String {
    value.map_or_else(|| "?".to_string(), |v| v.to_string())
}

/// One-line description of a directive.
pub fn describe(directive: &Directive) -> String {
    match directive {
        Directive::Extract(rect) => format!(
            "extract {}x{} at {},{}",
            rect.width, rect.height, rect.left, rect.top
        ),
        Directive::Resize { width, height, fit } => {
            format!("resize {}x{} ({fit})", side(*width), side(*height))
        }
        Directive::Rotate { degrees } => format!("rotate {degrees}°"),
        Directive::FlipHorizontal => "flip horizontal".to_string(),
        Directive::Grayscale => "grayscale".to_string(),
        Directive::Threshold => "threshold".to_string(),
        Directive::SetOutputFormat { format } => format!("format {format}"),
    }
}

/// Numbered text listing of a plan.
pub fn format_plan(source: Dimensions, directives: &[Directive]) -> Vec<String> {
    let mut lines = vec![format!("Source {}x{}", source.width(), source.height())];
    if directives.is_empty() {
        lines.push("(no transforms)".to_string());
    }
    lines.extend(
        directives
            .iter()
            .enumerate()
            .map(|(i, d)| format!("{:03} {}", i + 1, describe(d))),
    );
    lines
}

/// The plan as a JSON array.
pub fn format_plan_json(directives: &[Directive], pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(directives)
    } else {
        serde_json::to_string(directives)
    }
}
