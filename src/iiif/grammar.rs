//! Anchored regular grammars for the five IIIF parameter kinds.
//!
//! Every pattern is wrapped in `^(?:...)$`, so a string is accepted only when
//! it matches in full. Named capture groups are read by the parsers in
//! [`params`](super::params); nothing here keeps match state between calls.
//!
//! | Kind | Accepted forms |
//! |---|---|
//! | `region` | `full`, `square`, `pct:F,F,F,F`, `I,I,I,I` |
//! | `size` | `full`, `max`, `pct:F`, `I,`, `,I`, `I,I`, `!I,I` |
//! | `rotation` | `F`, `!F` |
//! | `quality` | `color`, `gray`, `bitonal`, `default` |
//! | `format` | `jpg`, `tif`, `gif`, `png`, `webp` |
//!
//! `I` is a non-negative integer, `F` a non-negative decimal (`12` or `12.5`).

use super::error::ParamError;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Which request parameter a string belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    Region,
    Size,
    Rotation,
    Quality,
    Format,
}

impl ParamKind {
    pub const ALL: [ParamKind; 5] = [
        ParamKind::Region,
        ParamKind::Size,
        ParamKind::Rotation,
        ParamKind::Quality,
        ParamKind::Format,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ParamKind::Region => "region",
            ParamKind::Size => "size",
            ParamKind::Rotation => "rotation",
            ParamKind::Quality => "quality",
            ParamKind::Format => "format",
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParamKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParamKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                format!("unknown parameter kind '{s}' (expected region, size, rotation, quality or format)")
            })
    }
}

const DECIMAL: &str = r"\d+(?:\.\d+)?";

static REGION: LazyLock<Regex> = LazyLock::new(|| {
    anchored(&format!(
        r"(?P<full>full)|(?P<square>square)|pct:(?P<px>{d}),(?P<py>{d}),(?P<pw>{d}),(?P<ph>{d})|(?P<x>\d+),(?P<y>\d+),(?P<w>\d+),(?P<h>\d+)",
        d = DECIMAL
    ))
});

static SIZE: LazyLock<Regex> = LazyLock::new(|| {
    anchored(&format!(
        r"(?P<full>full)|(?P<max>max)|pct:(?P<pct>{DECIMAL})|(?P<width_only>\d+),|,(?P<height_only>\d+)|(?P<bang>!)?(?P<w>\d+),(?P<h>\d+)"
    ))
});

static ROTATION: LazyLock<Regex> =
    LazyLock::new(|| anchored(&format!(r"(?P<mirror>!)?(?P<degrees>{DECIMAL})")));

static QUALITY: LazyLock<Regex> = LazyLock::new(|| anchored("color|gray|bitonal|default"));

static FORMAT: LazyLock<Regex> = LazyLock::new(|| anchored("jpg|tif|gif|png|webp"));

fn anchored(alternatives: &str) -> Regex {
    Regex::new(&format!("^(?:{alternatives})$")).expect("built-in grammar must compile")
}

/// The compiled grammar for a parameter kind.
pub(crate) fn grammar(kind: ParamKind) -> &'static Regex {
    match kind {
        ParamKind::Region => &REGION,
        ParamKind::Size => &SIZE,
        ParamKind::Rotation => &ROTATION,
        ParamKind::Quality => &QUALITY,
        ParamKind::Format => &FORMAT,
    }
}

/// Whether `value` is a member of the grammar for `kind`.
pub fn matches(kind: ParamKind, value: &str) -> bool {
    grammar(kind).is_match(value)
}

/// Check `value` against the grammar for `kind`.
///
/// # Examples
/// ```
/// # use iiif_plan::iiif::{ParamKind, validate};
/// assert!(validate(ParamKind::Region, "pct:10,10,50,50").is_ok());
/// assert!(validate(ParamKind::Region, " full").is_err());
/// ```
pub fn validate(kind: ParamKind, value: &str) -> Result<(), ParamError> {
    if matches(kind, value) {
        Ok(())
    } else {
        Err(ParamError::invalid(kind, value, "does not match grammar"))
    }
}
