//! Format validators keyed by declared type name.
//!
//! A declared type with an entry here must match its pattern before any
//! length/bounds check runs. Types without an entry skip the format step.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

const PATTERNS: &[(&str, &str)] = &[
    ("email", r"^[\w.%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$"),
    ("url", r"^(https?|ftp)://[^\s/$.?#][^\s]*$"),
    ("number", r"^[-+]?(\d+\.?\d*|\.\d+)([eE][-+]?\d+)?$"),
    ("integer", r"^[-+]?\d+$"),
    ("alpha", r"^[A-Za-z]+$"),
    ("alphanum", r"^[A-Za-z0-9]+$"),
    ("tel", r"^\+?[0-9()\- ]{5,}$"),
    ("hex", r"^#?([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$"),
];

static FORMATS: Lazy<HashMap<&'static str, Regex>> = Lazy::new(|| {
    PATTERNS
        .iter()
        .map(|(name, pattern)| {
            let regex = Regex::new(pattern).expect("built-in format patterns are valid");
            (*name, regex)
        })
        .collect()
});

/// The format pattern for a declared type, if one exists.
pub fn format_for(type_name: &str) -> Option<&'static Regex> {
    FORMATS.get(type_name)
}

/// Whether `text` satisfies the format of `type_name`.
///
/// Types without a format always match.
pub fn matches_format(type_name: &str, text: &str) -> bool {
    format_for(type_name).is_none_or(|regex| regex.is_match(text))
}
