//! Localization - Opaque key → template lookup.
//!
//! The field controller never hard-codes user-facing text. It asks a
//! [`Localizer`] for templates under two key families:
//!
//! - `validation.hints.<kind>` - proactive guidance shown before any failure
//! - `validation.tips.<kind>` - messages shown after a failed validation
//!
//! Templates use positional placeholders (`{0}`), filled by [`format`].
//! Missing keys are never an error; callers fall back silently.
//!
//! # Example
//!
//! ```ignore
//! use spark_form::lang::{Lang, Localizer};
//!
//! let mut lang = Lang::default();
//! lang.set("validation.hints.required", "must be filled in");
//!
//! assert_eq!(lang.resolve("validation.hints.required").as_deref(), Some("must be filled in"));
//! ```

mod bundle;

pub use bundle::Lang;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(\d+)\}").expect("placeholder pattern is valid"));

// =============================================================================
// Localizer
// =============================================================================

/// Resolves a dotted key to a message template.
pub trait Localizer {
    /// Template stored under `key`, or `None` when the key is unknown.
    fn resolve(&self, key: &str) -> Option<String>;

    /// Template stored under `key`, or `fallback`.
    fn resolve_or(&self, key: &str, fallback: &str) -> String {
        self.resolve(key).unwrap_or_else(|| fallback.to_string())
    }
}

// =============================================================================
// Formatting
// =============================================================================

/// Replace `{n}` placeholders with `args[n]`.
///
/// Placeholders without a matching argument are left as they are.
pub fn format(template: &str, args: &[&str]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|i| args.get(i))
                .map(|arg| arg.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Resolve `key` and fill its first placeholder with `arg`.
pub fn localize(lang: &dyn Localizer, key: &str, arg: Option<&str>) -> Option<String> {
    let template = lang.resolve(key)?;
    Some(match arg {
        Some(arg) => format(&template, &[arg]),
        None => format(&template, &[]),
    })
}
