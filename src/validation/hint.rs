//! Hint derivation from declared constraints.

use super::Rules;
use crate::lang::{localize, Localizer};
use crate::types::format_number;

/// Separator between accumulated hint fragments.
pub const HINT_SEPARATOR: &str = ", ";

/// Build the hint text for a field.
///
/// A non-empty `tip` wins outright. Otherwise fragments are collected in a
/// fixed order: required, declared type, min, max. Missing templates add
/// nothing.
pub fn derive_hint(lang: &dyn Localizer, rules: &Rules<'_>, tip: Option<&str>) -> String {
    if let Some(tip) = tip.filter(|tip| !tip.is_empty()) {
        return tip.to_string();
    }

    let mut hints = Vec::new();
    let mut push = |kind: &str, arg: Option<String>| {
        let key = format!("validation.hints.{kind}");
        if let Some(text) = localize(lang, &key, arg.as_deref()) {
            hints.push(text);
        }
    };

    if rules.required {
        push("required", None);
    }
    push(rules.type_name, None);
    if let Some(min) = rules.min {
        push(&format!("min.{}", rules.value_type), Some(format_number(min)));
    }
    if let Some(max) = rules.max {
        push(&format!("max.{}", rules.value_type), Some(format_number(max)));
    }

    hints.join(HINT_SEPARATOR)
}
