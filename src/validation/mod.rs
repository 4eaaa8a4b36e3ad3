//! Validation engine - Rules, metrics and failure messages.
//!
//! Pure functions only. The field controller owns the state transitions
//! (`has_value`, `has_error`, `error_text`); this module decides pass or fail.
//!
//! # Rule order
//!
//! ```text
//! required → custom predicate → empty passes → format → max → min → pass
//! ```
//!
//! The read-only short-circuit and the `has_value` update happen in the
//! controller, before [`check`] runs.

mod formats;
mod hint;

pub use formats::{format_for, matches_format};
pub use hint::{derive_hint, HINT_SEPARATOR};

use crate::lang::{localize, Localizer};
use crate::types::{format_number, FieldValue, ValueType};

// =============================================================================
// Rules
// =============================================================================

/// Declared constraints of one field, borrowed from its props.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rules<'a> {
    /// Declared type name; selects the format validator and type hint.
    pub type_name: &'a str,
    /// Value type of the resolved control.
    pub value_type: ValueType,
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Separator used to count array elements.
    pub sep: &'a str,
}

// =============================================================================
// Failures
// =============================================================================

/// Why a validation pass failed.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationFailure {
    /// Required field with an empty value.
    Required,
    /// The custom predicate rejected the value. Has no localization key.
    Custom,
    /// The value does not match the format of its declared type.
    Format { type_name: String, value: String },
    /// The metric exceeds `max`.
    Max { value_type: ValueType, limit: f64 },
    /// The metric is below `min`.
    Min { value_type: ValueType, limit: f64 },
}

impl ValidationFailure {
    /// Localization kind: `required`, the declared type, `max.<vt>`, `min.<vt>`.
    ///
    /// Custom failures have an empty kind.
    pub fn kind(&self) -> String {
        match self {
            ValidationFailure::Required => "required".to_string(),
            ValidationFailure::Custom => String::new(),
            ValidationFailure::Format { type_name, .. } => type_name.clone(),
            ValidationFailure::Max { value_type, .. } => format!("max.{value_type}"),
            ValidationFailure::Min { value_type, .. } => format!("min.{value_type}"),
        }
    }

    /// Value interpolated into the message template.
    pub fn argument(&self) -> Option<String> {
        match self {
            ValidationFailure::Required | ValidationFailure::Custom => None,
            ValidationFailure::Format { value, .. } => Some(value.clone()),
            ValidationFailure::Max { limit, .. } | ValidationFailure::Min { limit, .. } => {
                Some(format_number(*limit))
            }
        }
    }

    /// Resolve the user-facing message.
    ///
    /// `validation.tips.<kind>` first, then the field's own `tip`, then empty.
    pub fn message(&self, lang: &dyn Localizer, tip: Option<&str>) -> String {
        let kind = self.kind();
        let localized = if kind.is_empty() {
            None
        } else {
            let key = format!("validation.tips.{kind}");
            localize(lang, &key, self.argument().as_deref())
        };
        localized
            .filter(|text| !text.is_empty())
            .or_else(|| tip.map(str::to_string))
            .unwrap_or_default()
    }
}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationFailure::Custom => f.write_str("custom"),
            other => f.write_str(&other.kind()),
        }
    }
}

// =============================================================================
// Metric
// =============================================================================

/// Length metric compared against `min`/`max`.
///
/// - `Array`: element count after splitting by `sep`
/// - `Number`: the parsed value
/// - otherwise: character count for text, element count for lists
///
/// `None` means the value has no meaningful metric and bounds are skipped.
pub fn metric(value: &FieldValue, value_type: ValueType, sep: &str) -> Option<f64> {
    match value_type {
        ValueType::Array => Some(value.to_list(sep).len() as f64),
        ValueType::Number => value.as_number(),
        ValueType::String => match value {
            FieldValue::Empty => Some(0.0),
            FieldValue::Text(text) => Some(text.chars().count() as f64),
            FieldValue::List(items) => Some(items.len() as f64),
            FieldValue::Number(_) => None,
        },
    }
}

// =============================================================================
// Check
// =============================================================================

/// Run the rule chain against `value`.
pub fn check(
    value: &FieldValue,
    rules: &Rules<'_>,
    custom: Option<&dyn Fn(&FieldValue) -> bool>,
) -> Result<(), ValidationFailure> {
    let empty = value.is_empty();

    if rules.required && empty {
        return Err(ValidationFailure::Required);
    }

    if let Some(predicate) = custom {
        if !predicate(value) {
            return Err(ValidationFailure::Custom);
        }
    }

    if empty {
        return Ok(());
    }

    let text = value.as_text(rules.sep);
    if !matches_format(rules.type_name, &text) {
        return Err(ValidationFailure::Format {
            type_name: rules.type_name.to_string(),
            value: text,
        });
    }

    let Some(len) = metric(value, rules.value_type, rules.sep) else {
        return Ok(());
    };

    if let Some(max) = rules.max {
        if len > max {
            return Err(ValidationFailure::Max {
                value_type: rules.value_type,
                limit: max,
            });
        }
    }

    if let Some(min) = rules.min {
        if len < min {
            return Err(ValidationFailure::Min {
                value_type: rules.value_type,
                limit: min,
            });
        }
    }

    Ok(())
}
