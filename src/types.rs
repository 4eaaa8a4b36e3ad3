//! Core types for spark-form.
//!
//! These types flow through the whole crate: the registry tags controls with a
//! [`ValueType`], fields carry a [`FieldValue`], and the layout renderer reads
//! [`Layout`], [`HintType`] and [`FieldStatus`].

use serde::{Deserialize, Serialize};

/// Separator used when a list value is read as text and no `sep` is declared.
pub const DEFAULT_SEPARATOR: &str = ",";

// =============================================================================
// Value Type
// =============================================================================

/// Semantic category of a control's value.
///
/// Decides how the length metric is computed during validation and which
/// `min.*` / `max.*` localization keys are used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Free text; metric is the character count.
    #[default]
    String,
    /// Numeric; metric is the parsed value itself.
    Number,
    /// Delimited list; metric is the element count.
    Array,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Number => "number",
            ValueType::Array => "array",
        }
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Field Value
// =============================================================================

/// The value held by a field or reported by a control.
///
/// Deserializes untagged: `null`, a number, a string, or an array of strings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// `Empty`, a zero-length string, or an empty list.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Empty => true,
            FieldValue::Number(_) => false,
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::List(items) => items.is_empty(),
        }
    }

    /// Text form of the value. Lists are joined with `sep`.
    pub fn as_text(&self, sep: &str) -> String {
        match self {
            FieldValue::Empty => String::new(),
            FieldValue::Number(n) => format_number(*n),
            FieldValue::Text(s) => s.clone(),
            FieldValue::List(items) => items.join(sep),
        }
    }

    /// List form of the value.
    ///
    /// Text is split on `sep`; segments are trimmed and empty ones dropped.
    pub fn to_list(&self, sep: &str) -> Vec<String> {
        match self {
            FieldValue::Empty => Vec::new(),
            FieldValue::Number(n) => vec![format_number(*n)],
            FieldValue::Text(s) => split_list(s, sep),
            FieldValue::List(items) => items.clone(),
        }
    }

    /// Numeric form of the value, if it has one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => s.trim().parse::<f64>().ok(),
            FieldValue::Empty | FieldValue::List(_) => None,
        }
    }

    /// Reshape the value for a separator-aware read.
    ///
    /// With a separator, lists collapse to joined text; without one, array
    /// fields expand text back into a list split on `declared_sep`.
    pub fn with_separator(
        &self,
        value_type: ValueType,
        sep: Option<&str>,
        declared_sep: &str,
    ) -> FieldValue {
        match (sep, self) {
            (Some(sep), FieldValue::List(items)) => FieldValue::Text(items.join(sep)),
            (None, FieldValue::Text(s)) if value_type == ValueType::Array => {
                FieldValue::List(split_list(s, declared_sep))
            }
            _ => self.clone(),
        }
    }
}

fn split_list(text: &str, sep: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let sep = if sep.is_empty() { DEFAULT_SEPARATOR } else { sep };
    text.split(sep)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Format a number without a trailing `.0` for whole values.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(value: Vec<&str>) -> Self {
        FieldValue::List(value.into_iter().map(str::to_string).collect())
    }
}

// =============================================================================
// Layout Options
// =============================================================================

/// Presentation mode of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Label column beside the control. Rendered like `Stacked`.
    Aligned,
    /// Label above a wrapper holding control and message.
    Stacked,
    /// Control with an adjacent message span; label becomes the placeholder.
    #[default]
    Inline,
}

/// How the hint is presented. Expressed only as a `hint-*` class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HintType {
    Block,
    None,
    Pop,
    Inline,
}

impl HintType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HintType::Block => "block",
            HintType::None => "none",
            HintType::Pop => "pop",
            HintType::Inline => "inline",
        }
    }

    /// `Pop` for inline layouts, `Block` for everything else.
    pub fn default_for(layout: Layout) -> Self {
        match layout {
            Layout::Inline => HintType::Pop,
            Layout::Aligned | Layout::Stacked => HintType::Block,
        }
    }
}

/// Grid breakpoint used with `width`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Responsive {
    Sm,
    #[default]
    Md,
    Lg,
    Xl,
}

impl Responsive {
    pub fn as_str(&self) -> &'static str {
        match self {
            Responsive::Sm => "sm",
            Responsive::Md => "md",
            Responsive::Lg => "lg",
            Responsive::Xl => "xl",
        }
    }
}

// =============================================================================
// Field Status (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Snapshot of a field's boolean state.
    ///
    /// Combine with bitwise OR: `FieldStatus::FOCUSED | FieldStatus::HAS_ERROR`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FieldStatus: u8 {
        const NONE = 0;
        const FOCUSED = 1 << 0;
        const HAS_VALUE = 1 << 1;
        const HAS_ERROR = 1 << 2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_empty() {
        assert!(FieldValue::Empty.is_empty());
        assert!(FieldValue::from("").is_empty());
        assert!(FieldValue::List(Vec::new()).is_empty());
        assert!(!FieldValue::from(0).is_empty());
        assert!(!FieldValue::from("a").is_empty());
    }

    #[test]
    fn test_to_list_splits_and_trims() {
        let value = FieldValue::from("a, b,,c");
        assert_eq!(value.to_list(","), vec!["a", "b", "c"]);
        assert_eq!(FieldValue::from("a|b").to_list("|"), vec!["a", "b"]);
        assert!(FieldValue::from("").to_list(",").is_empty());
    }

    #[test]
    fn test_as_number() {
        assert_eq!(FieldValue::from("15").as_number(), Some(15.0));
        assert_eq!(FieldValue::from(" 2.5 ").as_number(), Some(2.5));
        assert_eq!(FieldValue::from("abc").as_number(), None);
        assert_eq!(FieldValue::from(3).as_number(), Some(3.0));
    }

    #[test]
    fn test_with_separator() {
        let list = FieldValue::from(vec!["a", "b"]);
        assert_eq!(
            list.with_separator(ValueType::Array, Some("|"), ","),
            FieldValue::from("a|b")
        );
        let text = FieldValue::from("a,b");
        assert_eq!(
            text.with_separator(ValueType::Array, None, ","),
            FieldValue::from(vec!["a", "b"])
        );
        assert_eq!(text.with_separator(ValueType::String, None, ","), text);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-10.0), "-10");
    }

    #[test]
    fn test_deserialize_untagged_value() {
        let v: FieldValue = serde_json::from_str("null").unwrap();
        assert_eq!(v, FieldValue::Empty);
        let v: FieldValue = serde_json::from_str("12").unwrap();
        assert_eq!(v, FieldValue::Number(12.0));
        let v: FieldValue = serde_json::from_str("\"hi\"").unwrap();
        assert_eq!(v, FieldValue::from("hi"));
        let v: FieldValue = serde_json::from_str("[\"a\",\"b\"]").unwrap();
        assert_eq!(v, FieldValue::from(vec!["a", "b"]));
    }

    #[test]
    fn test_hint_type_default() {
        assert_eq!(HintType::default_for(Layout::Inline), HintType::Pop);
        assert_eq!(HintType::default_for(Layout::Stacked), HintType::Block);
        assert_eq!(HintType::default_for(Layout::Aligned), HintType::Block);
    }
}
