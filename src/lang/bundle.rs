//! JSON-backed localization bundle.

use serde_json::{json, Map, Value};

use super::Localizer;
use crate::error::{FormError, Result};
use crate::utils::merge_json;

/// A nested JSON table of message templates addressed by dotted keys.
///
/// `validation.tips.max.array` walks `validation` → `tips` → `max` → `array`.
/// Only string leaves resolve; a key landing on an object is treated as missing.
#[derive(Debug, Clone, PartialEq)]
pub struct Lang {
    table: Value,
}

impl Lang {
    /// A bundle with no templates at all.
    pub fn empty() -> Self {
        Self {
            table: Value::Object(Map::new()),
        }
    }

    /// Parse a bundle from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let table: Value = serde_json::from_str(text).map_err(FormError::InvalidBundle)?;
        Ok(Self { table })
    }

    /// Deep-merge another table over this one. Overlay entries win.
    pub fn merge(&mut self, overlay: Value) {
        merge_json(&mut self.table, overlay);
    }

    /// Parse JSON text and merge it over this bundle.
    pub fn merge_json_str(&mut self, text: &str) -> Result<()> {
        let overlay: Value = serde_json::from_str(text).map_err(FormError::InvalidBundle)?;
        self.merge(overlay);
        Ok(())
    }

    /// Store `template` under a dotted key, creating intermediate tables.
    pub fn set(&mut self, key: &str, template: impl Into<String>) {
        let overlay = key
            .rsplit('.')
            .fold(Value::String(template.into()), |inner, segment| {
                let mut table = Map::new();
                table.insert(segment.to_string(), inner);
                Value::Object(table)
            });
        self.merge(overlay);
    }

    /// Borrow the template stored under a dotted key.
    pub fn get(&self, key: &str) -> Option<&str> {
        let mut node = &self.table;
        for segment in key.split('.') {
            node = node.as_object()?.get(segment)?;
        }
        node.as_str()
    }
}

impl Default for Lang {
    /// The built-in English bundle.
    fn default() -> Self {
        Self {
            table: english(),
        }
    }
}

impl Localizer for Lang {
    fn resolve(&self, key: &str) -> Option<String> {
        self.get(key).map(str::to_string)
    }
}

fn english() -> Value {
    json!({
        "validation": {
            "hints": {
                "required": "required",
                "email": "a valid email address",
                "url": "a valid URL",
                "number": "a number",
                "integer": "a whole number",
                "alpha": "letters only",
                "alphanum": "letters and digits only",
                "tel": "a phone number",
                "hex": "a hex color",
                "min": {
                    "string": "at least {0} characters",
                    "number": "no less than {0}",
                    "array": "at least {0} items"
                },
                "max": {
                    "string": "at most {0} characters",
                    "number": "no greater than {0}",
                    "array": "at most {0} items"
                }
            },
            "tips": {
                "required": "This field is required",
                "email": "Please enter a valid email address",
                "url": "Please enter a valid URL",
                "number": "Please enter a number",
                "integer": "Please enter a whole number",
                "alpha": "Only letters are allowed",
                "alphanum": "Only letters and digits are allowed",
                "tel": "Please enter a valid phone number",
                "hex": "Please enter a valid hex color",
                "min": {
                    "string": "Please enter at least {0} characters",
                    "number": "The value must be no less than {0}",
                    "array": "Please choose at least {0} items"
                },
                "max": {
                    "string": "Please enter no more than {0} characters",
                    "number": "The value must be no greater than {0}",
                    "array": "Please choose no more than {0} items"
                }
            }
        }
    })
}
