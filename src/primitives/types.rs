//! Primitive types - Control contract, props and callbacks.
//!
//! These types define the seam between a field and the concrete control that
//! renders it:
//! - [`FieldProps`] is what the host declares
//! - [`ControlProps`] is what a registered render function receives
//! - [`Control`] is what a rendered control must expose back

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use serde::Deserialize;
use serde_json::{Map, Value};

use super::element::Element;
use crate::error::{FormError, Result};
use crate::types::{FieldValue, HintType, Layout, Responsive, DEFAULT_SEPARATOR};
use crate::utils::merge_json;

// =============================================================================
// Callback Types
// =============================================================================

/// Value change callback (Rc so it can be cloned into closures).
pub type ChangeCallback = Rc<dyn Fn(&FieldValue)>;

/// Focus callback (control gained focus).
pub type FocusCallback = Rc<dyn Fn()>;

/// Blur callback (control lost focus).
pub type BlurCallback = Rc<dyn Fn()>;

/// Custom validation predicate. Return false to fail the field.
pub type ValidateCallback = Rc<dyn Fn(&FieldValue) -> bool>;

/// Registered render function.
pub type RenderFn = Rc<dyn Fn(ControlProps) -> Element>;

// =============================================================================
// Control Contract
// =============================================================================

/// Handle contract every registered control exposes.
///
/// Controls report focus, blur and change through the [`ControlEvents`] they
/// are given, either in their [`ControlProps`] or through [`Control::attach`].
pub trait Control {
    /// Current value. `sep` joins list values into text when given.
    fn get_value(&self, sep: Option<&str>) -> FieldValue;

    /// Assign a value from outside.
    ///
    /// Returns false when the control does not support external assignment.
    fn set_value(&self, value: &FieldValue) -> bool {
        let _ = value;
        false
    }

    /// Receive the field's event handlers when bound from caller markup.
    fn attach(&self, events: ControlEvents) {
        let _ = events;
    }

    /// Downcast hook for control-specific operations.
    fn as_any(&self) -> &dyn Any;
}

/// Shared handle to a live control.
pub type ControlHandle = Rc<dyn Control>;

/// Handlers a field hands to its control.
#[derive(Clone, Default)]
pub struct ControlEvents {
    pub on_change: Option<ChangeCallback>,
    pub on_focus: Option<FocusCallback>,
    pub on_blur: Option<BlurCallback>,
}

impl ControlEvents {
    pub fn change(&self, value: &FieldValue) {
        if let Some(on_change) = &self.on_change {
            on_change(value);
        }
    }

    pub fn focus(&self) {
        if let Some(on_focus) = &self.on_focus {
            on_focus();
        }
    }

    pub fn blur(&self) {
        if let Some(on_blur) = &self.on_blur {
            on_blur();
        }
    }
}

impl fmt::Debug for ControlEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlEvents")
            .field("on_change", &self.on_change.is_some())
            .field("on_focus", &self.on_focus.is_some())
            .field("on_blur", &self.on_blur.is_some())
            .finish()
    }
}

// =============================================================================
// Control Props
// =============================================================================

/// Props passed to a registered render function.
#[derive(Debug, Clone, Default)]
pub struct ControlProps {
    pub id: String,
    pub type_name: String,
    pub name: Option<String>,
    pub label: Option<String>,
    /// Falls back to the label for inline layouts.
    pub placeholder: Option<String>,
    /// The field's current value, not the declared one.
    pub value: FieldValue,
    /// The field's current data payload, not the declared one.
    pub data: Value,
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub sep: Option<String>,
    pub read_only: bool,
    /// Grid columns; 24 when the field itself is sized by the grid.
    pub width: Option<u8>,
    pub class_name: Option<String>,
    pub style: Option<String>,
    pub layout: Layout,
    /// Control-specific options (`maxLength`, `options`, ...).
    pub extra: Map<String, Value>,
    pub events: ControlEvents,
}

impl ControlProps {
    /// Apply overrides key by key. Overrides win.
    ///
    /// - Scalar options (`name` .. `style`): replaced when the override is set
    /// - `value`: replaced when the override is set
    /// - `data`: deep-merged, override entries win
    /// - `extra`: deep-merged per key, override entries win
    /// - `id`, `type_name`, `layout`, `events`: never overridden
    pub fn merge(mut self, overrides: &ControlOverrides) -> Self {
        if let Some(name) = &overrides.name {
            self.name = Some(name.clone());
        }
        if let Some(label) = &overrides.label {
            self.label = Some(label.clone());
        }
        if let Some(placeholder) = &overrides.placeholder {
            self.placeholder = Some(placeholder.clone());
        }
        if let Some(value) = &overrides.value {
            self.value = value.clone();
        }
        if let Some(data) = &overrides.data {
            merge_json(&mut self.data, data.clone());
        }
        if let Some(required) = overrides.required {
            self.required = required;
        }
        if let Some(min) = overrides.min {
            self.min = Some(min);
        }
        if let Some(max) = overrides.max {
            self.max = Some(max);
        }
        if let Some(sep) = &overrides.sep {
            self.sep = Some(sep.clone());
        }
        if let Some(read_only) = overrides.read_only {
            self.read_only = read_only;
        }
        if let Some(width) = overrides.width {
            self.width = Some(width);
        }
        if let Some(class_name) = &overrides.class_name {
            self.class_name = Some(class_name.clone());
        }
        if let Some(style) = &overrides.style {
            self.style = Some(style.clone());
        }
        for (key, value) in &overrides.extra {
            match self.extra.get_mut(key) {
                Some(existing) => merge_json(existing, value.clone()),
                None => {
                    self.extra.insert(key.clone(), value.clone());
                }
            }
        }
        self
    }

    /// Separator for list values.
    pub fn sep(&self) -> &str {
        self.sep.as_deref().unwrap_or(DEFAULT_SEPARATOR)
    }
}

/// Caller-supplied overrides applied on top of the field's props snapshot.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ControlOverrides {
    pub name: Option<String>,
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub value: Option<FieldValue>,
    pub data: Option<Value>,
    pub required: Option<bool>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub sep: Option<String>,
    pub read_only: Option<bool>,
    pub width: Option<u8>,
    pub class_name: Option<String>,
    pub style: Option<String>,
    pub extra: Map<String, Value>,
}

// =============================================================================
// Field Props
// =============================================================================

/// Declaration of one form field.
///
/// Deserializable from JSON with camelCase keys. Callbacks and child markup
/// are set in code.
///
/// # Example
///
/// ```ignore
/// use spark_form::{FieldController, FieldProps};
///
/// let field = FieldController::new(FieldProps {
///     type_name: "email".into(),
///     label: Some("Email".into()),
///     required: true,
///     ..Default::default()
/// });
/// ```
#[derive(Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldProps {
    /// Registry key of the control (default: `text`).
    #[serde(rename = "type")]
    pub type_name: String,
    pub label: Option<String>,
    pub name: Option<String>,
    /// Generated when absent.
    pub id: Option<String>,
    /// Initial value.
    pub value: FieldValue,
    /// Opaque payload forwarded to the control.
    pub data: Value,
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Separator for array values (default: `,`).
    pub sep: Option<String>,
    /// Static message; replaces the derived hint and backs missing error text.
    pub tip: Option<String>,
    pub placeholder: Option<String>,
    pub layout: Layout,
    /// Defaults to `pop` for inline layout, `block` otherwise.
    pub hint_type: Option<HintType>,
    pub responsive: Responsive,
    /// Grid column count out of 24.
    pub width: Option<u8>,
    pub read_only: bool,
    pub class_name: Option<String>,
    pub style: Option<String>,
    /// Overrides applied to the registry-rendered control.
    #[serde(rename = "control")]
    pub overrides: ControlOverrides,

    #[serde(skip)]
    pub on_validate: Option<ValidateCallback>,
    /// Receives the raw value on every change, valid or not.
    #[serde(skip)]
    pub on_change: Option<ChangeCallback>,
    /// Caller markup. When set, the field binds a matching descendant instead
    /// of rendering a control itself.
    #[serde(skip)]
    pub children: Option<Vec<Element>>,
}

impl Default for FieldProps {
    fn default() -> Self {
        Self {
            type_name: "text".to_string(),
            label: None,
            name: None,
            id: None,
            value: FieldValue::Empty,
            data: Value::Null,
            required: false,
            min: None,
            max: None,
            sep: None,
            tip: None,
            placeholder: None,
            layout: Layout::Inline,
            hint_type: None,
            responsive: Responsive::Md,
            width: None,
            read_only: false,
            class_name: None,
            style: None,
            overrides: ControlOverrides::default(),
            on_validate: None,
            on_change: None,
            children: None,
        }
    }
}

impl FieldProps {
    /// Declaration with only the type set.
    pub fn typed(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Default::default()
        }
    }

    /// Parse a declaration from JSON.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(FormError::InvalidDeclaration)
    }

    /// Separator for array values.
    pub fn sep(&self) -> &str {
        self.sep.as_deref().unwrap_or(DEFAULT_SEPARATOR)
    }

    /// Effective hint presentation.
    pub fn hint_type(&self) -> HintType {
        self.hint_type
            .unwrap_or_else(|| HintType::default_for(self.layout))
    }
}

impl fmt::Debug for FieldProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldProps")
            .field("type_name", &self.type_name)
            .field("id", &self.id)
            .field("label", &self.label)
            .field("value", &self.value)
            .field("required", &self.required)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("layout", &self.layout)
            .field("read_only", &self.read_only)
            .field("children", &self.children.as_ref().map(Vec::len))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::Cell;

    #[test]
    fn test_field_props_defaults() {
        let props = FieldProps::default();
        assert_eq!(props.type_name, "text");
        assert_eq!(props.layout, Layout::Inline);
        assert_eq!(props.responsive, Responsive::Md);
        assert_eq!(props.sep(), ",");
        assert_eq!(props.hint_type(), HintType::Pop);
    }

    #[test]
    fn test_field_props_from_json() {
        let props = FieldProps::from_json(
            r#"{
                "type": "tags",
                "label": "Tags",
                "value": "a,b",
                "data": { "source": "api" },
                "required": true,
                "max": 5,
                "sep": ",",
                "layout": "stacked",
                "hintType": "none",
                "readOnly": true,
                "className": "wide",
                "control": { "placeholder": "Add a tag" }
            }"#,
        )
        .unwrap();

        assert_eq!(props.type_name, "tags");
        assert_eq!(props.value, FieldValue::from("a,b"));
        assert_eq!(props.data, json!({ "source": "api" }));
        assert!(props.required);
        assert_eq!(props.max, Some(5.0));
        assert_eq!(props.layout, Layout::Stacked);
        assert_eq!(props.hint_type(), HintType::None);
        assert!(props.read_only);
        assert_eq!(props.class_name.as_deref(), Some("wide"));
        assert_eq!(props.overrides.placeholder.as_deref(), Some("Add a tag"));
        assert_eq!(props.responsive, Responsive::Md);
    }

    #[test]
    fn test_field_props_rejects_bad_layout() {
        let err = FieldProps::from_json(r#"{ "layout": "diagonal" }"#).unwrap_err();
        assert!(matches!(err, FormError::InvalidDeclaration(_)));
    }

    #[test]
    fn test_merge_overrides_win() {
        let base = ControlProps {
            id: "f1".into(),
            label: Some("Name".into()),
            placeholder: Some("Name".into()),
            data: json!({ "a": 1, "nested": { "x": 1 } }),
            extra: json!({ "maxLength": 10 }).as_object().cloned().unwrap(),
            ..Default::default()
        };
        let overrides = ControlOverrides {
            placeholder: Some("Type here".into()),
            width: Some(24),
            data: Some(json!({ "nested": { "y": 2 } })),
            extra: json!({ "options": ["a"] }).as_object().cloned().unwrap(),
            ..Default::default()
        };

        let merged = base.merge(&overrides);
        assert_eq!(merged.id, "f1");
        assert_eq!(merged.label.as_deref(), Some("Name"));
        assert_eq!(merged.placeholder.as_deref(), Some("Type here"));
        assert_eq!(merged.width, Some(24));
        assert_eq!(merged.data, json!({ "a": 1, "nested": { "x": 1, "y": 2 } }));
        assert_eq!(merged.extra.get("maxLength"), Some(&json!(10)));
        assert_eq!(merged.extra.get("options"), Some(&json!(["a"])));
    }

    #[test]
    fn test_events_fire() {
        let changes = Rc::new(Cell::new(0));
        let changes_clone = changes.clone();
        let events = ControlEvents {
            on_change: Some(Rc::new(move |_: &FieldValue| changes_clone.set(changes_clone.get() + 1))),
            ..Default::default()
        };

        events.change(&FieldValue::from("x"));
        events.focus();
        events.blur();
        assert_eq!(changes.get(), 1);
    }
}
