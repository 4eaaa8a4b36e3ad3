//! Field Controller - One labeled, validated form field.
//!
//! A field mediates between the generic field contract (get/set value,
//! validate, hint, reference) and whichever concrete control is registered
//! for its declared type.
//!
//! # Lifecycle
//!
//! 1. Construction resolves the declared type and derives the hint
//! 2. `render()` builds the layout and binds the control reference
//! 3. Control events flow back: change → store + validate + host `on_change`,
//!    focus/blur → `focused`
//! 4. `update_props()` replaces the declaration and re-derives the hint;
//!    `value` and `data` state survive
//!
//! # Example
//!
//! ```ignore
//! use spark_form::{register_builtin_controls, default_registry, FieldController, FieldProps};
//!
//! register_builtin_controls(&default_registry());
//!
//! let field = FieldController::new(FieldProps {
//!     type_name: "email".into(),
//!     label: Some("Email".into()),
//!     required: true,
//!     ..Default::default()
//! });
//!
//! let tree = field.render();
//! assert!(!field.validate(None));
//! assert_eq!(field.error_text(), "This field is required");
//! ```

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use serde_json::Value;

use super::compose::{bind_children, bind_rendered};
use super::element::Element;
use super::layout;
use super::types::{ControlEvents, ControlHandle, ControlOverrides, ControlProps, FieldProps};
use crate::engine::{next_uid, FormContext};
use crate::state::FieldState;
use crate::types::{FieldStatus, FieldValue, Layout, ValueType};
use crate::validation::{check, derive_hint, Rules, ValidationFailure};

// =============================================================================
// Controller
// =============================================================================

struct FieldInner {
    id: RefCell<String>,
    props: RefCell<FieldProps>,
    value_type: Cell<ValueType>,
    context: FormContext,
    state: FieldState,
    control: RefCell<Option<ControlHandle>>,
    failure: RefCell<Option<ValidationFailure>>,
}

/// Handle to one form field. Clones share the same field.
#[derive(Clone)]
pub struct FieldController {
    inner: Rc<FieldInner>,
}

impl FieldController {
    /// Build a field against this thread's default registry and English text.
    pub fn new(props: FieldProps) -> Self {
        Self::with_context(props, FormContext::default())
    }

    /// Build a field against an explicit registry and localizer.
    pub fn with_context(props: FieldProps, context: FormContext) -> Self {
        let id = props.id.clone().unwrap_or_else(next_uid);
        let state = FieldState::new(props.value.clone(), props.data.clone());

        let field = Self {
            inner: Rc::new(FieldInner {
                id: RefCell::new(id),
                props: RefCell::new(props),
                value_type: Cell::new(ValueType::String),
                context,
                state,
                control: RefCell::new(None),
                failure: RefCell::new(None),
            }),
        };
        field.resolve_value_type();
        field.refresh_hint();
        field
    }

    /// Replace the declaration.
    ///
    /// Re-resolves the value type and re-derives the hint. The current value
    /// and data payload are kept.
    pub fn update_props(&self, props: FieldProps) {
        if let Some(id) = &props.id {
            *self.inner.id.borrow_mut() = id.clone();
        }
        *self.inner.props.borrow_mut() = props;
        self.resolve_value_type();
        self.refresh_hint();
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> String {
        self.inner.id.borrow().clone()
    }

    /// Snapshot of the current declaration.
    pub fn props(&self) -> FieldProps {
        self.inner.props.borrow().clone()
    }

    pub fn value_type(&self) -> ValueType {
        self.inner.value_type.get()
    }

    /// Reactive state, for binding.
    pub fn state(&self) -> &FieldState {
        &self.inner.state
    }

    /// Last value reported by the control or set from outside.
    pub fn value(&self) -> FieldValue {
        self.inner.state.value.get()
    }

    pub fn data(&self) -> Value {
        self.inner.state.data.get()
    }

    /// Replace the data payload forwarded to the control.
    pub fn set_data(&self, data: Value) {
        self.inner.state.data.set(data);
    }

    /// Last derived hint text.
    pub fn hint(&self) -> String {
        self.inner.state.hint_text.get()
    }

    pub fn error_text(&self) -> String {
        self.inner.state.error_text.get()
    }

    pub fn has_error(&self) -> bool {
        self.inner.state.has_error.get()
    }

    pub fn has_value(&self) -> bool {
        self.inner.state.has_value.get()
    }

    pub fn is_focused(&self) -> bool {
        self.inner.state.focused.get()
    }

    pub fn status(&self) -> FieldStatus {
        self.inner.state.status()
    }

    /// Why the last validation failed, if it did.
    pub fn failure(&self) -> Option<ValidationFailure> {
        self.inner.failure.borrow().clone()
    }

    /// The bound control, once rendered.
    pub fn reference(&self) -> Option<ControlHandle> {
        self.inner.control.borrow().clone()
    }

    // =========================================================================
    // Value
    // =========================================================================

    /// Current value from the control.
    ///
    /// Before a control is bound, falls back to the state value.
    pub fn get_value(&self, sep: Option<&str>) -> FieldValue {
        match self.reference() {
            Some(control) => control.get_value(sep),
            None => {
                let props = self.inner.props.borrow();
                self.value().with_separator(self.value_type(), sep, props.sep())
            }
        }
    }

    /// Assign a value from outside, then re-validate it.
    ///
    /// The control is updated when it supports external assignment; the field
    /// state is updated either way. Returns the validation result.
    pub fn set_value(&self, value: impl Into<FieldValue>) -> bool {
        let value = value.into();
        if let Some(control) = self.reference() {
            if !control.set_value(&value) {
                tracing::debug!(field = %self.id(), "control ignores external values");
            }
        }
        self.inner.state.value.set(value.clone());
        self.validate(Some(value))
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Validate `value`, or the control's current value when `None`.
    ///
    /// Always updates `has_value`. Sets or clears the error state.
    pub fn validate(&self, value: Option<FieldValue>) -> bool {
        let value = value.unwrap_or_else(|| self.get_value(None));
        self.inner.state.has_value.set(!value.is_empty());

        // Copy what the rules need so host callbacks run without a borrow held.
        let (type_name, sep, required, min, max, read_only, tip, on_validate) = {
            let props = self.inner.props.borrow();
            (
                props.type_name.clone(),
                props.sep().to_string(),
                props.required,
                props.min,
                props.max,
                props.read_only,
                props.tip.clone(),
                props.on_validate.clone(),
            )
        };

        if read_only {
            self.pass();
            return true;
        }

        let rules = Rules {
            type_name: &type_name,
            value_type: self.value_type(),
            required,
            min,
            max,
            sep: &sep,
        };

        match check(&value, &rules, on_validate.as_deref()) {
            Ok(()) => {
                self.pass();
                true
            }
            Err(failure) => {
                let text = failure.message(&*self.inner.context.lang, tip.as_deref());
                tracing::debug!(field = %self.id(), kind = %failure, "validation failed");
                self.inner.state.mark_invalid(text);
                *self.inner.failure.borrow_mut() = Some(failure);
                false
            }
        }
    }

    fn pass(&self) {
        self.inner.state.mark_valid();
        *self.inner.failure.borrow_mut() = None;
    }

    // =========================================================================
    // Control Events
    // =========================================================================

    /// The control reported a new value.
    ///
    /// Stores it, re-validates against the control's current value, then
    /// forwards the raw value to the host regardless of validity.
    pub fn handle_change(&self, value: &FieldValue) {
        self.inner.state.value.set(value.clone());

        let current = match self.reference() {
            Some(control) => control.get_value(None),
            None => value.clone(),
        };
        self.validate(Some(current));

        let on_change = self.inner.props.borrow().on_change.clone();
        if let Some(on_change) = on_change {
            on_change(value);
        }
    }

    /// The control gained or lost focus. No validation side effect.
    pub fn handle_focus(&self, focused: bool) {
        self.inner.state.set_focused(focused);
    }

    /// Handlers forwarded to the control. They hold a weak reference.
    pub fn events(&self) -> ControlEvents {
        let on_change = self.weak();
        let on_focus = self.weak();
        let on_blur = self.weak();

        ControlEvents {
            on_change: Some(Rc::new(move |value: &FieldValue| {
                if let Some(field) = upgrade(&on_change) {
                    field.handle_change(value);
                }
            })),
            on_focus: Some(Rc::new(move || {
                if let Some(field) = upgrade(&on_focus) {
                    field.handle_focus(true);
                }
            })),
            on_blur: Some(Rc::new(move || {
                if let Some(field) = upgrade(&on_blur) {
                    field.handle_focus(false);
                }
            })),
        }
    }

    fn weak(&self) -> Weak<FieldInner> {
        Rc::downgrade(&self.inner)
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Render the field and bind its control.
    pub fn render(&self) -> Element {
        let props = self.props();
        let id = self.id();
        let state = &self.inner.state;

        let class = layout::group_class(props.class_name.as_deref(), props.hint_type(), self.status());

        match props.layout {
            Layout::Inline => {
                let (class, width_override) = match props.width {
                    Some(width) => (
                        format!("{class} {}", layout::grid_class(props.responsive, width)),
                        Some(24),
                    ),
                    None => (class, None),
                };
                let layout_overrides = ControlOverrides {
                    width: width_override,
                    ..Default::default()
                };
                let control = self.render_control(&props, &layout_overrides);
                let message = layout::message(&state.error_text.get(), &state.hint_text.get());
                layout::inline(class, props.style.clone(), control, message)
            }
            Layout::Stacked | Layout::Aligned => {
                let control = self.render_control(&props, &ControlOverrides::default());
                let message = layout::message(&state.error_text.get(), &state.hint_text.get());
                layout::stacked(
                    class,
                    props.style.clone(),
                    &id,
                    props.label.as_deref().unwrap_or_default(),
                    control,
                    message,
                )
            }
        }
    }

    fn render_control(&self, props: &FieldProps, layout_overrides: &ControlOverrides) -> Vec<Element> {
        let descriptor = match self.inner.context.registry.resolve(&props.type_name) {
            Ok(descriptor) => descriptor,
            Err(err) => {
                tracing::warn!(field = %self.id(), "{err}");
                *self.inner.control.borrow_mut() = None;
                return Vec::new();
            }
        };

        let bound = match &props.children {
            Some(children) => {
                let bound = bind_children(children, descriptor.marker());
                if let Some(control) = &bound.control {
                    control.attach(self.events());
                }
                bound
            }
            None => {
                let control_props = self
                    .control_props(props)
                    .merge(layout_overrides)
                    .merge(&props.overrides);
                bind_rendered(descriptor.render(control_props), descriptor.marker())
            }
        };

        if bound.control.is_none() {
            tracing::warn!(
                field = %self.id(),
                marker = %descriptor.marker().name(),
                "no live control found for field"
            );
        }
        *self.inner.control.borrow_mut() = bound.control;
        bound.children
    }

    /// Snapshot of the field's own props for a registry-rendered control.
    fn control_props(&self, props: &FieldProps) -> ControlProps {
        let placeholder = match props.layout {
            Layout::Inline => props.placeholder.clone().or_else(|| props.label.clone()),
            Layout::Stacked | Layout::Aligned => props.placeholder.clone(),
        };

        ControlProps {
            id: self.id(),
            type_name: props.type_name.clone(),
            name: props.name.clone(),
            label: props.label.clone(),
            placeholder,
            value: self.value(),
            data: self.data(),
            required: props.required,
            min: props.min,
            max: props.max,
            sep: props.sep.clone(),
            read_only: props.read_only,
            width: props.width,
            class_name: None,
            style: None,
            layout: props.layout,
            extra: Default::default(),
            events: self.events(),
        }
    }

    // =========================================================================
    // Declaration-driven state
    // =========================================================================

    fn resolve_value_type(&self) {
        let type_name = self.inner.props.borrow().type_name.clone();
        let value_type = match self.inner.context.registry.resolve(&type_name) {
            Ok(descriptor) => descriptor.value_type(),
            Err(_) => ValueType::String,
        };
        self.inner.value_type.set(value_type);
    }

    fn refresh_hint(&self) {
        let hint = {
            let props = self.inner.props.borrow();
            let rules = Rules {
                type_name: &props.type_name,
                value_type: self.value_type(),
                required: props.required,
                min: props.min,
                max: props.max,
                sep: props.sep(),
            };
            derive_hint(&*self.inner.context.lang, &rules, props.tip.as_deref())
        };
        self.inner.state.hint_text.set(hint);
    }
}

fn upgrade(weak: &Weak<FieldInner>) -> Option<FieldController> {
    weak.upgrade().map(|inner| FieldController { inner })
}

impl std::fmt::Debug for FieldController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldController")
            .field("id", &self.id())
            .field("value_type", &self.value_type())
            .field("value", &self.value())
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}
