//! Field State - Reactive state owned by one field controller.
//!
//! Every piece of state is a signal, so a host can bind rendering to it
//! directly (`error_text` into a span, `focused` into a class, ...).
//!
//! Two independent state machines:
//!
//! ```text
//! Idle  ⇄ Focused   (focus / blur from the control, no validation)
//! Valid ⇄ Invalid   (validation passes / fails)
//! ```
//!
//! A new field starts `Idle, Valid`. Validation never runs at construction.

use serde_json::Value;
use spark_signals::{signal, Signal};

use crate::types::{FieldStatus, FieldValue};

/// Reactive state of one field.
#[derive(Clone)]
pub struct FieldState {
    /// What the control last reported, or what was last set from outside.
    pub value: Signal<FieldValue>,
    /// Opaque payload forwarded to the control. Never re-read from props.
    pub data: Signal<Value>,
    pub focused: Signal<bool>,
    pub has_value: Signal<bool>,
    pub has_error: Signal<bool>,
    pub error_text: Signal<String>,
    pub hint_text: Signal<String>,
}

impl FieldState {
    pub fn new(value: FieldValue, data: Value) -> Self {
        Self {
            has_value: signal(!value.is_empty()),
            value: signal(value),
            data: signal(data),
            focused: signal(false),
            has_error: signal(false),
            error_text: signal(String::new()),
            hint_text: signal(String::new()),
        }
    }

    /// Valid: clear the error flag and text.
    pub fn mark_valid(&self) {
        self.has_error.set(false);
        self.error_text.set(String::new());
    }

    /// Invalid: raise the error flag and store the resolved message.
    pub fn mark_invalid(&self, text: String) {
        self.has_error.set(true);
        self.error_text.set(text);
    }

    pub fn set_focused(&self, focused: bool) {
        self.focused.set(focused);
    }

    /// Boolean state as flags.
    pub fn status(&self) -> FieldStatus {
        let mut status = FieldStatus::NONE;
        if self.focused.get() {
            status |= FieldStatus::FOCUSED;
        }
        if self.has_value.get() {
            status |= FieldStatus::HAS_VALUE;
        }
        if self.has_error.get() {
            status |= FieldStatus::HAS_ERROR;
        }
        status
    }
}
