//! Text Input - Single-line text control.
//!
//! # Features
//!
//! - Signal-backed value
//! - Placeholder text
//! - Read-only mode (input is ignored)
//! - `maxLength` option truncates entered text
//! - External assignment without a change event
//!
//! # Example
//!
//! ```ignore
//! use spark_form::controls::TextInput;
//!
//! let input = TextInput::new("hello");
//! input.input("hello world");
//! assert_eq!(input.text(), "hello world");
//! ```

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use spark_signals::{signal, Signal};

use crate::primitives::{Control, ControlEvents, ControlProps, Element, MarkerTag};
use crate::types::FieldValue;

/// Single-line text entry.
pub struct TextInput {
    value: Signal<String>,
    placeholder: Option<String>,
    read_only: bool,
    max_length: Option<usize>,
    sep: String,
    events: RefCell<ControlEvents>,
}

impl TextInput {
    pub const MARKER: MarkerTag = MarkerTag::new("text-input");

    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: signal(value.into()),
            placeholder: None,
            read_only: false,
            max_length: None,
            sep: crate::types::DEFAULT_SEPARATOR.to_string(),
            events: RefCell::new(ControlEvents::default()),
        }
    }

    pub fn from_props(props: &ControlProps) -> Self {
        let max_length = props
            .extra
            .get("maxLength")
            .and_then(|v| v.as_u64())
            .map(|n| n as usize);

        Self {
            value: signal(props.value.as_text(props.sep())),
            placeholder: props.placeholder.clone(),
            read_only: props.read_only,
            max_length,
            sep: props.sep().to_string(),
            events: RefCell::new(props.events.clone()),
        }
    }

    /// Registered render function.
    pub fn render(props: ControlProps) -> Element {
        let input = Rc::new(Self::from_props(&props));
        let mut node = Element::component(Self::MARKER, input.clone())
            .with_attr("id", props.id.clone())
            .with_attr("type", props.type_name.clone())
            .with_text(input.display_text());

        if let Some(name) = &props.name {
            node = node.with_attr("name", name.clone());
        }
        if props.read_only {
            node = node.with_attr("readonly", "true");
        }
        if let Some(class) = &props.class_name {
            node = node.with_class(class.clone());
        }
        node.with_style(props.style.clone())
    }

    /// Current text.
    pub fn text(&self) -> String {
        self.value.get()
    }

    /// Reactive value, for binding.
    pub fn signal(&self) -> Signal<String> {
        self.value.clone()
    }

    /// Text shown: the value, or the placeholder when empty.
    pub fn display_text(&self) -> String {
        let text = self.value.get();
        if text.is_empty() {
            if let Some(placeholder) = &self.placeholder {
                return placeholder.clone();
            }
        }
        text
    }

    /// User entry. Fires the change event with the stored text.
    pub fn input(&self, text: &str) {
        if self.read_only {
            return;
        }
        let text = match self.max_length {
            Some(max) => text.chars().take(max).collect(),
            None => text.to_string(),
        };
        self.value.set(text.clone());

        let events = self.events.borrow().clone();
        events.change(&FieldValue::Text(text));
    }

    pub fn focus(&self) {
        let events = self.events.borrow().clone();
        events.focus();
    }

    pub fn blur(&self) {
        let events = self.events.borrow().clone();
        events.blur();
    }
}

impl Control for TextInput {
    fn get_value(&self, _sep: Option<&str>) -> FieldValue {
        FieldValue::Text(self.value.get())
    }

    fn set_value(&self, value: &FieldValue) -> bool {
        self.value.set(value.as_text(&self.sep));
        true
    }

    fn attach(&self, events: ControlEvents) {
        *self.events.borrow_mut() = events;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
