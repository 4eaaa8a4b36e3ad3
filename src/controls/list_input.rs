//! List Input - Multi-value control (tags, checkbox groups).
//!
//! Holds a list of selected items. Reading with a separator joins them into
//! text; reading without one returns the list.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use spark_signals::{signal, Signal};

use crate::primitives::{Control, ControlEvents, ControlProps, Element, MarkerTag};
use crate::types::{FieldValue, DEFAULT_SEPARATOR};

/// Multi-value entry.
pub struct ListInput {
    items: Signal<Vec<String>>,
    options: Vec<String>,
    read_only: bool,
    sep: String,
    events: RefCell<ControlEvents>,
}

impl ListInput {
    pub const MARKER: MarkerTag = MarkerTag::new("list-input");

    pub fn new(items: Vec<String>) -> Self {
        Self {
            items: signal(items),
            options: Vec::new(),
            read_only: false,
            sep: DEFAULT_SEPARATOR.to_string(),
            events: RefCell::new(ControlEvents::default()),
        }
    }

    pub fn from_props(props: &ControlProps) -> Self {
        let options = props
            .extra
            .get("options")
            .and_then(|v| v.as_array())
            .map(|options| {
                options
                    .iter()
                    .filter_map(|option| option.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            items: signal(props.value.to_list(props.sep())),
            options,
            read_only: props.read_only,
            sep: props.sep().to_string(),
            events: RefCell::new(props.events.clone()),
        }
    }

    /// Registered render function. One `option` child per declared option,
    /// `checked` when selected.
    pub fn render(props: ControlProps) -> Element {
        let list = Rc::new(Self::from_props(&props));
        let selected = list.items();

        let options = list.options.iter().map(|option| {
            let node = Element::new("option")
                .with_attr("value", option.clone())
                .with_text(option.clone());
            if selected.contains(option) {
                node.with_class("checked")
            } else {
                node
            }
        });

        let mut node = Element::component(Self::MARKER, list.clone())
            .with_attr("id", props.id.clone())
            .with_children(options.collect::<Vec<_>>());
        if let Some(class) = &props.class_name {
            node = node.with_class(class.clone());
        }
        node.with_style(props.style.clone())
    }

    pub fn items(&self) -> Vec<String> {
        self.items.get()
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Select an item if absent, deselect it if present.
    pub fn toggle(&self, item: &str) {
        if self.read_only {
            return;
        }
        let mut items = self.items.get();
        match items.iter().position(|existing| existing == item) {
            Some(i) => {
                items.remove(i);
            }
            None => items.push(item.to_string()),
        }
        self.commit(items);
    }

    /// Append an item.
    pub fn push(&self, item: &str) {
        if self.read_only {
            return;
        }
        let mut items = self.items.get();
        items.push(item.to_string());
        self.commit(items);
    }

    fn commit(&self, items: Vec<String>) {
        self.items.set(items.clone());
        let events = self.events.borrow().clone();
        events.change(&FieldValue::List(items));
    }
}

impl Control for ListInput {
    fn get_value(&self, sep: Option<&str>) -> FieldValue {
        let items = self.items.get();
        match sep {
            Some(sep) => FieldValue::Text(items.join(sep)),
            None => FieldValue::List(items),
        }
    }

    fn set_value(&self, value: &FieldValue) -> bool {
        self.items.set(value.to_list(&self.sep));
        true
    }

    fn attach(&self, events: ControlEvents) {
        *self.events.borrow_mut() = events;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
