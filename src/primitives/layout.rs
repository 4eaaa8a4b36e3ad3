//! Layout - Wrap a rendered control in its field chrome.
//!
//! Two presentation modes:
//!
//! ```text
//! inline:   div.pure-control-group [control] [span.error | span.hint]
//! stacked:  div.pure-control-group
//!           ├── label.label[for=id]
//!           └── div.pure-control-inner [control] [span.error | span.hint]
//! ```
//!
//! The hint policy (`hint-block`, `hint-pop`, ...) is only a class; the
//! substrate decides what it means.

use super::element::Element;
use crate::types::{FieldStatus, HintType, Responsive};
use crate::utils::class_names;

pub const GROUP_CLASS: &str = "pure-control-group";
pub const INNER_CLASS: &str = "pure-control-inner";
pub const ERROR_CLASS: &str = "error";
pub const HINT_CLASS: &str = "hint";
pub const LABEL_CLASS: &str = "label";

/// Class list of the outer field wrapper.
pub fn group_class(class_name: Option<&str>, hint_type: HintType, status: FieldStatus) -> String {
    let hint = format!("hint-{}", hint_type.as_str());
    class_names([
        class_name,
        Some(GROUP_CLASS),
        Some(hint.as_str()),
        status.contains(FieldStatus::HAS_ERROR).then_some("has-error"),
        status.contains(FieldStatus::FOCUSED).then_some("focused"),
    ])
}

/// Grid classes for an inline field sized to `width` of 24 columns.
pub fn grid_class(responsive: Responsive, width: u8) -> String {
    format!("pure-u-1 pure-u-{}-{}-24", responsive.as_str(), width)
}

/// Error span if there is error text, else hint span if there is a hint.
pub fn message(error_text: &str, hint_text: &str) -> Option<Element> {
    if !error_text.is_empty() {
        Some(
            Element::new("span")
                .with_class(ERROR_CLASS)
                .with_text(error_text),
        )
    } else if !hint_text.is_empty() {
        Some(Element::new("span").with_class(HINT_CLASS).with_text(hint_text))
    } else {
        None
    }
}

/// Inline layout: control and message side by side.
pub fn inline(
    class: String,
    style: Option<String>,
    control: Vec<Element>,
    message: Option<Element>,
) -> Element {
    Element::new("div")
        .with_class(class)
        .with_style(style)
        .with_children(control)
        .with_children(message)
}

/// Stacked layout: label above a wrapper holding control and message.
pub fn stacked(
    class: String,
    style: Option<String>,
    id: &str,
    label: &str,
    control: Vec<Element>,
    message: Option<Element>,
) -> Element {
    Element::new("div")
        .with_class(class)
        .with_style(style)
        .with_child(
            Element::new("label")
                .with_class(LABEL_CLASS)
                .with_attr("for", id)
                .with_text(label),
        )
        .with_child(
            Element::new("div")
                .with_class(INNER_CLASS)
                .with_children(control)
                .with_children(message),
        )
}
