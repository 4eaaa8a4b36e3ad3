//! Element - Declarative node tree handed to the rendering substrate.
//!
//! Fields and controls describe what to show; they never draw. An [`Element`]
//! is a plain tree: a tag, classes and attributes, optional text, children,
//! and for component nodes a [`MarkerTag`] plus the live control behind it.

use std::collections::BTreeMap;
use std::fmt;

use super::types::ControlHandle;

// =============================================================================
// Marker Tag
// =============================================================================

/// Identity of a component kind inside an element tree.
///
/// A field finds "its" control among caller markup by comparing markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerTag(&'static str);

impl MarkerTag {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

// =============================================================================
// Element
// =============================================================================

/// One node of a declarative UI tree.
#[derive(Clone, Default)]
pub struct Element {
    /// Tag name; empty for fragments.
    pub tag: String,
    /// Component identity, for component nodes.
    pub marker: Option<MarkerTag>,
    /// Positional key assigned during composition.
    pub key: Option<String>,
    pub class: Option<String>,
    pub style: Option<String>,
    pub attrs: BTreeMap<String, String>,
    pub text: Option<String>,
    pub children: Vec<Element>,
    /// Live control backing a component node.
    pub control: Option<ControlHandle>,
    /// Set on the node a field bound as its control.
    pub reference: bool,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Component node backed by a live control.
    pub fn component(marker: MarkerTag, control: ControlHandle) -> Self {
        Self {
            tag: marker.name().to_string(),
            marker: Some(marker),
            control: Some(control),
            ..Default::default()
        }
    }

    /// Component node without a live control (markup only).
    pub fn marked(marker: MarkerTag) -> Self {
        Self {
            tag: marker.name().to_string(),
            marker: Some(marker),
            ..Default::default()
        }
    }

    /// Tagless container for a list of nodes.
    pub fn fragment(children: impl IntoIterator<Item = Element>) -> Self {
        Self::default().with_children(children)
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn with_style(mut self, style: Option<String>) -> Self {
        self.style = style;
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Whether `name` appears in the class list.
    pub fn has_class(&self, name: &str) -> bool {
        self.class
            .as_deref()
            .is_some_and(|class| class.split_whitespace().any(|c| c == name))
    }

    /// First node, in depth-first document order, matching `predicate`.
    ///
    /// The node itself is checked before its children.
    pub fn find(&self, predicate: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        if predicate(self) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(predicate))
    }

    /// First node carrying `class`.
    pub fn find_by_class(&self, class: &str) -> Option<&Element> {
        self.find(&|node: &Element| node.has_class(class))
    }

    /// The node a field bound as its control.
    pub fn find_reference(&self) -> Option<&Element> {
        self.find(&|node: &Element| node.reference)
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = self.text.clone().unwrap_or_default();
        for child in &self.children {
            out.push_str(&child.text_content());
        }
        out
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut node = f.debug_struct("Element");
        node.field("tag", &self.tag);
        if let Some(marker) = &self.marker {
            node.field("marker", marker);
        }
        if let Some(key) = &self.key {
            node.field("key", key);
        }
        if let Some(class) = &self.class {
            node.field("class", class);
        }
        if !self.attrs.is_empty() {
            node.field("attrs", &self.attrs);
        }
        if let Some(text) = &self.text {
            node.field("text", text);
        }
        if self.control.is_some() {
            node.field("control", &true);
        }
        if self.reference {
            node.field("reference", &true);
        }
        if !self.children.is_empty() {
            node.field("children", &self.children);
        }
        node.finish()
    }
}
