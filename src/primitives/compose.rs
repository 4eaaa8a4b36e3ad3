//! Composition - Bind a field to a control inside caller markup.
//!
//! When a field is declared with explicit children it does not render a
//! control itself. Instead the children are walked depth-first and the first
//! descendant whose marker matches the declared type's marker becomes the
//! field's control:
//!
//! ```text
//! div (key 0)
//! ├── span (key 0)
//! └── div (key 1)
//!     └── text-input (key 0)  ← reference, handle bound
//! ```
//!
//! The walk is a pure transformation: it returns a new tree and never touches
//! the input.

use super::element::{Element, MarkerTag};
use super::types::ControlHandle;

/// Result of a binding walk.
pub struct Bound {
    /// The annotated tree.
    pub children: Vec<Element>,
    /// Whether a node matched the marker.
    pub matched: bool,
    /// The matched node's live control, if it carried one.
    pub control: Option<ControlHandle>,
}

/// Annotate caller markup.
///
/// Every node gets its sibling index as key. The first match in document
/// order is marked as the reference; later matches pass through unmarked.
pub fn bind_children(children: &[Element], marker: MarkerTag) -> Bound {
    let mut bound = Bound {
        children: Vec::new(),
        matched: false,
        control: None,
    };
    bound.children = walk(children, marker, true, &mut bound.matched, &mut bound.control);
    bound
}

/// Annotate a tree produced by a registered render function.
///
/// Same matching rule as [`bind_children`], without positional keys.
pub fn bind_rendered(root: Element, marker: MarkerTag) -> Bound {
    let mut matched = false;
    let mut control = None;
    let children = walk(std::slice::from_ref(&root), marker, false, &mut matched, &mut control);
    Bound {
        children,
        matched,
        control,
    }
}

fn walk(
    children: &[Element],
    marker: MarkerTag,
    keyed: bool,
    matched: &mut bool,
    control: &mut Option<ControlHandle>,
) -> Vec<Element> {
    let mut out = Vec::with_capacity(children.len());

    for (i, child) in children.iter().enumerate() {
        let mut node = child.clone();
        if keyed {
            node.key = Some(i.to_string());
        }
        node.reference = false;

        if !*matched && node.marker == Some(marker) {
            node.reference = true;
            *matched = true;
            *control = node.control.clone();
        }

        if !child.children.is_empty() {
            node.children = walk(&child.children, marker, keyed, matched, control);
        }

        out.push(node);
    }

    out
}
