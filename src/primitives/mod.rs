//! Form Primitives - Field building blocks.
//!
//! This module provides the pieces a form field is made of:
//! - [`FieldController`] - The field itself: state, validation, rendering
//! - [`Element`] - Declarative node tree handed to the rendering substrate
//! - [`Control`] - Contract a registered control exposes back to its field
//! - [`bind_children`] - Binding a field to a control inside caller markup
//!
//! # Architecture
//!
//! A field never draws anything. Each render:
//! 1. Resolves the declared type in the registry
//! 2. Renders the registered control with a props snapshot, or binds a
//!    matching descendant of the caller's markup
//! 3. Wraps the result in the inline or stacked layout
//! 4. Remembers the bound control so get/set value delegate to it
//!
//! # Reactivity
//!
//! Field state lives in signals. Hosts can bind to them directly:
//!
//! ```ignore
//! let error = field.state().error_text.clone();
//! // later, inside a reactive scope
//! let text = error.get();
//! ```

mod compose;
mod element;
mod field;
pub mod layout;
mod types;

pub use compose::{bind_children, bind_rendered, Bound};
pub use element::{Element, MarkerTag};
pub use field::FieldController;
pub use types::*;
