//! # spark-form
//!
//! Reactive form fields for Rust.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for fine-grained reactivity.
//!
//! ## Architecture
//!
//! A field is a thin controller around whichever concrete control is
//! registered for its declared type. The field owns the generic contract
//! (value, validation, hint, focus) and the chrome around the control; the
//! control only renders and reports events.
//!
//! ```text
//! FieldProps → registry lookup → control render / markup binding → layout → Element
//!                                        ↓ events
//!                               change → validate → on_change
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Core types (FieldValue, ValueType, Layout, HintType, etc.)
//! - [`engine`] - Control registry and field context
//! - [`primitives`] - Field controller, element tree, composition, layout
//! - [`validation`] - Rule engine, format validators, hint derivation
//! - [`lang`] - Localization bundles and template formatting
//! - [`state`] - Reactive field state
//! - [`controls`] - Built-in text and list controls

pub mod controls;
pub mod engine;
pub mod error;
pub mod lang;
pub mod primitives;
pub mod state;
pub mod types;
pub mod utils;
pub mod validation;

// Re-export commonly used items
pub use types::*;

pub use error::{FormError, Result};

pub use engine::{
    default_registry, next_uid, register, register_with, reset_registry, ControlDescriptor,
    ControlRegistry, FormContext, TypeNames,
};

pub use primitives::{
    bind_children, bind_rendered, Bound, Control, ControlEvents, ControlHandle,
    ControlOverrides, ControlProps, Element, FieldController, FieldProps, MarkerTag,
    // Callbacks
    BlurCallback, ChangeCallback, FocusCallback, RenderFn, ValidateCallback,
};

pub use validation::{check, derive_hint, Rules, ValidationFailure};

pub use lang::{Lang, Localizer};

pub use state::FieldState;

pub use controls::{register_builtin_controls, ListInput, TextInput};
