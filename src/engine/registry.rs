//! Control Registry - Type name → control descriptor lookup.
//!
//! Concrete controls register themselves under one or more declared type names.
//! Field controllers resolve their declared type here to learn how to render
//! the control, which marker identifies it inside caller markup, and which
//! [`ValueType`] governs validation.
//!
//! - Registration is last-writer-wins: a later descriptor replaces an earlier one
//! - Resolution failure is a typed [`FormError::UnknownControl`]
//! - Registering after the first resolve still applies, but fields built
//!   earlier keep the value type they resolved, so it is logged
//!
//! A [`ControlRegistry`] is a cheap, cloneable handle. Each thread also owns a
//! default registry used by the free [`register`] / [`register_with`] entry points.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::error::{FormError, Result};
use crate::primitives::{ControlProps, Element, MarkerTag, RenderFn};
use crate::types::ValueType;

// =============================================================================
// Descriptor
// =============================================================================

/// Everything the field controller needs to know about one control type.
#[derive(Clone)]
pub struct ControlDescriptor {
    render: RenderFn,
    marker: MarkerTag,
    value_type: ValueType,
}

impl ControlDescriptor {
    pub fn new(
        render: impl Fn(ControlProps) -> Element + 'static,
        marker: MarkerTag,
        value_type: ValueType,
    ) -> Self {
        Self {
            render: Rc::new(render),
            marker,
            value_type,
        }
    }

    /// Render the control with fully merged props.
    pub fn render(&self, props: ControlProps) -> Element {
        (self.render)(props)
    }

    pub fn marker(&self) -> MarkerTag {
        self.marker
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }
}

impl fmt::Debug for ControlDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlDescriptor")
            .field("marker", &self.marker)
            .field("value_type", &self.value_type)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Type Names
// =============================================================================

/// One or many type names accepted by the registration entry points.
pub trait TypeNames {
    fn into_type_names(self) -> Vec<String>;
}

impl TypeNames for &str {
    fn into_type_names(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl TypeNames for String {
    fn into_type_names(self) -> Vec<String> {
        vec![self]
    }
}

impl TypeNames for &[&str] {
    fn into_type_names(self) -> Vec<String> {
        self.iter().map(|name| name.to_string()).collect()
    }
}

impl<const N: usize> TypeNames for [&str; N] {
    fn into_type_names(self) -> Vec<String> {
        self.iter().map(|name| name.to_string()).collect()
    }
}

impl TypeNames for Vec<&str> {
    fn into_type_names(self) -> Vec<String> {
        self.into_iter().map(str::to_string).collect()
    }
}

impl TypeNames for Vec<String> {
    fn into_type_names(self) -> Vec<String> {
        self
    }
}

// =============================================================================
// Registry
// =============================================================================

#[derive(Default)]
struct RegistryState {
    controls: HashMap<String, Rc<ControlDescriptor>>,
    /// Set by the first resolve; later registrations are logged.
    resolved: bool,
}

/// Shared lookup service from declared type name to [`ControlDescriptor`].
#[derive(Clone, Default)]
pub struct ControlRegistry {
    state: Rc<RefCell<RegistryState>>,
}

impl ControlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a control whose value is plain text.
    pub fn register(
        &self,
        types: impl TypeNames,
        render: impl Fn(ControlProps) -> Element + 'static,
        marker: MarkerTag,
    ) {
        self.register_with(types, render, marker, ValueType::String);
    }

    /// Register a control with an explicit value type.
    pub fn register_with(
        &self,
        types: impl TypeNames,
        render: impl Fn(ControlProps) -> Element + 'static,
        marker: MarkerTag,
        value_type: ValueType,
    ) {
        self.insert(types, ControlDescriptor::new(render, marker, value_type));
    }

    /// Associate every name in `types` with one shared descriptor.
    pub fn insert(&self, types: impl TypeNames, descriptor: ControlDescriptor) {
        let descriptor = Rc::new(descriptor);
        let mut state = self.state.borrow_mut();

        for type_name in types.into_type_names() {
            if state.resolved {
                tracing::warn!(
                    type_name = %type_name,
                    "control registered after the first resolve; existing fields keep their value type"
                );
            }
            if let Some(previous) = state.controls.insert(type_name.clone(), descriptor.clone()) {
                tracing::warn!(
                    type_name = %type_name,
                    previous = %previous.marker().name(),
                    replacement = %descriptor.marker().name(),
                    "control registration replaced"
                );
            }
        }
    }

    /// Look up the descriptor for a declared type.
    pub fn resolve(&self, type_name: &str) -> Result<Rc<ControlDescriptor>> {
        let mut state = self.state.borrow_mut();
        state.resolved = true;
        state
            .controls
            .get(type_name)
            .cloned()
            .ok_or_else(|| FormError::UnknownControl {
                type_name: type_name.to_string(),
            })
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.state.borrow().controls.contains_key(type_name)
    }

    pub fn len(&self) -> usize {
        self.state.borrow().controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().controls.is_empty()
    }

    /// Registered type names, sorted.
    pub fn type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.state.borrow().controls.keys().cloned().collect();
        names.sort();
        names
    }

    /// Drop every registration and forget that anything was resolved.
    pub fn clear(&self) {
        let mut state = self.state.borrow_mut();
        state.controls.clear();
        state.resolved = false;
    }
}

impl fmt::Debug for ControlRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlRegistry")
            .field("types", &self.type_names())
            .finish()
    }
}

// =============================================================================
// Default Registry & IDs
// =============================================================================

thread_local! {
    /// Registry used by fields built without an explicit context.
    static DEFAULT_REGISTRY: ControlRegistry = ControlRegistry::new();

    /// Counter for generating unique field IDs.
    static ID_COUNTER: RefCell<usize> = const { RefCell::new(0) };
}

/// Handle to this thread's default registry.
pub fn default_registry() -> ControlRegistry {
    DEFAULT_REGISTRY.with(|registry| registry.clone())
}

/// Register a text-valued control in the default registry.
pub fn register(
    types: impl TypeNames,
    render: impl Fn(ControlProps) -> Element + 'static,
    marker: MarkerTag,
) {
    default_registry().register(types, render, marker);
}

/// Register a control with an explicit value type in the default registry.
pub fn register_with(
    types: impl TypeNames,
    render: impl Fn(ControlProps) -> Element + 'static,
    marker: MarkerTag,
    value_type: ValueType,
) {
    default_registry().register_with(types, render, marker, value_type);
}

/// Generate a unique field ID (`field-0`, `field-1`, ...).
pub fn next_uid() -> String {
    ID_COUNTER.with(|counter| {
        let mut counter = counter.borrow_mut();
        let id = format!("field-{}", *counter);
        *counter += 1;
        id
    })
}

// =============================================================================
// Reset (for testing)
// =============================================================================

/// Reset the default registry and the ID counter (for testing).
pub fn reset_registry() {
    default_registry().clear();
    ID_COUNTER.with(|counter| *counter.borrow_mut() = 0);
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIRST: MarkerTag = MarkerTag::new("first");
    const SECOND: MarkerTag = MarkerTag::new("second");

    fn render_first(_props: ControlProps) -> Element {
        Element::new("first")
    }

    fn render_second(_props: ControlProps) -> Element {
        Element::new("second")
    }

    #[test]
    fn test_register_many_names() {
        let registry = ControlRegistry::new();
        registry.register(["text", "email"], render_first, FIRST);

        assert!(registry.contains("text"));
        assert!(registry.contains("email"));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.type_names(), vec!["email", "text"]);

        let descriptor = registry.resolve("email").unwrap();
        assert_eq!(descriptor.marker(), FIRST);
        assert_eq!(descriptor.value_type(), ValueType::String);
    }

    #[test]
    fn test_last_registration_wins() {
        let registry = ControlRegistry::new();
        registry.register("text", render_first, FIRST);
        registry.register_with("text", render_second, SECOND, ValueType::Number);

        let descriptor = registry.resolve("text").unwrap();
        assert_eq!(descriptor.marker(), SECOND);
        assert_eq!(descriptor.value_type(), ValueType::Number);
        assert_eq!(descriptor.render(ControlProps::default()).tag, "second");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unknown_type_is_typed_error() {
        let registry = ControlRegistry::new();
        let err = registry.resolve("date").unwrap_err();
        assert!(matches!(err, FormError::UnknownControl { ref type_name } if type_name == "date"));
    }

    #[test]
    fn test_late_registration_applies() {
        let registry = ControlRegistry::new();
        assert!(registry.resolve("text").is_err());
        registry.register("text", render_first, FIRST);
        assert!(registry.resolve("text").is_ok());
    }

    #[test]
    fn test_clones_share_state() {
        let registry = ControlRegistry::new();
        let other = registry.clone();
        other.register(vec!["list".to_string()], render_first, FIRST);
        assert!(registry.contains("list"));

        registry.clear();
        assert!(other.is_empty());
    }

    #[test]
    fn test_default_registry_and_ids() {
        reset_registry();

        register("text", render_first, FIRST);
        assert!(default_registry().contains("text"));

        assert_eq!(next_uid(), "field-0");
        assert_eq!(next_uid(), "field-1");

        reset_registry();
        assert!(default_registry().is_empty());
        assert_eq!(next_uid(), "field-0");
    }
}
