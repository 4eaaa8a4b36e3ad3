//! Built-in Controls
//!
//! - [`TextInput`] - single-line text, also used for numeric types
//! - [`ListInput`] - multi-value selections
//!
//! Call [`register_builtin_controls`] once per registry before building
//! fields. Custom controls registered afterwards under the same type names
//! replace the built-ins.

mod list_input;
mod text_input;

pub use list_input::ListInput;
pub use text_input::TextInput;

use crate::engine::ControlRegistry;
use crate::types::ValueType;

/// Type names served by [`TextInput`] with string validation.
pub const TEXT_TYPES: [&str; 8] = [
    "text", "email", "url", "alpha", "alphanum", "tel", "hex", "password",
];

/// Type names served by [`TextInput`] with numeric validation.
pub const NUMBER_TYPES: [&str; 2] = ["number", "integer"];

/// Type names served by [`ListInput`].
pub const LIST_TYPES: [&str; 3] = ["list", "tags", "checkbox-group"];

/// Register the built-in controls under their type names.
pub fn register_builtin_controls(registry: &ControlRegistry) {
    registry.register(TEXT_TYPES, TextInput::render, TextInput::MARKER);
    registry.register_with(
        NUMBER_TYPES,
        TextInput::render,
        TextInput::MARKER,
        ValueType::Number,
    );
    registry.register_with(
        LIST_TYPES,
        ListInput::render,
        ListInput::MARKER,
        ValueType::Array,
    );
    tracing::debug!(count = registry.len(), "built-in controls registered");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_value_types() {
        let registry = ControlRegistry::new();
        register_builtin_controls(&registry);

        assert_eq!(registry.len(), 13);
        assert_eq!(registry.resolve("email").unwrap().value_type(), ValueType::String);
        assert_eq!(registry.resolve("integer").unwrap().value_type(), ValueType::Number);
        assert_eq!(registry.resolve("tags").unwrap().value_type(), ValueType::Array);
        assert_eq!(registry.resolve("tags").unwrap().marker(), ListInput::MARKER);
    }

    #[test]
    fn test_custom_control_replaces_builtin() {
        let registry = ControlRegistry::new();
        register_builtin_controls(&registry);
        registry.register("email", ListInput::render, ListInput::MARKER);

        let descriptor = registry.resolve("email").unwrap();
        assert_eq!(descriptor.marker(), ListInput::MARKER);
        assert_eq!(descriptor.value_type(), ValueType::String);
    }
}
