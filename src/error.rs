//! Error types for spark-form.
//!
//! Only configuration problems are errors. Validation failures are ordinary
//! outcomes and live in [`crate::validation::ValidationFailure`].

use thiserror::Error;

/// Result type for spark-form operations.
pub type Result<T> = std::result::Result<T, FormError>;

/// Errors raised by the registry and the declaration/bundle loaders.
#[derive(Debug, Error)]
pub enum FormError {
    /// No control is registered under the declared type name.
    #[error("{type_name} was not registered")]
    UnknownControl { type_name: String },

    /// A localization bundle could not be parsed.
    #[error("invalid localization bundle: {0}")]
    InvalidBundle(#[source] serde_json::Error),

    /// A field declaration could not be parsed.
    #[error("invalid field declaration: {0}")]
    InvalidDeclaration(#[source] serde_json::Error),
}
