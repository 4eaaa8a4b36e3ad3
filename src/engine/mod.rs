//! Form Engine - Control registry and field context.
//!
//! The engine owns the process-level pieces every field shares:
//! - Registry: declared type name → control descriptor
//! - Context: the registry and localizer a field is built against
//!
//! # Registration contract
//!
//! Controls are registered before the first field resolves its type:
//!
//! ```text
//! register_builtin_controls() → register(custom) → FieldController::new(..)
//! ```
//!
//! Registering later still works, and is logged.

mod context;
mod registry;

pub use context::*;
pub use registry::*;
