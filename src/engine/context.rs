//! Field context - The services a field controller is built against.

use std::rc::Rc;

use super::registry::{default_registry, ControlRegistry};
use crate::lang::{Lang, Localizer};

/// Registry and localizer injected into every field controller.
///
/// `FormContext::default()` uses this thread's default registry and the
/// built-in English bundle.
#[derive(Clone)]
pub struct FormContext {
    pub registry: ControlRegistry,
    pub lang: Rc<dyn Localizer>,
}

impl FormContext {
    pub fn new(registry: ControlRegistry, lang: impl Localizer + 'static) -> Self {
        Self {
            registry,
            lang: Rc::new(lang),
        }
    }

    /// Same registry, different localizer.
    pub fn with_lang(mut self, lang: impl Localizer + 'static) -> Self {
        self.lang = Rc::new(lang);
        self
    }
}

impl Default for FormContext {
    fn default() -> Self {
        Self {
            registry: default_registry(),
            lang: Rc::new(Lang::default()),
        }
    }
}
