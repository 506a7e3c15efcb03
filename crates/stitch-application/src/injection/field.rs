//! Explicit per-field accessors

use std::fmt;
use std::rc::Rc;

use stitch_domain::constants::UNNAMED_FIELD;

type Extractor<T, V> = Rc<dyn Fn(&T) -> Option<V>>;

/// Named getter projecting one field out of an object
///
/// Accessors are registered when a field is tracked; the field diff
/// publisher re-runs them after each change. An optional accessor may yield
/// no value for a round, which the publisher treats as "nothing to compare".
pub struct FieldAccessor<T, V> {
    name: &'static str,
    extract: Extractor<T, V>,
}

impl<T: 'static, V: 'static> FieldAccessor<T, V> {
    /// Accessor that always yields a value
    pub fn new(name: &'static str, getter: impl Fn(&T) -> V + 'static) -> Self {
        Self {
            name: Self::normalize(name),
            extract: Rc::new(move |object: &T| Some(getter(object))),
        }
    }

    /// Accessor that may yield no value for a round
    pub fn optional(name: &'static str, getter: impl Fn(&T) -> Option<V> + 'static) -> Self {
        Self {
            name: Self::normalize(name),
            extract: Rc::new(getter),
        }
    }

    fn normalize(name: &'static str) -> &'static str {
        if name.is_empty() { UNNAMED_FIELD } else { name }
    }

    /// Run the getter on `object`
    pub fn extract(&self, object: &T) -> Option<V> {
        (self.extract)(object)
    }

    /// Field name used in diagnostics
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T, V> Clone for FieldAccessor<T, V> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            extract: Rc::clone(&self.extract),
        }
    }
}

impl<T, V> fmt::Debug for FieldAccessor<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldAccessor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
