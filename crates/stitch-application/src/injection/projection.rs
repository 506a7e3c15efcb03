//! Read/write view of one property of an observed dependency

use std::fmt;
use std::rc::Rc;

use super::observable::StitchObservable;
use crate::reactive::AsObservable;

/// Two-way accessor for a single property
///
/// Both directions go through the bridge's binding, so after a register or
/// rebind the projection reads and writes the object now current for the
/// key. Writes reach the object through its own setter and therefore raise
/// its change signal like any other mutation.
pub struct Projection<T: 'static, V: 'static> {
    bridge: StitchObservable<T>,
    name: &'static str,
    getter: Rc<dyn Fn(&T) -> V>,
    setter: Rc<dyn Fn(&T, V)>,
}

impl<T: AsObservable + Clone + 'static, V: 'static> Projection<T, V> {
    pub(super) fn new(
        bridge: StitchObservable<T>,
        name: &'static str,
        getter: impl Fn(&T) -> V + 'static,
        setter: impl Fn(&T, V) + 'static,
    ) -> Self {
        Self {
            bridge,
            name,
            getter: Rc::new(move |object: &T| getter(object)),
            setter: Rc::new(move |object: &T, value: V| setter(object, value)),
        }
    }

    /// Read the property from the current object
    pub fn get(&self) -> V {
        (self.getter)(&self.bridge.get())
    }

    /// Write the property on the current object
    pub fn set(&self, value: V) {
        (self.setter)(&self.bridge.get(), value);
    }

    /// Property name
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T: 'static, V: 'static> Clone for Projection<T, V> {
    fn clone(&self) -> Self {
        Self {
            bridge: self.bridge.clone(),
            name: self.name,
            getter: Rc::clone(&self.getter),
            setter: Rc::clone(&self.setter),
        }
    }
}

impl<T: 'static, V: 'static> fmt::Debug for Projection<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Projection")
            .field("name", &self.name)
            .field("bridge", &self.bridge)
            .finish_non_exhaustive()
    }
}
