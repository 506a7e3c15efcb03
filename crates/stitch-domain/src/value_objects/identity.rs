//! Identity value objects

use std::fmt;

/// Stable identity of a declared dependency key
///
/// Assigned once per key for the lifetime of the process and used as the
/// index of the key's slot in the dependency arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyId(u32);

impl KeyId {
    /// Wrap a raw arena index
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw index value
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Index into the dependency arena
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key#{}", self.0)
    }
}

/// Address identity of a bound object
///
/// Two handles to the same allocation share an `ObjectId`. Only meaningful
/// while the object is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(usize);

impl ObjectId {
    /// Identity of the value behind `value`
    pub fn of<T: ?Sized>(value: &T) -> Self {
        Self(std::ptr::from_ref(value).cast::<()>().addr())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
