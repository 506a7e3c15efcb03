//! Dependency Registry
//!
//! Typed, thread-local storage of current dependency values with
//! lifecycle-aware resolution.
//!
//! ## Layers
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │ Stitchable (generated)   resolve / register by type       │
//! ├───────────────────────────────────────────────────────────┤
//! │ lifecycle                Application | Unique | Cached    │
//! ├───────────────────────────────────────────────────────────┤
//! │ DependencyMap            KeyId-indexed arena per thread   │
//! ├───────────────────────────────────────────────────────────┤
//! │ DependencyKey<T>         name + scope + default factory   │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! Keys are declared statically with a factory, so every key always has a
//! value. Registering a value is visible to every later resolution on the
//! same thread.

pub mod key;
pub mod lifecycle;
pub mod map;
pub mod stitchable;

pub use key::DependencyKey;
pub use map::{DependencyMap, SavedSlot};
pub use stitchable::{Stitchable, register, resolve};
