//! # Stitch Domain
//!
//! Core types shared by every Stitch layer: the error taxonomy, lifecycle
//! scope tags, stable identities and the executor port.
//!
//! This crate has no knowledge of how dependencies are stored or observed;
//! see `stitch-application` for the registry and reactive core.

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{ContractViolation, Error, Result};
pub use ports::{MainExecutor, Task};
pub use value_objects::{KeyId, ObjectId, Scope};
