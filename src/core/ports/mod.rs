//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundaries between core logic and external
//! systems (the version-control executable).
//!
//! Implementations live in the `adapters` module.
//!
//! ## Design Principle
//!
//! The core logic depends only on these traits, never on concrete
//! implementations. Tests substitute hand-written fakes.

mod oracle;

pub use oracle::{IgnoreCheck, OracleError};
