//! treesift - Decide which paths of a directory tree are noise
//!
//! This library resolves, once per scan, the set of paths a tree consumer
//! should skip: build artifacts and dependency directories pruned by name,
//! plus whatever `git check-ignore` (or, without git, the root `.gitignore`)
//! reports as ignored.
//!
//! ```no_run
//! use treesift::{ResolveOptions, resolve};
//!
//! let resolution = resolve(".", &ResolveOptions::default())?;
//! assert!(!resolution.is_ignored("src"));
//! # Ok::<(), treesift::ResolveError>(())
//! ```

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod adapters;
pub mod cancel;
pub mod config;
pub mod core;
pub mod output;
pub mod paths;
pub mod resolver;

pub use cancel::{CancellationToken, Interrupt, Uninterrupted};
pub use config::Config;
pub use crate::core::models::{IgnoredSet, PathEntry, ScanWarning};
pub use resolver::{IgnoreResolver, Resolution, ResolveError, ResolveOptions, VerdictSource, resolve};
