//! Core ignore-resolution logic
//!
//! This module contains the decision logic with no direct I/O.
//! Filesystem walking and the git subprocess are reached through
//! `adapters` and the port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (`PathEntry`, `IgnoreRule`, `IgnoredSet`)
//! - `services/` - Default index, fallback matcher, batched oracle
//! - `ports/` - Trait definitions for external dependencies

pub mod models;
pub mod ports;
pub mod services;
