//! Foundation types for portal.
//!
//! This crate contains the platform-agnostic types shared by all portal
//! crates: shell events, the effects the lifecycle core emits, user-facing
//! notices, configuration and error types.

pub mod config;
pub mod effect;
pub mod error;
pub mod event;
