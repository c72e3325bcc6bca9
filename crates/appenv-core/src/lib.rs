//! Shared plumbing for environment-driven configuration.
//!
//! Holds the [`source::EnvSource`] abstraction, the [`config::FromEnv`] loading trait,
//! and tracing initialisation. Contains no knowledge of individual settings.

pub mod config;
pub mod source;
pub mod tracing;
