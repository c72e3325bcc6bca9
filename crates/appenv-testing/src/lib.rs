//! Test utilities for appenv crates.
//!
//! Provides `EnvFixture`, an in-memory environment builder, and the `.env` fixture loader.
//! Use from `[dev-dependencies]` only — never in production code.

pub mod fixture;

pub use fixture::EnvFixture;
