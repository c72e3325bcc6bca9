//! Validated web-application settings read from environment variables.
//!
//! [`schema`] declares every recognised variable, [`loader`] reads, coerces and validates them,
//! and [`settings::Settings`] is the immutable record a successful load produces. A load either
//! returns a fully valid record or every failure it found; never a partial record.

pub mod error;
pub mod loader;
pub mod schema;
pub mod secret;
pub mod settings;
pub mod startup;

pub use error::{ValidationErrors, ValidationFailure};
pub use loader::Loader;
pub use schema::Profile;
pub use settings::Settings;
