//! Once-per-process access to the loaded [`Settings`].
//!
//! Components should take `&Settings` as a parameter; this module only covers the entry point
//! that has nowhere else to keep it.

use std::sync::OnceLock;

use appenv_core::source::{ProcessEnv, Snapshot};
use tracing::info;

use crate::error::ValidationErrors;
use crate::loader::Loader;
use crate::schema::Profile;
use crate::settings::Settings;

static SETTINGS: OnceLock<Settings> = OnceLock::new();

/// Load settings from a snapshot of the process environment and keep them for the rest of
/// the process.
///
/// After the first successful call the stored record is returned as is; the environment is
/// not read again, whatever `profile` later calls pass. A failed load stores nothing.
pub fn init(profile: Profile) -> Result<&'static Settings, ValidationErrors> {
    if let Some(settings) = SETTINGS.get() {
        return Ok(settings);
    }

    let snapshot = Snapshot::capture(&ProcessEnv, profile.fields().map(|spec| spec.name));
    let settings = Loader::new(profile).load(&snapshot)?;
    let stored = SETTINGS.get_or_init(|| settings);
    info!(profile = %stored.profile(), "settings installed");
    Ok(stored)
}

/// The settings stored by [`init`], if it has succeeded.
pub fn get() -> Option<&'static Settings> {
    SETTINGS.get()
}
