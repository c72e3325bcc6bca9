//! The validated, read-only configuration record.

use appenv_core::config::FromEnv;
use appenv_core::source::EnvSource;
use serde::Serialize;

use crate::error::{ValidationErrors, ValidationFailure};
use crate::loader::{Loader, Values};
use crate::schema::{self, FieldGroup, Profile};
use crate::secret::{CredentialUrl, Secret};

/// Time zone, primary database URL and debug flag. Present in every profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameworkSettings {
    /// One of `UTC`, `America/New_York`, `Europe/London`.
    pub time_zone: String,
    /// `postgres://` connection URL. Its password is masked when printed.
    pub database_url: CredentialUrl,
    pub debug: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseSettings {
    pub name: String,
    pub host: String,
    pub user: String,
    pub password: Secret,
    /// Defaults to 5432.
    pub port: u16,
}

/// Outgoing mail transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailSettings {
    pub host: String,
    pub port: u16,
    pub use_tls: bool,
    pub use_ssl: bool,
    /// Account address, also used as the sender.
    pub host_user: String,
    pub host_password: Secret,
}

/// Google OAuth2 client credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OAuthSettings {
    pub client_id: String,
    pub client_secret: Secret,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformSettings {
    /// Public base URL. Defaults to `http://127.0.0.1:8000`.
    pub url: String,
}

/// Application settings, validated as a whole.
///
/// Built once at startup by [`Loader::load`] and shared by reference afterwards. Every group
/// the profile includes is present; groups outside the profile are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    profile: Profile,
    framework: FrameworkSettings,
    database: Option<DatabaseSettings>,
    email: Option<EmailSettings>,
    oauth: Option<OAuthSettings>,
    platform: Option<PlatformSettings>,
}

impl Settings {
    pub(crate) fn from_values(profile: Profile, values: &Values) -> Result<Self, ValidationFailure> {
        let framework = FrameworkSettings {
            time_zone: values.text(schema::TIME_ZONE)?,
            database_url: CredentialUrl::new(values.text(schema::DATABASE_URL)?),
            debug: values.flag(schema::DEBUG)?,
        };

        let database = if profile.includes(FieldGroup::Database) {
            Some(DatabaseSettings {
                name: values.text(schema::DATABASE_NAME)?,
                host: values.text(schema::DATABASE_HOST)?,
                user: values.text(schema::DATABASE_USER)?,
                password: Secret::new(values.text(schema::DATABASE_PASSWORD)?),
                port: values.port(schema::DATABASE_PORT)?,
            })
        } else {
            None
        };

        let email = if profile.includes(FieldGroup::Email) {
            Some(EmailSettings {
                host: values.text(schema::EMAIL_HOST)?,
                port: values.port(schema::EMAIL_PORT)?,
                use_tls: values.flag(schema::EMAIL_USE_TLS)?,
                use_ssl: values.flag(schema::EMAIL_USE_SSL)?,
                host_user: values.text(schema::EMAIL_HOST_USER)?,
                host_password: Secret::new(values.text(schema::EMAIL_HOST_PASSWORD)?),
            })
        } else {
            None
        };

        let oauth = if profile.includes(FieldGroup::OAuth) {
            Some(OAuthSettings {
                client_id: values.text(schema::GOOGLE_OAUTH2_CLIENT_ID)?,
                client_secret: Secret::new(values.text(schema::GOOGLE_OAUTH2_CLIENT_SECRET)?),
            })
        } else {
            None
        };

        let platform = if profile.includes(FieldGroup::Platform) {
            Some(PlatformSettings {
                url: values.text(schema::PLATFORM_URL)?,
            })
        } else {
            None
        };

        Ok(Self {
            profile,
            framework,
            database,
            email,
            oauth,
            platform,
        })
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    pub fn framework(&self) -> &FrameworkSettings {
        &self.framework
    }

    pub fn database(&self) -> Option<&DatabaseSettings> {
        self.database.as_ref()
    }

    pub fn email(&self) -> Option<&EmailSettings> {
        self.email.as_ref()
    }

    pub fn oauth(&self) -> Option<&OAuthSettings> {
        self.oauth.as_ref()
    }

    pub fn platform(&self) -> Option<&PlatformSettings> {
        self.platform.as_ref()
    }
}

/// Loads the full profile.
impl FromEnv for Settings {
    type Error = ValidationErrors;

    fn from_source(source: &dyn EnvSource) -> Result<Self, Self::Error> {
        Loader::new(Profile::Full).load(source)
    }
}
