//! Declarative registry of every recognised environment variable.
//!
//! Each [`FieldSpec`] names one variable, the type it is coerced to, the default substituted
//! when it is unset, and the [`Rule`] its coerced value must satisfy. Deployments pick the
//! variables they need through a [`Profile`] instead of maintaining separate declarations.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use url::Url;

use crate::error::ValidationFailure;
use crate::loader::Value;
use crate::secret::{REDACTED, mask_url_password};

pub const TIME_ZONE: &str = "TIME_ZONE";
pub const DATABASE_URL: &str = "DATABASE_URL";
pub const DEBUG: &str = "DEBUG";
pub const DATABASE_NAME: &str = "DATABASE_NAME";
pub const DATABASE_HOST: &str = "DATABASE_HOST";
pub const DATABASE_USER: &str = "DATABASE_USER";
pub const DATABASE_PASSWORD: &str = "DATABASE_PASSWORD";
pub const DATABASE_PORT: &str = "DATABASE_PORT";
pub const EMAIL_HOST: &str = "EMAIL_HOST";
pub const EMAIL_PORT: &str = "EMAIL_PORT";
pub const EMAIL_USE_TLS: &str = "EMAIL_USE_TLS";
pub const EMAIL_USE_SSL: &str = "EMAIL_USE_SSL";
pub const EMAIL_HOST_USER: &str = "EMAIL_HOST_USER";
pub const EMAIL_HOST_PASSWORD: &str = "EMAIL_HOST_PASSWORD";
pub const GOOGLE_OAUTH2_CLIENT_ID: &str = "GOOGLE_OAUTH2_CLIENT_ID";
pub const GOOGLE_OAUTH2_CLIENT_SECRET: &str = "GOOGLE_OAUTH2_CLIENT_SECRET";
pub const PLATFORM_URL: &str = "PLATFORM_URL";

/// Time zones the application accepts.
pub const ALLOWED_TIME_ZONES: &[&str] = &["UTC", "America/New_York", "Europe/London"];

pub const DEFAULT_DATABASE_PORT: &str = "5432";
/// Out of range on purpose: an unconfigured mail port fails validation.
pub const DEFAULT_EMAIL_PORT: &str = "0";
pub const DEFAULT_PLATFORM_URL: &str = "http://127.0.0.1:8000";

pub(crate) const MSG_REQUIRED: &str = "field required";
pub(crate) const MSG_NOT_INTEGER: &str = "value is not a valid integer";
const MSG_NOT_EMAIL: &str = "value is not a valid email address";
const MSG_NOT_URL: &str = "invalid or missing URL scheme";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$",
    )
    .expect("email pattern is valid")
});

/// Concern a variable belongs to. A [`Profile`] is a set of groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldGroup {
    /// Time zone, primary database URL and debug flag.
    Framework,
    Database,
    Email,
    OAuth,
    Platform,
}

/// Type a raw string is coerced to before validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// `true` on a case-insensitive match of `"true"`, otherwise `false`. Unset is `false`.
    Flag,
    Integer,
}

/// Predicate a coerced value must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Any text value.
    Present,
    /// Text must be one of the listed values.
    OneOf(&'static [&'static str]),
    /// Text must start with one of `prefixes` and parse as a URL.
    UrlPrefix {
        prefixes: &'static [&'static str],
        message: &'static str,
    },
    /// Text must not be empty.
    NonEmpty(&'static str),
    /// Integer within `1..=65535`.
    PortRange(&'static str),
    /// Value must already be a flag.
    Boolean(&'static str),
    /// Text must look like `local@domain.tld`.
    Email,
}

impl Rule {
    /// Accept or reject `value` for `field`. Pure.
    pub fn check(&self, field: &'static str, value: &Value) -> Result<(), ValidationFailure> {
        let reject = |message: &str| Err(ValidationFailure::new(field, message));

        match (self, value) {
            (Self::Boolean(_), Value::Flag(_)) => Ok(()),
            (Self::Boolean(message), _) => reject(message),

            (Self::PortRange(message), Value::Integer(port)) => {
                if (1..=65535).contains(port) {
                    Ok(())
                } else {
                    reject(message)
                }
            }
            (Self::PortRange(_), _) => reject(MSG_NOT_INTEGER),

            (Self::Present, Value::Text(_)) => Ok(()),
            (Self::OneOf(allowed), Value::Text(text)) => {
                if allowed.iter().any(|zone| zone == text) {
                    Ok(())
                } else {
                    reject(&format!(
                        "Invalid time zone '{text}', allowed values: {}",
                        allowed.join(", ")
                    ))
                }
            }
            (Self::UrlPrefix { prefixes, message }, Value::Text(text)) => {
                if !prefixes.iter().any(|p| text.starts_with(p)) {
                    return reject(message);
                }
                match Url::parse(text) {
                    Ok(url) if url.host_str().is_some_and(|host| !host.is_empty()) => Ok(()),
                    _ => reject(MSG_NOT_URL),
                }
            }
            (Self::NonEmpty(message), Value::Text(text)) => {
                if text.is_empty() {
                    reject(message)
                } else {
                    Ok(())
                }
            }
            (Self::Email, Value::Text(text)) => {
                if EMAIL_RE.is_match(text) {
                    Ok(())
                } else {
                    reject(MSG_NOT_EMAIL)
                }
            }
            (_, _) => reject(&format!("{field} must be text")),
        }
    }
}

/// One recognised environment variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub group: FieldGroup,
    pub kind: FieldKind,
    /// Raw value substituted when the variable is unset. An empty string is not unset.
    pub default: Option<&'static str>,
    /// Value must never be logged or printed.
    pub secret: bool,
    /// Value is a URL whose password must be masked when logged or printed.
    pub url_credentials: bool,
    pub rule: Rule,
}

impl FieldSpec {
    const fn text(name: &'static str, group: FieldGroup, rule: Rule) -> Self {
        Self {
            name,
            group,
            kind: FieldKind::Text,
            default: None,
            secret: false,
            url_credentials: false,
            rule,
        }
    }

    const fn flag(name: &'static str, group: FieldGroup, message: &'static str) -> Self {
        Self {
            name,
            group,
            kind: FieldKind::Flag,
            default: None,
            secret: false,
            url_credentials: false,
            rule: Rule::Boolean(message),
        }
    }

    const fn port(
        name: &'static str,
        group: FieldGroup,
        default: &'static str,
        message: &'static str,
    ) -> Self {
        Self {
            name,
            group,
            kind: FieldKind::Integer,
            default: Some(default),
            secret: false,
            url_credentials: false,
            rule: Rule::PortRange(message),
        }
    }

    const fn with_default(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }

    const fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    const fn with_url_credentials(mut self) -> Self {
        self.url_credentials = true;
        self
    }

    /// Render `value` for logs and reports, hiding secrets and URL passwords.
    pub fn display(&self, value: &Value) -> String {
        if self.secret {
            return REDACTED.to_owned();
        }
        match value {
            Value::Text(text) if self.url_credentials => mask_url_password(text),
            other => other.to_string(),
        }
    }
}

/// Every recognised variable, in the order loads visit and report them.
pub static FIELDS: &[FieldSpec] = &[
    FieldSpec::text(TIME_ZONE, FieldGroup::Framework, Rule::OneOf(ALLOWED_TIME_ZONES)),
    FieldSpec::text(
        DATABASE_URL,
        FieldGroup::Framework,
        Rule::UrlPrefix {
            prefixes: &["postgres://"],
            message: "Only PostgreSQL database URLs are supported",
        },
    )
    .with_url_credentials(),
    FieldSpec::flag(DEBUG, FieldGroup::Framework, "DEBUG must be a boolean value"),
    FieldSpec::text(
        DATABASE_NAME,
        FieldGroup::Database,
        Rule::NonEmpty("DATABASE_NAME cannot be empty"),
    ),
    FieldSpec::text(
        DATABASE_HOST,
        FieldGroup::Database,
        Rule::NonEmpty("DATABASE_HOST cannot be empty"),
    ),
    FieldSpec::text(
        DATABASE_USER,
        FieldGroup::Database,
        Rule::NonEmpty("DATABASE_USER cannot be empty"),
    ),
    FieldSpec::text(
        DATABASE_PASSWORD,
        FieldGroup::Database,
        Rule::NonEmpty("DATABASE_PASSWORD cannot be empty"),
    )
    .secret(),
    FieldSpec::port(
        DATABASE_PORT,
        FieldGroup::Database,
        DEFAULT_DATABASE_PORT,
        "DATABASE_PORT must be between 1 and 65535",
    ),
    FieldSpec::text(EMAIL_HOST, FieldGroup::Email, Rule::Present),
    FieldSpec::port(
        EMAIL_PORT,
        FieldGroup::Email,
        DEFAULT_EMAIL_PORT,
        "EMAIL_PORT must be a valid port number (1-65535)",
    ),
    FieldSpec::flag(
        EMAIL_USE_TLS,
        FieldGroup::Email,
        "EMAIL_USE_TLS and EMAIL_USE_SSL must be boolean values",
    ),
    FieldSpec::flag(
        EMAIL_USE_SSL,
        FieldGroup::Email,
        "EMAIL_USE_TLS and EMAIL_USE_SSL must be boolean values",
    ),
    FieldSpec::text(EMAIL_HOST_USER, FieldGroup::Email, Rule::Email),
    FieldSpec::text(EMAIL_HOST_PASSWORD, FieldGroup::Email, Rule::Present).secret(),
    FieldSpec::text(
        GOOGLE_OAUTH2_CLIENT_ID,
        FieldGroup::OAuth,
        Rule::NonEmpty("GOOGLE_OAUTH2_CLIENT_ID must not be empty"),
    ),
    FieldSpec::text(
        GOOGLE_OAUTH2_CLIENT_SECRET,
        FieldGroup::OAuth,
        Rule::NonEmpty("GOOGLE_OAUTH2_CLIENT_SECRET must not be empty"),
    )
    .secret(),
    FieldSpec::text(
        PLATFORM_URL,
        FieldGroup::Platform,
        Rule::UrlPrefix {
            prefixes: &["http://", "https://"],
            message: "PLATFORM_URL must be a valid HTTP or HTTPS URL",
        },
    )
    .with_default(DEFAULT_PLATFORM_URL),
];

/// Look up a recognised variable by name.
pub fn find(name: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|spec| spec.name == name)
}

/// Which groups of variables a deployment requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Every group.
    #[default]
    Full,
    /// Framework group only: `TIME_ZONE`, `DATABASE_URL`, `DEBUG`.
    Minimal,
}

impl Profile {
    pub fn groups(self) -> &'static [FieldGroup] {
        match self {
            Self::Full => &[
                FieldGroup::Framework,
                FieldGroup::Database,
                FieldGroup::Email,
                FieldGroup::OAuth,
                FieldGroup::Platform,
            ],
            Self::Minimal => &[FieldGroup::Framework],
        }
    }

    pub fn includes(self, group: FieldGroup) -> bool {
        self.groups().contains(&group)
    }

    pub fn fields(self) -> impl Iterator<Item = &'static FieldSpec> {
        FIELDS.iter().filter(move |spec| self.includes(spec.group))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Minimal => "minimal",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown profile '{0}', expected 'full' or 'minimal'")]
pub struct ProfileParseError(String);

impl FromStr for Profile {
    type Err = ProfileParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("full") {
            Ok(Self::Full)
        } else if s.eq_ignore_ascii_case("minimal") {
            Ok(Self::Minimal)
        } else {
            Err(ProfileParseError(s.to_owned()))
        }
    }
}
