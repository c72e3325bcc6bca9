//! Reads raw environment values, coerces them, and validates them against the schema.

use std::collections::BTreeMap;
use std::fmt;
use std::num::IntErrorKind;

use appenv_core::source::EnvSource;
use tracing::{debug, info, warn};

use crate::error::{ValidationErrors, ValidationFailure};
use crate::schema::{FieldKind, FieldSpec, MSG_NOT_INTEGER, MSG_REQUIRED, Profile};
use crate::settings::Settings;

/// A raw environment value after coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Flag(bool),
    Integer(i64),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Flag(flag) => flag.fmt(f),
            Self::Integer(n) => n.fmt(f),
        }
    }
}

/// Substitute the default for an unset variable and convert it to the field's type.
///
/// Flags are `true` only on an ASCII case-insensitive match of `"true"`; anything else,
/// including `"1"` and `"yes"`, is `false`. Integers are parsed base-10 after trimming
/// surrounding whitespace; values beyond `i64` saturate.
pub fn coerce(spec: &FieldSpec, raw: Option<&str>) -> Result<Value, ValidationFailure> {
    let raw = raw.or(spec.default);

    match spec.kind {
        FieldKind::Flag => Ok(Value::Flag(
            raw.is_some_and(|v| v.eq_ignore_ascii_case("true")),
        )),
        FieldKind::Integer => {
            let raw = raw.ok_or_else(|| ValidationFailure::new(spec.name, MSG_REQUIRED))?;
            match raw.trim().parse::<i64>() {
                Ok(n) => Ok(Value::Integer(n)),
                // Out-of-range numbers are still numbers; let the range rule reject them.
                Err(e) => match e.kind() {
                    IntErrorKind::PosOverflow => Ok(Value::Integer(i64::MAX)),
                    IntErrorKind::NegOverflow => Ok(Value::Integer(i64::MIN)),
                    _ => Err(ValidationFailure::new(spec.name, MSG_NOT_INTEGER)),
                },
            }
        }
        FieldKind::Text => raw
            .map(|v| Value::Text(v.to_owned()))
            .ok_or_else(|| ValidationFailure::new(spec.name, MSG_REQUIRED)),
    }
}

/// Coerce and validate one field.
pub fn check_field(spec: &FieldSpec, raw: Option<&str>) -> Result<Value, ValidationFailure> {
    let value = coerce(spec, raw)?;
    spec.rule.check(spec.name, &value)?;
    Ok(value)
}

/// Result of checking one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOutcome {
    pub spec: &'static FieldSpec,
    pub result: Result<Value, ValidationFailure>,
}

impl FieldOutcome {
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

/// Check every field of `profile` against `source`, in registry order.
pub fn evaluate(source: &dyn EnvSource, profile: Profile) -> Vec<FieldOutcome> {
    profile
        .fields()
        .map(|spec| {
            let raw = source.var(spec.name);
            FieldOutcome {
                spec,
                result: check_field(spec, raw.as_deref()),
            }
        })
        .collect()
}

/// Coerced values of a fully validated environment, keyed by variable name.
#[derive(Debug, Default)]
pub(crate) struct Values(BTreeMap<&'static str, Value>);

impl Values {
    fn get(&self, name: &'static str) -> Result<&Value, ValidationFailure> {
        self.0
            .get(name)
            .ok_or_else(|| ValidationFailure::new(name, MSG_REQUIRED))
    }

    pub(crate) fn text(&self, name: &'static str) -> Result<String, ValidationFailure> {
        match self.get(name)? {
            Value::Text(text) => Ok(text.clone()),
            other => Err(ValidationFailure::new(
                name,
                format!("expected text, found {other}"),
            )),
        }
    }

    pub(crate) fn flag(&self, name: &'static str) -> Result<bool, ValidationFailure> {
        match self.get(name)? {
            Value::Flag(flag) => Ok(*flag),
            other => Err(ValidationFailure::new(
                name,
                format!("expected boolean, found {other}"),
            )),
        }
    }

    pub(crate) fn port(&self, name: &'static str) -> Result<u16, ValidationFailure> {
        match self.get(name)? {
            Value::Integer(n) => {
                u16::try_from(*n).map_err(|_| ValidationFailure::new(name, MSG_NOT_INTEGER))
            }
            other => Err(ValidationFailure::new(
                name,
                format!("expected integer, found {other}"),
            )),
        }
    }
}

/// Builds [`Settings`] for one [`Profile`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Loader {
    profile: Profile,
}

impl Loader {
    pub fn new(profile: Profile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    /// Read, coerce and validate every field of the profile.
    ///
    /// Returns every failure found, in registry order. No record is produced unless all
    /// fields pass.
    pub fn load(&self, source: &dyn EnvSource) -> Result<Settings, ValidationErrors> {
        let mut values = Values::default();
        let mut failures = Vec::new();

        for outcome in evaluate(source, self.profile) {
            let name = outcome.spec.name;
            match outcome.result {
                Ok(value) => {
                    let shown = outcome.spec.display(&value);
                    debug!(field = name, value = %shown, "setting accepted");
                    values.0.insert(name, value);
                }
                Err(failure) => {
                    warn!(field = name, reason = %failure.message, "setting rejected");
                    failures.push(failure);
                }
            }
        }

        if let Some(errors) = ValidationErrors::from_failures(failures) {
            return Err(errors);
        }

        let settings = Settings::from_values(self.profile, &values)?;
        info!(
            profile = %self.profile,
            fields = values.0.len(),
            "settings loaded"
        );
        Ok(settings)
    }
}
