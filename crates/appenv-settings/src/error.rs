use std::fmt;

/// A single field that failed coercion or validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationFailure {
    /// Environment variable name, e.g. `DATABASE_PORT`.
    pub field: &'static str,
    pub message: String,
}

impl ValidationFailure {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Every failure found while loading settings. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationFailure>);

impl ValidationErrors {
    /// Returns `None` when there is nothing to report.
    pub fn from_failures(failures: Vec<ValidationFailure>) -> Option<Self> {
        if failures.is_empty() {
            None
        } else {
            Some(Self(failures))
        }
    }

    pub fn failures(&self) -> &[ValidationFailure] {
        &self.0
    }

    /// The first failure in registry order.
    pub fn first(&self) -> &ValidationFailure {
        &self.0[0]
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|f| f.field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|f| f.field == field)
    }

    /// The failure reported for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&ValidationFailure> {
        self.0.iter().find(|f| f.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} setting(s) failed validation", self.0.len())?;
        for failure in &self.0 {
            write!(f, "\n  {failure}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationFailure> for ValidationErrors {
    fn from(failure: ValidationFailure) -> Self {
        Self(vec![failure])
    }
}
