use crate::source::{EnvSource, ProcessEnv};

/// Trait for types that are built from environment variables.
///
/// Implementors provide [`FromEnv::from_source`]; [`FromEnv::from_env`] reads the live
/// process environment. Neither panics: a bad environment is reported through `Self::Error`
/// and the caller decides whether to abort startup.
pub trait FromEnv: Sized {
    type Error;

    fn from_source(source: &dyn EnvSource) -> Result<Self, Self::Error>;

    fn from_env() -> Result<Self, Self::Error> {
        Self::from_source(&ProcessEnv)
    }
}
