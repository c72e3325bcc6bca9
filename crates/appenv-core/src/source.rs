//! Where raw environment values come from.

use std::collections::{BTreeMap, HashMap};

/// A read-only lookup of environment variables by exact name.
///
/// Absence is `None`, never an error: deciding whether a missing value is acceptable
/// belongs to the schema, not the source.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// The live process environment.
///
/// Values that are not valid unicode are reported as unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// An owned copy of a set of environment variables.
///
/// Loading from a snapshot pins the values observed at capture time, so later edits to the
/// process environment cannot change what a loader sees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    vars: BTreeMap<String, String>,
}

impl Snapshot {
    /// Copy `keys` out of `source`. Keys the source does not have stay absent.
    pub fn capture<'a, S, I>(source: &S, keys: I) -> Self
    where
        S: EnvSource + ?Sized,
        I: IntoIterator<Item = &'a str>,
    {
        let vars = keys
            .into_iter()
            .filter_map(|key| source.var(key).map(|value| (key.to_owned(), value)))
            .collect();
        Self { vars }
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Snapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvSource for Snapshot {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}
