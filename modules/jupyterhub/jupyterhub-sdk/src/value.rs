//! Host values.
//!
//! The orchestrator evaluates configuration lazily, so every attribute it
//! hands to a plugin is in one of three states: explicitly null, not known
//! yet, or known.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer};

/// Raw attribute values keyed by attribute name.
pub type RawConfig = BTreeMap<String, ConfigValue<String>>;

/// A tri-state attribute value supplied by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigValue<T> {
    /// Not set by the practitioner.
    #[default]
    Null,
    /// Set, but depends on something the orchestrator has not evaluated yet.
    Unknown,
    /// Set to a concrete value.
    Known(T),
}

impl<T> ConfigValue<T> {
    /// Create a `Known` value.
    #[must_use]
    pub fn known(value: impl Into<T>) -> Self {
        Self::Known(value.into())
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl<T: fmt::Display> ConfigValue<T> {
    /// Render the value the way the host prints it.
    ///
    /// Known values are wrapped in one pair of double quotes and nothing
    /// inside is escaped, so stripping the first and last character gives
    /// the value back unchanged. Null and unknown values print as `<null>`
    /// and `<unknown>`.
    #[must_use]
    pub fn display_form(&self) -> String {
        match self {
            Self::Null => "<null>".to_owned(),
            Self::Unknown => "<unknown>".to_owned(),
            Self::Known(v) => format!("\"{v}\""),
        }
    }
}

impl<T> From<Option<T>> for ConfigValue<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Self::Known)
    }
}

/// Config files cannot express `Unknown`: a missing or `null` key is `Null`.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for ConfigValue<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Self::from)
    }
}
