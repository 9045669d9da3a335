//! What the transform does with a record whose API call failed.

use std::{collections::HashMap, fmt, str::FromStr, sync::LazyLock};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::config::ConfigurationError;

/// Error handling strategy applied when the natural-language API call for a record fails.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorHandling {
    /// Drop the record and keep processing.
    Skip,

    /// Route the record to the error output of the transform.
    SendToError,

    /// Stop the pipeline.
    FailPipeline,
}

// Keys are lowercased so lookups are case-insensitive.
static BY_VALUE: LazyLock<HashMap<String, ErrorHandling>> = LazyLock::new(|| {
    ErrorHandling::ALL
        .iter()
        .map(|strategy| (strategy.value().to_ascii_lowercase(), *strategy))
        .collect()
});

impl ErrorHandling {
    /// Every supported strategy.
    pub const ALL: [ErrorHandling; 3] = [
        ErrorHandling::Skip,
        ErrorHandling::SendToError,
        ErrorHandling::FailPipeline,
    ];

    /// The canonical configuration value of this strategy.
    pub const fn value(self) -> &'static str {
        match self {
            ErrorHandling::Skip => "skip",
            ErrorHandling::SendToError => "send-to-error",
            ErrorHandling::FailPipeline => "fail-pipeline",
        }
    }

    /// Looks up a strategy by its canonical value, ignoring case.
    pub fn lookup(value: &str) -> Option<Self> {
        BY_VALUE.get(&value.to_ascii_lowercase()).copied()
    }
}

impl fmt::Display for ErrorHandling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for ErrorHandling {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| ConfigurationError::UnsupportedErrorHandling {
            value: s.to_owned(),
        })
    }
}

impl Serialize for ErrorHandling {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.value())
    }
}

impl<'de> Deserialize<'de> for ErrorHandling {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(de::Error::custom)
    }
}
