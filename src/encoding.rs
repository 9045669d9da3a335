//! Text encodings understood by the natural-language API.

use std::{fmt, str::FromStr, sync::LazyLock};

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::config::ConfigurationError;

/// The encoding of the source text.
///
/// The API reports the beginning offsets of tokens and mentions in units of this encoding, so
/// languages that natively use a different encoding may need it set explicitly.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum EncodingType {
    /// No encoding information; offsets are not reported.
    #[default]
    None,

    /// Offsets are counted in UTF-8 code units.
    Utf8,

    /// Offsets are counted in UTF-16 code units.
    Utf16,

    /// Offsets are counted in UTF-32 code units.
    Utf32,
}

static BY_NAME: LazyLock<IndexMap<&'static str, EncodingType>> = LazyLock::new(|| {
    EncodingType::ALL
        .iter()
        .map(|encoding| (encoding.as_str(), *encoding))
        .collect()
});

impl EncodingType {
    /// Every supported encoding, in the order they are listed to users.
    pub const ALL: [EncodingType; 4] = [
        EncodingType::None,
        EncodingType::Utf8,
        EncodingType::Utf16,
        EncodingType::Utf32,
    ];

    /// Human readable list of the accepted tokens.
    pub const SUPPORTED: &'static str = "NONE, UTF8, UTF16, UTF32";

    /// The canonical token for this encoding.
    pub const fn as_str(self) -> &'static str {
        match self {
            EncodingType::None => "NONE",
            EncodingType::Utf8 => "UTF8",
            EncodingType::Utf16 => "UTF16",
            EncodingType::Utf32 => "UTF32",
        }
    }

    /// Looks up an encoding by its exact, case-sensitive token.
    pub fn lookup(value: &str) -> Option<Self> {
        BY_NAME.get(value).copied()
    }

    /// Decodes an optional raw value, treating absence as [`EncodingType::None`].
    pub fn decode(value: Option<&str>) -> Result<Self, ConfigurationError> {
        match value {
            None => Ok(EncodingType::None),
            Some(value) => value.parse(),
        }
    }
}

impl fmt::Display for EncodingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EncodingType {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| ConfigurationError::UnsupportedEncoding {
            value: s.to_owned(),
        })
    }
}

impl Serialize for EncodingType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EncodingType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(de::Error::custom)
    }
}
