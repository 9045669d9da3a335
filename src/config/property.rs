use std::{collections::HashMap, fmt};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::vars;

/// A configuration value that may be bound late.
///
/// Values containing `${name}` macros are only known once the pipeline is compiled with its
/// runtime arguments. Until then they are carried verbatim as [`Property::LateBound`] and nothing
/// may try to decode them.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Property {
    Resolved(String),
    LateBound(String),
}

impl Property {
    /// Classifies a raw value by looking for macros in it.
    ///
    /// A value without macros is resolved right away, with every `$${` escape turned into `${`.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        if vars::contains_macro(&raw) {
            Property::LateBound(raw)
        } else {
            Property::Resolved(vars::unescape(&raw))
        }
    }

    pub const fn is_late_bound(&self) -> bool {
        matches!(self, Property::LateBound(_))
    }

    /// The stored value: the text with macros for a late-bound value, the final text otherwise.
    pub fn raw(&self) -> &str {
        match self {
            Property::Resolved(value) | Property::LateBound(value) => value,
        }
    }

    /// The value, or `None` while it is still late-bound.
    pub fn resolved(&self) -> Option<&str> {
        match self {
            Property::Resolved(value) => Some(value),
            Property::LateBound(_) => None,
        }
    }

    /// Substitutes macros from `vars`.
    ///
    /// The property stays late-bound, with its original text, if any macro is still unknown.
    pub fn resolve(&self, vars: &HashMap<String, String>) -> Result<Property, Vec<String>> {
        match self {
            Property::Resolved(_) => Ok(self.clone()),
            Property::LateBound(raw) => {
                let interpolated = vars::interpolate(raw, vars)?;
                if interpolated.is_resolved() {
                    Ok(Property::Resolved(interpolated.value))
                } else {
                    Ok(self.clone())
                }
            }
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw())
    }
}

impl From<&str> for Property {
    fn from(raw: &str) -> Self {
        Property::new(raw)
    }
}

impl From<String> for Property {
    fn from(raw: String) -> Self {
        Property::new(raw)
    }
}

impl Serialize for Property {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Property::Resolved(value) => serializer.serialize_str(&vars::escape(value)),
            Property::LateBound(raw) => serializer.serialize_str(raw),
        }
    }
}

impl<'de> Deserialize<'de> for Property {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Property::new)
    }
}
