use serde::{Deserialize, Serialize};

/// The type of a field in an input record.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, Eq, PartialEq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    String,
    Bytes,
    Int,
    Long,
    Float,
    Double,
    Boolean,
    Array,
    Record,
    Map,
}

/// A named field of an input record.
#[derive(Clone, Debug, Deserialize, Serialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Field {
    /// The field name, unique within its [`Definition`](super::Definition).
    pub name: String,

    /// The type of the field's value.
    #[serde(rename = "type")]
    pub kind: Kind,

    /// Whether the field may be missing from a record.
    #[serde(default)]
    pub nullable: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, kind: Kind) -> Self {
        Self {
            name: name.into(),
            kind,
            nullable: false,
        }
    }

    pub fn nullable(name: impl Into<String>, kind: Kind) -> Self {
        Self {
            nullable: true,
            ..Self::new(name, kind)
        }
    }
}
