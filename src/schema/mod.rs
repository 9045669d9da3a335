//! The input record schema a transform is validated against.

mod field;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub use field::{Field, Kind};

/// The definition of an input record schema.
///
/// Fields keep the order in which they were declared, which is also the order used when the
/// schema is serialized back out.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Definition {
    fields: IndexMap<String, Field>,
}

impl Definition {
    /// Creates a definition from a list of fields. A later field replaces an earlier one with the
    /// same name.
    pub fn new(fields: impl IntoIterator<Item = Field>) -> Self {
        Self {
            fields: fields
                .into_iter()
                .map(|field| (field.name.clone(), field))
                .collect(),
        }
    }

    /// A definition without any fields.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Adds a non-nullable field.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, kind: Kind) -> Self {
        let field = Field::new(name, kind);
        self.fields.insert(field.name.clone(), field);
        self
    }

    /// Adds a nullable field.
    #[must_use]
    pub fn with_nullable_field(mut self, name: impl Into<String>, kind: Kind) -> Self {
        let field = Field::nullable(name, kind);
        self.fields.insert(field.name.clone(), field);
        self
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct DefinitionRepr {
    #[serde(default)]
    fields: Vec<Field>,
}

impl Serialize for Definition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        DefinitionRepr {
            fields: self.fields.values().cloned().collect(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Definition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        DefinitionRepr::deserialize(deserializer).map(|repr| Definition::new(repr.fields))
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use similar_asserts::assert_eq;

    use super::*;

    #[test]
    fn lookup_by_name() {
        let definition = Definition::empty()
            .with_field("text", Kind::String)
            .with_nullable_field("id", Kind::Long);

        assert!(definition.has_field("text"));
        assert!(!definition.has_field("body"));
        assert_eq!(definition.field("id"), Some(&Field::nullable("id", Kind::Long)));
        assert_eq!(definition.len(), 2);
    }

    #[test]
    fn deserializes_from_json() {
        let definition: Definition = serde_json::from_str(indoc! {r#"
            {
              "fields": [
                { "name": "id", "type": "long" },
                { "name": "text", "type": "string", "nullable": true }
              ]
            }
        "#})
        .unwrap();

        assert_eq!(
            definition,
            Definition::empty()
                .with_field("id", Kind::Long)
                .with_nullable_field("text", Kind::String)
        );
        assert_eq!(
            definition.fields().map(|f| f.name.as_str()).collect::<Vec<_>>(),
            vec!["id", "text"]
        );
    }

    #[test]
    fn rejects_unknown_kinds() {
        let result = serde_json::from_str::<Definition>(
            r#"{ "fields": [{ "name": "id", "type": "uuid" }] }"#,
        );
        assert!(result.is_err());
    }
}
