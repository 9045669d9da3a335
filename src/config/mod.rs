//! Configuration of the NLP transform.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use snafu::Snafu;

use crate::{
    encoding::EncodingType,
    error_handling::ErrorHandling,
    internal_events::{
        ConfigurationFailureRecorded, ConfigurationResolved, ConfigurationValidated,
        LateBoundPropertySkipped,
    },
    schema,
    validation::FailureCollector,
};

pub mod format;
pub mod loading;
mod property;
mod vars;

pub use format::{Format, deserialize, serialize};
pub use property::Property;
pub use vars::{Interpolated, contains_macro, interpolate};

/// Credential path value asking for the ambient credentials of the environment.
pub const AUTO_DETECT: &str = "auto-detect";

pub const PROPERTY_SOURCE_FIELD: &str = "sourceField";
pub const PROPERTY_ENCODING: &str = "encoding";
pub const PROPERTY_LANGUAGE_CODE: &str = "languageCode";
pub const PROPERTY_ERROR_HANDLING: &str = "errorHandling";
pub const PROPERTY_SERVICE_ACCOUNT_FILE_PATH: &str = "serviceFilePath";

/// Raised when a stored value cannot be decoded into its typed form.
#[derive(Clone, Debug, Eq, PartialEq, Snafu)]
pub enum ConfigurationError {
    #[snafu(display(
        "Type of encoding specified '{}' is not supported. Supported values are {}.",
        value,
        EncodingType::SUPPORTED
    ))]
    UnsupportedEncoding { value: String },

    #[snafu(display("Unsupported value for '{}': '{}'", PROPERTY_ERROR_HANDLING, value))]
    UnsupportedErrorHandling { value: String },

    #[snafu(display("Property '{}' contains macros that have not been resolved yet", property))]
    Unresolved { property: &'static str },
}

/// Configuration for the NLP transform.
///
/// Values are stored as written. Decoding happens in the accessors, so a configuration can be
/// built from raw input and validated as a whole before anything reads it.
#[derive(Clone, Debug, Deserialize, Serialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NlpConfig {
    /// Field which contains the input text.
    source_field: Property,

    /// Text encoding.
    ///
    /// The API reports beginning offsets for tokens and mentions, and languages that natively use
    /// different encodings may access offsets differently, so setting it is recommended.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    encoding: Option<Property>,

    /// Code of the language of the text, for example `en` or `ja`.
    ///
    /// The API detects the language when this is not set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    language_code: Option<Property>,

    /// Error handling strategy used when the API call for a record fails.
    error_handling: String,

    /// Path on the local file system of the service account key used for authorization.
    ///
    /// Can be set to `auto-detect` to use the ambient credentials of the environment. Otherwise
    /// the file must be present on every node that runs the pipeline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    service_file_path: Option<Property>,
}

impl NlpConfig {
    pub fn new(
        source_field: impl Into<String>,
        encoding: Option<String>,
        language_code: Option<String>,
        error_handling: impl Into<String>,
        service_file_path: Option<String>,
    ) -> Self {
        Self {
            source_field: Property::new(source_field),
            encoding: encoding.map(Property::new),
            language_code: language_code.map(Property::new),
            error_handling: error_handling.into(),
            service_file_path: service_file_path.map(Property::new),
        }
    }

    pub fn source_field(&self) -> &str {
        self.source_field.raw()
    }

    /// The configured encoding, [`EncodingType::None`] when unset.
    pub fn encoding_type(&self) -> Result<EncodingType, ConfigurationError> {
        match &self.encoding {
            None => Ok(EncodingType::None),
            Some(Property::LateBound(_)) => Err(ConfigurationError::Unresolved {
                property: PROPERTY_ENCODING,
            }),
            Some(Property::Resolved(value)) => EncodingType::decode(Some(value.as_str())),
        }
    }

    /// The configured language code. `None` lets the API detect the language.
    pub fn language_code(&self) -> Option<&str> {
        self.language_code.as_ref().and_then(Property::resolved)
    }

    pub fn error_handling(&self) -> Result<ErrorHandling, ConfigurationError> {
        self.error_handling.parse()
    }

    /// The explicit credentials file, or `None` to use the ambient credentials.
    pub fn service_account_file_path(&self) -> Option<&str> {
        self.service_file_path
            .as_ref()
            .and_then(Property::resolved)
            .filter(|path| !path.is_empty() && *path != AUTO_DETECT)
    }

    /// Whether the given property still holds unresolved macros.
    pub fn is_late_bound(&self, property: &str) -> bool {
        let value = match property {
            PROPERTY_SOURCE_FIELD => Some(&self.source_field),
            PROPERTY_ENCODING => self.encoding.as_ref(),
            PROPERTY_LANGUAGE_CODE => self.language_code.as_ref(),
            PROPERTY_SERVICE_ACCOUNT_FILE_PATH => self.service_file_path.as_ref(),
            _ => None,
        };
        value.is_some_and(Property::is_late_bound)
    }

    /// Checks the configuration against the input schema.
    ///
    /// Every problem is reported to `collector`; nothing is returned and nothing fails, so all
    /// configuration problems can be shown at once. Late-bound properties are skipped.
    pub fn validate<C>(&self, input_schema: &schema::Definition, collector: &mut C)
    where
        C: FailureCollector + ?Sized,
    {
        let mut failures = Vec::new();

        match &self.source_field {
            Property::LateBound(raw) => emit!(LateBoundPropertySkipped {
                property: PROPERTY_SOURCE_FIELD,
                raw,
            }),
            Property::Resolved(name) => {
                if !input_schema.has_field(name) {
                    failures.push((
                        PROPERTY_SOURCE_FIELD,
                        format!("Field '{name}' does not exist in input schema"),
                    ));
                }
            }
        }

        if let Err(error) = self.error_handling() {
            failures.push((PROPERTY_ERROR_HANDLING, error.to_string()));
        }

        match &self.encoding {
            Some(Property::LateBound(raw)) => emit!(LateBoundPropertySkipped {
                property: PROPERTY_ENCODING,
                raw,
            }),
            _ => {
                if let Err(error) = self.encoding_type() {
                    failures.push((PROPERTY_ENCODING, error.to_string()));
                }
            }
        }

        emit!(ConfigurationValidated {
            source_field: self.source_field(),
            failures: failures.len(),
        });

        for (property, message) in failures {
            emit!(ConfigurationFailureRecorded {
                property,
                message: &message,
            });
            collector
                .add_failure(message, None)
                .with_config_property(property);
        }
    }

    /// Returns a copy with macros substituted from `vars`.
    ///
    /// Properties whose macros are not all known stay late-bound. Macros that demand a value with
    /// `${name:?message}` and have none are reported as errors.
    pub fn resolve(&self, vars: &HashMap<String, String>) -> Result<Self, Vec<String>> {
        let mut errors = Vec::new();

        let source_field = resolve_property(
            PROPERTY_SOURCE_FIELD,
            &self.source_field,
            vars,
            &mut errors,
        );
        let encoding = self
            .encoding
            .as_ref()
            .map(|value| resolve_property(PROPERTY_ENCODING, value, vars, &mut errors));
        let language_code = self
            .language_code
            .as_ref()
            .map(|value| resolve_property(PROPERTY_LANGUAGE_CODE, value, vars, &mut errors));
        let service_file_path = self.service_file_path.as_ref().map(|value| {
            resolve_property(
                PROPERTY_SERVICE_ACCOUNT_FILE_PATH,
                value,
                vars,
                &mut errors,
            )
        });

        if errors.is_empty() {
            Ok(Self {
                source_field,
                encoding,
                language_code,
                error_handling: self.error_handling.clone(),
                service_file_path,
            })
        } else {
            Err(errors)
        }
    }
}

fn resolve_property(
    name: &'static str,
    value: &Property,
    vars: &HashMap<String, String>,
    errors: &mut Vec<String>,
) -> Property {
    match value.resolve(vars) {
        Ok(resolved) => {
            if value.is_late_bound() {
                if let Some(text) = resolved.resolved() {
                    emit!(ConfigurationResolved {
                        property: name,
                        value: text,
                    });
                }
            }
            resolved
        }
        Err(errs) => {
            errors.extend(errs.into_iter().map(|error| format!("{name}: {error}")));
            value.clone()
        }
    }
}
