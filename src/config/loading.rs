use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::de::DeserializeOwned;
use snafu::{ResultExt, Snafu};

use super::{Format, NlpConfig, format};
use crate::{internal_events::ConfigurationFileLoadError, schema};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum LoadError {
    #[snafu(display("Could not read {}: {}", path.display(), source))]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display(
        "Could not determine the format of {}, expected a .toml, .json, .yaml or .yml file",
        path.display()
    ))]
    UnknownFormat { path: PathBuf },

    #[snafu(display("Could not parse {} data: {}", format, errors.join(", ")))]
    Parse { format: Format, errors: Vec<String> },
}

impl LoadError {
    /// Whether the error comes from the file system rather than from the content.
    pub const fn is_io(&self) -> bool {
        matches!(self, LoadError::Read { .. })
    }
}

/// Deserializes `content` written in `format`.
pub fn load_from_str<T: DeserializeOwned>(content: &str, format: Format) -> Result<T, LoadError> {
    format::deserialize(content, format).map_err(|errors| LoadError::Parse { format, errors })
}

/// Reads and deserializes a file, picking the format from its extension.
pub fn load_from_path<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let result = Format::from_path(path)
        .map_err(|path| LoadError::UnknownFormat {
            path: path.to_path_buf(),
        })
        .and_then(|format| {
            let content = fs::read_to_string(path).context(ReadSnafu { path })?;
            load_from_str(&content, format)
        });

    match &result {
        Ok(_) => debug!(message = "Loaded configuration file.", path = %path.display()),
        Err(error) => emit!(ConfigurationFileLoadError { path, error }),
    }
    result
}

pub fn load_config(path: &Path) -> Result<NlpConfig, LoadError> {
    load_from_path(path)
}

pub fn load_schema(path: &Path) -> Result<schema::Definition, LoadError> {
    load_from_path(path)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use indoc::indoc;
    use similar_asserts::assert_eq;

    use super::*;

    #[test]
    fn loads_config_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(
            indoc! {r#"
                sourceField = "text"
                errorHandling = "skip"
            "#}
            .as_bytes(),
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.source_field(), "text");
    }

    #[test]
    fn loads_schema_from_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(br#"{ "fields": [{ "name": "text", "type": "string" }] }"#)
            .unwrap();

        let schema = load_schema(file.path()).unwrap();
        assert!(schema.has_field("text"));
    }

    #[test]
    fn unknown_extension() {
        let file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
        let error = load_config(file.path()).unwrap_err();
        assert!(matches!(error, LoadError::UnknownFormat { .. }));
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let error = load_config(&dir.path().join("absent.toml")).unwrap_err();
        assert!(error.is_io());
    }

    #[test]
    fn parse_errors_name_the_format() {
        let error = load_from_str::<NlpConfig>("sourceField = ", Format::Toml).unwrap_err();
        assert!(error.to_string().starts_with("Could not parse toml data: "));
    }
}
