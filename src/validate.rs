use std::{collections::HashMap, path::PathBuf};

use clap::Args;
use exitcode::ExitCode;

use crate::{
    config::loading::{self, LoadError},
    validation::{FailureCollection, FailureCollector},
};

#[derive(Args, Debug)]
#[command(rename_all = "kebab-case")]
pub struct Opts {
    /// Transform configuration file. The format is detected from the extension.
    #[arg(short, long, env = "NLP_TRANSFORM_CONFIG")]
    pub config: PathBuf,

    /// Input record schema file. The format is detected from the extension.
    #[arg(short, long, env = "NLP_TRANSFORM_SCHEMA")]
    pub schema: PathBuf,

    /// Runtime argument used to resolve `${KEY}` macros, as `KEY=VALUE`. Can be repeated.
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = crate::cli::parse_var)]
    pub vars: Vec<(String, String)>,

    /// Print failures as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Loads the configuration and schema, validates them, and prints a report.
pub fn validate(opts: &Opts) -> ExitCode {
    let config = match loading::load_config(&opts.config) {
        Ok(config) => config,
        Err(error) => return load_failed(&error),
    };
    let schema = match loading::load_schema(&opts.schema) {
        Ok(schema) => schema,
        Err(error) => return load_failed(&error),
    };

    let vars = opts.vars.iter().cloned().collect::<HashMap<_, _>>();
    let config = match config.resolve(&vars) {
        Ok(config) => config,
        Err(errors) => {
            for error in errors {
                eprintln!("x {error}");
            }
            return exitcode::CONFIG;
        }
    };

    let mut collector = FailureCollection::new();
    config.validate(&schema, &mut collector);

    if opts.json {
        match serde_json::to_string_pretty(collector.failures()) {
            Ok(report) => println!("{report}"),
            Err(error) => {
                error!(message = "Failed to serialize report.", %error);
                return exitcode::SOFTWARE;
            }
        }
    }

    match collector.into_result() {
        Ok(()) => {
            if !opts.json {
                println!("√ Configuration is valid");
            }
            exitcode::OK
        }
        Err(error) => {
            if !opts.json {
                eprintln!("{error}");
            }
            exitcode::CONFIG
        }
    }
}

fn load_failed(error: &LoadError) -> ExitCode {
    eprintln!("x {error}");
    if error.is_io() {
        exitcode::NOINPUT
    } else {
        exitcode::CONFIG
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use indoc::indoc;

    use super::*;

    fn opts(dir: &Path, config: &str, vars: Vec<(String, String)>) -> Opts {
        let config_path = dir.join("nlp.toml");
        let schema_path = dir.join("schema.json");
        fs::write(&config_path, config).unwrap();
        fs::write(
            &schema_path,
            r#"{ "fields": [{ "name": "text", "type": "string" }] }"#,
        )
        .unwrap();

        Opts {
            config: config_path,
            schema: schema_path,
            vars,
            json: false,
        }
    }

    #[test]
    fn valid_configuration() {
        let dir = tempfile::tempdir().unwrap();
        let opts = opts(
            dir.path(),
            indoc! {r#"
                sourceField = "text"
                errorHandling = "skip"
            "#},
            vec![],
        );
        assert_eq!(validate(&opts), exitcode::OK);
    }

    #[test]
    fn invalid_configuration() {
        let dir = tempfile::tempdir().unwrap();
        let opts = opts(
            dir.path(),
            indoc! {r#"
                sourceField = "body"
                errorHandling = "bogus"
            "#},
            vec![],
        );
        assert_eq!(validate(&opts), exitcode::CONFIG);
    }

    #[test]
    fn resolves_vars_before_validating() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = opts(
            dir.path(),
            indoc! {r#"
                sourceField = "${field}"
                encoding = "${encoding:-UTF8}"
                errorHandling = "skip"
            "#},
            vec![("field".into(), "body".into())],
        );
        assert_eq!(validate(&opts), exitcode::CONFIG);

        opts.vars = vec![("field".into(), "text".into())];
        opts.json = true;
        assert_eq!(validate(&opts), exitcode::OK);
    }

    #[test]
    fn missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let opts = Opts {
            config: dir.path().join("absent.toml"),
            schema: dir.path().join("absent.json"),
            vars: vec![],
            json: false,
        };
        assert_eq!(validate(&opts), exitcode::NOINPUT);
    }
}
