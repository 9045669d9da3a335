use std::{io::IsTerminal, path::PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::get_version;

#[derive(Parser, Debug)]
#[command(name = "nlp-transform", rename_all = "kebab-case")]
pub struct Opts {
    #[command(flatten)]
    pub root: RootOpts,

    #[command(subcommand)]
    pub sub_command: SubCommand,
}

impl Opts {
    pub fn get_matches() -> Self {
        use clap::{CommandFactory, FromArgMatches};

        let matches = Opts::command().version(get_version()).get_matches();
        match Opts::from_arg_matches(&matches) {
            Ok(opts) => opts,
            Err(error) => error.exit(),
        }
    }

    pub const fn log_level(&self) -> &'static str {
        // `validate` prints its own report, so it is one notch quieter by default.
        let (quiet_level, verbose_level) = if self.root.verbose == 0 {
            (self.root.quiet.saturating_add(1), self.root.verbose)
        } else {
            (self.root.quiet, self.root.verbose - 1)
        };
        match quiet_level {
            0 => match verbose_level {
                0 => "info",
                1 => "debug",
                _ => "trace",
            },
            1 => "warn",
            2 => "error",
            _ => "off",
        }
    }
}

#[derive(Args, Debug)]
pub struct RootOpts {
    /// Enable more detailed internal logging. Repeat to increase level.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce detail of internal logging. Repeat to reduce further.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Set the logging format.
    #[arg(long, default_value = "text", env = "NLP_TRANSFORM_LOG_FORMAT", global = true)]
    pub log_format: LogFormat,

    /// Control when ANSI terminal formatting is used.
    #[arg(long, default_value = "auto", env = "NLP_TRANSFORM_COLOR", global = true)]
    pub color: Color,
}

#[derive(Subcommand, Debug)]
#[command(rename_all = "kebab-case")]
pub enum SubCommand {
    /// Validate a transform configuration against an input schema, then exit.
    Validate(crate::validate::Opts),
}

#[derive(ValueEnum, Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Auto,
    Always,
    Never,
}

impl Color {
    pub fn use_color(self) -> bool {
        match self {
            Color::Auto => std::io::stderr().is_terminal(),
            Color::Always => true,
            Color::Never => false,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Parses a `KEY=VALUE` runtime argument.
pub fn parse_var(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("invalid KEY=VALUE argument: `{s}`"))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use similar_asserts::assert_eq;

    use super::*;

    #[test]
    fn verify_command() {
        Opts::command().debug_assert();
    }

    #[test]
    fn parses_validate() {
        let opts = Opts::try_parse_from([
            "nlp-transform",
            "-v",
            "validate",
            "--config",
            "nlp.toml",
            "--schema",
            "schema.json",
            "--var",
            "field=text",
        ])
        .unwrap();

        assert_eq!(opts.root.verbose, 1);
        assert_eq!(opts.log_level(), "info");
        let SubCommand::Validate(validate) = opts.sub_command;
        assert_eq!(validate.config, PathBuf::from("nlp.toml"));
        assert_eq!(validate.vars, vec![("field".to_string(), "text".to_string())]);
    }

    #[test]
    fn default_log_level_is_warn() {
        let opts = Opts::try_parse_from([
            "nlp-transform",
            "validate",
            "-c",
            "nlp.toml",
            "-s",
            "schema.json",
        ])
        .unwrap();
        assert_eq!(opts.log_level(), "warn");
        assert_eq!(opts.root.log_format, LogFormat::Text);
    }

    #[test]
    fn var_parsing() {
        assert_eq!(
            parse_var("a=b=c"),
            Ok(("a".to_string(), "b=c".to_string()))
        );
        assert_eq!(parse_var("empty="), Ok(("empty".to_string(), String::new())));
        assert!(parse_var("=x").is_err());
        assert!(parse_var("novalue").is_err());
    }
}
