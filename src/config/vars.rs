use std::{collections::HashMap, sync::LazyLock};

use regex::{Captures, Regex};

// Macro names allow word characters plus `.` and `-`, which commonly appear in runtime argument
// names coming from pipeline properties files.
static MACRO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        \$\$\{|
        \$\{([[:word:].-]+)(?:(:-|:\?)([^}]*))?\}",
    )
    .expect("macro pattern is valid")
});

/// The outcome of substituting macros in a single value.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Interpolated {
    pub value: String,

    /// Names of macros for which no value was available. They are left in `value` untouched.
    pub unresolved: Vec<String>,
}

impl Interpolated {
    pub fn is_resolved(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Whether `input` contains at least one macro that still needs a value.
pub fn contains_macro(input: &str) -> bool {
    MACRO
        .captures_iter(input)
        .any(|caps| caps.get(1).is_some())
}

/// Turns every `$${` escape in a value without macros into a literal `${`.
pub(crate) fn unescape(input: &str) -> String {
    input.replace("$${", "${")
}

/// Escapes every literal `${` so the value is read back as text and not as a macro.
pub(crate) fn escape(input: &str) -> String {
    input.replace("${", "$${")
}

/// Substitutes `${name}` macros in `input` with values from `vars`.
///
/// - `${name:-default}` falls back to `default` when `name` is missing or empty.
/// - `${name:?message}` is an error when `name` is missing or empty.
/// - `$${` is a literal `${`.
pub fn interpolate(
    input: &str,
    vars: &HashMap<String, String>,
) -> Result<Interpolated, Vec<String>> {
    let mut errors = Vec::new();
    let mut unresolved = Vec::new();

    let value = MACRO
        .replace_all(input, |caps: &Captures<'_>| {
            let Some(name) = caps.get(1).map(|m| m.as_str()) else {
                return "${".to_string();
            };
            let flags = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
            let def_or_err = caps.get(3).map(|m| m.as_str()).unwrap_or_default();
            let val = vars.get(name).map(String::as_str);

            match flags {
                ":-" => match val {
                    Some(v) if !v.is_empty() => v.to_string(),
                    _ => def_or_err.to_string(),
                },
                ":?" => match val {
                    Some(v) if !v.is_empty() => v.to_string(),
                    _ => {
                        errors.push(format!(
                            "Non-empty macro value required. name = {name:?}, error = {def_or_err:?}"
                        ));
                        String::new()
                    }
                },
                _ => match val {
                    Some(v) => v.to_string(),
                    None => {
                        unresolved.push(name.to_string());
                        caps[0].to_string()
                    }
                },
            }
        })
        .into_owned();

    if errors.is_empty() {
        Ok(Interpolated { value, unresolved })
    } else {
        Err(errors)
    }
}
