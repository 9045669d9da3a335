//! Structured validation failures.
//!
//! Validation never stops at the first problem. Every check that fails records a [`Failure`] in a
//! [`FailureCollector`], and the caller decides afterwards whether the collected failures abort the
//! pipeline.

use std::fmt;

use serde::Serialize;
use snafu::Snafu;

/// A single configuration problem.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Failure {
    pub message: String,

    /// The configuration property the failure is about, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_property: Option<String>,

    /// A hint on how to fix the problem.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrective_action: Option<String>,
}

impl Failure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            config_property: None,
            corrective_action: None,
        }
    }

    pub fn with_config_property(&mut self, property: impl Into<String>) -> &mut Self {
        self.config_property = Some(property.into());
        self
    }

}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.config_property {
            Some(property) => write!(f, "{property}: {}", self.message)?,
            None => write!(f, "{}", self.message)?,
        }
        if let Some(action) = &self.corrective_action {
            write!(f, " ({action})")?;
        }
        Ok(())
    }
}

/// Aggregates failures without interrupting control flow.
pub trait FailureCollector {
    /// Records a new failure and returns it so the caller can attach a property.
    fn add_failure(
        &mut self,
        message: String,
        corrective_action: Option<String>,
    ) -> &mut Failure;
}

/// Returned by [`FailureCollection::into_result`] when any failure was recorded.
#[derive(Debug, Snafu)]
#[snafu(display("Configuration is invalid:{}", ListFailures(failures)))]
pub struct ValidationError {
    pub failures: Vec<Failure>,
}

struct ListFailures<'a>(&'a [Failure]);

impl fmt::Display for ListFailures<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for failure in self.0 {
            write!(f, "\n  x {failure}")?;
        }
        Ok(())
    }
}

/// In-memory [`FailureCollector`].
#[derive(Clone, Debug, Default)]
pub struct FailureCollection {
    failures: Vec<Failure>,
}

impl FailureCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// All failures recorded so far, in order.
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    pub fn into_failures(self) -> Vec<Failure> {
        self.failures
    }

    /// Turns the collected failures into an error, if there are any.
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                failures: self.failures,
            })
        }
    }
}

impl FailureCollector for FailureCollection {
    fn add_failure(
        &mut self,
        message: String,
        corrective_action: Option<String>,
    ) -> &mut Failure {
        let mut failure = Failure::new(message);
        failure.corrective_action = corrective_action;
        self.failures.push(failure);
        let last = self.failures.len() - 1;
        &mut self.failures[last]
    }
}
