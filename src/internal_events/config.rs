use std::path::Path;

use metrics::counter;

use super::{InternalEvent, error_stage, error_type};

#[derive(Debug)]
pub struct ConfigurationFailureRecorded<'a> {
    pub property: &'static str,
    pub message: &'a str,
}

impl InternalEvent for ConfigurationFailureRecorded<'_> {
    fn emit(self) {
        warn!(
            message = "Configuration failure recorded.",
            property = self.property,
            error = %self.message,
            error_type = error_type::CONFIGURATION_FAILED,
            stage = error_stage::VALIDATION,
        );
        counter!(
            "component_errors_total",
            "error_type" => error_type::CONFIGURATION_FAILED,
            "stage" => error_stage::VALIDATION,
            "property" => self.property,
        )
        .increment(1);
    }
}

#[derive(Debug)]
pub struct LateBoundPropertySkipped<'a> {
    pub property: &'static str,
    pub raw: &'a str,
}

impl InternalEvent for LateBoundPropertySkipped<'_> {
    fn emit(self) {
        debug!(
            message = "Skipping validation of unresolved property.",
            property = self.property,
            raw = %self.raw,
        );
    }
}

#[derive(Debug)]
pub struct ConfigurationValidated<'a> {
    pub source_field: &'a str,
    pub failures: usize,
}

impl InternalEvent for ConfigurationValidated<'_> {
    fn emit(self) {
        if self.failures == 0 {
            debug!(
                message = "Configuration is valid.",
                source_field = %self.source_field,
            );
        } else {
            info!(
                message = "Configuration has failures.",
                source_field = %self.source_field,
                failures = self.failures,
            );
        }
    }
}

#[derive(Debug)]
pub struct ConfigurationResolved<'a> {
    pub property: &'static str,
    pub value: &'a str,
}

impl InternalEvent for ConfigurationResolved<'_> {
    fn emit(self) {
        trace!(
            message = "Resolved late-bound property.",
            property = self.property,
            value = %self.value,
        );
    }
}

#[derive(Debug)]
pub struct ConfigurationFileLoadError<'a> {
    pub path: &'a Path,
    pub error: &'a crate::config::loading::LoadError,
}

impl InternalEvent for ConfigurationFileLoadError<'_> {
    fn emit(self) {
        error!(
            message = "Failed to load configuration file.",
            path = %self.path.display(),
            error = %self.error,
            error_type = error_type::READER_FAILED,
            stage = error_stage::LOADING,
        );
        counter!(
            "component_errors_total",
            "error_type" => error_type::READER_FAILED,
            "stage" => error_stage::LOADING,
        )
        .increment(1);
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    use crate::{
        config::{NlpConfig, PROPERTY_SOURCE_FIELD},
        schema::Definition,
        validation::FailureCollection,
    };

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failure_events_name_the_property() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .with_writer(move || writer.clone())
            .finish();

        let config = NlpConfig::new("text", None, None, "skip", None);
        tracing::subscriber::with_default(subscriber, || {
            config.validate(&Definition::empty(), &mut FailureCollection::new());
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Configuration failure recorded."), "{output}");
        assert!(output.contains(PROPERTY_SOURCE_FIELD), "{output}");
    }
}
