//! Internal events emitted while binding and validating configuration.
//!
//! Each event is a plain struct that knows how to log itself and update its metrics, so call
//! sites stay a single `emit!` line.

mod config;

pub use self::config::*;

pub trait InternalEvent: Sized {
    fn emit(self);
}

pub fn emit(event: impl InternalEvent) {
    event.emit();
}

pub mod error_type {
    /// A configuration value could not be decoded or did not match the schema.
    pub const CONFIGURATION_FAILED: &str = "configuration_failed";
    /// A configuration file could not be read or parsed.
    pub const READER_FAILED: &str = "reader_failed";
}

pub mod error_stage {
    pub const VALIDATION: &str = "validation";
    pub const LOADING: &str = "loading";
}

#[macro_export]
macro_rules! emit {
    ($event:expr) => {
        $crate::internal_events::emit($event)
    };
}
