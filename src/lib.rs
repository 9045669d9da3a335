#![deny(unreachable_pub)]
#![deny(unused_extern_crates)]
#![deny(unused_allocation)]
#![deny(unused_assignments)]
#![deny(unused_comparisons)]
#![allow(clippy::module_name_repetitions)]

//! Configuration binding and validation for the NLP transform.
//!
//! The transform forwards one text field of each input record to a natural-language API. This
//! crate owns the configuration surface of that transform: the declared properties, their
//! validation against the input record schema, and the typed accessors used by the execution
//! engine once the pipeline has been validated.

#[macro_use]
extern crate tracing;

#[macro_use]
pub mod internal_events;

pub mod cli;
pub mod config;
pub mod encoding;
pub mod error_handling;
pub mod schema;
pub mod trace;
pub mod validate;
pub mod validation;

pub use config::NlpConfig;
pub use encoding::EncodingType;
pub use error_handling::ErrorHandling;

/// Returns the crate version as reported by `--version`.
pub fn get_version() -> String {
    format!("{} ({})", env!("CARGO_PKG_VERSION"), built_target())
}

const fn built_target() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}
