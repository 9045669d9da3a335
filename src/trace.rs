use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global tracing subscriber.
///
/// `levels` is an env-filter directive such as `info` or `nlp_transform=debug`. Errors from a
/// subscriber already being installed are ignored, since tests can initialize this multiple times.
pub fn init(color: bool, json: bool, levels: &str) {
    let filter = EnvFilter::try_new(levels).unwrap_or_else(|_| EnvFilter::new("info"));

    let result = if json {
        fmt()
            .with_env_filter(filter)
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
            .try_init()
    } else {
        fmt()
            .with_env_filter(filter)
            .with_ansi(color)
            .with_writer(std::io::stderr)
            .try_init()
    };

    if let Err(error) = result {
        debug!(message = "Tracing subscriber was already initialized.", %error);
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_twice_is_harmless() {
        super::init(false, false, "debug");
        super::init(false, true, "not a valid directive ===");
    }
}
