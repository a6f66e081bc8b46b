use std::env;
use std::io;
use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

static LOGGING: OnceLock<()> = OnceLock::new();

/// Install the global stderr logging subscriber. The first call wins;
/// subsequent calls are no-ops.
pub fn init_logging() {
    LOGGING.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(build_filter())
            .with_writer(io::stderr)
            .with_ansi(false)
            .try_init();
    });
}

fn build_filter() -> EnvFilter {
    if let Ok(spec) = env::var("AZSNAP_LOG") {
        if !spec.trim().is_empty() {
            if let Ok(filter) = EnvFilter::try_new(spec) {
                return filter;
            }
        }
    }

    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}
