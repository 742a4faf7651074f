//! Logging initialization for the docker-format CLI.
//!
//! Configures `tracing-subscriber` from the `[general]` section of
//! `DockerFormatConfig`. Logs always go to stderr so that `enrich`
//! can use stdout for NDJSON output.

use anyhow::{Context, Result, bail};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use docker_format_core::config::GeneralConfig;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Initialize the global tracing subscriber.
///
/// Must be called once, before any tracing macros are used.
/// `RUST_LOG` takes precedence over `config.log_level`.
pub fn init_tracing(config: &GeneralConfig) -> Result<()> {
    let output = stderr_layer(&config.log_format)?;

    tracing_subscriber::registry()
        .with(output)
        .with(level_filter(&config.log_level))
        .try_init()
        .with_context(|| {
            format!(
                "failed to initialize {} tracing subscriber",
                config.log_format
            )
        })
}

/// `"json"` for machine-parseable lines, `"pretty"` for human-readable output.
fn stderr_layer(format: &str) -> Result<BoxedLayer> {
    let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    Ok(match format {
        "json" => layer.json().boxed(),
        "pretty" => layer.pretty().boxed(),
        other => bail!("unknown log format '{other}', expected 'json' or 'pretty'"),
    })
}

fn level_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}
