pub mod config;
pub mod pipeline;

use tracing_subscriber::EnvFilter;

use config::RunConfig;
use pipeline::processor::{build_processor, ProcessingError, ProcessingOutcome};

/// Install the global fmt subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Extract every score record from `config.document` and write the enabled outputs.
pub fn run(config: &RunConfig) -> Result<ProcessingOutcome, ProcessingError> {
    tracing::info!(
        document = %config.document.display(),
        "{} starting v{}",
        config::APP_NAME,
        config::APP_VERSION
    );

    let outcome = build_processor(config).process()?;

    if let Some(path) = &config.summary {
        outcome.write_summary(path)?;
        tracing::info!(path = %path.display(), "Wrote run summary");
    }

    Ok(outcome)
}
