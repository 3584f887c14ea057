use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::config::LogConfig;

/// Console logging filtered by `RUST_LOG` (falling back to the configured
/// level), plus an optional daily-rolling file layer.
pub fn initialize_telemetry(config: &LogConfig) -> anyhow::Result<()> {
    let console = tracing_subscriber::fmt::layer().with_filter(
        EnvFilter::builder()
            .with_default_directive(config.level().parse()?)
            .from_env_lossy(),
    );

    let file = if *config.file_enable() {
        let appender = RollingFileAppender::new(
            tracing_appender::rolling::Rotation::DAILY,
            config.file_path(),
            config.file_prefix(),
        );
        Some(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(appender)
                .with_filter(
                    EnvFilter::builder()
                        .with_default_directive(config.level().parse()?)
                        .from_env_lossy(),
                ),
        )
    } else {
        None
    };

    Registry::default().with(console).with(file).try_init()?;
    Ok(())
}
