use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::{NonBlockingBuilder, WorkerGuard};
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::BenchmarkConfig;

/// Keeps the telemetry writer alive. Events reach disk only once the guard
/// is finished or dropped.
pub struct TelemetryGuard {
    worker: WorkerGuard,
    path: PathBuf,
}

impl TelemetryGuard {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flushes pending events and returns the log path.
    pub fn finish(self) -> PathBuf {
        drop(self.worker);
        self.path
    }
}

/// Installs the global JSON subscriber writing `telemetry.jsonl` into the run
/// directory. `RUST_LOG` overrides the configured level.
pub fn init_telemetry(config: &BenchmarkConfig) -> Result<Option<TelemetryGuard>> {
    if !config.telemetry.enabled {
        return Ok(None);
    }

    let paths = config.output_paths();
    fs::create_dir_all(&paths.dir)
        .with_context(|| format!("creating run directory {}", paths.dir.display()))?;
    let file = File::create(&paths.telemetry)
        .with_context(|| format!("creating telemetry file {}", paths.telemetry.display()))?;

    let (writer, worker) = NonBlockingBuilder::default().lossy(false).finish(file);
    let level = config.telemetry.level()?;
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .json()
        .with_current_span(false)
        .with_writer(writer)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("installing the telemetry subscriber")?;

    Ok(Some(TelemetryGuard {
        worker,
        path: paths.telemetry,
    }))
}
