//! Scheduled queue maintenance runner.
//!
//! Intended to be invoked periodically (e.g. every few minutes from
//! cron). Each run ingests recent channel messages, broadcasts overdue
//! alerts, and, at the configured local hours, sends the daily summary
//! and purges old dedup markers. A failed run posts a notice to the
//! error channel and exits non-zero so the scheduler records it.

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use chrono::{Datelike, Timelike, Weekday};
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use mockable::{Clock, DefaultClock};
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rota::config::RuntimeConfig;
use rota::queue::adapters::logging::LogNotifier;
use rota::queue::adapters::sqlite::SqliteTaskStore;
use rota::queue::ports::{Notifier, TaskStoreError};
use rota::queue::services::{EngineError, TaskEngine};

/// Local hour of the weekly marker purge.
const PURGE_HOUR: u32 = 2;

#[derive(Debug, Error)]
enum RunError {
    #[error("failed to create database directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("store error: {0}")]
    Store(#[from] TaskStoreError),
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            error!(error = %err, "failed to build runtime");
            return ExitCode::FAILURE;
        }
    };
    runtime.block_on(run_once())
}

async fn run_once() -> ExitCode {
    let config = match RuntimeConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "configuration invalid");
            return ExitCode::FAILURE;
        }
    };

    let notifier = Arc::new(LogNotifier::new());
    match run(&config, Arc::clone(&notifier)).await {
        Ok(()) => {
            info!("run complete");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "run failed");
            let notice = format!("❌ Queue runner failed: {err}");
            if !notifier.send(config.error_channel(), &notice).await {
                error!("failure notice delivery failed");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &RuntimeConfig, notifier: Arc<LogNotifier>) -> Result<(), RunError> {
    if let Some(parent) = Path::new(config.database_path()).parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let manager = ConnectionManager::<SqliteConnection>::new(config.database_path());
    let pool = Pool::builder().build(manager)?;
    let store = SqliteTaskStore::new(pool);
    store.initialize().await?;

    let clock = Arc::new(DefaultClock);
    let now_local = clock.local();
    let engine = TaskEngine::new(Arc::new(store), notifier, clock);

    for channel in config.channels() {
        let processed = engine.ingest_channel(channel, config.fetch_window()).await?;
        info!(channel = %channel, processed, "channel ingested");
    }

    if engine.send_overdue_alert(config.channels()).await? {
        info!("overdue alert broadcast");
    }

    if now_local.hour() == config.daily_summary_hour() {
        engine.send_daily_summary(config.channels()).await?;
        info!("daily summary broadcast");
    }

    if now_local.weekday() == Weekday::Mon && now_local.hour() == PURGE_HOUR {
        let deleted = engine.purge_processed_markers(config.retention()).await?;
        info!(deleted, "weekly marker purge complete");
    }

    Ok(())
}
