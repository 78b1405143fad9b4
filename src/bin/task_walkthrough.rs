//! Seeds sample tasks and walks a task through its lifecycle.
//!
//! Usage:
//!
//! ```text
//! task_walkthrough [limits-path]
//! ```
//!
//! The optional JSON file at `limits-path` overrides field limits, for
//! example:
//!
//! ```json
//! { "max_title_chars": 100, "max_description_chars": 500 }
//! ```
//!
//! Log verbosity follows `RUST_LOG` and defaults to `taskboard=info`.

use camino::Utf8PathBuf;
use mockable::DefaultClock;
use std::env;
use std::sync::Arc;
use taskboard::task::{
    adapters::{memory::InMemoryTaskRepository, seed::seed_sample_tasks},
    domain::TaskStatus,
    ports::TaskRepositoryError,
    services::{
        CreateTaskRequest, FieldLimitsError, TaskFieldLimits, TaskService, TaskServiceError,
    },
};
use thiserror::Error;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

const DEFAULT_LOG_FILTER: &str = "taskboard=info,task_walkthrough=info";

/// Errors that can occur during the walkthrough.
#[derive(Debug, Error)]
enum WalkthroughError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error(transparent)]
    Limits(#[from] FieldLimitsError),
    #[error("runtime init failed: {0}")]
    RuntimeInit(#[source] std::io::Error),
    #[error("seeding failed: {0}")]
    Seed(#[from] TaskRepositoryError),
    #[error(transparent)]
    Service(#[from] TaskServiceError),
}

fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .init();

    let limits = load_limits(env::args().skip(1))?;
    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(WalkthroughError::RuntimeInit)?;
    runtime.block_on(run(limits)).map_err(Into::into)
}

fn load_limits(
    mut args: impl Iterator<Item = String>,
) -> Result<TaskFieldLimits, WalkthroughError> {
    let limits = match args.next() {
        Some(path) => TaskFieldLimits::load(&Utf8PathBuf::from(path))?,
        None => TaskFieldLimits::default(),
    };
    if args.next().is_some() {
        return Err(WalkthroughError::InvalidArgs(
            "expected at most one limits path".to_owned(),
        ));
    }
    Ok(limits)
}

async fn run(limits: TaskFieldLimits) -> Result<(), WalkthroughError> {
    let repository = Arc::new(InMemoryTaskRepository::new());
    let clock = Arc::new(DefaultClock);
    seed_sample_tasks(&*repository, &*clock).await?;
    let service = TaskService::with_limits(repository, clock, limits);

    let login = service
        .create(CreateTaskRequest::new("Implement login").with_description("Authentication flow"))
        .await?;
    let tests = service.create(CreateTaskRequest::new("Write tests")).await?;

    service
        .change_status(login.id(), TaskStatus::InProgress)
        .await?;
    match service.change_status(tests.id(), TaskStatus::Done).await {
        Ok(_) => warn!(task_id = %tests.id(), "skipping straight to done was accepted"),
        Err(err) => info!(message = %err.client_message(), "transition rejected as expected"),
    }
    service.change_status(login.id(), TaskStatus::Done).await?;

    if let Err(err) = service.remove(login.id()).await {
        info!(message = %err.client_message(), "removal rejected as expected");
    }

    let matches = service.search_by_title("LOGIN").await?;
    info!(matches = matches.total, "searched titles for 'LOGIN'");

    let stats = service.statistics().await?;
    info!(
        total = stats.total,
        completion = %stats.completion_percentage_text(),
        summary = %stats.summary(),
        "walkthrough finished"
    );
    Ok(())
}
