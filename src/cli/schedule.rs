use std::sync::Arc;

use anyhow::Result;
use sqlx::SqlitePool;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::cli::generate::GenerateArgs;
use crate::config::Config;

/// Run the recurring generation trigger in-process until interrupted.
pub async fn run(config: Config, pool: SqlitePool) -> Result<()> {
    let mut sched = JobScheduler::new().await?;
    let cron = config.scheduler.cron.clone();
    let config = Arc::new(config);

    let job_config = config.clone();
    let job_pool = pool.clone();

    sched
        .add(Job::new_async(cron.as_str(), move |_uuid, _lock| {
            let config = job_config.clone();
            let pool = job_pool.clone();

            Box::pin(async move {
                if let Err(err) =
                    crate::cli::generate::run(&config, &pool, GenerateArgs::default()).await
                {
                    tracing::error!(err = %err, "scheduled meal plan generation failed");
                }
            })
        })?)
        .await?;

    sched.start().await?;
    tracing::info!(cron = %cron, "scheduler started, waiting for triggers");

    shutdown_signal().await;

    tracing::info!("shutting down scheduler");
    sched.shutdown().await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("received SIGTERM signal");
        },
    }
}
