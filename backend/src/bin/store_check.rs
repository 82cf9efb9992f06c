//! Check store connectivity and print a few normalised records.

use std::ffi::OsString;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use delegation_backend::domain::render_task_line;
use delegation_backend::outbound::persistence::{DbPool, PoolConfig, StoreProbe};
use delegation_backend::settings::AppSettings;
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;

/// `store-check` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "store-check",
    about = "Verify the user and task store is reachable and readable",
    version
)]
struct CliArgs {
    /// Database connection URL; defaults to the service configuration.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
    /// Records to print from each table.
    #[arg(long, default_value_t = 3)]
    samples: i64,
    /// Seconds to wait for a connection.
    #[arg(long = "timeout-secs", default_value_t = 10)]
    timeout_secs: u64,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build Tokio runtime")?;
    runtime.block_on(run(args))
}

fn resolve_database_url(explicit: Option<String>) -> Result<String> {
    if let Some(value) = explicit {
        if value.trim().is_empty() {
            return Err(eyre!("--database-url must not be empty when provided"));
        }
        return Ok(value);
    }

    let settings = AppSettings::load_from_iter([OsString::from("store-check")])
        .map_err(|err| eyre!("failed to load settings: {err}"))?;
    Ok(settings.database_url().to_owned())
}

async fn run(args: CliArgs) -> Result<()> {
    let database_url = resolve_database_url(args.database_url)?;
    let pool = DbPool::new(
        PoolConfig::new(database_url)
            .with_max_size(1)
            .with_connection_timeout(Duration::from_secs(args.timeout_secs.max(1))),
    )
    .await
    .wrap_err("failed to build connection pool")?;

    let summary = StoreProbe::new(pool)
        .summarise(args.samples.max(0))
        .await
        .wrap_err("store connection failed")?;

    println!("Store connection OK");
    println!("users: {} records", summary.user_count);
    for user in &summary.sample_users {
        println!("  {} | {} | {}", user.id(), user.name(), user.role());
    }
    println!("tasks: {} records", summary.task_count);
    for task in &summary.sample_tasks {
        println!("  {}", render_task_line(task));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn explicit_url_wins() {
        let url = resolve_database_url(Some("postgres://db/tasks".to_owned())).expect("url");
        assert_eq!(url, "postgres://db/tasks");
    }

    #[rstest]
    fn blank_explicit_url_is_rejected() {
        assert!(resolve_database_url(Some("  ".to_owned())).is_err());
    }

    #[rstest]
    fn sample_count_defaults_to_three() {
        let args = CliArgs::parse_from(["store-check"]);
        assert_eq!(args.samples, 3);
        assert!(args.database_url.is_none());
    }
}
