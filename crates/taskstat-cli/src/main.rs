//! taskstat - view job and task status.

use std::io::{self, Write};

use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use taskstat_cli::cli::Cli;
use taskstat_cli::params;
use taskstat_cli::{Config, JobProducer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing; stdout carries the rendered tables.
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::from_cli(&cli, params::os_user(), chrono::Utc::now())?;
    let provider = config.build_provider()?;
    let formatter = config.formatter();

    info!(
        provider = provider.name(),
        format = ?config.format,
        wait = config.wait,
        poll_interval_secs = config.poll_interval.as_secs(),
        "Starting taskstat"
    );

    let mut producer = JobProducer::new(provider, config.query.clone(), config.producer_options());

    loop {
        let batch = tokio::select! {
            batch = producer.next_batch() => batch?,
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping");
                break;
            }
        };

        let Some(rows) = batch else {
            break;
        };

        let rows: Vec<_> = rows
            .into_iter()
            .map(|row| formatter.prepare_output(row))
            .collect();
        let rendered = formatter.render_table(&rows)?;

        let mut stdout = io::stdout().lock();
        stdout.write_all(rendered.as_bytes())?;
        stdout.flush()?;
    }

    Ok(())
}
