//! Command line flags.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::{ProviderKind, DEFAULT_POLL_INTERVAL_SECS};
use crate::output::OutputFormat;

/// View job and task status, in the manner of qstat and friends.
///
/// Defaults to the current user's running tasks.
#[derive(Debug, Parser)]
#[command(name = "taskstat")]
#[command(about = "View job and task status from a job-execution provider", long_about = None)]
pub struct Cli {
    /// Provider to query
    #[arg(long, value_enum, default_value_t = ProviderKind::Local)]
    pub provider: ProviderKind,

    /// Root directory of the local provider
    #[arg(long, env = "TASKSTAT_LOCAL_ROOT")]
    pub root: Option<PathBuf>,

    /// Jobs on which to check status
    #[arg(short, long, num_args = 1..)]
    pub jobs: Vec<String>,

    /// Only list jobs submitted by these users; "*" lists every user
    #[arg(short, long, num_args = 1..)]
    pub users: Vec<String>,

    /// Only list tasks with these statuses (RUNNING, SUCCESS, FAILURE,
    /// CANCELED); "*" lists every status
    #[arg(short, long, num_args = 1.., default_value = "RUNNING")]
    pub status: Vec<String>,

    /// Only list jobs newer than this age: a number followed by s, m, h, d
    /// or w (e.g. 7d). Bare numbers are UTC epoch seconds.
    #[arg(long)]
    pub age: Option<String>,

    /// Labels every listed task must carry
    #[arg(long = "label", value_name = "KEY=VALUE", num_args = 1..)]
    pub labels: Vec<String>,

    /// Seconds between polls when --wait is set
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL_SECS)]
    pub poll_interval: u64,

    /// Keep polling until no listed task is running
    #[arg(long)]
    pub wait: bool,

    /// Maximum number of tasks per lookup
    #[arg(long)]
    pub limit: Option<usize>,

    /// Show every field, untruncated
    #[arg(short, long)]
    pub full: bool,

    /// Output format [default: yaml with --full, text otherwise]
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Log more to stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["taskstat"]).unwrap();
        assert_eq!(cli.provider, ProviderKind::Local);
        assert_eq!(cli.status, vec!["RUNNING".to_string()]);
        assert_eq!(cli.poll_interval, DEFAULT_POLL_INTERVAL_SECS);
        assert!(cli.format.is_none());
        assert!(!cli.wait);
    }

    #[test]
    fn test_multi_value_flags() {
        let cli = Cli::try_parse_from([
            "taskstat",
            "--jobs",
            "a",
            "b",
            "--status",
            "*",
            "--label",
            "batch=7",
            "--format",
            "provider-json",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.jobs, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(cli.status, vec!["*".to_string()]);
        assert_eq!(cli.labels, vec!["batch=7".to_string()]);
        assert_eq!(cli.format, Some(OutputFormat::ProviderJson));
        assert_eq!(cli.verbose, 2);
    }
}
