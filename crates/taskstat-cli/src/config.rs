//! Resolved taskstat configuration.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use taskstat_core::{Selector, TaskQuery, TaskStatus};
use taskstat_provider::{FailingProvider, LocalProvider, Provider};

use crate::cli::Cli;
use crate::output::{OutputFormat, OutputFormatter};
use crate::params;
use crate::producer::ProducerOptions;
use crate::StatError;

/// Seconds between polls when `--wait` is given without `--poll-interval`.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;

/// Providers selectable with `--provider`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderKind {
    /// Task documents under a local directory.
    Local,
    /// Fails every lookup.
    TestFails,
}

impl ProviderKind {
    /// Flags this provider cannot run without.
    pub fn required_args(&self) -> &'static [&'static str] {
        match self {
            Self::Local => &["root"],
            Self::TestFails => &[],
        }
    }
}

/// Fully validated run configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub provider: ProviderKind,

    /// Root directory for the local provider.
    pub local_root: Option<PathBuf>,

    pub query: TaskQuery,

    pub format: OutputFormat,

    /// Full output: every field, no truncation.
    pub full: bool,

    /// Keep polling while any task is running.
    pub wait: bool,

    /// Pause between polls when waiting.
    pub poll_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Local,
            local_root: None,
            query: TaskQuery {
                statuses: Selector::Only(vec![TaskStatus::Running]),
                ..Default::default()
            },
            format: OutputFormat::Text,
            full: false,
            wait: false,
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
        }
    }
}

impl Config {
    /// Validate flags and resolve defaults.
    ///
    /// Every error here is raised before the provider is contacted.
    pub fn from_cli(cli: &Cli, os_user: Option<String>, now: DateTime<Utc>) -> Result<Self, StatError> {
        for arg in cli.provider.required_args() {
            let present = match *arg {
                "root" => cli.root.is_some(),
                _ => true,
            };
            if !present {
                return Err(StatError::InvalidArgument(format!(
                    "argument --{} is required by the {} provider",
                    arg,
                    provider_name(cli.provider)
                )));
            }
        }

        let create_time = cli
            .age
            .as_deref()
            .map(|age| params::parse_age(age, now))
            .transpose()?;

        let query = TaskQuery {
            statuses: params::parse_statuses(&cli.status)?,
            users: params::parse_users(&cli.users, os_user)?,
            job_ids: params::parse_jobs(&cli.jobs),
            labels: params::parse_labels(&cli.labels)?,
            create_time,
            max_tasks: cli.limit,
        };

        let defaults = Self::default();
        let format = cli.format.unwrap_or(if cli.full {
            OutputFormat::Yaml
        } else {
            defaults.format
        });

        Ok(Self {
            provider: cli.provider,
            local_root: cli.root.clone(),
            query,
            format,
            full: cli.full,
            wait: cli.wait,
            poll_interval: Duration::from_secs(cli.poll_interval),
        })
    }

    /// Instantiate the selected provider.
    pub fn build_provider(&self) -> Result<Arc<dyn Provider>, StatError> {
        match self.provider {
            ProviderKind::Local => {
                let root = self.local_root.clone().ok_or_else(|| {
                    StatError::InvalidArgument(
                        "argument --root is required by the local provider".to_string(),
                    )
                })?;
                Ok(Arc::new(LocalProvider::new(root)))
            }
            ProviderKind::TestFails => Ok(Arc::new(FailingProvider)),
        }
    }

    pub fn formatter(&self) -> OutputFormatter {
        OutputFormatter::new(self.format, self.full)
    }

    pub fn producer_options(&self) -> ProducerOptions {
        ProducerOptions {
            full_output: self.full,
            poll_interval: if self.wait {
                self.poll_interval
            } else {
                Duration::ZERO
            },
            raw_format: self.format.is_raw(),
        }
    }
}

fn provider_name(kind: ProviderKind) -> String {
    kind.to_possible_value()
        .map(|v| v.get_name().to_string())
        .unwrap_or_else(|| format!("{:?}", kind))
}
