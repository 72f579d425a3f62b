//! Provider reading task documents from a local directory tree.
//!
//! Layout: `<root>/<job-id>/<anything>.json`, one task per file. Each file
//! holds a task in the kebab-case schema; the whole file is also the task's
//! raw provider data.

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use taskstat_core::{Selector, TaskQuery, TaskRecord};
use tracing::{debug, info};

use crate::{Provider, ProviderError};

/// Local filesystem provider.
#[derive(Debug, Clone)]
pub struct LocalProvider {
    root: PathBuf,
}

impl LocalProvider {
    /// Create a provider rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Job directories to scan, in name order, each at most once.
    async fn job_dirs(&self, job_ids: &Selector<String>) -> Result<Vec<PathBuf>, ProviderError> {
        if let Selector::Only(ids) = job_ids {
            let ids: BTreeSet<&str> = ids.iter().map(String::as_str).collect();
            let mut dirs = Vec::new();
            for id in ids {
                let dir = self.root.join(job_dir_name(id)?);
                if is_dir(&dir).await? {
                    dirs.push(dir);
                }
            }
            return Ok(dirs);
        }

        if !is_dir(&self.root).await? {
            debug!(root = %self.root.display(), "Local root missing, no tasks");
            return Ok(Vec::new());
        }

        let mut dirs = Vec::new();
        for entry in list_dir(&self.root).await? {
            if is_dir(&entry).await? {
                dirs.push(entry);
            }
        }
        Ok(dirs)
    }

    async fn read_task(&self, path: &Path) -> Result<TaskRecord, ProviderError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| ProviderError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let malformed = |source| ProviderError::Malformed {
            path: path.to_path_buf(),
            source,
        };
        let document: serde_json::Value = serde_json::from_slice(&bytes).map_err(malformed)?;
        TaskRecord::from_document(document).map_err(malformed)
    }
}

#[async_trait]
impl Provider for LocalProvider {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn lookup_job_tasks(&self, query: &TaskQuery) -> Result<Vec<TaskRecord>, ProviderError> {
        let mut tasks = Vec::new();

        for dir in self.job_dirs(&query.job_ids).await? {
            for path in list_dir(&dir).await? {
                if path.extension().and_then(|e| e.to_str()) != Some("json") {
                    continue;
                }

                let task = self.read_task(&path).await?;
                if query.matches(&task) {
                    tasks.push(task);
                }
            }
        }

        // Newest first, then stable by job and task.
        tasks.sort_by(|a, b| {
            b.create_time
                .cmp(&a.create_time)
                .then_with(|| a.job_id.cmp(&b.job_id))
                .then_with(|| a.task_id.cmp(&b.task_id))
        });

        if let Some(max) = query.max_tasks {
            tasks.truncate(max);
        }

        info!(
            root = %self.root.display(),
            count = tasks.len(),
            "Local lookup complete"
        );
        Ok(tasks)
    }
}

/// A job ID must be a single plain path component.
fn job_dir_name(id: &str) -> Result<&Path, ProviderError> {
    let path = Path::new(id);
    let mut components = path.components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !id.contains(['/', '\\']) => Ok(path),
        _ => Err(ProviderError::InvalidJobId(id.to_string())),
    }
}

async fn is_dir(path: &Path) -> Result<bool, ProviderError> {
    match tokio::fs::metadata(path).await {
        Ok(meta) => Ok(meta.is_dir()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(ProviderError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

async fn list_dir(dir: &Path) -> Result<Vec<PathBuf>, ProviderError> {
    let io_err = |source| ProviderError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = tokio::fs::read_dir(dir).await.map_err(io_err)?;
    let mut paths = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(io_err)? {
        paths.push(entry.path());
    }
    paths.sort();
    Ok(paths)
}
