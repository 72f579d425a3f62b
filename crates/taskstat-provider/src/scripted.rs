//! Provider that replays a fixed script of lookup results.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use taskstat_core::{TaskQuery, TaskRecord};
use tracing::debug;

use crate::{Provider, ProviderError};

#[derive(Debug, Clone)]
enum Step {
    Tasks(Vec<TaskRecord>),
    Fail(String),
}

/// Replays scripted lookups in order.
///
/// Once the script runs out the last step repeats, so a poll loop never sees
/// tasks vanish unless the script says so. An empty script returns no tasks.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    steps: Mutex<VecDeque<Step>>,
    last: Mutex<Option<Step>>,
    lookups: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to append a successful lookup.
    pub fn then_tasks(self, tasks: Vec<TaskRecord>) -> Self {
        self.push(Step::Tasks(tasks));
        self
    }

    /// Builder method to append a failing lookup.
    pub fn then_fail(self, message: impl Into<String>) -> Self {
        self.push(Step::Fail(message.into()));
        self
    }

    /// Number of lookups served so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    fn push(&self, step: Step) {
        self.steps
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(step);
    }

    fn next_step(&self) -> Option<Step> {
        let mut last = self.last.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(step) = self
            .steps
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
        {
            *last = Some(step);
        }
        last.clone()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn lookup_job_tasks(&self, query: &TaskQuery) -> Result<Vec<TaskRecord>, ProviderError> {
        let cycle = self.lookups.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(cycle, "Scripted lookup");

        match self.next_step() {
            None => Ok(Vec::new()),
            Some(Step::Fail(message)) => Err(ProviderError::Lookup(message)),
            Some(Step::Tasks(mut tasks)) => {
                if let Some(max) = query.max_tasks {
                    tasks.truncate(max);
                }
                Ok(tasks)
            }
        }
    }
}
