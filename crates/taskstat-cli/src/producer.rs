//! The poll loop: query, normalize, decide whether to go again.

use std::sync::Arc;
use std::time::Duration;

use taskstat_core::{prepare_row, Row, TaskQuery};
use taskstat_provider::Provider;
use tracing::{debug, info};

use crate::StatError;

/// How each poll cycle is shaped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProducerOptions {
    /// Project the full column set.
    pub full_output: bool,

    /// Pause between cycles; zero disables polling.
    pub poll_interval: Duration,

    /// Pass provider-native task data through unprojected. The raw shape is
    /// whatever the provider keeps and may change between provider versions.
    pub raw_format: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// More batches may follow. `cycle` counts the batches already yielded.
    Polling { cycle: u64 },
    Done,
}

/// Pull-based generator of task batches, one per poll cycle.
///
/// Every cycle runs a fresh lookup and builds fresh rows. The loop ends
/// after the first cycle when polling is disabled, and otherwise after the
/// first cycle in which no task is running (including a cycle with no tasks
/// at all). There is no overall deadline; callers wanting one wrap
/// [`JobProducer::next_batch`] in a timeout.
pub struct JobProducer {
    provider: Arc<dyn Provider>,
    query: TaskQuery,
    options: ProducerOptions,
    state: State,
}

impl JobProducer {
    pub fn new(provider: Arc<dyn Provider>, query: TaskQuery, options: ProducerOptions) -> Self {
        Self {
            provider,
            query,
            options,
            state: State::Polling { cycle: 0 },
        }
    }

    /// Whether the loop has finished.
    pub fn is_done(&self) -> bool {
        self.state == State::Done
    }

    /// Run the next poll cycle.
    ///
    /// Returns `Ok(None)` once the loop is done. A provider error ends the
    /// loop and the failed cycle yields nothing. Dropping the returned future
    /// part-way, during the pause or the lookup, leaves the producer as it
    /// was before the call.
    pub async fn next_batch(&mut self) -> Result<Option<Vec<Row>>, StatError> {
        let cycle = match self.state {
            State::Done => return Ok(None),
            State::Polling { cycle } => cycle,
        };

        if cycle > 0 {
            debug!(
                interval_secs = self.options.poll_interval.as_secs(),
                "Waiting before next poll"
            );
            tokio::time::sleep(self.options.poll_interval).await;
        }

        let tasks = match self.provider.lookup_job_tasks(&self.query).await {
            Ok(tasks) => tasks,
            Err(e) => {
                self.state = State::Done;
                return Err(e.into());
            }
        };

        let mut some_job_running = false;
        let rows: Vec<Row> = tasks
            .iter()
            .map(|task| {
                some_job_running |= task.is_running();
                if self.options.raw_format {
                    Row::from_raw(task.raw_task_data())
                } else {
                    prepare_row(task, self.options.full_output)
                }
            })
            .collect();

        let keep_polling = !self.options.poll_interval.is_zero() && some_job_running;
        self.state = if keep_polling {
            State::Polling { cycle: cycle + 1 }
        } else {
            State::Done
        };

        info!(
            provider = self.provider.name(),
            cycle = cycle + 1,
            tasks = rows.len(),
            some_job_running,
            keep_polling,
            "Poll cycle complete"
        );
        Ok(Some(rows))
    }
}
