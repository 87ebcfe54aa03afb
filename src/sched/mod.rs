use std::fmt;
use std::time::Duration;

use tokio::runtime::Handle;

/// One-shot unit of work handed to a [`Scheduler`], run after its delay.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Capability for deferred execution. The registry never runs timers itself;
/// the host supplies an implementation backed by whatever it already has
/// (a Tokio runtime, OS timers, a worker with a delay queue).
pub trait Scheduler: Send + Sync {
    /// Runs `job` once, asynchronously, no sooner than `delay` from now.
    /// The returned handle is used solely to request cancellation.
    fn schedule_after(&self, delay: Duration, job: Job) -> TaskHandle;
}

/// Opaque handle to a scheduled job.
///
/// Cancellation is best-effort: cancelling a job that already ran, or was
/// already cancelled, does nothing and never errors.
pub struct TaskHandle {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl TaskHandle {
    pub fn new(cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Handle with no cancellation behavior, for schedulers whose jobs
    /// cannot be interrupted (e.g. run-inline test schedulers).
    pub fn noop() -> Self {
        Self { cancel: None }
    }

    /// Requests cancellation of the pending job.
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskHandle").finish_non_exhaustive()
    }
}

/// Tokio-backed [`Scheduler`]: each job becomes a spawned task that sleeps
/// for the delay, then runs the job. Cancellation aborts the task; aborting
/// a task that already finished is a no-op, which gives the silent
/// cancellation-race behavior for free.
#[derive(Clone)]
pub struct TokioScheduler {
    runtime: Handle,
}

impl TokioScheduler {
    /// Captures the current runtime handle. Panics if called outside a Tokio
    /// runtime; jobs may afterwards be scheduled from any thread.
    pub fn new() -> Self {
        Self {
            runtime: Handle::current(),
        }
    }

    pub fn with_handle(runtime: Handle) -> Self {
        Self { runtime }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_after(&self, delay: Duration, job: Job) -> TaskHandle {
        let task = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            job();
        });
        let abort = task.abort_handle();
        TaskHandle::new(move || abort.abort())
    }
}
