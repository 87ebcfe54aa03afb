use std::time::Duration;

use tokio::time::Instant;
use uuid::Uuid;

use crate::sched::TaskHandle;

/// Details of one active cooldown: the scheduled expiry task and the instant
/// the cooldown ends. Created only by `activate`; destroyed by the expiry
/// job firing, an explicit `cancel`, or a re-activation replacing it.
#[derive(Debug)]
pub struct CooldownRecord {
    /// Distinguishes this activation from earlier/later ones of the same
    /// key, so a stale expiry job can never remove a successor record.
    pub(crate) generation: Uuid,
    pub(crate) handle: TaskHandle,
    /// Set once at activation; never mutated. Re-arming installs a fresh
    /// record instead of adjusting this one.
    pub(crate) expires_at: Instant,
}

impl CooldownRecord {
    /// Best-effort cancellation of the pending expiry task.
    pub(crate) fn cancel(self) {
        self.handle.cancel();
    }
}

/// Outcome of an `activate` call. None of these are errors: bypass and
/// disabled cooldowns are ordinary policy outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Actor is exempt; nothing was scheduled.
    Bypassed,
    /// Resolved duration was zero or negative; nothing was scheduled.
    Disabled,
    /// Cooldown armed (or re-armed) until `expires_at`.
    Started {
        duration: Duration,
        expires_at: Instant,
    },
}
