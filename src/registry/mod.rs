mod record;

pub use record::{Activation, CooldownRecord};

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::time::Instant;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::CooldownError;
use crate::policy::PolicyProvider;
use crate::sched::Scheduler;

/// Callback invoked once per natural expiry, before the key is removed from
/// the registry. A hook that inspects the registry during its own execution
/// still observes the key as cooling down.
pub type ExpiryHook = Arc<dyn Fn(&str) + Send + Sync>;

/// Hook that does nothing on expiry.
pub fn noop_hook() -> ExpiryHook {
    Arc::new(|_key| {})
}

/// Concurrent per-key cooldown registry.
///
/// Presence of a key in the map is the sole source of truth for "currently
/// cooling down". Duration and bypass decisions come from the injected
/// [`PolicyProvider`]; timed execution comes from the injected [`Scheduler`].
/// All operations take `&self` and are safe to call from any thread.
pub struct CooldownRegistry<P, S> {
    active: Arc<DashMap<String, CooldownRecord>>,
    policy: P,
    scheduler: S,
}

impl<P: PolicyProvider, S: Scheduler> CooldownRegistry<P, S> {
    pub fn new(policy: P, scheduler: S) -> Self {
        Self {
            active: Arc::new(DashMap::new()),
            policy,
            scheduler,
        }
    }

    /// Arms (or re-arms) the cooldown for `key`.
    ///
    /// Bypassed actors and non-positive resolved durations leave the
    /// registry untouched. Otherwise an expiry job is scheduled and a fresh
    /// record installed; any record it displaces has its job cancelled, so
    /// at most one callback per key is ever live. Re-activating a cooling
    /// key is the documented re-arm path, never an error.
    pub fn activate(&self, key: &str, hook: ExpiryHook) -> Result<Activation, CooldownError> {
        if key.is_empty() {
            return Err(CooldownError::EmptyKey);
        }
        if self.policy.is_bypassed(key) {
            debug!(key, "cooldown bypassed");
            return Ok(Activation::Bypassed);
        }
        let secs = self.resolved_duration_secs(key);
        if secs <= 0 {
            return Ok(Activation::Disabled);
        }

        let duration = Duration::from_secs(secs as u64);
        let expires_at = Instant::now() + duration;
        let generation = Uuid::new_v4();

        let map = Arc::clone(&self.active);
        let owned_key = key.to_string();
        let job = Box::new(move || {
            // Hook fires before removal, so the hook may still observe the
            // key as cooling down. Removal happens even if the hook panics;
            // a stuck key would report "still cooling" forever.
            if catch_unwind(AssertUnwindSafe(|| hook(&owned_key))).is_err() {
                warn!(key = %owned_key, "expiry hook panicked");
            }
            // Only this activation's own record may be removed; a newer
            // record installed by a re-arm stays untouched.
            map.remove_if(&owned_key, |_, rec| rec.generation == generation);
        });
        let handle = self.scheduler.schedule_after(duration, job);

        let record = CooldownRecord {
            generation,
            handle,
            expires_at,
        };
        if let Some(prev) = self.active.insert(key.to_string(), record) {
            prev.cancel();
        }
        debug!(key, secs, "cooldown armed");
        Ok(Activation::Started {
            duration,
            expires_at,
        })
    }

    /// Whether `key` is currently cooling down. O(1), no side effects.
    pub fn is_cooling_down(&self, key: &str) -> bool {
        self.active.contains_key(key)
    }

    /// Estimated remaining cooldown, zero if `key` is not cooling down.
    ///
    /// The expiry job and this read consult the clock independently, so the
    /// raw remainder can undershoot by the scheduler's granularity around
    /// expiry; negative remainders are clamped to zero rather than surfaced.
    pub fn remaining_time(&self, key: &str) -> Duration {
        match self.active.get(key) {
            Some(rec) => rec.expires_at.saturating_duration_since(Instant::now()),
            None => Duration::ZERO,
        }
    }

    /// Cancels the pending cooldown for `key`, if any. Returns whether a
    /// cooldown was actually cancelled; calling on an absent key is a no-op.
    pub fn cancel(&self, key: &str) -> bool {
        match self.active.remove(key) {
            Some((_, rec)) => {
                rec.cancel();
                debug!(key, "cooldown cancelled");
                true
            }
            None => false,
        }
    }

    /// Total configured cooldown for `key` in seconds, including the
    /// permission-scaled value and the optional flat addition. May be zero
    /// or negative, meaning cooldown is disabled for this actor.
    pub fn resolved_duration_secs(&self, key: &str) -> i64 {
        let base = self.policy.base_duration(key);
        if self.policy.duration_is_per_permission() {
            let mut timer = self.policy.permission_scaled_duration(key, base);
            if self.policy.additional_flat_time_enabled() {
                timer += base;
            }
            timer
        } else {
            base
        }
    }

    /// Number of keys currently cooling down.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Cancels every outstanding expiry callback and clears the registry.
    /// For clean teardown in hosts that outlive their cooldowns.
    pub fn shutdown(&self) {
        let keys: Vec<String> = self.active.iter().map(|e| e.key().clone()).collect();
        for key in keys {
            if let Some((_, rec)) = self.active.remove(&key) {
                rec.cancel();
            }
        }
        debug!("cooldown registry shut down");
    }
}
