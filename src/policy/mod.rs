mod settings;

pub use settings::CooldownSettings;

use std::sync::Arc;

/// Decides cooldown durations and bypass exemptions for the registry.
///
/// Injected at construction; the registry itself never reads configuration
/// or permissions directly. Durations are in whole seconds and may be zero
/// or negative, meaning "no cooldown configured".
pub trait PolicyProvider: Send + Sync {
    /// Globally configured cooldown length for this kind of action.
    fn base_duration(&self, key: &str) -> i64;

    /// Actor/group-specific override, with `base` as the fallback default.
    fn permission_scaled_duration(&self, key: &str, base: i64) -> i64;

    /// Whether the permission-scaled path is active at all.
    fn duration_is_per_permission(&self) -> bool;

    /// Whether the base duration stacks additively on the scaled value.
    fn additional_flat_time_enabled(&self) -> bool;

    /// Whether this actor is exempt from cooldown entirely.
    fn is_bypassed(&self, key: &str) -> bool;
}

impl<P: PolicyProvider + ?Sized> PolicyProvider for Arc<P> {
    fn base_duration(&self, key: &str) -> i64 {
        (**self).base_duration(key)
    }

    fn permission_scaled_duration(&self, key: &str, base: i64) -> i64 {
        (**self).permission_scaled_duration(key, base)
    }

    fn duration_is_per_permission(&self) -> bool {
        (**self).duration_is_per_permission()
    }

    fn additional_flat_time_enabled(&self) -> bool {
        (**self).additional_flat_time_enabled()
    }

    fn is_bypassed(&self, key: &str) -> bool {
        (**self).is_bypassed(key)
    }
}
