use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::PolicyProvider;
use crate::error::CooldownError;

/// Config-backed [`PolicyProvider`] for one rate-limited action.
///
/// `overrides` maps an actor key to its permission-scaled duration; keys
/// without an entry fall back to `base_duration_secs`. All durations are
/// whole seconds; zero or negative disables the cooldown for that actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CooldownSettings {
    pub base_duration_secs: i64,
    pub duration_by_permission: bool,
    pub additional_flat_time: bool,
    pub bypass: HashSet<String>,
    pub overrides: HashMap<String, i64>,
}

impl Default for CooldownSettings {
    fn default() -> Self {
        Self {
            base_duration_secs: 0,
            duration_by_permission: false,
            additional_flat_time: false,
            bypass: HashSet::new(),
            overrides: HashMap::new(),
        }
    }
}

impl CooldownSettings {
    /// Flat settings: one duration for everyone, no overrides, no bypass.
    pub fn flat(base_duration_secs: i64) -> Self {
        Self {
            base_duration_secs,
            ..Self::default()
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CooldownError> {
        Ok(serde_json::from_str(raw)?)
    }
}

impl PolicyProvider for CooldownSettings {
    fn base_duration(&self, _key: &str) -> i64 {
        self.base_duration_secs
    }

    fn permission_scaled_duration(&self, key: &str, base: i64) -> i64 {
        self.overrides.get(key).copied().unwrap_or(base)
    }

    fn duration_is_per_permission(&self) -> bool {
        self.duration_by_permission
    }

    fn additional_flat_time_enabled(&self) -> bool {
        self.additional_flat_time
    }

    fn is_bypassed(&self, key: &str) -> bool {
        self.bypass.contains(key)
    }
}
