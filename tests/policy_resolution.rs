use std::sync::Arc;
use std::time::Duration;

use cooldowns::{CooldownRegistry, CooldownSettings, Job, PolicyProvider, Scheduler, TaskHandle};

/// Scheduler that drops every job: resolution tests never let a timer run.
struct NullScheduler;

impl Scheduler for NullScheduler {
    fn schedule_after(&self, _delay: Duration, _job: Job) -> TaskHandle {
        TaskHandle::noop()
    }
}

fn scaled_settings(base: i64, scaled: i64, additional_flat_time: bool) -> CooldownSettings {
    let mut settings = CooldownSettings::flat(base);
    settings.duration_by_permission = true;
    settings.additional_flat_time = additional_flat_time;
    settings.overrides.insert("alice".to_string(), scaled);
    settings
}

#[test]
fn scaled_duration_stacks_with_flat_addition() {
    let registry = CooldownRegistry::new(scaled_settings(10, 30, true), NullScheduler);
    assert_eq!(registry.resolved_duration_secs("alice"), 40);
}

#[test]
fn scaled_duration_without_flat_addition() {
    let registry = CooldownRegistry::new(scaled_settings(10, 30, false), NullScheduler);
    assert_eq!(registry.resolved_duration_secs("alice"), 30);
}

#[test]
fn base_duration_wins_when_permission_path_is_off() {
    let mut settings = scaled_settings(10, 30, true);
    settings.duration_by_permission = false;
    let registry = CooldownRegistry::new(settings, NullScheduler);
    assert_eq!(registry.resolved_duration_secs("alice"), 10);
}

#[test]
fn actor_without_override_falls_back_to_base() {
    let registry = CooldownRegistry::new(scaled_settings(10, 30, false), NullScheduler);
    assert_eq!(registry.resolved_duration_secs("bob"), 10);
}

#[test]
fn both_layers_zero_means_disabled() {
    let registry = CooldownRegistry::new(scaled_settings(0, 0, true), NullScheduler);
    assert_eq!(registry.resolved_duration_secs("alice"), 0);
}

#[test]
fn shared_policy_resolves_like_an_owned_one() {
    let settings = Arc::new(scaled_settings(10, 30, true));
    let registry = CooldownRegistry::new(Arc::clone(&settings), NullScheduler);
    assert_eq!(registry.resolved_duration_secs("alice"), 40);
    assert!(settings.duration_is_per_permission());
}

#[test]
fn settings_parse_from_json_with_defaults() -> anyhow::Result<()> {
    let settings = CooldownSettings::from_json_str(
        r#"{
            "base_duration_secs": 15,
            "bypass": ["admin"],
            "overrides": {"vip": 5}
        }"#,
    )?;

    assert_eq!(settings.base_duration_secs, 15);
    assert!(!settings.duration_by_permission);
    assert!(!settings.additional_flat_time);
    assert!(settings.is_bypassed("admin"));
    assert!(!settings.is_bypassed("alice"));
    assert_eq!(settings.permission_scaled_duration("vip", 15), 5);
    Ok(())
}

#[test]
fn malformed_settings_are_rejected() {
    let result = CooldownSettings::from_json_str("{not json");
    assert!(result.is_err());
}
