use thiserror::Error;

/// Errors surfaced by the cooldown layer. Deliberately small: cancellation
/// races and hook failures are handled internally and never reach callers.
#[derive(Debug, Error)]
pub enum CooldownError {
    #[error("cooldown key must not be empty")]
    EmptyKey,

    #[error("invalid cooldown settings: {0}")]
    Settings(#[from] serde_json::Error),
}
