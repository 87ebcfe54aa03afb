pub mod error;
pub mod policy;
pub mod registry;
pub mod sched;

// Re-export specific items for convenient access
pub use error::CooldownError;
pub use policy::{CooldownSettings, PolicyProvider};
pub use registry::{noop_hook, Activation, CooldownRegistry, ExpiryHook};
pub use sched::{Job, Scheduler, TaskHandle, TokioScheduler};
