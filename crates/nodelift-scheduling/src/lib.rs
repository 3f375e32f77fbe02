//! NodeLift scheduler: groups pending pods into bin-packable schedules.
//!
//! Given unschedulable pods and a catalogue of candidate instance types,
//! decides which pods can co-locate and which instance types could host
//! them, without picking a specific instance or launching anything.
//!
//! # Components
//!
//! - **`support`**: can an instance type realize a constraint set
//! - **`scheduler`**: the greedy first-fit grouping pass and the
//!   `Scheduler` façade
//! - **`topology`**: the injection boundary that turns spread constraints
//!   into per-pod requirements ahead of grouping
//! - **`error`**: errors that abort a pass

pub mod error;
pub mod scheduler;
pub mod support;
pub mod topology;

pub use error::{SchedulingError, SchedulingResult};
pub use scheduler::{Schedule, Scheduler};
pub use support::supports;
pub use topology::{NoopTopology, TopologyInjector};
