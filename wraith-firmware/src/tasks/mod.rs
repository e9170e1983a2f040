//! Embassy async tasks
//!
//! One task per prop subsystem. The tasks share nothing: each owns its
//! H-bridge channel and, for the animated outputs, its scheduler and
//! its own seeded random generator.

pub mod fan;
pub mod head;
pub mod light;

pub use fan::fan_task;
pub use head::head_task;
pub use light::light_task;

/// Scheduler tick period, in milliseconds
///
/// The behavior core only counts ticks; this period is what makes the
/// tuned tick counts come out at the motions the prop was calibrated
/// for (a slow turn's 260 ticks of drive is about 1.3 s).
pub const TICK_INTERVAL_MS: u64 = 5;
