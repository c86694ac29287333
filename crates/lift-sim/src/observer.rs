//! Observer trait for progress reporting and data collection.

use lift_core::Tick;

use crate::building::TickSummary;
use crate::day::DayOutcome;

/// Callbacks invoked by [`DaySim::run`][crate::DaySim::run] at key points in
/// the day loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — queue watcher
///
/// ```rust,ignore
/// struct QueueWatcher { worst: usize }
///
/// impl DayObserver for QueueWatcher {
///     fn on_tick_end(&mut self, summary: &TickSummary) {
///         self.worst = self.worst.max(summary.waiting);
///     }
/// }
/// ```
pub trait DayObserver {
    /// A group of `size` riders walked into the lobby; `placed` of them were
    /// given a destination (the rest found every floor already allocated).
    fn on_group_arrival(&mut self, _tick: Tick, _size: u32, _placed: u32) {}

    /// Called after every building tick.
    fn on_tick_end(&mut self, _summary: &TickSummary) {}

    /// Called once when every floor is full.
    fn on_day_end(&mut self, _outcome: &DayOutcome) {}
}

/// A [`DayObserver`] that does nothing.
pub struct NoopObserver;

impl DayObserver for NoopObserver {}
