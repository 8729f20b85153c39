use crate::Record;

/// Emitted once per completed iteration, after its record is computed.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a, R> {
    /// The 1-based iteration index.
    pub iter: usize,

    /// The record this iteration produced.
    pub record: &'a R,

    /// Whether this iteration met the stopping criterion.
    pub converged: bool,
}

impl<R: Record> Event<'_, R> {
    /// Returns this iteration's root estimate.
    #[must_use]
    pub fn estimate(&self) -> f64 {
        self.record.estimate()
    }
}

/// Control actions an observer can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the run after the current iteration.
    ///
    /// Ignored if the current iteration converged.
    StopEarly,
}
