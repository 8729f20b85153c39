//! Ready-made observers that work with every method.

use std::time::{Duration, Instant};

use algebrify_core::Observer;

use crate::{Action, Event, Record};

/// Logs every iteration through the [`log`] facade.
#[derive(Debug, Clone, Copy)]
pub struct Logger {
    level: log::Level,
    method: &'static str,
}

impl Logger {
    /// Logs at `level`, labelling lines with `method`.
    #[must_use]
    pub fn new(method: &'static str, level: log::Level) -> Self {
        Self { level, method }
    }
}

impl<R: Record> Observer<Event<'_, R>, Action> for Logger {
    fn observe(&mut self, event: &Event<'_, R>) -> Option<Action> {
        log::log!(
            self.level,
            "{} iteration {}: estimate {}{}",
            self.method,
            event.iter,
            event.estimate(),
            if event.converged { " (converged)" } else { "" }
        );
        None
    }
}

/// Stops a run once a wall-clock budget is spent.
///
/// The clock starts when the observer is created. A budget too large to
/// represent as an [`Instant`] never expires.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    until: Option<Instant>,
}

impl Deadline {
    /// Allows `budget` from now.
    #[must_use]
    pub fn after(budget: Duration) -> Self {
        Self {
            until: Instant::now().checked_add(budget),
        }
    }

    /// Returns true once the budget is spent.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.until.is_some_and(|until| Instant::now() >= until)
    }
}

impl<R> Observer<Event<'_, R>, Action> for Deadline {
    fn observe(&mut self, _event: &Event<'_, R>) -> Option<Action> {
        self.expired().then_some(Action::StopEarly)
    }
}
