/// Watches a running root finder, one event per iteration.
///
/// Returning `Some(action)` asks the solver to act on it (stopping early, for
/// instance); `None` lets the run continue. Any `FnMut(&E) -> Option<A>`
/// closure is an observer, and `()` is an observer that never acts.
pub trait Observer<E, A> {
    /// Inspects one event, optionally requesting an action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive<O>(mut observer: O, events: usize) -> Vec<&'static str>
    where
        O: Observer<usize, &'static str>,
    {
        (1..=events).filter_map(|e| observer.observe(&e)).collect()
    }

    #[test]
    fn unit_observer_never_acts() {
        assert!(drive((), 10).is_empty());
    }

    #[test]
    fn closure_observer_sees_every_event() {
        let mut seen = Vec::new();
        let actions = drive(
            |event: &usize| {
                seen.push(*event);
                (*event == 3).then_some("stop")
            },
            5,
        );

        assert_eq!(actions, vec!["stop"]);
        assert_eq!(seen, vec![1, 2, 3, 4, 5]);
    }
}
