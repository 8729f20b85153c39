use algebrify_core::Observer;

use crate::{Action, Config, Error, Event, Failure, Record, RunResult, Solution};

/// One root-finding method, expressed as a per-iteration strategy.
pub(crate) trait Method {
    type Record: Record;

    /// Name used in failure messages and logs.
    const NAME: &'static str;

    /// Computes the record for iteration `iter` from the current state.
    fn step(&mut self, iter: usize) -> Result<Self::Record, Error>;

    /// Applies the method's stopping predicate to a fresh record.
    fn is_converged(&self, record: &Self::Record, tol: f64) -> bool;

    /// Moves the state forward past a non-converged record.
    fn advance(&mut self, record: &Self::Record);

    /// Returns `(root, residual)` for the converged record.
    fn finish(&self, record: &Self::Record) -> Result<(f64, f64), Error>;
}

/// Runs `method` until it converges, fails, exhausts its budget or is
/// stopped by the observer.
///
/// The observer sees every record before it joins the trace.
pub(crate) fn drive<M, Obs>(
    mut method: M,
    config: &Config,
    mut observer: Obs,
) -> RunResult<M::Record>
where
    M: Method,
    Obs: for<'a> Observer<Event<'a, M::Record>, Action>,
{
    let mut trace = Vec::new();

    for iter in 1..=config.max_iters() {
        let record = match method.step(iter) {
            Ok(record) => record,
            Err(error) => {
                log::debug!("{} stopped at iteration {iter}: {error}", M::NAME);
                return Err(Failure::new(M::NAME, error, trace));
            }
        };
        let converged = method.is_converged(&record, config.tol());
        log::trace!("{} iteration {iter}: {record:?}", M::NAME);

        let action = observer.observe(&Event {
            iter,
            record: &record,
            converged,
        });

        if converged {
            let finished = method.finish(&record);
            trace.push(record);
            return match finished {
                Ok((root, residual)) => {
                    log::debug!("{} converged to {root} in {iter} iterations", M::NAME);
                    Ok(Solution {
                        root,
                        residual,
                        iters: iter,
                        trace,
                    })
                }
                Err(error) => Err(Failure::new(M::NAME, error, trace)),
            };
        }

        method.advance(&record);
        trace.push(record);

        if action == Some(Action::StopEarly) {
            log::debug!("{} stopped by observer at iteration {iter}", M::NAME);
            return Err(Failure::new(
                M::NAME,
                Error::StoppedByObserver { iters: iter },
                trace,
            ));
        }
    }

    log::debug!(
        "{} did not converge within {} iterations",
        M::NAME,
        config.max_iters()
    );
    Err(Failure::new(
        M::NAME,
        Error::NotConverged {
            iters: config.max_iters(),
        },
        trace,
    ))
}
