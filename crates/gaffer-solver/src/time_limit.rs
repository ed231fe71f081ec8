use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
        mpsc::{self, RecvTimeoutError},
    },
    thread,
    time::Duration,
};

use log::warn;

use crate::{LinearModel, Solution, SolveStatus, Solver};

/// Runs a backend on a worker thread and gives up after a wall-clock limit.
///
/// When the limit elapses the caller gets [`SolveStatus::NotSolved`]
/// immediately. Backends cannot be interrupted, so the worker is detached: it
/// keeps a CPU core busy until the backend returns on its own, and its result
/// is discarded. Every timed-out solve leaves one such worker behind;
/// [`TimeLimited::running_workers`] counts them.
#[derive(Debug, Clone)]
pub struct TimeLimited<S> {
    inner: Arc<S>,
    limit: Duration,
    running: Arc<AtomicUsize>,
}

impl<S> TimeLimited<S> {
    pub fn new(inner: S, limit: Duration) -> Self {
        Self {
            inner: Arc::new(inner),
            limit,
            running: Arc::new(AtomicUsize::new(0)),
        }
    }

    #[must_use]
    pub fn limit(&self) -> Duration {
        self.limit
    }

    /// Worker threads still solving, including ones whose caller gave up.
    #[must_use]
    pub fn running_workers(&self) -> usize {
        self.running.load(Ordering::SeqCst)
    }
}

/// Decrements the worker count when the worker ends, even by panicking.
struct RunningGuard(Arc<AtomicUsize>);

impl Drop for RunningGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl<S> Solver for TimeLimited<S>
where
    S: Solver + 'static,
{
    fn solve(&self, model: &LinearModel) -> Solution {
        let (tx, rx) = mpsc::channel();
        let inner = Arc::clone(&self.inner);
        let model = model.clone();
        self.running.fetch_add(1, Ordering::SeqCst);
        let guard = RunningGuard(Arc::clone(&self.running));
        let spawned = thread::Builder::new()
            .name("solver".to_owned())
            .spawn(move || {
                let solution = {
                    let _guard = guard;
                    inner.solve(&model)
                };
                // receiver may be gone after a timeout
                let _ = tx.send(solution);
            });
        if let Err(err) = spawned {
            warn!("failed to spawn solver thread: {err}");
            return Solution::failed(SolveStatus::NotSolved);
        }

        match rx.recv_timeout(self.limit) {
            Ok(solution) => solution,
            Err(RecvTimeoutError::Timeout) => {
                warn!(
                    "solver exceeded the time limit of {:?}; {} worker(s) still running",
                    self.limit,
                    self.running_workers()
                );
                Solution::failed(SolveStatus::NotSolved)
            }
            Err(RecvTimeoutError::Disconnected) => {
                warn!("solver thread exited without a result");
                Solution::failed(SolveStatus::NotSolved)
            }
        }
    }
}
