//! Termination-detecting worklist
//!
//! Both crawl engines grow their frontier while they run: finishing one
//! task can produce more. A fixed loop or worker pool cannot tell when such
//! a frontier is exhausted, so the engines share this protocol instead:
//!
//! - `pending` starts at 1 for the seed batch sitting in the channel.
//! - Receiving a batch decrements `pending` by one.
//! - Every admitted item of that batch increments `pending` and is spawned
//!   as its own task with a [`Reporter`].
//! - Every task reports exactly one batch back (possibly empty).
//!
//! `pending` therefore always equals batches queued plus tasks running, and
//! reaches zero exactly when no task can produce further work. `pending` is
//! owned by the single consumer loop, so it needs no synchronization.

use std::future::Future;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Report-back handle owned by one spawned task
///
/// Dropping a reporter without calling [`Reporter::report`] reports an
/// empty batch, so a task that returns early or panics is still accounted.
pub struct Reporter<T> {
    tx: Option<UnboundedSender<Vec<T>>>,
}

impl<T> Reporter<T> {
    /// Sends this task's discovered work and completes the task
    pub fn report(mut self, batch: Vec<T>) {
        if let Some(tx) = self.tx.take() {
            // The receiver lives until pending hits zero, which cannot
            // happen before this send.
            let _ = tx.send(batch);
        }
    }

    /// Completes the task without discovering any work
    pub fn done(self) {
        self.report(Vec::new());
    }
}

impl<T> Drop for Reporter<T> {
    fn drop(&mut self) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(Vec::new());
        }
    }
}

/// Dynamic fan-out engine over items of type `T`
pub struct Worklist<T> {
    tx: UnboundedSender<Vec<T>>,
    rx: UnboundedReceiver<Vec<T>>,
    pending: usize,
}

impl<T: Send + 'static> Worklist<T> {
    /// Creates a worklist seeded with one batch
    pub fn new(seed: Vec<T>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let _ = tx.send(seed);
        Self { tx, rx, pending: 1 }
    }

    /// Batches queued plus tasks not yet reported
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Drives the worklist until the frontier is exhausted
    ///
    /// `admit` is consulted for every item before it becomes a task; items
    /// it rejects are dropped and never counted. `task` builds the future
    /// for an admitted item, which is spawned on the tokio runtime.
    ///
    /// Returns the number of tasks launched.
    pub async fn run<A, F, Fut>(mut self, mut admit: A, mut task: F) -> usize
    where
        A: FnMut(&T) -> bool,
        F: FnMut(T, Reporter<T>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut launched = 0;

        while self.pending > 0 {
            let batch = match self.rx.recv().await {
                Some(batch) => batch,
                None => {
                    tracing::error!(
                        "Worklist channel closed with {} tasks pending",
                        self.pending
                    );
                    break;
                }
            };
            self.pending -= 1;

            for item in batch {
                if !admit(&item) {
                    continue;
                }

                self.pending += 1;
                launched += 1;

                let reporter = Reporter {
                    tx: Some(self.tx.clone()),
                };
                tokio::spawn(task(item, reporter));
            }

            tracing::trace!("Worklist pending: {}", self.pending);
        }

        launched
    }
}
