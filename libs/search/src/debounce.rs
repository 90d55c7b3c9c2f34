//! Debounced values
//!
//! A [`Debounced`] holds two values: the raw input, updated on every call to
//! [`Debounced::set`], and the settled output, which only follows the input
//! once it has stayed unchanged for a full quiet period. A single background
//! task owns the timer; dropping the `Debounced` aborts it, so nothing is
//! emitted after the owner is gone.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::trace;

/// Quiet period applied to the search text
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

pub struct Debounced<T> {
    input: watch::Sender<T>,
    output: watch::Receiver<T>,
    task: JoinHandle<()>,
}

impl<T> Debounced<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Start debouncing from `initial`; must be called inside a tokio runtime
    pub fn new(initial: T, quiet: Duration) -> Self {
        let (input, input_rx) = watch::channel(initial.clone());
        let (output_tx, output) = watch::channel(initial);
        let task = tokio::spawn(settle(input_rx, output_tx, quiet));

        Self {
            input,
            output,
            task,
        }
    }

    /// Feed a new input value; equal values do not restart the quiet period
    pub fn set(&self, value: T) {
        self.input.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        });
    }

    /// Latest raw input
    pub fn input(&self) -> T {
        self.input.borrow().clone()
    }

    /// Latest settled value
    pub fn get(&self) -> T {
        self.output.borrow().clone()
    }

    /// Receiver notified each time a new value settles
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.output.clone()
    }
}

impl<T> Drop for Debounced<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn settle<T>(mut input: watch::Receiver<T>, output: watch::Sender<T>, quiet: Duration)
where
    T: Clone + PartialEq,
{
    while input.changed().await.is_ok() {
        // Every further change restarts the quiet period.
        loop {
            tokio::select! {
                changed = input.changed() => {
                    if changed.is_err() {
                        return;
                    }
                }
                () = sleep(quiet) => break,
            }
        }

        let settled = input.borrow_and_update().clone();
        let emitted = output.send_if_modified(|current| {
            if *current == settled {
                false
            } else {
                *current = settled;
                true
            }
        });
        trace!(emitted, "Debounced value settled");
    }
}
