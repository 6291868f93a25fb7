//! Table-level change notification for reactive queries.
//!
//! # Responsibility
//! - Register observers interested in writes to a table.
//! - Signal every live observer after a committed write.
//!
//! # Invariants
//! - `notify` never blocks on a slow or absent observer.
//! - Observers whose receiver was dropped are pruned on the next `notify`.

use log::debug;
use parking_lot::Mutex;
use std::sync::mpsc::{channel, Receiver, Sender};

#[derive(Debug)]
struct Observer {
    table: &'static str,
    tx: Sender<()>,
}

/// Fan-out of "table changed" signals to subscribed queries.
#[derive(Debug, Default)]
pub struct InvalidationTracker {
    observers: Mutex<Vec<Observer>>,
}

impl InvalidationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers interest in `table` and returns the signal receiver.
    ///
    /// Dropping the receiver unsubscribes.
    pub fn subscribe(&self, table: &'static str) -> Receiver<()> {
        let (tx, rx) = channel();
        self.observers.lock().push(Observer { table, tx });
        rx
    }

    /// Signals every observer of `table`.
    pub fn notify(&self, table: &str) {
        let mut observers = self.observers.lock();
        let before = observers.len();
        observers.retain(|observer| observer.table != table || observer.tx.send(()).is_ok());
        let pruned = before - observers.len();
        debug!(
            "event=table_invalidated module=db table={} observers={} pruned={}",
            table,
            observers.len(),
            pruned
        );
    }

    /// Number of registered observers, including ones not yet pruned.
    pub fn observer_count(&self) -> usize {
        self.observers.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::InvalidationTracker;

    #[test]
    fn notify_reaches_only_matching_table() {
        let tracker = InvalidationTracker::new();
        let books = tracker.subscribe("hymnbooks");
        let other = tracker.subscribe("recent");

        tracker.notify("hymnbooks");

        assert!(books.try_recv().is_ok());
        assert!(books.try_recv().is_err());
        assert!(other.try_recv().is_err());
    }

    #[test]
    fn dropped_receivers_are_pruned_on_notify() {
        let tracker = InvalidationTracker::new();
        let kept = tracker.subscribe("hymnbooks");
        drop(tracker.subscribe("hymnbooks"));
        assert_eq!(tracker.observer_count(), 2);

        tracker.notify("hymnbooks");

        assert_eq!(tracker.observer_count(), 1);
        assert!(kept.try_recv().is_ok());
    }
}
