//! Reactive query subscription.
//!
//! # Responsibility
//! - Re-run a query whenever its table is invalidated.
//! - Deliver results to one consumer by polling, waiting or iterating.
//!
//! # Invariants
//! - The first poll always runs the query.
//! - Bursts of invalidations collapse into one re-run.
//! - A query that finds no row emits nothing; the stream stays open.
//! - The stream ends only when every sender of its invalidations is gone.

use crate::repo::hymns_dao::RepoResult;
use std::sync::mpsc::{Receiver, RecvTimeoutError, TryRecvError};
use std::time::{Duration, Instant};

type QueryFn<T> = Box<dyn FnMut() -> RepoResult<Option<T>> + Send>;

/// Live result stream of a query over one table.
///
/// Dropping the stream unsubscribes it.
pub struct QueryStream<T> {
    query: QueryFn<T>,
    invalidations: Receiver<()>,
    pending: bool,
    closed: bool,
    distinct: bool,
    last: Option<T>,
}

impl<T: Clone + PartialEq> QueryStream<T> {
    pub(crate) fn new(
        invalidations: Receiver<()>,
        query: impl FnMut() -> RepoResult<Option<T>> + Send + 'static,
    ) -> Self {
        Self {
            query: Box::new(query),
            invalidations,
            pending: true,
            closed: false,
            distinct: false,
            last: None,
        }
    }

    /// Suppresses an emission equal to the previous one.
    pub(crate) fn distinct_until_changed(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Returns the next value if one is ready, without blocking.
    pub fn try_next(&mut self) -> Option<RepoResult<T>> {
        loop {
            if !self.pending {
                match self.invalidations.try_recv() {
                    Ok(()) => self.pending = true,
                    Err(TryRecvError::Empty) => return None,
                    Err(TryRecvError::Disconnected) => {
                        self.closed = true;
                        return None;
                    }
                }
            }

            self.drain_pending();
            self.pending = false;
            if let Some(item) = self.run_query() {
                return Some(item);
            }
        }
    }

    /// Waits up to `timeout` for the next value.
    pub fn next_timeout(&mut self, timeout: Duration) -> Option<RepoResult<T>> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(item) = self.try_next() {
                return Some(item);
            }
            if self.closed {
                return None;
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return None;
            }
            match self.invalidations.recv_timeout(remaining) {
                Ok(()) => self.pending = true,
                Err(RecvTimeoutError::Timeout) => return None,
                Err(RecvTimeoutError::Disconnected) => {
                    self.closed = true;
                    return None;
                }
            }
        }
    }

    /// Returns whether the owning database is gone.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn drain_pending(&mut self) {
        while self.invalidations.try_recv().is_ok() {}
    }

    fn run_query(&mut self) -> Option<RepoResult<T>> {
        match (self.query)() {
            Ok(Some(value)) => {
                if self.distinct && self.last.as_ref() == Some(&value) {
                    return None;
                }
                self.last = Some(value.clone());
                Some(Ok(value))
            }
            Ok(None) => {
                self.last = None;
                None
            }
            Err(err) => {
                self.last = None;
                Some(Err(err))
            }
        }
    }
}

impl<T: Clone + PartialEq> Iterator for QueryStream<T> {
    type Item = RepoResult<T>;

    /// Blocks until the next value; `None` once the database is dropped.
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.try_next() {
                return Some(item);
            }
            if self.closed {
                return None;
            }
            match self.invalidations.recv() {
                Ok(()) => self.pending = true,
                Err(_) => {
                    self.closed = true;
                    return None;
                }
            }
        }
    }
}
