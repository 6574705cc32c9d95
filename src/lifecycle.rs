//! Request-lifecycle tracking shared by both stores
//!
//! Every remote operation runs inside [`track`], which flips the owning
//! store's flags through the `Idle -> Pending -> {Fulfilled, Rejected}`
//! cycle. Each dispatch draws a ticket; a response may only set terminal
//! flags while its ticket is still the most recently dispatched one, so an
//! old in-flight request resolving late cannot clobber the outcome of a
//! newer dispatch. `reset` is the only way back to `Idle` and must be
//! invoked by the view layer after it has observed a terminal state.

use crate::error::Error;
use std::future::Future;
use std::sync::Mutex;

/// Snapshot of a store's request-lifecycle state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LifecycleFlags {
    /// An operation is in flight
    pub is_loading: bool,

    /// The most recent dispatch fulfilled
    pub is_success: bool,

    /// The most recent dispatch rejected
    pub is_error: bool,

    /// Human-readable failure message, empty unless `is_error`
    pub message: String,
}

/// Internal lifecycle state, guarded by the owning store's mutex
#[derive(Debug, Default)]
pub(crate) struct Lifecycle {
    flags: LifecycleFlags,
    dispatched: u64,
}

impl Lifecycle {
    fn begin(&mut self) -> u64 {
        self.dispatched += 1;
        self.flags.is_loading = true;
        self.dispatched
    }

    fn fulfill(&mut self, ticket: u64) {
        if ticket != self.dispatched {
            return;
        }
        self.flags.is_loading = false;
        self.flags.is_success = true;
        self.flags.is_error = false;
        self.flags.message.clear();
    }

    fn reject(&mut self, ticket: u64, message: String) {
        if ticket != self.dispatched {
            return;
        }
        self.flags.is_loading = false;
        self.flags.is_success = false;
        self.flags.is_error = true;
        self.flags.message = message;
    }

    pub(crate) fn reset(&mut self) {
        self.flags = LifecycleFlags::default();
    }

    pub(crate) fn snapshot(&self) -> LifecycleFlags {
        self.flags.clone()
    }
}

/// Run one remote operation under lifecycle tracking.
///
/// The operation future carries its own store mutation on the success path;
/// this wrapper only manages the flags.
pub(crate) async fn track<T, F>(lifecycle: &Mutex<Lifecycle>, op: F) -> Result<T, Error>
where
    F: Future<Output = Result<T, Error>>,
{
    let ticket = lifecycle.lock().unwrap().begin();

    match op.await {
        Ok(value) => {
            lifecycle.lock().unwrap().fulfill(ticket);
            Ok(value)
        }
        Err(err) => {
            lifecycle.lock().unwrap().reject(ticket, err.user_message());
            Err(err)
        }
    }
}
