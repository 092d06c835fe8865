//! Cancellable delayed notifications.
//!
//! A [`Debouncer`] keeps at most one pending timer. Scheduling aborts the
//! previous timer and starts a new one; when a timer survives its delay it
//! sends a [`Ticket`] on the channel. Since an abort can race a timer that
//! has already sent, the receiver confirms each ticket with
//! [`Debouncer::accept`] before acting on it.

use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::trace;

/// Identifies one scheduled notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

/// Single-slot debounce timer.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    sender: UnboundedSender<Ticket>,
    pending: Option<JoinHandle<()>>,
    latest: u64,
    fired: bool,
}

impl Debouncer {
    /// Creates a debouncer sending tickets to `sender`.
    #[must_use]
    pub fn new(delay: Duration, sender: UnboundedSender<Ticket>) -> Self {
        Self {
            delay,
            sender,
            pending: None,
            latest: 0,
            fired: true,
        }
    }

    /// Creates a debouncer together with its receiving end.
    #[must_use]
    pub fn channel(delay: Duration) -> (Self, UnboundedReceiver<Ticket>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(delay, tx), rx)
    }

    /// The configured quiet period.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Restarts the timer, superseding any pending ticket.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn schedule(&mut self) -> Ticket {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        self.latest += 1;
        self.fired = false;

        let ticket = Ticket(self.latest);
        let sender = self.sender.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the app is shutting down.
            let _ = sender.send(ticket);
        }));
        trace!(ticket = ticket.0, "debounce scheduled");
        ticket
    }

    /// Drops the pending timer, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        self.fired = true;
    }

    /// Returns true if `ticket` is the latest one and has not been accepted.
    pub fn accept(&mut self, ticket: Ticket) -> bool {
        if self.fired || ticket.0 != self.latest {
            return false;
        }
        self.fired = true;
        self.pending = None;
        true
    }

    /// Returns true while a scheduled ticket has not yet been accepted.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        !self.fired
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(200);

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let (mut debouncer, mut rx) = Debouncer::channel(DELAY);
        let ticket = debouncer.schedule();
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(199)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(rx.recv().await, Some(ticket));
        assert!(debouncer.accept(ticket));
        assert!(!debouncer.accept(ticket));
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_supersedes() {
        let (mut debouncer, mut rx) = Debouncer::channel(DELAY);
        let first = debouncer.schedule();
        tokio::time::sleep(Duration::from_millis(100)).await;
        let second = debouncer.schedule();
        assert_ne!(first, second);

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(rx.recv().await, Some(second));
        assert!(rx.try_recv().is_err());
        assert!(!debouncer.accept(first));
        assert!(debouncer.accept(second));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel() {
        let (mut debouncer, mut rx) = Debouncer::channel(DELAY);
        let ticket = debouncer.schedule();
        debouncer.cancel();
        tokio::time::sleep(DELAY * 2).await;
        assert!(rx.try_recv().is_err());
        assert!(!debouncer.accept(ticket));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_timer() {
        let (mut debouncer, mut rx) = Debouncer::channel(DELAY);
        debouncer.schedule();
        drop(debouncer);
        tokio::time::sleep(DELAY * 2).await;
        assert!(rx.recv().await.is_none());
    }
}
