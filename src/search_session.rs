use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

/// Generation number handed out when a search starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Holds the outcome currently on display.
///
/// Every search takes a ticket before doing any I/O and commits its outcome with that
/// ticket when done. An outcome from a search older than the one on display is dropped,
/// so a slow response can never replace the result of a search started after it.
pub struct SearchSession<T> {
    generation: AtomicU64,
    latest: Mutex<Option<(Ticket, T)>>,
}

impl<T: Clone> SearchSession<T> {
    pub fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
            latest: Mutex::new(None),
        }
    }

    /// Starts a new search
    pub fn begin(&self) -> Ticket {
        Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Puts an outcome on display unless a newer search already did.
    ///
    /// Returns whether the outcome was accepted.
    ///
    /// # Arguments
    ///
    /// * 'ticket' - ticket taken when the search began
    /// * 'outcome' - what the search produced
    pub async fn commit(&self, ticket: Ticket, outcome: T) -> bool {
        let mut latest = self.latest.lock().await;
        if let Some((shown, _)) = latest.as_ref() {
            if *shown > ticket {
                return false;
            }
        }

        *latest = Some((ticket, outcome));
        true
    }

    /// Returns the outcome on display, if any search has completed
    pub async fn current(&self) -> Option<T> {
        self.latest.lock().await.as_ref().map(|(_, outcome)| outcome.clone())
    }
}

impl<T: Clone> Default for SearchSession<T> {
    fn default() -> Self {
        Self::new()
    }
}
