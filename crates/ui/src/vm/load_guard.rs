use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out tickets for async loads owned by a view.
///
/// Starting a new load or cancelling the guard invalidates every ticket issued
/// before it, so late results from an abandoned load are dropped instead of
/// written into a view that moved on.
#[derive(Clone, Debug, Default)]
pub struct LoadGuard {
    generation: Arc<AtomicU64>,
}

impl LoadGuard {
    /// Invalidate outstanding tickets and issue a fresh one.
    #[must_use]
    pub fn begin(&self) -> LoadTicket {
        let issued = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        LoadTicket {
            generation: Arc::clone(&self.generation),
            issued,
        }
    }

    /// Ticket for the load currently in flight, without invalidating it.
    #[must_use]
    pub fn current(&self) -> LoadTicket {
        LoadTicket {
            generation: Arc::clone(&self.generation),
            issued: self.generation.load(Ordering::Acquire),
        }
    }

    /// Invalidate every outstanding ticket, e.g. when the view is torn down.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }
}

#[derive(Clone, Debug)]
pub struct LoadTicket {
    generation: Arc<AtomicU64>,
    issued: u64,
}

impl LoadTicket {
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.generation.load(Ordering::Acquire) == self.issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_load_invalidates_older_ticket() {
        let guard = LoadGuard::default();
        let first = guard.begin();
        assert!(first.is_live());

        let second = guard.begin();
        assert!(!first.is_live());
        assert!(second.is_live());
    }

    #[test]
    fn cancel_invalidates_everything() {
        let guard = LoadGuard::default();
        let ticket = guard.begin();
        let current = guard.current();
        assert!(current.is_live());

        guard.cancel();
        assert!(!ticket.is_live());
        assert!(!current.is_live());
    }
}
