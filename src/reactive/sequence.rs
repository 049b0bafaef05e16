//! Per-store request sequencing so an older response never overwrites a newer one.

use std::sync::atomic::{AtomicU64, Ordering};

/// Ticket handed out when a fetch is issued.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Orders the responses of one kind of fetch. A store keeps one per fetch
/// operation so unrelated fetches never discard each other.
#[derive(Debug, Default)]
pub struct RequestSequence {
    issued: AtomicU64,
    applied: AtomicU64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Claim the right to apply a response. False when a newer response was
    /// already applied.
    pub fn try_apply(&self, ticket: Ticket) -> bool {
        self.applied.fetch_max(ticket.0, Ordering::AcqRel) < ticket.0
    }
}
