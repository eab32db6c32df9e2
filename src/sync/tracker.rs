/// Identifies one issued context request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    pub seq: u64,
    pub timestamp_seconds: u64,
}

/// Issues monotonically increasing request tickets
///
/// Only the most recently issued ticket is current; responses carrying any
/// older ticket are stale and must be discarded.
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: u64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self, timestamp_seconds: u64) -> RequestTicket {
        self.latest += 1;
        RequestTicket {
            seq: self.latest,
            timestamp_seconds,
        }
    }

    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        ticket.seq == self.latest
    }

    /// Number of tickets issued so far
    pub fn issued(&self) -> u64 {
        self.latest
    }
}
