use chrono::{DateTime, Utc};
use std::fmt;

/// Raw byte counters of one interface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByteCounters {
    pub received: u64,
    pub transmitted: u64,
}

/// Baseline for the next rate computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateSample {
    pub timestamp: DateTime<Utc>,
    pub received: u64,
    pub transmitted: u64,
}

impl RateSample {
    pub fn new(timestamp: DateTime<Utc>, counters: ByteCounters) -> Self {
        Self {
            timestamp,
            received: counters.received,
            transmitted: counters.transmitted,
        }
    }
}

/// Throughput in megabits per second. Negative after a counter reset.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NetworkRate {
    pub recv_mbps: f64,
    pub sent_mbps: f64,
}

impl fmt::Display for NetworkRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R: {:.2} T: {:.2} (Mbit/s)", self.recv_mbps, self.sent_mbps)
    }
}
