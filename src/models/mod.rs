pub mod entry;
pub mod network;

pub use entry::StatusEntry;
pub use network::{ByteCounters, NetworkRate, RateSample};
