use crate::models::StatusEntry;

/// Segment the throughput entry is placed in front of.
pub const ANCHOR_NAME: &str = "ethernet";

/// Place `inserted` directly before the first entry named `anchor`, or at the
/// end when there is no such entry. All other entries keep their order.
pub fn splice(entries: Vec<StatusEntry>, anchor: &str, inserted: StatusEntry) -> Vec<StatusEntry> {
    let position = entries.iter().position(|entry| entry.is_named(anchor));

    let mut spliced = Vec::with_capacity(entries.len() + 1);
    let mut rest = entries.into_iter();
    if let Some(index) = position {
        spliced.extend(rest.by_ref().take(index));
    } else {
        spliced.extend(rest.by_ref());
    }
    spliced.push(inserted);
    spliced.extend(rest);
    spliced
}
