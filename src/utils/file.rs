use crate::error::{NetspeedError, Result};
use log::trace;
use std::path::Path;

/// Read a single base-10 counter from a sysfs style file.
///
/// The file holds one non-negative integer, optionally followed by a newline.
pub async fn read_counter(path: &Path) -> Result<u64> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| NetspeedError::CounterUnavailable {
            path: path.to_path_buf(),
            source,
        })?;

    let number = contents.trim_end_matches(['\n', '\r']);
    let value = number
        .parse::<u64>()
        .map_err(|source| NetspeedError::CounterParse {
            path: path.to_path_buf(),
            value: number.to_string(),
            source,
        })?;

    trace!("{} = {}", path.display(), value);
    Ok(value)
}
