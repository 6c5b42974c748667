use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NetspeedError {
    #[error("Failed to read protocol header line {line}")]
    Header {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read status line")]
    Input(#[source] io::Error),

    #[error("Malformed status line")]
    MalformedPayload(#[from] serde_json::Error),

    #[error("Counter {} is unavailable", path.display())]
    CounterUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Counter {} holds {value:?}, expected a byte count", path.display())]
    CounterParse {
        path: PathBuf,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Failed to write status line")]
    Output(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, NetspeedError>;
