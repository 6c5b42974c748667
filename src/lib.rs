pub mod collectors;
pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod protocol;

mod utils;

use crate::collectors::network::SysfsCounters;
use crate::config::AppConfig;
use crate::filter::StatusFilter;
use crate::protocol::splice::ANCHOR_NAME;
use anyhow::Context;
use log::{error, info};
use std::error::Error;
use tokio::io::{self, BufReader};

/// Filter i3status output from stdin to stdout until stdin closes.
pub async fn run(config: &AppConfig) -> anyhow::Result<()> {
    let counters = SysfsCounters::new(&config.network.sysfs_root, &config.network.interface);
    info!(
        "Starting on {} ({}, {})",
        config.network.interface,
        counters.rx_path().display(),
        counters.tx_path().display()
    );

    let filter = StatusFilter::new(BufReader::new(io::stdin()), io::stdout(), counters, ANCHOR_NAME);

    match filter.run().await {
        Ok(()) => {
            info!("Input closed, exiting");
            Ok(())
        }
        Err(e) => {
            error!("Status filter error: {e}");
            // Print chain of error causes
            let mut source = e.source();
            while let Some(cause) = source {
                error!("Caused by: {cause}");
                source = cause.source();
            }
            Err(e).context("Status filter stopped")
        }
    }
}
