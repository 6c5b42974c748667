use env_logger::{Builder, WriteStyle};
use i3netspeed::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration first (without logging)
    let config = AppConfig::new().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {e:#}");
        // Fall back to default configuration
        AppConfig::default()
    });

    // Logs share stderr with nothing else; stdout belongs to i3bar
    Builder::new()
        .filter_level(config.get_log_level())
        .write_style(WriteStyle::Auto)
        .format_timestamp_secs()
        .target(env_logger::Target::Stderr)
        .init();

    i3netspeed::run(&config).await
}
