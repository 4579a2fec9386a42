use clap::Parser;
use concierge::core::config::{self, CliOverrides, ConciergeConfig};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "concierge", about = "Terminal chat widget backed by an automation webhook")]
struct Args {
    /// Webhook endpoint that answers chat messages
    #[arg(long)]
    webhook_url: Option<String>,

    /// Start a new conversation every time the panel is closed
    #[arg(long)]
    reset_on_close: bool,

    /// Open the chat panel on startup
    #[arg(long)]
    open: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to concierge.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("concierge.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Falling back to default config: {}", e);
        ConciergeConfig::default()
    });
    let cli = CliOverrides {
        webhook_url: args.webhook_url,
        reset_on_close: args.reset_on_close,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!(
        "Concierge starting up (webhook={}, pacing={:?}, reset_on_close={})",
        resolved.webhook_url,
        resolved.pacing_delay,
        resolved.reset_on_close
    );

    concierge::tui::run(resolved, args.open)
}
