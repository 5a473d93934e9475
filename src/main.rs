use clap::Parser;
use log::{LevelFilter, error, info, warn};
use simplelog::{ConfigBuilder, WriteLogger};

use parley::core::config::{self, ThemeKind};
use parley::tui;

/// Parley — a terminal front-end for chatting with mock AI models.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Fetch catalogs over HTTP from this base URL instead of the built-ins
    #[arg(long, value_name = "URL")]
    catalog_url: Option<String>,

    /// Color theme: dark or light
    #[arg(long, value_parser = clap::value_parser!(ThemeKind))]
    theme: Option<ThemeKind>,

    /// Log verbosity (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

fn init_logging(level: LevelFilter) {
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();
    match std::fs::File::create("parley.log") {
        Ok(file) => {
            let _ = WriteLogger::init(level, config, file);
        }
        Err(e) => eprintln!("Warning: could not create parley.log: {e}"),
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    let args = Args::parse();
    init_logging(args.log_level);
    info!("Parley v{} starting", env!("CARGO_PKG_VERSION"));

    let file_config = config::load_config().unwrap_or_else(|e| {
        warn!("Falling back to default config: {}", e);
        Default::default()
    });
    let resolved = config::resolve(&file_config, args.theme, args.catalog_url.as_deref());
    info!(
        "Resolved config: theme={}, catalog={:?}",
        resolved.theme.label(),
        resolved.catalog_source
    );

    if let Err(e) = tui::run(&resolved).await {
        error!("TUI error: {}", e);
        return Err(e);
    }
    Ok(())
}
