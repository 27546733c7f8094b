//! Average Calculator - Main Entry Point

use anyhow::Result;
use clap::{Arg, Command, value_parser};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use average_calculator::{CalculatorConfig, NumberKind, start_server};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "average_calculator=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse command line arguments
    let matches = Command::new("average-calculator")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Rolling average over a bounded window of provider-supplied numbers")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("calculator.toml"),
        )
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .help("Listening port (overrides config)")
                .value_parser(value_parser!(u16)),
        )
        .arg(
            Arg::new("window-size")
                .short('w')
                .long("window-size")
                .value_name("N")
                .help("Window capacity (overrides config)")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("routes")
                .long("routes")
                .help("Print available routes and exit")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    // Load configuration
    let default_config = "calculator.toml".to_string();
    let config_path = matches
        .get_one::<String>("config")
        .unwrap_or(&default_config);
    let mut config = match CalculatorConfig::from_file(config_path) {
        Ok(config) => {
            info!(
                "Loaded configuration from: {} (CALCULATOR__* environment overrides applied)",
                config_path
            );
            config
        }
        Err(e) => {
            error!("Failed to load config from {}: {}", config_path, e);
            info!("Using default configuration");
            CalculatorConfig::default()
        }
    };

    if let Some(port) = matches.get_one::<u16>("port") {
        config.server.port = *port;
    }
    if let Some(capacity) = matches.get_one::<usize>("window-size") {
        config.window.capacity = *capacity;
    }

    // Print routes if requested
    if matches.get_flag("routes") {
        average_calculator::server::print_routes(&config);
        return Ok(());
    }

    // Print startup information
    info!(
        "Starting Average Calculator v{}",
        env!("CARGO_PKG_VERSION")
    );
    info!("Server will bind to: {}", config.server_address());
    info!("Window capacity: {}", config.window.capacity);
    info!("Providers (timeout {}ms):", config.providers.timeout_ms);
    for kind in NumberKind::ALL {
        info!("  {}: {}", kind, config.providers.url_for(kind));
    }

    info!("Features enabled:");
    info!("  CORS: {}", config.cors.enabled);
    info!("  Compression: {}", config.server.compression);
    info!("  Request logging: {}", config.monitoring.request_logging);

    // Start the server
    if let Err(e) = start_server(config).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
