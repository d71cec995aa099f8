//! Booking API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p booking-api
//! ```
//!
//! Configuration is loaded from environment variables (and `.env`).

use booking_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Failed to load configuration: {e}");
        e
    })?;

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        store = ?config.store,
        address = %config.api.address(),
        "Configuration loaded"
    );

    booking_api::run(config).await?;

    Ok(())
}
