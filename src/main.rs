mod adapters;
mod core;
mod ports;
mod safety;

use crate::core::crops;
use crate::core::refresh::Controller;
use crate::core::types::Config;
use adapters::console::{self, ConsoleDashboard};
use adapters::open_meteo::OpenMeteoClient;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = dotenv::dotenv() {
        eprintln!("WARNING: .env load failed: {}", e);
    }
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    tracing::info!(
        "location={} ({:.4}, {:.4}) refresh={}min crops={}",
        config.location_name,
        config.latitude,
        config.longitude,
        config.refresh_interval.as_secs() / 60,
        crops::CROPS.len()
    );

    safety::validate_startup(&config, crops::CROPS)?;

    let client = Arc::new(OpenMeteoClient::new(&config)?);
    let sink = Arc::new(ConsoleDashboard);

    let (command_tx, command_rx) = tokio::sync::mpsc::channel(16);
    console::spawn_command_reader(command_tx);

    Controller::new(client.clone(), client, sink, config)
        .run(command_rx)
        .await
}
