use gios_reader::config::AppConfig;
use gios_reader::gios::GiosClient;
use gios_reader::reader::StationReader;
use gios_reader::scheduler;
use gios_reader::web::{AppState, create_router};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gios_reader=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(2);
        }
    };

    // Create GIOS client
    let client = GiosClient::new(config.gios.clone()).expect("Failed to create GIOS client");
    let reader = StationReader::new(config.station_id.clone(), client);

    let state = AppState::new(config.station_id.clone());

    // Refresh in the background; the first cycle runs immediately
    tokio::spawn(scheduler::run(reader, state.clone(), config.scan_interval));

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind status server");
    info!(
        station = %config.station_id,
        base_url = %config.gios.base_url,
        interval_secs = config.scan_interval.as_secs(),
        "GIOS station reader listening on http://{}",
        config.bind_addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Status server failed");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        eprintln!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
