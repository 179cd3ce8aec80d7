use crate::config::AppConfig;
use crate::responses::error_to_response;
use crate::router::{handle, AppState};
use astra::Server;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod domain;
mod errors;
mod extract;
mod fetch;
mod forms;
mod geocode;
mod responses;
mod router;
mod spreadsheets;
mod storage;
mod templates;
mod views;
mod workflow;

#[cfg(test)]
mod tests;

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    let state = AppState::from_config(&config)?;

    tracing::info!(
        addr = %config.bind_addr,
        data_file = %config.data_file.display(),
        workers = config.max_workers,
        "Starting server"
    );

    let server = Server::bind(&config.bind_addr).max_workers(config.max_workers);

    server.serve(move |req: astra::Request, _info: astra::ConnectionInfo| {
        let method = req.method().clone();
        let path = req.uri().path().to_owned();

        let resp = match handle(req, &state) {
            Ok(resp) => resp,
            Err(err) => error_to_response(err),
        };

        tracing::info!(%method, path = %path, status = resp.status().as_u16(), "Handled request");
        resp
    })?;

    tracing::info!("Server shut down cleanly");
    Ok(())
}

fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rental_visits=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run() {
        tracing::error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}
