#![warn(clippy::all, clippy::pedantic)]

use std::net::{IpAddr, SocketAddr};
use std::path::Path;

use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::{App, HttpServer, web};
use upwatch_service::config::HistoryConfig;
use upwatch_service::{Config, MonitorService, build_service};

mod error;
mod routes;
#[cfg(test)]
mod test_support;

use error::AppError;
use logger::init_tracing;

#[actix_web::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_config(None::<&Path>)?;
    let ip: IpAddr = config.server.bind.parse()?;
    let addr = SocketAddr::new(ip, config.server.port);

    let service = build_service(&config).await?;
    tracing::info!("Recording samples to {}", config.database.path.display());

    run_server(addr, service, config.history).await
}

/// Every response may be read from any origin
fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new().add(("Access-Control-Allow-Origin", "*"))
}

async fn run_server(
    addr: SocketAddr,
    service: MonitorService,
    history: HistoryConfig,
) -> Result<(), AppError> {
    let service = web::Data::new(service);
    let history = web::Data::new(history);

    tracing::info!("Listening on http://{addr}");
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(cors_headers())
            .app_data(service.clone())
            .app_data(history.clone())
            .configure(routes::routes)
    })
    .bind(addr)?
    .run()
    .await?;

    Ok(())
}
