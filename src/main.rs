mod web;

use actix_files::Files;
use actix_web::middleware::Logger;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use std::io;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use socialit::api::CmsClient;
use socialit::config::AppConfig;
use socialit::services::{LocalSettingsCache, SettingsSync};

use crate::web::middleware::SecurityHeaders;
use crate::web::AppState;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::new(&config.log_filter))
        .init();

    let cms = CmsClient::new(&config.api_url, config.request_timeout)
        .map_err(io::Error::other)?;
    let local = LocalSettingsCache::open(&config.cache_dir);
    let settings = SettingsSync::new(cms, config.fetch, local);
    let state = Data::new(AppState::new(settings));

    log::info!(
        "Serving on {} against CMS backend {}",
        config.bind_addr,
        config.api_url
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(SecurityHeaders)
            .wrap(Logger::default())
            .configure(web::handlers::configure)
            .service(Files::new("/static", "./static").prefer_utf8(true))
            .configure(web::handlers::configure_catch_all)
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
