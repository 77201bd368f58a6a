use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use clap::Parser;
use smsdesk_api::config::ApiConfig;
use smsdesk_api::dispatch::DispatchEngine;
use smsdesk_api::helpers::database::initialize_database;
use smsdesk_api::helpers::sessions::SessionStore;
use smsdesk_api::integrations::build_transport;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long)]
    log_file_path: Option<String>,

    /// Config file to use instead of the per-user default
    #[arg(long)]
    config: Option<PathBuf>,
}

fn to_io_error(context: &str, e: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, format!("{context}: {e}"))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if let Some(log_path) = args.log_file_path {
        let log_path = std::path::Path::new(&log_path);
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(std::path::Path::new(".")),
            log_path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("smsdesk-api.log")),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        std::mem::forget(guard);

        tracing_subscriber::registry()
            .with(env_filter.clone())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(true)
                    .with_writer(std::io::stdout),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    // Load config
    let (config, config_path) = ApiConfig::load(args.config.as_deref())
        .map_err(|e| to_io_error("Failed to load config", e))?;
    tracing::info!("Config loaded from {:?}", config_path);

    // Initialize database
    let (db, db_path) =
        initialize_database(&config).map_err(|e| to_io_error("Failed to initialize database", e))?;
    tracing::info!("Database initialized at {:?}", db_path);

    let sessions = Arc::new(SessionStore::new(config.session().max_age_secs));

    let transport = build_transport(config.twilio.as_ref())
        .map_err(|e| to_io_error("Failed to initialize SMS transport", e))?;
    let send_delay = Duration::from_millis(config.dispatch().send_delay_ms);
    let engine = Arc::new(DispatchEngine::new(transport, send_delay));

    let admin = config.admin.clone().unwrap_or_default();
    if admin.credentials().is_some() {
        tracing::info!("Sign-in uses the admin configured in {:?}", config_path);
    }

    let (host, port) = config.server_address();
    tracing::info!("Starting server on {}:{}", host, port);

    HttpServer::new(move || {
        // Configure CORS
        let cors = if let Some(cors_config) = &config.cors {
            let mut cors_builder = Cors::default();
            for origin in &cors_config.allowed_origins {
                cors_builder = cors_builder.allowed_origin(origin);
            }
            cors_builder
                .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                .allowed_headers(vec!["Authorization", "Accept", "Content-Type"])
                .supports_credentials()
                .max_age(3600)
        } else {
            Cors::default()
                .allow_any_origin()
                .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                .allowed_headers(vec!["Authorization", "Accept", "Content-Type"])
                .max_age(3600)
        };

        App::new()
            .wrap(cors)
            .app_data(web::Data::new(db.clone()))
            .app_data(web::Data::new(sessions.clone()))
            .app_data(web::Data::new(engine.clone()))
            .app_data(web::Data::new(admin.clone()))
            .configure(smsdesk_api::configure_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
