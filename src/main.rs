use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use scheme_match::config::Settings;
use scheme_match::core::Matcher;
use scheme_match::models::ScoringWeights;
use scheme_match::routes::{self, handle_json_payload_error, handle_query_payload_error, AppState};
use scheme_match::services::{Assistant, AssistantClient, SchemeCatalog};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            init_logging("info", "json");
            error!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings.logging.level, &settings.logging.format);

    info!("Starting scheme matching service...");

    // Catalog is read-only from here on
    let catalog = Arc::new(SchemeCatalog::load_or_empty(&settings.catalog.path));

    let assistant = AssistantClient::new(&settings.assistant).map_err(|e| {
        error!("Failed to create assistant client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    if !assistant.is_configured() {
        warn!("ANTHROPIC_API_KEY not set, /chat will be unavailable");
    }

    let weights = ScoringWeights::from(&settings.scoring.weights);
    let matcher = Matcher::new(catalog.clone(), weights);

    info!("Matcher initialized with weights: {:?}", weights);

    let app_state = AppState {
        catalog,
        matcher,
        assistant: Arc::new(assistant),
        matching: settings.matching.clone(),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
