use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use kindred_algo::config::Settings;
use kindred_algo::core::Matcher;
use kindred_algo::models::ScoringWeights;
use kindred_algo::routes::{self, AppState};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    // Initialize logging; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match settings.logging.format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "json" => subscriber.json().init(),
        _ => subscriber.init(),
    }

    info!("Starting Kindred Algo matching service...");

    let weights = ScoringWeights::from(&settings.scoring.weights);
    if weights.intent < 0.0 || weights.similarity < 0.0 {
        error!("Scoring weights must be non-negative, got {:?}", weights);
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "negative scoring weights",
        ));
    }

    let matcher = Matcher::new(weights);

    info!("Matcher initialized with weights: {:?}", matcher.weights());

    let app_state = AppState {
        matcher,
        matching: settings.matching.clone(),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
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
