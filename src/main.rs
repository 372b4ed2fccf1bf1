mod api;
mod config;
mod database;
mod models;
mod services;
mod state;
mod utils;

use actix_cors::Cors;
use actix_web::{
    middleware::{Compress, Logger},
    web, App, HttpServer,
};
use dotenv::dotenv;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = config::Config::from_env().map_err(std::io::Error::other)?;

    log::info!("🚀 Starting Veridoc API...");
    log::info!("📊 Database: {}", config.database_name);

    // Single connection pool for the process lifetime
    let db = database::MongoDB::new(&config.database_url, &config.database_name)
        .await
        .map_err(|e| {
            log::error!("❌ Failed to connect to MongoDB: {}", e);
            std::io::Error::other(e)
        })?;

    log::info!("✅ MongoDB connected successfully");

    let state = web::Data::new(state::AppState::from_mongo(&db));

    log::info!("🌐 Server starting on {}:{}", config.host, config.port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", config.host, config.port);

    let openapi = api::swagger::ApiDoc::openapi();

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(api::json_config())
            .app_data(api::query_config())
            .wrap(Compress::default())
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone())
            )
            .configure(api::configure)
            .default_service(web::to(api::not_found))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
