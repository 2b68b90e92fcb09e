mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use services::{MongoUserStore, UserStore};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Panics inside a worker are logged; actix replaces the worker and keeps serving
    std::panic::set_hook(Box::new(|info| {
        log::error!("💥 Unexpected error: {}", info);
    }));

    let config = config::AppConfig::from_env();

    log::info!("🚀 Starting Users Service...");
    log::info!("📊 Database: {}", config.database_url);

    // Startup is the only place a failure stops the process
    let db = match database::MongoDB::new(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            log::error!("❌ Error connecting to MongoDB: {}", e);
            std::process::exit(1);
        }
    };

    log::info!("✅ MongoDB connected successfully");

    let store: Arc<dyn UserStore> = Arc::new(MongoUserStore::new(&db));
    let store_data = web::Data::from(store);

    log::info!("🌐 Server starting on {}", config.bind_addr());
    log::info!("📚 Swagger UI available at: http://{}/swagger-ui/", config.bind_addr());

    let cors_config = config.clone();
    let server = HttpServer::new(move || {
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(store_data.clone())
            .wrap(middleware::build_cors(&cors_config))
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi)
            )
            .configure(api::configure)
    })
    .bind(config.bind_addr())?
    .run()
    .await;

    db.shutdown().await;

    server
}
