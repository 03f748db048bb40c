mod api;
mod config;
mod database;
mod models;
mod services;
mod utils;

#[cfg(test)]
mod test_support;

use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::io;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppConfig;
use crate::database::{MongoDB, MongoUserRepository};
use crate::services::{AdminNotifier, LogNotifier, SmtpNotifier, UserService};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    log::info!("🚀 Starting User CRUD API...");

    let db = MongoDB::new(&config.mongo_uri, config.database_name.as_deref())
        .await
        .map_err(|e| {
            log::error!("❌ Failed to connect to MongoDB: {}", e);
            io::Error::other(e)
        })?;

    let repository = Arc::new(MongoUserRepository::new(db.database()));

    let notifier: Arc<dyn AdminNotifier> = match &config.smtp {
        Some(smtp) => {
            log::info!("📧 Admin notifications via {}:{} to {}", smtp.host, smtp.port, smtp.admin_email);
            Arc::new(SmtpNotifier::new(smtp).map_err(io::Error::other)?)
        }
        None => {
            log::warn!("⚠️  SMTP_EMAIL/SMTP_PASSWORD not set, admin notifications are only logged");
            Arc::new(LogNotifier::new().map_err(io::Error::other)?)
        }
    };

    let service = web::Data::new(UserService::new(
        repository,
        notifier,
        config.db_timeout,
        config.notify_timeout,
    ));

    log::info!("🌐 Server starting on {}:{}", config.host, config.port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", config.host, config.port);

    HttpServer::new(move || {
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(service.clone())
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi),
            )
            .configure(api::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
