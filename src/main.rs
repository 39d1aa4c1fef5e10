use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::{Logger, NormalizePath};
use actix_web::{web, App, HttpServer};

use storefront::auth::TokenService;
use storefront::repositories::{
    ProductRepository, SqliteProductRepository, SqliteUserRepository, UserRepository,
};
use storefront::timeout::RequestTimeout;
use storefront::{database, routes, Config};

fn startup_error(context: &str, err: impl std::fmt::Display) -> io::Error {
    log::error!("{}: {}", context, err);
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Loading config");
    let config = Config::from_env().map_err(|e| startup_error("Invalid configuration", e))?;
    let tokens = Arc::new(
        TokenService::from_config(&config).map_err(|e| startup_error("Token service", e))?,
    );

    log::info!("Connecting to database");
    let pool = database::connect(&config)
        .await
        .map_err(|e| startup_error("Failed to connect to database", e))?;

    log::info!("Running migrations");
    database::migrate(&pool)
        .await
        .map_err(|e| startup_error("Failed to run migrations", e))?;

    let products: Arc<dyn ProductRepository> =
        Arc::new(SqliteProductRepository::new(pool.clone()));
    let users: Arc<dyn UserRepository> = Arc::new(SqliteUserRepository::new(pool.clone()));
    let bind_address = (config.server_host.clone(), config.server_port);
    let request_timeout = config.request_timeout;
    let config = web::Data::new(config);

    log::info!("Starting server at {}", config.server_url());
    HttpServer::new(move || {
        let tokens = tokens.clone();
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::from(products.clone()))
            .app_data(web::Data::from(users.clone()))
            .app_data(config.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(RequestTimeout::new(request_timeout))
            .wrap(NormalizePath::trim())
            .wrap(Logger::default())
            .configure(move |cfg| routes::config(cfg, tokens))
    })
    .bind(bind_address)?
    .run()
    .await
}
