pub mod health;
pub mod products;
pub mod users;

use std::sync::Arc;

use actix_web::web;

use crate::auth::{AuthMiddleware, TokenService};
use crate::error::AppError;

/// Wires every route, the token service and the extractor error handlers.
///
/// The caller registers the repositories, the pool and the `Config` as app data.
pub fn config(cfg: &mut web::ServiceConfig, tokens: Arc<TokenService>) {
    cfg.app_data(web::Data::from(tokens.clone()))
        .app_data(json_config())
        .app_data(path_config())
        .app_data(query_config())
        .service(health::health)
        .service(
            web::scope("/products")
                .wrap(AuthMiddleware::new(tokens))
                .service(products::list_products)
                .service(products::create_product)
                .service(products::get_product)
                .service(products::update_product)
                .service(products::delete_product),
        )
        .service(
            web::scope("/user")
                .service(users::create_user)
                .service(users::generate_token),
        );
}

/// Undecodable bodies are client errors (400) with a `{message}` body.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::Validation(format!("Invalid body: {}", err)).into())
}

/// Path segments that do not parse (e.g. a malformed id) are 400, not 404.
fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| AppError::Validation(format!("Invalid id: {}", err)).into())
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::Validation(format!("Invalid query: {}", err)).into())
}
