#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::middleware::{Logger, NormalizePath};
use actix_web::{http::StatusCode, test, web, App};
use serde_json::json;
use sqlx::SqlitePool;
use storefront::auth::{TokenResponse, TokenService};
use storefront::repositories::{
    ProductRepository, SqliteProductRepository, SqliteUserRepository, UserRepository,
};
use storefront::{database, routes, Config};

/// Everything a test needs to build the app and poke at its state directly.
pub struct TestContext {
    pub pool: SqlitePool,
    pub config: Config,
    pub tokens: Arc<TokenService>,
    pub products: Arc<dyn ProductRepository>,
    pub users: Arc<dyn UserRepository>,
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        server_port: 0,
        server_host: "127.0.0.1".to_string(),
        jwt_secret: "integration-test-secret".to_string(),
        jwt_expires_in: 300,
        bcrypt_cost: 4,
        request_timeout: Duration::from_secs(5),
    }
}

pub async fn setup() -> TestContext {
    let _ = env_logger::builder().is_test(true).try_init();

    let pool = database::connect_in_memory()
        .await
        .expect("Failed to open in-memory database");
    database::migrate(&pool)
        .await
        .expect("Failed to create schema");

    let config = test_config();
    let tokens = Arc::new(TokenService::from_config(&config).expect("Failed to build tokens"));

    TestContext {
        products: Arc::new(SqliteProductRepository::new(pool.clone())),
        users: Arc::new(SqliteUserRepository::new(pool.clone())),
        pool,
        config,
        tokens,
    }
}

pub async fn init_app(
    ctx: &TestContext,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    let tokens = ctx.tokens.clone();
    test::init_service(
        App::new()
            .app_data(web::Data::new(ctx.pool.clone()))
            .app_data(web::Data::from(ctx.products.clone()))
            .app_data(web::Data::from(ctx.users.clone()))
            .app_data(web::Data::new(ctx.config.clone()))
            .wrap(NormalizePath::trim())
            .wrap(Logger::default())
            .configure(move |cfg| routes::config(cfg, tokens)),
    )
    .await
}

/// Registers a user through the API and returns the response status.
pub async fn register_user<S, B>(app: &S, name: &str, email: &str, password: &str) -> StatusCode
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/user")
        .set_json(json!({
            "name": name,
            "email": email,
            "password": password
        }))
        .to_request();
    test::call_service(app, req).await.status()
}

/// Registers a user and logs in, returning the bearer token.
pub async fn register_and_login<S, B>(app: &S, email: &str, password: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let status = register_user(app, "Test User", email, password).await;
    assert_eq!(status, StatusCode::CREATED, "Setup: failed to register {}", email);

    let req = test::TestRequest::post()
        .uri("/user/generate_token")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::OK, "Setup: failed to log in {}", email);

    let body: TokenResponse = test::read_body_json(resp).await;
    body.access_token
}

pub fn bearer(token: &str) -> (actix_web::http::header::HeaderName, String) {
    (
        actix_web::http::header::AUTHORIZATION,
        format!("Bearer {}", token),
    )
}
