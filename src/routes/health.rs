use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;
use sqlx::SqlitePool;

use crate::database;
use crate::error::AppError;

/// Health check endpoint
///
/// Returns the current status of the API and timestamp once the database answers.
#[get("/health")]
pub async fn health(pool: web::Data<SqlitePool>) -> Result<impl Responder, AppError> {
    database::ping(&pool).await?;

    Ok(HttpResponse::Ok().json(json!({
        "status": "ok",
        "timestamp": Utc::now()
    })))
}
