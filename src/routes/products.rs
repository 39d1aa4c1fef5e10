use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{Product, ProductInput, ProductQuery},
    repositories::ProductRepository,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

/// Lists products ordered by creation time.
///
/// ## Query Parameters:
/// - `page` (optional, default 0): 1-based page number. `0` disables paging.
/// - `limit` (optional, default 10): page size. `0` disables paging.
/// - `sort` (optional, default `asc`): `asc` or `desc`; anything else means `asc`.
///
/// Unparsable `page`/`limit` values fall back to their defaults.
///
/// ## Responses:
/// - `200 OK`: JSON array of `Product` objects (possibly empty).
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `500 Internal Server Error`: storage failure.
#[get("")]
pub async fn list_products(
    repo: web::Data<dyn ProductRepository>,
    query: web::Query<ProductQuery>,
) -> Result<impl Responder, AppError> {
    let products = repo
        .find_all(query.page(), query.limit(), query.sort())
        .await?;

    Ok(HttpResponse::Ok().json(products))
}

/// Creates a product.
///
/// ## Request Body:
/// `{"name": string, "price": number}`; `name` must not be empty and `price` must not
/// be negative.
///
/// ## Responses:
/// - `201 Created`: the stored `Product` as JSON.
/// - `400 Bad Request`: undecodable body or failed validation.
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `500 Internal Server Error`: storage failure.
#[post("")]
pub async fn create_product(
    repo: web::Data<dyn ProductRepository>,
    product_data: web::Json<ProductInput>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let input = product_data.into_inner();
    let product = Product::new(input.name, input.price)?;

    repo.create(&product).await?;
    log::info!("User {} created product {}", user.0, product.id);

    Ok(HttpResponse::Created().json(product))
}

/// Retrieves a product by id.
///
/// ## Responses:
/// - `200 OK`: the `Product` as JSON.
/// - `400 Bad Request`: the id is not a UUID.
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `404 Not Found`: no product has this id.
#[get("/{id}")]
pub async fn get_product(
    repo: web::Data<dyn ProductRepository>,
    product_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let product = repo.find_by_id(product_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(product))
}

/// Replaces a product's name and price.
///
/// The whole client-owned record is overwritten; `id` and `created_at` are kept.
///
/// ## Responses:
/// - `200 OK`: no body.
/// - `400 Bad Request`: malformed id, undecodable body or failed validation.
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `404 Not Found`: no product has this id.
/// - `500 Internal Server Error`: storage failure.
#[put("/{id}")]
pub async fn update_product(
    repo: web::Data<dyn ProductRepository>,
    product_id: web::Path<Uuid>,
    product_data: web::Json<ProductInput>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    product_data.validate()?;

    let existing = repo.find_by_id(product_id.into_inner()).await?;
    let product = existing.overwrite(product_data.into_inner())?;
    repo.update(&product).await?;
    log::info!("User {} updated product {}", user.0, product.id);

    Ok(HttpResponse::Ok().finish())
}

/// Deletes a product by id.
///
/// ## Responses:
/// - `200 OK`: no body.
/// - `400 Bad Request`: the id is not a UUID.
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `404 Not Found`: no product has this id.
/// - `500 Internal Server Error`: storage failure.
#[delete("/{id}")]
pub async fn delete_product(
    repo: web::Data<dyn ProductRepository>,
    product_id: web::Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let id = product_id.into_inner();
    repo.delete(id).await?;
    log::info!("User {} deleted product {}", user.0, id);

    Ok(HttpResponse::Ok().finish())
}
