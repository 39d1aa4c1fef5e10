use crate::{
    auth::{LoginRequest, TokenResponse, TokenService},
    config::Config,
    error::AppError,
    models::{User, UserInput},
    repositories::UserRepository,
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new user
///
/// Hashes the password and stores the user. Responds `201 Created` with no body,
/// `400` for an undecodable body or an empty field, `500` if the email is taken or
/// storage fails.
#[post("")]
pub async fn create_user(
    repo: web::Data<dyn UserRepository>,
    config: web::Data<Config>,
    user_data: web::Json<UserInput>,
) -> Result<impl Responder, AppError> {
    let input = user_data.into_inner();
    input.validate()?;

    let cost = config.bcrypt_cost;
    let user = web::block(move || {
        User::with_cost(&input.name, &input.email, &input.password, cost)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Password hashing was cancelled: {}", e)))??;

    repo.create(&user).await?;
    log::info!("Registered user {}", user.id);

    Ok(HttpResponse::Created().finish())
}

/// Issue an access token
///
/// Exchanges an email and password for a bearer token. Responds `404` for an unknown
/// (or empty) email, `401` for a wrong (or empty) password and `500` if the token
/// cannot be signed.
#[post("/generate_token")]
pub async fn generate_token(
    repo: web::Data<dyn UserRepository>,
    tokens: web::Data<TokenService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let login = login_data.into_inner();
    let user = repo.find_by_email(&login.email).await?;

    let (user, password_ok) = web::block(move || {
        let ok = user.validate_password(&login.password);
        (user, ok)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Password check was cancelled: {}", e)))?;

    if !password_ok {
        log::warn!("Rejected token request for user {}: wrong password", user.id);
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    let access_token = tokens.issue(&user)?;
    Ok(HttpResponse::Ok().json(TokenResponse { access_token }))
}
