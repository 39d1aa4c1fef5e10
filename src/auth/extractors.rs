use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::auth::token::Claims;
use crate::error::AppError;

/// The id of the user a request was authenticated as.
///
/// Only available on routes wrapped by `AuthMiddleware`, which stores the verified
/// `Claims` in the request extensions. Anywhere else extraction fails with 401.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser(pub Uuid);

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>() {
            Some(claims) => ready(Ok(AuthenticatedUser(claims.sub))),
            None => {
                let err = AppError::Unauthorized("Missing authentication".to_string());
                ready(Err(err.into()))
            }
        }
    }
}
