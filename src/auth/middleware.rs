use std::sync::Arc;

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error, HttpMessage, ResponseError,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::token::TokenService;
use crate::error::AppError;

/// Rejects requests without a valid `Authorization: Bearer <token>` header.
///
/// Rejected requests are answered with 401 and never reach the wrapped service.
/// Accepted requests carry the decoded `Claims` in their extensions.
#[derive(Clone)]
pub struct AuthMiddleware {
    tokens: Arc<TokenService>,
}

impl AuthMiddleware {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            tokens: self.tokens.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    tokens: Arc<TokenService>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let claims = bearer_token(&req)
            .ok_or_else(|| AppError::Unauthorized("Missing token".into()))
            .and_then(|token| self.tokens.verify(token));

        match claims {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(app_err) => {
                log::debug!("Rejected {} {}: {}", req.method(), req.path(), app_err);
                let response = req.into_response(app_err.error_response());
                Box::pin(async move { Ok(response.map_into_right_body()) })
            }
        }
    }
}

fn bearer_token(req: &ServiceRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::extractors::AuthenticatedUser;
    use crate::models::User;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};
    use uuid::Uuid;

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.0.to_string())
    }

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "John".to_string(),
            email: "j@j.com".to_string(),
            password: "unused".to_string(),
        }
    }

    #[actix_web::test]
    async fn test_valid_token_reaches_handler() {
        let tokens = Arc::new(TokenService::new("middleware_secret", 300).unwrap());
        let user = user();
        let token = tokens.issue(&user).unwrap();

        let app = test::init_service(
            App::new().service(
                web::scope("/protected")
                    .wrap(AuthMiddleware::new(tokens.clone()))
                    .route("", web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        assert_eq!(body, user.id.to_string());
    }

    #[actix_web::test]
    async fn test_missing_or_bad_token_is_rejected() {
        let tokens = Arc::new(TokenService::new("middleware_secret", 300).unwrap());
        let expired = tokens.issue_with_expiry(&user(), -60).unwrap();

        let app = test::init_service(
            App::new().service(
                web::scope("/protected")
                    .wrap(AuthMiddleware::new(tokens.clone()))
                    .route("", web::get().to(whoami)),
            ),
        )
        .await;

        let headers = [
            None,
            Some("Bearer ".to_string()),
            Some("Basic dXNlcjpwYXNz".to_string()),
            Some("Bearer not.a.jwt".to_string()),
            Some(format!("Bearer {}", expired)),
        ];

        for value in headers {
            let mut req = test::TestRequest::get().uri("/protected");
            if let Some(value) = &value {
                req = req.insert_header((header::AUTHORIZATION, value.as_str()));
            }
            let resp = test::call_service(&app, req.to_request()).await;
            assert_eq!(
                resp.status(),
                StatusCode::UNAUTHORIZED,
                "header {:?} should be rejected",
                value
            );
        }
    }
}
