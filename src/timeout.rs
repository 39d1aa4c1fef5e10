use std::time::Duration;

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpResponse, ResponseError,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::error::AppError;

/// Answers 503 when the wrapped service takes longer than `deadline` to respond.
#[derive(Clone, Copy)]
pub struct RequestTimeout {
    deadline: Duration,
}

impl RequestTimeout {
    pub fn new(deadline: Duration) -> Self {
        Self { deadline }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequestTimeout
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RequestTimeoutService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestTimeoutService {
            service,
            deadline: self.deadline,
        }))
    }
}

pub struct RequestTimeoutService<S> {
    service: S,
    deadline: Duration,
}

impl<S, B> Service<ServiceRequest> for RequestTimeoutService<S>
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
        let request = req.request().clone();
        let method = req.method().clone();
        let path = req.path().to_string();
        let fut = self.service.call(req);
        let deadline = self.deadline;

        Box::pin(async move {
            match tokio::time::timeout(deadline, fut).await {
                Ok(res) => res.map(ServiceResponse::map_into_left_body),
                Err(_) => {
                    log::warn!("{} {} exceeded the {:?} deadline", method, path, deadline);
                    let response: HttpResponse =
                        AppError::Timeout("Request took too long".into()).error_response();
                    Ok(ServiceResponse::new(request, response).map_into_right_body())
                }
            }
        })
    }
}
