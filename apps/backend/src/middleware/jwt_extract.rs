//! Bearer-token authentication middleware.
//!
//! Wrapped around protected scopes; runs once per request. Extracts the
//! token from the Authorization header, verifies it via the token service,
//! and stores the decoded claims in request extensions for downstream
//! extractors. Requests without a valid token never reach the inner
//! service; the rejection is rendered here so it keeps the Problem Details
//! shape and the current trace id.

use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::error::ResponseError;
use actix_web::http::header;
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::jwt::verify_access_token;
use crate::error::AppError;
use crate::state::app_state::AppState;

pub struct JwtExtract;

impl<S, B> Transform<S, ServiceRequest> for JwtExtract
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtExtractMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtExtractMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct JwtExtractMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtExtractMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        // All work happens inside the future so the request-trace scope set
        // up by the outer middleware is active when errors are rendered.
        Box::pin(async move {
            let auth_header = req.headers().get(header::AUTHORIZATION).cloned();

            let verified = bearer_from_header(auth_header.as_ref()).and_then(|token| {
                match req.app_data::<web::Data<AppState>>() {
                    Some(state) => verify_access_token(&token, &state.security),
                    None => Err(AppError::internal("AppState not available")),
                }
            });

            match verified {
                Ok(claims) => {
                    // Claims go into extensions BEFORE calling the inner service.
                    req.extensions_mut().insert(claims);
                    service.call(req).await.map(|res| res.map_into_left_body())
                }
                Err(e) => {
                    let (req, _payload) = req.into_parts();
                    let res = e.error_response().map_into_right_body();
                    Ok(ServiceResponse::new(req, res))
                }
            }
        })
    }
}

fn bearer_from_header(
    header_value: Option<&actix_web::http::header::HeaderValue>,
) -> Result<String, AppError> {
    let auth_value = header_value.ok_or_else(AppError::unauthorized_missing_bearer)?;

    let auth_str = auth_value
        .to_str()
        .map_err(|_| AppError::unauthorized_missing_bearer())?;

    let parts: Vec<&str> = auth_str.split_whitespace().collect();
    if parts.len() != 2 || parts[0] != "Bearer" || parts[1].is_empty() {
        return Err(AppError::unauthorized_missing_bearer());
    }

    Ok(parts[1].to_string())
}

#[cfg(test)]
mod tests {
    use actix_web::http::header::HeaderValue;

    use super::bearer_from_header;
    use crate::error::AppError;

    #[test]
    fn parses_well_formed_bearer() {
        let value = HeaderValue::from_static("Bearer abc.def.ghi");
        assert_eq!(bearer_from_header(Some(&value)).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn rejects_missing_and_malformed_headers() {
        let cases = [
            None,
            Some(HeaderValue::from_static("")),
            Some(HeaderValue::from_static("Bearer")),
            Some(HeaderValue::from_static("Basic abc")),
            Some(HeaderValue::from_static("Bearer a b")),
        ];
        for value in &cases {
            match bearer_from_header(value.as_ref()) {
                Err(AppError::UnauthorizedMissingBearer) => {}
                other => panic!("expected missing-bearer error, got {other:?}"),
            }
        }
    }
}
