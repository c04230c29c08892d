use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};
use serde::{Deserialize, Serialize};

use crate::auth::claims::AccessClaims;
use crate::error::AppError;

/// The authenticated principal as carried by the access token.
///
/// Reads the claims the `JwtExtract` middleware stored in request
/// extensions; a route that was not wrapped by the middleware (or a request
/// that did not pass it) yields 401.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CurrentUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let claims = req.extensions().get::<AccessClaims>().cloned();

        ready(match claims {
            Some(claims) => Ok(CurrentUser {
                email: claims.email,
                first_name: claims.first_name,
                last_name: claims.last_name,
            }),
            None => Err(AppError::unauthorized()),
        })
    }
}
