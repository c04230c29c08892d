use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use serde::{Deserialize, Serialize};

use super::current_user::CurrentUser;
use crate::error::AppError;
use crate::repos::users;
use crate::state::app_state::AppState;

/// The authenticated principal joined with its stored user record, so the
/// role (and anything else owned by storage rather than the token) is
/// available to handlers.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CurrentUserRecord {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

impl FromRequest for CurrentUserRecord {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        let mut payload = payload.take();

        Box::pin(async move {
            // Claims first, so the 401/403 distinction stays clean.
            let current_user = CurrentUser::from_request(&req, &mut payload).await?;

            let app_state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::internal("AppState not available"))?;
            let db = app_state
                .db()
                .ok_or_else(|| AppError::db_unavailable("Database unavailable"))?;

            let user = users::find_by_email(db, &current_user.email)
                .await?
                .ok_or_else(AppError::forbidden_user_not_found)?;

            Ok(CurrentUserRecord {
                id: user.id,
                email: user.email,
                first_name: user.first_name,
                last_name: user.last_name,
                role: user.role,
            })
        })
    }
}
