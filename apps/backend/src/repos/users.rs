//! User repository: the explicit storage interface, generic over
//! `ConnectionTrait` so the same functions run against a pool, a
//! transaction, or an in-memory test database.

use sea_orm::ConnectionTrait;

use crate::adapters::users_sea as users_adapter;
use crate::adapters::users_sea::UserCreate;
use crate::error::AppError;
use crate::infra::db_errors::map_db_err;

/// User domain model. Owned by persistent storage; read during
/// authentication and claim population, never mutated by this subsystem.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: time::OffsetDateTime,
    pub updated_at: time::OffsetDateTime,
}

pub async fn find_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<User>, AppError> {
    let user = users_adapter::find_by_email(conn, email)
        .await
        .map_err(map_db_err)?;
    Ok(user.map(User::from))
}

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<User, AppError> {
    let user = users_adapter::insert_user(conn, dto)
        .await
        .map_err(map_db_err)?;
    Ok(User::from(user))
}

impl From<crate::entities::users::Model> for User {
    fn from(model: crate::entities::users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            password_hash: model.password_hash,
            role: model.role,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
