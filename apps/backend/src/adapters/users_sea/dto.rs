//! Write-side DTOs for the users adapter.

#[derive(Debug, Clone)]
pub struct UserCreate {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub role: String,
}
