use actix_web::web;

pub mod auth;
pub mod health;
pub mod users;

/// Public routes. The protected `/api/v1/users` scope is wired with
/// `JwtExtract` in `main.rs` and in the test app builder.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .service(web::scope("/api/v1/auth").configure(auth::configure_routes));
}
