use std::time::Duration;

use actix_web::{web, App, HttpServer};
use authgate::infra::db::DbProfile;
use authgate::infra::state::build_state;
use authgate::middleware::cors::cors_middleware;
use authgate::middleware::jwt_extract::JwtExtract;
use authgate::middleware::request_trace::RequestTrace;
use authgate::middleware::structured_logger::StructuredLogger;
use authgate::routes;
use authgate::state::security_config::SecurityConfig;
use authgate::telemetry;

/// Placeholder only; any real deployment must set AUTHGATE_JWT_SECRET.
const DEV_FALLBACK_SECRET: &str = "change-me-unsafe-dev-secret";

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let host = std::env::var("AUTHGATE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("AUTHGATE_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            eprintln!("AUTHGATE_PORT must be a valid port number");
            std::process::exit(1);
        });

    let jwt_secret = match std::env::var("AUTHGATE_JWT_SECRET") {
        Ok(secret) => secret,
        Err(_) => {
            tracing::warn!(
                "AUTHGATE_JWT_SECRET is not set; using an unsafe development fallback"
            );
            DEV_FALLBACK_SECRET.to_string()
        }
    };

    let mut security_config = SecurityConfig::new(jwt_secret.as_bytes());
    if let Ok(ttl_secs) = std::env::var("AUTHGATE_TOKEN_TTL_SECS") {
        match ttl_secs.parse::<u64>() {
            Ok(secs) => {
                security_config = security_config.with_token_ttl(Duration::from_secs(secs));
            }
            Err(_) => {
                eprintln!("AUTHGATE_TOKEN_TTL_SECS must be a number of seconds");
                std::process::exit(1);
            }
        }
    }

    let app_state = match build_state()
        .with_db(DbProfile::Prod)
        .with_security(security_config)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!("authgate listening on http://{host}:{port}");

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .service(
                web::scope("/api/v1/users")
                    .wrap(JwtExtract)
                    .configure(routes::users::configure_routes),
            )
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
