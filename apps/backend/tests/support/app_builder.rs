use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use authgate::middleware::jwt_extract::JwtExtract;
use authgate::middleware::request_trace::RequestTrace;
use authgate::middleware::structured_logger::StructuredLogger;
use authgate::routes;
use authgate::state::app_state::AppState;
use authgate::AppError;

/// Type alias for route configuration functions
type RouteConfigFn = Box<dyn Fn(&mut web::ServiceConfig) + Send + Sync>;

/// Production route layout: public auth + health routes, and the protected
/// users scope wrapped with the bearer-token middleware, exactly as main.rs
/// wires them.
fn configure_prod_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/users")
            .wrap(JwtExtract)
            .configure(routes::users::configure_routes),
    );
    routes::configure(cfg);
}

/// Builder for test Actix service instances.
pub struct TestAppBuilder {
    state: AppState,
    route_config: Option<RouteConfigFn>,
}

impl TestAppBuilder {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            route_config: None,
        }
    }

    /// Use the production route layout.
    pub fn with_prod_routes(mut self) -> Self {
        self.route_config = Some(Box::new(configure_prod_routes) as RouteConfigFn);
        self
    }

    /// Use a custom route layout.
    pub fn with_routes<F>(mut self, config_fn: F) -> Self
    where
        F: Fn(&mut web::ServiceConfig) + Send + Sync + 'static,
    {
        self.route_config = Some(Box::new(config_fn) as RouteConfigFn);
        self
    }

    pub async fn build(
        self,
    ) -> Result<impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>, AppError>
    {
        let route_config = self.route_config;
        let data = web::Data::new(self.state);

        let service = test::init_service(
            App::new()
                .wrap(StructuredLogger)
                .wrap(RequestTrace)
                .app_data(data)
                .configure(move |cfg| {
                    if let Some(config_fn) = &route_config {
                        config_fn(cfg);
                    }
                }),
        )
        .await;

        Ok(service)
    }
}

pub fn create_test_app(state: AppState) -> TestAppBuilder {
    TestAppBuilder::new(state)
}
