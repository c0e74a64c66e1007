//! Route definitions

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use infrastructure::ServerConfig;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::warn;

use crate::{handlers, middleware::RequestIdLayer, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Practice records
        .route(
            "/api/attorneys",
            get(handlers::attorneys::list_attorneys).post(handlers::attorneys::create_attorney),
        )
        .route(
            "/api/attorneys/{id}",
            get(handlers::attorneys::get_attorney)
                .put(handlers::attorneys::update_attorney)
                .delete(handlers::attorneys::delete_attorney),
        )
        .route(
            "/api/judges",
            get(handlers::judges::list_judges).post(handlers::judges::create_judge),
        )
        .route(
            "/api/judges/{id}",
            get(handlers::judges::get_judge)
                .put(handlers::judges::update_judge)
                .delete(handlers::judges::delete_judge),
        )
        .route(
            "/api/clients",
            get(handlers::clients::list_clients).post(handlers::clients::create_client),
        )
        .route(
            "/api/clients/{id}",
            get(handlers::clients::get_client)
                .put(handlers::clients::update_client)
                .delete(handlers::clients::delete_client),
        )
        .route(
            "/api/courts",
            get(handlers::courts::list_courts).post(handlers::courts::create_court),
        )
        .route(
            "/api/courts/{id}",
            get(handlers::courts::get_court)
                .put(handlers::courts::update_court)
                .delete(handlers::courts::delete_court),
        )
        .route(
            "/api/cases",
            get(handlers::cases::list_cases).post(handlers::cases::create_case),
        )
        .route(
            "/api/cases/{id}",
            get(handlers::cases::get_case)
                .put(handlers::cases::update_case)
                .delete(handlers::cases::delete_case),
        )
        .route(
            "/api/cases/{id}/deadlines",
            get(handlers::deadlines::list_case_deadlines),
        )
        .route(
            "/api/cases/{id}/deadlines/upcoming",
            get(handlers::deadlines::upcoming_case_deadlines),
        )
        .route(
            "/api/deadlines",
            get(handlers::deadlines::list_deadlines).post(handlers::deadlines::create_deadline),
        )
        .route(
            "/api/deadlines/{id}",
            get(handlers::deadlines::get_deadline)
                .put(handlers::deadlines::update_deadline)
                .delete(handlers::deadlines::delete_deadline),
        )
        .route(
            "/api/deadlines/{id}/complete",
            post(handlers::deadlines::complete_deadline),
        )
        .route(
            "/api/documents",
            get(handlers::documents::list_documents).post(handlers::documents::create_document),
        )
        .route(
            "/api/documents/{id}",
            get(handlers::documents::get_document)
                .put(handlers::documents::update_document)
                .delete(handlers::documents::delete_document),
        )
        // Reports
        .route(
            "/api/reports/attorney-performance",
            get(handlers::reports::attorney_performance),
        )
        .route(
            "/api/reports/case-predictions",
            get(handlers::reports::case_predictions),
        )
        .route(
            "/api/reports/critical-cases",
            get(handlers::reports::critical_cases),
        )
        .route(
            "/api/reports/monthly-trends",
            get(handlers::reports::monthly_trends),
        )
        .route(
            "/api/reports/deadline-performance",
            get(handlers::reports::deadline_performance),
        )
        .route(
            "/api/dashboard/summary",
            get(handlers::reports::dashboard_summary),
        )
        // Attach state
        .with_state(state)
}

/// Router plus the HTTP middleware stack configured by `server`
///
/// Order matters: the last layer added is the outermost.
pub fn create_app(state: AppState, server: &ServerConfig) -> Router {
    let app = create_router(state)
        .layer(RequestBodyLimitLayer::new(server.max_body_size_json_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(RequestIdLayer::new());

    match cors_layer(server) {
        Some(cors) => app.layer(cors),
        None => app,
    }
}

fn cors_layer(server: &ServerConfig) -> Option<CorsLayer> {
    if !server.cors_enabled {
        return None;
    }
    if server.allowed_origins.is_empty() {
        // Development mode: allow all origins
        return Some(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    let origins: Vec<HeaderValue> = server
        .allowed_origins
        .iter()
        .filter_map(|o| {
            o.parse()
                .inspect_err(|_| warn!(origin = %o, "Ignoring malformed CORS origin"))
                .ok()
        })
        .collect();
    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_disabled_yields_no_layer() {
        let server = ServerConfig {
            cors_enabled: false,
            ..ServerConfig::default()
        };
        assert!(cors_layer(&server).is_none());
    }

    #[test]
    fn cors_with_origins_is_built() {
        let server = ServerConfig {
            cors_enabled: true,
            allowed_origins: vec!["https://app.caseledger.law".into(), "\n".into()],
            ..ServerConfig::default()
        };
        assert!(cors_layer(&server).is_some());
    }
}
