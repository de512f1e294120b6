//! Route definitions for the auth service

use crate::{handlers, AppState};
use axum::{
    routing::{get, patch, post},
    Router,
};

/// Public and user-facing API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health::health_check))
        // Authentication
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/logout-all", post(handlers::auth::logout_all))
        .route("/auth/me", get(handlers::auth::me))
        .route("/auth/session", get(handlers::auth::session))
        // Companies and memberships
        .route("/companies", post(handlers::companies::create_company))
        .route("/companies/{id}", get(handlers::companies::get_company))
        .route(
            "/companies/{id}/members",
            get(handlers::companies::list_members).post(handlers::companies::add_member),
        )
        .route(
            "/companies/{id}/members/{user_id}",
            patch(handlers::companies::set_member_status),
        )
        // Platform administration
        .route("/admin/users", get(handlers::admin::list_users))
}

/// Service-to-service routes, guarded by the service token extractor
pub fn internal_routes() -> Router<AppState> {
    Router::new()
        .route("/users/{id}", get(handlers::internal::get_user))
        .route("/memberships", get(handlers::internal::get_membership))
}

#[cfg(test)]
mod tests {
    use crate::{create_app, AppState, WebConfig};
    use axum::http::StatusCode;
    use tower::ServiceExt;

    #[tokio::test]
    async fn health_check_route_is_public() {
        let state = AppState::new(WebConfig::default()).await.unwrap();
        let app = create_app(state);

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/api/health")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
