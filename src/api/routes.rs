use crate::api::{admin, todos, users};
use crate::auth::{api as auth_api, auth_middleware};
use crate::middleware::request_logging;
use crate::state::AppState;
use axum::{
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;

/// Create the API router.
///
/// Protected routes sit behind [`auth_middleware`], so a request without a
/// valid token is rejected before a database connection is opened.
pub fn create_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/auth", post(auth_api::create_user))
        .route("/auth/", post(auth_api::create_user))
        .route("/auth/token", post(auth_api::login_for_access_token));

    let protected_routes = Router::new()
        .route("/", get(todos::read_all))
        .route("/todo/:todo_id", get(todos::read_todo).delete(todos::delete_todo))
        .route("/todos", post(todos::create_todo))
        .route("/todos/:todo_id", put(todos::update_todo))
        .route("/admin/todo", get(admin::read_all))
        .route("/admin/todo/:todo_id", delete(admin::delete_todo))
        .route("/users/user", get(users::get_user))
        .route("/users/user/update_password", put(users::update_password))
        .route(
            "/users/user/update_phone_number/:phone_number",
            put(users::update_phone_number),
        )
        .route_layer(middleware::from_fn_with_state(
            state.jwt_handler.clone(),
            auth_middleware,
        ));

    let public_routes = Router::new().route("/healthy", get(health_check));

    Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(protected_routes)
        .layer(middleware::from_fn(request_logging))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "Healthy" })
}
