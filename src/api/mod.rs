//! API handlers for the circulation REST endpoints

pub mod borrowers;
pub mod health;
pub mod loans;
pub mod materials;
pub mod openapi;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Materials
        .route("/materials", post(materials::create_material))
        .route(
            "/materials/:isbn",
            get(materials::get_material).delete(materials::delete_material),
        )
        .route("/materials/:isbn/loans", get(loans::get_material_loans))
        // Borrowers
        .route("/borrowers", post(borrowers::create_borrower))
        .route("/borrowers/:identification", get(borrowers::get_borrower))
        // Loans
        .route("/loans", post(loans::create_loan))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
