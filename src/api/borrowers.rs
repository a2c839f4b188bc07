//! Borrower registration endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::borrower::{Borrower, CreateBorrower},
    AppState,
};

/// Register a borrower
#[utoipa::path(
    post,
    path = "/borrowers",
    tag = "borrowers",
    request_body = CreateBorrower,
    responses(
        (status = 201, description = "Borrower registered", body = Borrower),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Identification already registered")
    )
)]
pub async fn create_borrower(
    State(state): State<AppState>,
    Json(request): Json<CreateBorrower>,
) -> AppResult<(StatusCode, Json<Borrower>)> {
    let borrower = state.services.borrowers.register(request).await?;
    Ok((StatusCode::CREATED, Json(borrower)))
}

/// Get a borrower by identification
#[utoipa::path(
    get,
    path = "/borrowers/{identification}",
    tag = "borrowers",
    params(
        ("identification" = String, Path, description = "Borrower identification (case-insensitive)")
    ),
    responses(
        (status = 200, description = "Borrower", body = Borrower),
        (status = 404, description = "Borrower not found")
    )
)]
pub async fn get_borrower(
    State(state): State<AppState>,
    Path(identification): Path<String>,
) -> AppResult<Json<Borrower>> {
    let borrower = state.services.borrowers.get(&identification).await?;
    Ok(Json(borrower))
}
