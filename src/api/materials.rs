//! Material registration endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::material::{CreateMaterial, Material},
    AppState,
};

/// Register a material
#[utoipa::path(
    post,
    path = "/materials",
    tag = "materials",
    request_body = CreateMaterial,
    responses(
        (status = 201, description = "Material registered", body = Material),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "ISBN already registered")
    )
)]
pub async fn create_material(
    State(state): State<AppState>,
    Json(request): Json<CreateMaterial>,
) -> AppResult<(StatusCode, Json<Material>)> {
    let material = state.services.materials.register(request).await?;
    Ok((StatusCode::CREATED, Json(material)))
}

/// Get a material by ISBN
#[utoipa::path(
    get,
    path = "/materials/{isbn}",
    tag = "materials",
    params(
        ("isbn" = String, Path, description = "Material ISBN")
    ),
    responses(
        (status = 200, description = "Material", body = Material),
        (status = 404, description = "Material not found")
    )
)]
pub async fn get_material(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> AppResult<Json<Material>> {
    let material = state.services.materials.get(&isbn).await?;
    Ok(Json(material))
}

/// Delete a material that is not on loan
#[utoipa::path(
    delete,
    path = "/materials/{isbn}",
    tag = "materials",
    params(
        ("isbn" = String, Path, description = "Material ISBN")
    ),
    responses(
        (status = 204, description = "Material deleted"),
        (status = 404, description = "Material not found"),
        (status = 409, description = "Material is on loan")
    )
)]
pub async fn delete_material(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> AppResult<StatusCode> {
    state.services.materials.delete(&isbn).await?;
    Ok(StatusCode::NO_CONTENT)
}
