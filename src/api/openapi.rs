//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{borrowers, health, loans, materials};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Circulation API",
        version = "0.1.0",
        description = "Library lending REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Materials
        materials::create_material,
        materials::get_material,
        materials::delete_material,
        // Borrowers
        borrowers::create_borrower,
        borrowers::get_borrower,
        // Loans
        loans::create_loan,
        loans::get_material_loans,
    ),
    components(
        schemas(
            // Materials
            crate::models::material::Material,
            crate::models::material::MaterialType,
            crate::models::material::CreateMaterial,
            // Borrowers
            crate::models::borrower::Borrower,
            crate::models::borrower::CreateBorrower,
            // Loans
            crate::models::loan::LoanRequest,
            crate::models::loan::LoanDetails,
            crate::lending::RefusalReason,
            loans::LoanResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "materials", description = "Catalog material registration"),
        (name = "borrowers", description = "Borrower registration"),
        (name = "loans", description = "Loan requests")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
