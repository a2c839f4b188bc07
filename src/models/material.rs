//! Material (catalog entry) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;

/// Material type, stored as a smallint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum MaterialType {
    Book = 0,
    Periodical = 1,
}

impl TryFrom<i16> for MaterialType {
    type Error = AppError;

    fn try_from(v: i16) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(MaterialType::Book),
            1 => Ok(MaterialType::Periodical),
            other => Err(AppError::Internal(format!("Unknown material type tag {}", other))),
        }
    }
}

impl From<MaterialType> for i16 {
    fn from(t: MaterialType) -> Self {
        t as i16
    }
}

impl std::str::FromStr for MaterialType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "book" => Ok(MaterialType::Book),
            "periodical" => Ok(MaterialType::Periodical),
            _ => Err(AppError::Validation(format!(
                "Invalid material type '{}': expected 'book' or 'periodical'",
                s
            ))),
        }
    }
}

impl std::fmt::Display for MaterialType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            MaterialType::Book => "book",
            MaterialType::Periodical => "periodical",
        };
        write!(f, "{}", label)
    }
}

/// Material as used by the lending engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Material {
    pub id: Uuid,
    /// Free-form identifier; only its digits matter to lending rules
    pub isbn: String,
    pub name: String,
    pub material_type: MaterialType,
}

/// Raw database row (type tag still undecoded)
#[derive(Debug, FromRow)]
pub struct MaterialRow {
    pub id: Uuid,
    pub isbn: String,
    pub name: String,
    pub material_type: i16,
}

impl TryFrom<MaterialRow> for Material {
    type Error = AppError;

    fn try_from(row: MaterialRow) -> Result<Self, Self::Error> {
        Ok(Material {
            id: row.id,
            isbn: row.isbn,
            name: row.name,
            material_type: MaterialType::try_from(row.material_type)?,
        })
    }
}

/// Register material request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateMaterial {
    #[validate(length(min = 1, max = 32, message = "ISBN is required"))]
    pub isbn: String,
    #[validate(length(min = 1, max = 200, message = "Name must be 1 to 200 characters"))]
    pub name: String,
    /// `book` or `periodical`
    #[validate(length(min = 1, max = 50))]
    pub material_type: String,
}
