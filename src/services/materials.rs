//! Material registration service

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::material::{CreateMaterial, Material, MaterialType},
    repository::Repository,
};

#[derive(Clone)]
pub struct MaterialsService {
    repository: Repository,
}

impl MaterialsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Register a new material
    pub async fn register(&self, request: CreateMaterial) -> AppResult<Material> {
        request.validate()?;
        let material_type: MaterialType = request.material_type.parse()?;

        if self.repository.materials.find_by_isbn(&request.isbn).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "A material with ISBN {} already exists",
                request.isbn
            )));
        }

        let material = Material {
            id: Uuid::new_v4(),
            isbn: request.isbn,
            name: request.name,
            material_type,
        };
        self.repository.materials.create(&material).await?;

        tracing::info!(id = %material.id, isbn = %material.isbn, %material_type, "Material registered");
        Ok(material)
    }

    /// Get material by ISBN
    pub async fn get(&self, isbn: &str) -> AppResult<Material> {
        self.repository
            .materials
            .find_by_isbn(isbn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Material with ISBN {} not found", isbn)))
    }

    /// Delete a material that is not on loan
    pub async fn delete(&self, isbn: &str) -> AppResult<()> {
        let material = self.get(isbn).await?;

        if self.repository.loans.has_active_loan(material.id).await? {
            return Err(AppError::Conflict("Material is currently on loan".to_string()));
        }

        self.repository.materials.delete(material.id).await?;
        tracing::info!(id = %material.id, isbn = %material.isbn, "Material deleted");
        Ok(())
    }
}
