//! Materials repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::material::{Material, MaterialRow},
};

use super::MaterialStore;

#[derive(Clone)]
pub struct MaterialsRepository {
    pool: Pool<Postgres>,
}

impl MaterialsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MaterialStore for MaterialsRepository {
    async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Material>> {
        sqlx::query_as::<_, MaterialRow>(
            "SELECT id, isbn, name, material_type FROM materials WHERE isbn = $1",
        )
        .bind(isbn)
        .fetch_optional(&self.pool)
        .await?
        .map(Material::try_from)
        .transpose()
    }

    async fn create(&self, material: &Material) -> AppResult<()> {
        let result = sqlx::query(
            "INSERT INTO materials (id, isbn, name, material_type) VALUES ($1, $2, $3, $4)",
        )
        .bind(material.id)
        .bind(&material.isbn)
        .bind(&material.name)
        .bind(i16::from(material.material_type))
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(AppError::Conflict(
                format!("A material with ISBN {} already exists", material.isbn),
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM materials WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) if done.rows_affected() == 0 => Err(AppError::NotFound(format!(
                "Material with id {} not found",
                id
            ))),
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => Err(AppError::Conflict(
                "Material still has loan records".to_string(),
            )),
            Err(e) => Err(e.into()),
        }
    }
}
