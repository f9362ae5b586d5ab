//! `/categories` endpoints

use super::{ApiClient, ApiError};
use crate::models::{Category, CategoryInput};

impl ApiClient {
    /// GET /categories
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get("/categories", &[]).await
    }

    /// GET /categories/system
    pub async fn system_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get("/categories/system", &[]).await
    }

    /// GET /categories/custom
    pub async fn custom_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get("/categories/custom", &[]).await
    }

    /// GET /categories/{id}
    pub async fn get_category(&self, category_id: i64) -> Result<Category, ApiError> {
        self.get(&format!("/categories/{}", category_id), &[]).await
    }

    /// POST /categories
    pub async fn create_category(&self, input: &CategoryInput) -> Result<Category, ApiError> {
        self.post("/categories", input).await
    }

    /// PUT /categories/{id}
    pub async fn update_category(&self, category_id: i64, input: &CategoryInput) -> Result<Category, ApiError> {
        self.put(&format!("/categories/{}", category_id), input).await
    }

    /// DELETE /categories/{id}
    pub async fn delete_category(&self, category_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/categories/{}", category_id)).await
    }
}
