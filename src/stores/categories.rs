//! Cached category list

use std::sync::Arc;

use tokio::sync::watch;
use tracing::error;

use crate::api::{ApiClient, ApiError};
use crate::models::{Category, CategoryInput};
use crate::notify::Notifier;

#[derive(Debug, Clone, Default)]
pub struct CategoriesState {
    pub categories: Vec<Category>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct CategoriesStore {
    api: Arc<ApiClient>,
    notifier: Arc<dyn Notifier>,
    state: watch::Sender<CategoriesState>,
}

impl CategoriesStore {
    pub fn new(api: Arc<ApiClient>, notifier: Arc<dyn Notifier>) -> Self {
        let (state, _) = watch::channel(CategoriesState::default());
        Self { api, notifier, state }
    }

    pub fn subscribe(&self) -> watch::Receiver<CategoriesState> {
        self.state.subscribe()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.state.borrow().categories.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    pub fn find(&self, category_id: i64) -> Option<Category> {
        self.state
            .borrow()
            .categories
            .iter()
            .find(|c| c.id == category_id)
            .cloned()
    }

    pub async fn fetch(&self) {
        self.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });

        match self.api.list_categories().await {
            Ok(categories) => self.state.send_modify(|s| {
                s.categories = categories;
                s.loading = false;
            }),
            Err(e) => {
                error!("Failed to load categories: {}", e.detail());
                self.state.send_modify(|s| {
                    s.error = Some(e.message());
                    s.loading = false;
                });
                self.notifier.error("Failed to load categories");
            }
        }
    }

    pub async fn create(&self, input: &CategoryInput) -> Result<Category, ApiError> {
        match self.api.create_category(input).await {
            Ok(created) => {
                let record = created.clone();
                self.state.send_modify(|s| s.categories.push(record));
                self.notifier.success("Category created successfully");
                Ok(created)
            }
            Err(e) => {
                error!("Failed to create category: {}", e.detail());
                self.notifier.error("Failed to create category");
                Err(e)
            }
        }
    }

    pub async fn update(&self, category_id: i64, input: &CategoryInput) -> Result<Category, ApiError> {
        match self.api.update_category(category_id, input).await {
            Ok(updated) => {
                let record = updated.clone();
                self.state.send_modify(|s| {
                    if let Some(slot) = s.categories.iter_mut().find(|c| c.id == category_id) {
                        *slot = record;
                    }
                });
                self.notifier.success("Category updated successfully");
                Ok(updated)
            }
            Err(e) => {
                error!("Failed to update category {}: {}", category_id, e.detail());
                self.notifier.error("Failed to update category");
                Err(e)
            }
        }
    }

    pub async fn delete(&self, category_id: i64) -> Result<(), ApiError> {
        match self.api.delete_category(category_id).await {
            Ok(()) => {
                self.state.send_modify(|s| s.categories.retain(|c| c.id != category_id));
                self.notifier.success("Category deleted successfully");
                Ok(())
            }
            Err(e) => {
                error!("Failed to delete category {}: {}", category_id, e.detail());
                self.notifier.error("Failed to delete category");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestContext;
    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::{get, put};
    use axum::Json;
    use serde_json::{json, Value};

    async fn setup() -> (CategoriesStore, TestContext) {
        let app = axum::Router::new()
            .route(
                "/api/categories",
                get(|| async {
                    Json(json!([
                        { "id": 1, "name": "Food", "isSystem": true },
                        { "id": 2, "name": "Rent", "isSystem": true }
                    ]))
                })
                .post(|Json(body): Json<Value>| async move {
                    let mut record = body;
                    record["id"] = json!(3);
                    (StatusCode::CREATED, Json(record))
                }),
            )
            .route(
                "/api/categories/:id",
                put(|Path(id): Path<i64>, Json(body): Json<Value>| async move {
                    let mut record = body;
                    record["id"] = json!(id);
                    Json(record)
                })
                .delete(|Path(id): Path<i64>| async move {
                    if id == 1 {
                        (StatusCode::BAD_REQUEST, Json(json!({ "message": "Cannot delete system category" })))
                            .into_response()
                    } else {
                        StatusCode::NO_CONTENT.into_response()
                    }
                }),
            );
        let ctx = TestContext::serve(app).await;
        let store = CategoriesStore::new(ctx.api.clone(), ctx.toasts.clone());
        (store, ctx)
    }

    #[tokio::test]
    async fn test_fetch_and_crud() {
        let (store, _ctx) = setup().await;
        store.fetch().await;
        assert_eq!(store.categories().len(), 2);
        assert!(store.find(1).unwrap().is_system);

        let input = CategoryInput {
            name: "Travel".to_string(),
            description: None,
            icon: Some("plane".to_string()),
            color: Some("#3366ff".to_string()),
        };
        let created = store.create(&input).await.unwrap();
        assert_eq!(created.id, 3);
        assert_eq!(store.categories().last().unwrap().name, "Travel");

        let renamed = CategoryInput {
            name: "Housing".to_string(),
            ..input.clone()
        };
        store.update(2, &renamed).await.unwrap();
        assert_eq!(store.find(2).unwrap().name, "Housing");

        store.delete(3).await.unwrap();
        assert!(store.find(3).is_none());
    }

    #[tokio::test]
    async fn test_delete_system_category_fails() {
        let (store, ctx) = setup().await;
        store.fetch().await;

        let err = store.delete(1).await.unwrap_err();
        assert_eq!(err.message(), "Cannot delete system category");
        assert!(store.find(1).is_some());
        assert_eq!(ctx.toasts.last().unwrap().message, "Failed to delete category");
    }
}
