//! `/users` endpoints

use reqwest::Url;

use super::{ApiClient, ApiError};
use crate::models::ApiUser;

/// Percent-encode `value` as a single path segment
fn path_segment(value: &str) -> String {
    let Ok(mut url) = Url::parse("http://localhost/") else {
        return value.to_string();
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.clear().push(value);
    }
    url.path().trim_start_matches('/').to_string()
}

impl ApiClient {
    /// GET /users/{id}
    pub async fn get_user(&self, user_id: i64) -> Result<ApiUser, ApiError> {
        self.get(&format!("/users/{}", user_id), &[]).await
    }

    /// GET /users/username/{username}
    pub async fn get_user_by_username(&self, username: &str) -> Result<ApiUser, ApiError> {
        self.get(&format!("/users/username/{}", path_segment(username)), &[])
            .await
    }

    /// PUT /users/{id}
    pub async fn update_user(&self, user: &ApiUser) -> Result<ApiUser, ApiError> {
        self.put(&format!("/users/{}", user.id), user).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestContext;
    use axum::extract::Path;
    use axum::routing::get;
    use axum::Json;
    use serde_json::json;

    #[test]
    fn test_path_segment_escapes_reserved_characters() {
        assert_eq!(path_segment("johndoe"), "johndoe");
        assert_eq!(path_segment("a/b?c#d"), "a%2Fb%3Fc%23d");
    }

    #[tokio::test]
    async fn test_username_lookup_hits_single_segment() {
        let app = axum::Router::new().route(
            "/api/users/username/:username",
            get(|Path(username): Path<String>| async move {
                Json(json!({ "id": 7, "username": username, "email": "odd@example.com" }))
            }),
        );
        let ctx = TestContext::serve(app).await;

        let user = ctx.api.get_user_by_username("odd/name?x#y").await.unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.username, "odd/name?x#y");
    }
}
