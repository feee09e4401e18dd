use std::sync::Arc;
use std::time::Duration;

use reqwest::{header, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::common::ApiError;
use crate::config::normalize_api_url;
use crate::models::{ContentKind, ContentRecord, ContentStatus, Role, User, UserCreate, UserUpdate};
use crate::types::{LoginRequest, LoginResponse};

use super::endpoints::{
    collection_path, item_path, slug_path, user_path, SettingsKey, LOGIN_PATH, ROLES_PATH,
    USERS_PATH,
};

/// HTTP client for the CMS backend.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone, Debug)]
pub struct CmsClient {
    http: reqwest::Client,
    base_url: Arc<str>,
}

impl CmsClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: Arc::from(normalize_api_url(base_url)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match token.map(str::trim).filter(|t| !t.is_empty()) {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder, path: &str) -> Result<Response, ApiError> {
        let response = builder.send().await?;
        check_status(response, path).await
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        let response = self.send(self.request(Method::GET, path, token), path).await?;
        Ok(response.json::<T>().await?)
    }

    pub async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::PUT, path, token).json(body);
        let response = self.send(builder, path).await?;
        Ok(response.json::<T>().await?)
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::POST, path, token).json(body);
        let response = self.send(builder, path).await?;
        Ok(response.json::<T>().await?)
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> Result<(), ApiError> {
        self.send(self.request(Method::DELETE, path, token), path)
            .await
            .map(|_| ())
    }

    // Site settings

    pub async fn get_setting(&self, key: SettingsKey) -> Result<Value, ApiError> {
        self.get_json(&key.path(), None).await
    }

    pub async fn put_setting(
        &self,
        key: SettingsKey,
        value: &Value,
        token: &str,
    ) -> Result<Value, ApiError> {
        self.put_json(&key.path(), value, Some(token)).await
    }

    // Content collections

    pub async fn list<T: DeserializeOwned>(
        &self,
        kind: ContentKind,
        status: Option<ContentStatus>,
        token: Option<&str>,
    ) -> Result<Vec<T>, ApiError> {
        let path = match status {
            Some(status) => format!("{}?status={}", collection_path(kind), status),
            None => collection_path(kind),
        };
        self.get_json(&path, token).await
    }

    /// Published records only, as the public site shows them.
    pub async fn list_published<T: DeserializeOwned + ContentRecord>(
        &self,
        kind: ContentKind,
    ) -> Result<Vec<T>, ApiError> {
        let items: Vec<T> = self.list(kind, Some(ContentStatus::Published), None).await?;
        Ok(items.into_iter().filter(|i| i.status().is_public()).collect())
    }

    pub async fn get_item(
        &self,
        kind: ContentKind,
        id: Uuid,
        token: Option<&str>,
    ) -> Result<Value, ApiError> {
        self.get_json(&item_path(kind, id), token).await
    }

    /// Looks a published record up by slug. Collections without a slug
    /// route are scanned instead.
    pub async fn get_published_by_slug<T: DeserializeOwned + ContentRecord>(
        &self,
        kind: ContentKind,
        slug: &str,
    ) -> Result<T, ApiError> {
        let found = if kind.has_slug_lookup() {
            Some(self.get_json::<T>(&slug_path(kind, slug), None).await?)
        } else {
            self.list_published::<T>(kind)
                .await?
                .into_iter()
                .find(|item| item.slug() == slug)
        };

        found
            .filter(|item| item.status().is_public())
            .ok_or_else(|| ApiError::NotFound(slug_path(kind, slug)))
    }

    pub async fn create(
        &self,
        kind: ContentKind,
        document: &Value,
        token: &str,
    ) -> Result<Value, ApiError> {
        self.post_json(&collection_path(kind), document, Some(token))
            .await
    }

    pub async fn update(
        &self,
        kind: ContentKind,
        id: Uuid,
        document: &Value,
        token: &str,
    ) -> Result<Value, ApiError> {
        self.put_json(&item_path(kind, id), document, Some(token))
            .await
    }

    pub async fn remove(&self, kind: ContentKind, id: Uuid, token: &str) -> Result<(), ApiError> {
        self.delete(&item_path(kind, id), Some(token)).await
    }

    // Users and roles

    pub async fn list_users(&self, token: &str) -> Result<Vec<User>, ApiError> {
        self.get_json(USERS_PATH, Some(token)).await
    }

    pub async fn get_user(&self, id: Uuid, token: &str) -> Result<User, ApiError> {
        self.get_json(&user_path(id), Some(token)).await
    }

    pub async fn create_user(&self, user: &UserCreate, token: &str) -> Result<User, ApiError> {
        self.post_json(USERS_PATH, user, Some(token)).await
    }

    pub async fn update_user(
        &self,
        id: Uuid,
        update: &UserUpdate,
        token: &str,
    ) -> Result<User, ApiError> {
        self.put_json(&user_path(id), update, Some(token)).await
    }

    pub async fn delete_user(&self, id: Uuid, token: &str) -> Result<(), ApiError> {
        self.delete(&user_path(id), Some(token)).await
    }

    pub async fn list_roles(&self, token: &str) -> Result<Vec<Role>, ApiError> {
        self.get_json(ROLES_PATH, Some(token)).await
    }

    // Auth

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        self.post_json(LOGIN_PATH, &body, None).await
    }
}

async fn check_status(response: Response, path: &str) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    match status {
        StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
        StatusCode::NOT_FOUND => Err(ApiError::NotFound(path.to_string())),
        _ => {
            let body = response.text().await.unwrap_or_default();
            let detail = detail_from_body(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });
            Err(ApiError::Status {
                status: status.as_u16(),
                detail,
            })
        }
    }
}

/// Pulls the human-readable message out of an error body. The backend
/// sends `{"detail": "..."}` or, for validation errors,
/// `{"detail": [{"msg": "...", "loc": [...]}, ...]}`.
pub fn detail_from_body(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let messages: Vec<String> = items
                .iter()
                .filter_map(|item| {
                    let msg = item.get("msg")?.as_str()?;
                    let field = item
                        .get("loc")
                        .and_then(Value::as_array)
                        .and_then(|loc| loc.last())
                        .and_then(Value::as_str);
                    Some(match field {
                        Some(field) => format!("{field}: {msg}"),
                        None => msg.to_string(),
                    })
                })
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        other => Some(other.to_string()),
    }
}
