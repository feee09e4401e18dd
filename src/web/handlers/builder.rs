//! Shared load-edit-save cycle of the footer and header builders.

use actix_web::{HttpRequest, HttpResponse};
use serde::de::DeserializeOwned;
use serde::Serialize;

use socialit::api::SettingsKey;
use socialit::common::ApiError;
use socialit::log_err;

use crate::web::handlers::admin_settings::settings_error_message;
use crate::web::helpers::{api_failure, redirect, require_token};
use crate::web::state::AppState;

/// Current document as the builder edits it. A malformed stored document
/// starts over from the defaults; `normalize` assigns missing ids.
pub async fn load_document<T>(
    state: &AppState,
    key: SettingsKey,
    normalize: fn(&mut T) -> bool,
) -> Result<T, ApiError>
where
    T: DeserializeOwned + Default,
{
    let value = state.settings.editable(key).await?;
    let mut document = serde_json::from_value::<T>(value).unwrap_or_else(|e| {
        log::warn!("Stored {} is malformed, starting from defaults: {}", key, e);
        T::default()
    });
    normalize(&mut document);
    Ok(document)
}

/// Loads the document, applies `edit`, and saves when it changed anything.
/// Always answers with a redirect back to `back`.
pub async fn edit_document<T, F>(
    state: &AppState,
    req: &HttpRequest,
    key: SettingsKey,
    normalize: fn(&mut T) -> bool,
    back: &str,
    edit: F,
) -> HttpResponse
where
    T: DeserializeOwned + Serialize + Default,
    F: FnOnce(&mut T) -> Result<bool, &'static str>,
{
    let token = match require_token(req) {
        Ok(t) => t,
        Err(resp) => return resp,
    };
    let mut document = match load_document(state, key, normalize).await {
        Ok(d) => d,
        Err(e) => return api_failure(req, &e),
    };

    match edit(&mut document) {
        Ok(true) => {}
        Ok(false) => return redirect(req, back),
        Err(msg) => return redirect(req, &format!("{back}?error={}", urlencoding::encode(msg))),
    }

    let value = match serde_json::to_value(&document) {
        Ok(v) => v,
        Err(e) => {
            log_err!("Serializing builder document", e, serde_json::json!({ "key": key.as_str() }));
            return HttpResponse::InternalServerError().finish();
        }
    };
    match state.settings.save(key, value, &token).await {
        Ok(()) => redirect(req, &format!("{back}?saved=1")),
        Err(e) => match settings_error_message(&e) {
            None => api_failure(req, &ApiError::Unauthorized),
            Some(message) => {
                redirect(req, &format!("{back}?error={}", urlencoding::encode(&message)))
            }
        },
    }
}
