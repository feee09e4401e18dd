use actix_web::http::StatusCode;
use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};

use socialit::api::SettingsKey;
use socialit::common::{ApiError, SettingsError};
use socialit::services::{default_document, SettingsSync};

use crate::web::forms::{DocumentForm, NoticeQuery};
use crate::web::helpers::{api_failure, pretty_json, redirect, render, render_status, require_token};
use crate::web::state::AppState;
use crate::web::templates::{AdminSettingsEditTemplate, AdminSettingsIndexTemplate, SettingsLink};

fn parse_key(raw: &str) -> Result<SettingsKey, HttpResponse> {
    raw.parse::<SettingsKey>()
        .map_err(|_| HttpResponse::NotFound().body("Unknown settings document"))
}

/// Inline CSS variables for the editor's preview panel.
fn preview_style(document: &str) -> String {
    SettingsSync::parse_document(document)
        .and_then(|value| SettingsSync::preview_ui(&value))
        .unwrap_or_else(|_| SettingsSync::reset_ui())
        .to_declarations()
}

fn editor(
    key: SettingsKey,
    document: String,
    error: Option<String>,
    saved: bool,
) -> AdminSettingsEditTemplate {
    let is_ui = key == SettingsKey::Ui;
    AdminSettingsEditTemplate {
        preview_style: if is_ui {
            preview_style(&document)
        } else {
            String::new()
        },
        key: key.as_str().to_string(),
        label: key.label().to_string(),
        help: key.help().to_string(),
        document,
        error,
        saved,
        is_ui,
    }
}

/// Error text for the editor. `None` means the session is gone.
pub fn settings_error_message(err: &SettingsError) -> Option<String> {
    match err {
        SettingsError::Api(ApiError::Unauthorized) => None,
        SettingsError::Api(e) => Some(e.detail()),
        other => Some(other.to_string()),
    }
}

#[get("/admin/settings")]
pub async fn settings_index(req: HttpRequest) -> impl Responder {
    if let Err(resp) = require_token(&req) {
        return resp;
    }
    let links = SettingsKey::ALL
        .iter()
        .map(|key| SettingsLink {
            href: format!("/admin/settings/{}", key.as_str()),
            label: key.label().to_string(),
            help: key.help().to_string(),
        })
        .collect();
    render(AdminSettingsIndexTemplate { links })
}

#[get("/admin/settings/{key}")]
pub async fn settings_edit(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    query: web::Query<NoticeQuery>,
) -> impl Responder {
    if let Err(resp) = require_token(&req) {
        return resp;
    }
    let key = match parse_key(&path.into_inner()) {
        Ok(k) => k,
        Err(resp) => return resp,
    };

    let (document, error) = match state.settings.editable(key).await {
        Ok(value) => (pretty_json(&value), query.error.clone()),
        Err(ApiError::Unauthorized) => return api_failure(&req, &ApiError::Unauthorized),
        Err(e) => {
            log::warn!("Loading {} settings failed: {}", key, e);
            (
                pretty_json(&default_document(key)),
                Some(format!("Showing defaults: {}", e.detail())),
            )
        }
    };

    render(editor(key, document, error, query.saved.is_some()))
}

#[post("/admin/settings/{key}")]
pub async fn settings_save(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    form: web::Form<DocumentForm>,
) -> impl Responder {
    let token = match require_token(&req) {
        Ok(t) => t,
        Err(resp) => return resp,
    };
    let key = match parse_key(&path.into_inner()) {
        Ok(k) => k,
        Err(resp) => return resp,
    };

    let result = match SettingsSync::parse_document(&form.document) {
        Ok(value) => state.settings.save(key, value, &token).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => redirect(&req, &format!("/admin/settings/{}?saved=1", key.as_str())),
        Err(e) => match settings_error_message(&e) {
            None => api_failure(&req, &ApiError::Unauthorized),
            Some(message) => {
                log::warn!("Saving {} settings failed: {}", key, e);
                render_status(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    editor(key, form.document.clone(), Some(message), false),
                )
            }
        },
    }
}

/// CSS variables for unsaved UI settings, applied by the editor page only.
#[post("/admin/settings/ui/preview")]
pub async fn ui_preview(req: HttpRequest, form: web::Form<DocumentForm>) -> impl Responder {
    if let Err(resp) = require_token(&req) {
        return resp;
    }
    match SettingsSync::parse_document(&form.document).and_then(|v| SettingsSync::preview_ui(&v)) {
        Ok(vars) => HttpResponse::Ok().json(vars.to_json()),
        Err(e) => HttpResponse::UnprocessableEntity()
            .content_type("text/plain; charset=utf-8")
            .body(e.to_string()),
    }
}

/// Puts the default UI tokens back in the editor. Nothing is saved or
/// pushed to open pages until the editor is submitted.
#[post("/admin/settings/ui/reset")]
pub async fn ui_reset(req: HttpRequest) -> impl Responder {
    if let Err(resp) = require_token(&req) {
        return resp;
    }
    render(editor(
        SettingsKey::Ui,
        pretty_json(&default_document(SettingsKey::Ui)),
        None,
        false,
    ))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(settings_index)
        .service(ui_preview)
        .service(ui_reset)
        .service(settings_edit)
        .service(settings_save);
}
