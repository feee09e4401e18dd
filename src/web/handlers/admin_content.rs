use actix_web::http::StatusCode;
use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use futures_util::future::join_all;
use serde_json::Value;
use uuid::Uuid;

use socialit::common::ApiError;
use socialit::models::{ContentKind, ContentStatus};

use crate::web::forms::{DocumentForm, StatusQuery};
use crate::web::helpers::{api_failure, pretty_json, redirect, render, render_status, require_token};
use crate::web::security::validate_slug;
use crate::web::state::AppState;
use crate::web::templates::{
    AdminContentEditTemplate, AdminContentListTemplate, AdminDashboardTemplate, ContentRow,
    CountTile,
};

fn parse_kind(raw: &str) -> Result<ContentKind, HttpResponse> {
    raw.parse::<ContentKind>()
        .map_err(|_| HttpResponse::NotFound().body("Unknown content type"))
}

#[get("/admin")]
pub async fn dashboard(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let token = match require_token(&req) {
        Ok(t) => t,
        Err(resp) => return resp,
    };

    let cms = state.cms();
    let counts = join_all(
        ContentKind::ALL
            .iter()
            .map(|kind| cms.list::<Value>(*kind, None, Some(&token))),
    )
    .await;
    let users = cms.list_users(&token).await;

    let mut tiles = Vec::with_capacity(ContentKind::ALL.len() + 1);
    for (kind, result) in ContentKind::ALL.iter().zip(counts) {
        let count = match result {
            Ok(items) => items.len().to_string(),
            Err(ApiError::Unauthorized) => return api_failure(&req, &ApiError::Unauthorized),
            Err(e) => {
                log::warn!("Counting {} failed: {}", kind, e);
                "–".to_string()
            }
        };
        tiles.push(CountTile {
            label: kind.label().to_string(),
            href: format!("/admin/{}", kind.site_segment()),
            count,
        });
    }
    let user_count = match users {
        Ok(users) => users.len().to_string(),
        Err(ApiError::Unauthorized) => return api_failure(&req, &ApiError::Unauthorized),
        // Editors cannot list users.
        Err(_) => "–".to_string(),
    };
    tiles.push(CountTile {
        label: "Users".to_string(),
        href: "/admin/users".to_string(),
        count: user_count,
    });

    render(AdminDashboardTemplate { tiles })
}

fn row(kind: ContentKind, item: &Value) -> Option<ContentRow> {
    let text = |key: &str| {
        item.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    let id = text("id");
    if id.is_empty() {
        return None;
    }
    let slug = text("slug");
    let status = text("status");
    let public_href = if status == ContentStatus::Published.as_str() && !slug.is_empty() {
        match kind {
            ContentKind::Pages => format!("/{slug}"),
            _ => format!("/{}/{}", kind.site_segment(), slug),
        }
    } else {
        String::new()
    };
    Some(ContentRow {
        id,
        title: text("title"),
        slug,
        status,
        public_href,
    })
}

#[get("/admin/{kind:blogs|case-studies|services|careers|pages}")]
pub async fn content_list(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    query: web::Query<StatusQuery>,
) -> impl Responder {
    let token = match require_token(&req) {
        Ok(t) => t,
        Err(resp) => return resp,
    };
    let kind = match parse_kind(&path.into_inner()) {
        Ok(k) => k,
        Err(resp) => return resp,
    };

    let status = query
        .status
        .as_deref()
        .and_then(|s| s.parse::<ContentStatus>().ok());

    let (rows, error) = match state.cms().list::<Value>(kind, status, Some(&token)).await {
        Ok(items) => (items.iter().filter_map(|i| row(kind, i)).collect(), None),
        Err(ApiError::Unauthorized) => return api_failure(&req, &ApiError::Unauthorized),
        Err(e) => (Vec::new(), Some(e.detail())),
    };

    render(AdminContentListTemplate {
        label: kind.label().to_string(),
        segment: kind.site_segment().to_string(),
        singular: kind.singular().to_string(),
        rows,
        status: status.map(|s| s.as_str().to_string()).unwrap_or_default(),
        error,
    })
}

fn editor(
    kind: ContentKind,
    id: Option<Uuid>,
    document: String,
    error: Option<String>,
) -> AdminContentEditTemplate {
    AdminContentEditTemplate {
        label: kind.label().to_string(),
        segment: kind.site_segment().to_string(),
        singular: kind.singular().to_string(),
        id: id.map(|id| id.to_string()),
        document,
        error,
    }
}

/// Parses and sanity-checks editor input.
fn parse_document(raw: &str) -> Result<Value, String> {
    let value: Value = serde_json::from_str(raw).map_err(|_| "Invalid JSON".to_string())?;
    let Some(map) = value.as_object() else {
        return Err("The document must be a JSON object".to_string());
    };
    if let Some(slug) = map.get("slug").and_then(Value::as_str) {
        if !slug.is_empty() && !validate_slug(slug) {
            return Err("Slug may only contain lowercase letters, digits and hyphens".to_string());
        }
    }
    Ok(value)
}

#[get("/admin/{kind:blogs|case-studies|services|careers|pages}/new")]
pub async fn content_new(req: HttpRequest, path: web::Path<String>) -> impl Responder {
    if let Err(resp) = require_token(&req) {
        return resp;
    }
    let kind = match parse_kind(&path.into_inner()) {
        Ok(k) => k,
        Err(resp) => return resp,
    };
    render(editor(kind, None, pretty_json(&kind.template()), None))
}

#[post("/admin/{kind:blogs|case-studies|services|careers|pages}")]
pub async fn content_create(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    form: web::Form<DocumentForm>,
) -> impl Responder {
    let token = match require_token(&req) {
        Ok(t) => t,
        Err(resp) => return resp,
    };
    let kind = match parse_kind(&path.into_inner()) {
        Ok(k) => k,
        Err(resp) => return resp,
    };

    let document = match parse_document(&form.document) {
        Ok(v) => v,
        Err(msg) => {
            return render_status(
                StatusCode::UNPROCESSABLE_ENTITY,
                editor(kind, None, form.document.clone(), Some(msg)),
            )
        }
    };

    match state.cms().create(kind, &document, &token).await {
        Ok(created) => {
            log::info!("Created {}", kind.singular());
            let location = match created.get("id").and_then(Value::as_str) {
                Some(id) => format!("/admin/{}/{}/edit", kind.site_segment(), id),
                None => format!("/admin/{}", kind.site_segment()),
            };
            redirect(&req, &location)
        }
        Err(ApiError::Unauthorized) => api_failure(&req, &ApiError::Unauthorized),
        Err(e) => render_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            editor(kind, None, form.document.clone(), Some(e.detail())),
        ),
    }
}

#[get("/admin/{kind:blogs|case-studies|services|careers|pages}/{id}/edit")]
pub async fn content_edit(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(String, Uuid)>,
) -> impl Responder {
    let token = match require_token(&req) {
        Ok(t) => t,
        Err(resp) => return resp,
    };
    let (kind, id) = path.into_inner();
    let kind = match parse_kind(&kind) {
        Ok(k) => k,
        Err(resp) => return resp,
    };

    match state.cms().get_item(kind, id, Some(&token)).await {
        Ok(item) => render(editor(kind, Some(id), pretty_json(&item), None)),
        Err(e) => api_failure(&req, &e),
    }
}

#[post("/admin/{kind:blogs|case-studies|services|careers|pages}/{id}")]
pub async fn content_update(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(String, Uuid)>,
    form: web::Form<DocumentForm>,
) -> impl Responder {
    let token = match require_token(&req) {
        Ok(t) => t,
        Err(resp) => return resp,
    };
    let (kind, id) = path.into_inner();
    let kind = match parse_kind(&kind) {
        Ok(k) => k,
        Err(resp) => return resp,
    };

    let document = match parse_document(&form.document) {
        Ok(v) => v,
        Err(msg) => {
            return render_status(
                StatusCode::UNPROCESSABLE_ENTITY,
                editor(kind, Some(id), form.document.clone(), Some(msg)),
            )
        }
    };

    match state.cms().update(kind, id, &document, &token).await {
        Ok(_) => {
            log::info!("Updated {} {}", kind.singular(), id);
            redirect(&req, &format!("/admin/{}", kind.site_segment()))
        }
        Err(ApiError::Unauthorized) => api_failure(&req, &ApiError::Unauthorized),
        Err(e) => render_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            editor(kind, Some(id), form.document.clone(), Some(e.detail())),
        ),
    }
}

#[post("/admin/{kind:blogs|case-studies|services|careers|pages}/{id}/delete")]
pub async fn content_delete(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(String, Uuid)>,
) -> impl Responder {
    let token = match require_token(&req) {
        Ok(t) => t,
        Err(resp) => return resp,
    };
    let (kind, id) = path.into_inner();
    let kind = match parse_kind(&kind) {
        Ok(k) => k,
        Err(resp) => return resp,
    };

    match state.cms().remove(kind, id, &token).await {
        Ok(()) | Err(ApiError::NotFound(_)) => {
            log::info!("Deleted {} {}", kind.singular(), id);
            redirect(&req, &format!("/admin/{}", kind.site_segment()))
        }
        Err(e) => api_failure(&req, &e),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(dashboard)
        .service(content_new)
        .service(content_list)
        .service(content_create)
        .service(content_edit)
        .service(content_update)
        .service(content_delete);
}
