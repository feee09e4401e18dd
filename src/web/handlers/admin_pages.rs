//! Page section builder: add, remove and reorder the blocks of a CMS page.

use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use serde_json::Value;
use uuid::Uuid;

use socialit::common::ApiError;
use socialit::log_err;
use socialit::models::{normalize_sections, ContentKind, Section, SECTION_KINDS};
use socialit::services::reorder::{self, move_by_id, move_step, remove_by_id};

use crate::web::forms::{MoveForm, NoticeQuery, SectionForm, StepForm};
use crate::web::helpers::{api_failure, redirect, render, require_token};
use crate::web::state::AppState;
use crate::web::templates::{AdminSectionsTemplate, SectionRow};

fn builder_path(page_id: Uuid) -> String {
    format!("/admin/pages/{page_id}/sections")
}

/// Page record with its sections pulled out for editing.
struct PageDraft {
    document: Value,
    sections: Vec<Section>,
}

impl PageDraft {
    fn title(&self) -> String {
        self.document
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or("Untitled page")
            .to_string()
    }

    /// The record with the edited sections written back into `content`.
    fn into_document(mut self) -> Result<Value, serde_json::Error> {
        let content = serde_json::to_value(&self.sections)?;
        if let Some(map) = self.document.as_object_mut() {
            map.insert("content".to_string(), content);
        }
        Ok(self.document)
    }
}

async fn load_page(state: &AppState, page_id: Uuid, token: &str) -> Result<PageDraft, ApiError> {
    let document = state
        .cms()
        .get_item(ContentKind::Pages, page_id, Some(token))
        .await?;
    let mut sections = normalize_sections(document.get("content").cloned().unwrap_or(Value::Null));
    reorder::normalize_sections(&mut sections);
    Ok(PageDraft { document, sections })
}

/// Loads the page, applies `edit` to its sections and writes the page back
/// when anything changed. Always redirects to the builder.
async fn edit_sections<F>(
    state: &AppState,
    req: &HttpRequest,
    page_id: Uuid,
    edit: F,
) -> HttpResponse
where
    F: FnOnce(&mut Vec<Section>) -> Result<bool, &'static str>,
{
    let token = match require_token(req) {
        Ok(t) => t,
        Err(resp) => return resp,
    };
    let back = builder_path(page_id);
    let mut draft = match load_page(state, page_id, &token).await {
        Ok(d) => d,
        Err(e) => return api_failure(req, &e),
    };

    match edit(&mut draft.sections) {
        Ok(true) => {}
        Ok(false) => return redirect(req, &back),
        Err(msg) => return redirect(req, &format!("{back}?error={}", urlencoding::encode(msg))),
    }

    let document = match draft.into_document() {
        Ok(d) => d,
        Err(e) => {
            log_err!("Serializing page sections", e, serde_json::json!({ "page": page_id }));
            return HttpResponse::InternalServerError().finish();
        }
    };
    match state
        .cms()
        .update(ContentKind::Pages, page_id, &document, &token)
        .await
    {
        Ok(_) => {
            log::info!("Updated sections of page {}", page_id);
            redirect(req, &format!("{back}?saved=1"))
        }
        Err(ApiError::Unauthorized) => api_failure(req, &ApiError::Unauthorized),
        Err(e) => redirect(
            req,
            &format!("{back}?error={}", urlencoding::encode(&e.detail())),
        ),
    }
}

#[get("/admin/pages/{id}/sections")]
pub async fn sections_builder(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    query: web::Query<NoticeQuery>,
) -> impl Responder {
    let token = match require_token(&req) {
        Ok(t) => t,
        Err(resp) => return resp,
    };
    let page_id = path.into_inner();
    match load_page(&state, page_id, &token).await {
        Ok(draft) => render(AdminSectionsTemplate {
            page_id: page_id.to_string(),
            title: draft.title(),
            sections: draft
                .sections
                .iter()
                .map(|s| SectionRow {
                    id: s.id.clone(),
                    kind: s.kind.clone(),
                    summary: s.summary(),
                })
                .collect(),
            kinds: SECTION_KINDS.iter().map(|k| k.to_string()).collect(),
            error: query.error.clone(),
            saved: query.saved.is_some(),
        }),
        Err(e) => api_failure(&req, &e),
    }
}

#[post("/admin/pages/{id}/sections")]
pub async fn add_section(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    form: web::Form<SectionForm>,
) -> impl Responder {
    let kind = form.kind.trim().to_string();
    edit_sections(&state, &req, path.into_inner(), |sections| {
        if !SECTION_KINDS.contains(&kind.as_str()) {
            return Err("Unknown section type");
        }
        sections.push(Section::blank(reorder::new_id("section"), &kind));
        Ok(true)
    })
    .await
}

#[post("/admin/pages/{id}/sections/step")]
pub async fn step_section(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    form: web::Form<StepForm>,
) -> impl Responder {
    edit_sections(&state, &req, path.into_inner(), |sections| {
        Ok(move_step(sections, &form.id, form.is_up()))
    })
    .await
}

#[post("/admin/pages/{id}/sections/move")]
pub async fn move_section(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    form: web::Form<MoveForm>,
) -> impl Responder {
    edit_sections(&state, &req, path.into_inner(), |sections| {
        Ok(move_by_id(sections, &form.active_id, &form.over_id))
    })
    .await
}

#[post("/admin/pages/{id}/sections/{section}/delete")]
pub async fn remove_section(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(Uuid, String)>,
) -> impl Responder {
    let (page_id, section_id) = path.into_inner();
    edit_sections(&state, &req, page_id, |sections| {
        Ok(remove_by_id(sections, &section_id).is_some())
    })
    .await
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(sections_builder)
        .service(add_section)
        .service(step_section)
        .service(move_section)
        .service(remove_section);
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::http::{header, StatusCode};
    use actix_web::{test, App};
    use serde_json::json;

    use crate::web::helpers::TOKEN_COOKIE;
    use crate::web::testing::StubBackend;

    const PAGE: &str = "0b7c4c1e-5d1f-4a39-9d0e-2f6a8b3c4d5e";

    fn page_path() -> String {
        format!("/cms/pages/{PAGE}")
    }

    fn stub() -> StubBackend {
        StubBackend::default().with(
            &page_path(),
            json!({
                "id": PAGE,
                "slug": "landing",
                "title": "Landing",
                "status": "published",
                "content": [
                    {"id": "hero", "type": "hero", "data": {"heading": "Hi"}},
                    {"id": "intro", "type": "text", "data": {"content": "About us"}},
                    {"id": "cta", "type": "cta", "data": {"heading": "Talk"}}
                ]
            }),
        )
    }

    fn section_ids(document: &Value) -> Vec<String> {
        document["content"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["id"].as_str().unwrap().to_string())
            .collect()
    }

    #[actix_web::test]
    async fn test_drag_reorders_sections_and_keeps_the_record() {
        let dir = tempfile::tempdir().unwrap();
        let backend = stub();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(backend.state(dir.path())))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri(&format!("/admin/pages/{PAGE}/sections/move"))
            .cookie(Cookie::new(TOKEN_COOKIE, "token"))
            .set_form([("active_id", "cta"), ("over_id", "hero")])
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            res.headers().get(header::LOCATION).unwrap(),
            &format!("/admin/pages/{PAGE}/sections?saved=1")
        );

        let puts = backend.puts();
        assert_eq!(puts.len(), 1);
        let (path, body) = &puts[0];
        assert_eq!(path, &page_path());
        assert_eq!(section_ids(body), vec!["cta", "hero", "intro"]);
        assert_eq!(body["slug"], "landing");
        assert_eq!(body["content"][0]["data"]["heading"], "Talk");
    }

    #[actix_web::test]
    async fn test_remove_and_unknown_kind() {
        let dir = tempfile::tempdir().unwrap();
        let backend = stub();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(backend.state(dir.path())))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri(&format!("/admin/pages/{PAGE}/sections/intro/delete"))
            .cookie(Cookie::new(TOKEN_COOKIE, "token"))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::post()
            .uri(&format!("/admin/pages/{PAGE}/sections"))
            .cookie(Cookie::new(TOKEN_COOKIE, "token"))
            .set_form([("kind", "carousel")])
            .to_request();
        let res = test::call_service(&app, req).await;
        let location = res.headers().get(header::LOCATION).unwrap().to_str().unwrap();
        assert!(location.ends_with("?error=Unknown%20section%20type"));

        let puts = backend.puts();
        assert_eq!(puts.len(), 1);
        assert_eq!(section_ids(&puts[0].1), vec!["hero", "cta"]);
    }
}
