use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};

use socialit::api::SettingsKey;
use socialit::common::ApiError;
use socialit::models::{HeaderConfig, MenuItem};
use socialit::services::reorder::{move_by_id, move_step, new_id, normalize_header, remove_by_id};

use crate::web::forms::{MenuItemForm, MoveForm, NoticeQuery, StepForm};
use crate::web::handlers::builder::{edit_document, load_document};
use crate::web::helpers::{api_failure, render, require_token};
use crate::web::state::AppState;
use crate::web::templates::AdminHeaderTemplate;

const BUILDER: &str = "/admin/header";

async fn load_header(state: &AppState) -> Result<HeaderConfig, ApiError> {
    load_document(state, SettingsKey::Header, normalize_header).await
}

async fn edit_header<F>(state: &AppState, req: &HttpRequest, edit: F) -> HttpResponse
where
    F: FnOnce(&mut HeaderConfig) -> Result<bool, &'static str>,
{
    edit_document(state, req, SettingsKey::Header, normalize_header, BUILDER, edit).await
}

#[get("/admin/header")]
pub async fn header_builder(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<NoticeQuery>,
) -> impl Responder {
    if let Err(resp) = require_token(&req) {
        return resp;
    }
    match load_header(&state).await {
        Ok(header) => render(AdminHeaderTemplate {
            header,
            error: query.error.clone(),
            saved: query.saved.is_some(),
        }),
        Err(e) => api_failure(&req, &e),
    }
}

#[post("/admin/header/menu")]
pub async fn add_item(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<MenuItemForm>,
) -> impl Responder {
    let label = form.label.trim().to_string();
    let href = match form.href.trim() {
        "" => "/".to_string(),
        href => href.to_string(),
    };
    edit_header(&state, &req, |header| {
        if label.is_empty() {
            return Err("Menu label is required");
        }
        header
            .menu_items
            .push(MenuItem::link(new_id("menu"), &label, &href));
        Ok(true)
    })
    .await
}

#[post("/admin/header/menu/step")]
pub async fn step_item(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<StepForm>,
) -> impl Responder {
    edit_header(&state, &req, |header| {
        Ok(move_step(&mut header.menu_items, &form.id, form.is_up()))
    })
    .await
}

#[post("/admin/header/menu/move")]
pub async fn move_item(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<MoveForm>,
) -> impl Responder {
    edit_header(&state, &req, |header| {
        Ok(move_by_id(&mut header.menu_items, &form.active_id, &form.over_id))
    })
    .await
}

#[post("/admin/header/menu/{id}")]
pub async fn update_item(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    form: web::Form<MenuItemForm>,
) -> impl Responder {
    let id = path.into_inner();
    let form = form.into_inner();
    edit_header(&state, &req, move |header| {
        let item = header
            .menu_items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or("That menu item no longer exists")?;
        let label = form.label.trim();
        let href = form.href.trim();
        if label.is_empty() || href.is_empty() {
            return Err("Menu label and URL are required");
        }
        if item.label == label && item.href == href {
            return Ok(false);
        }
        item.label = label.to_string();
        item.href = href.to_string();
        Ok(true)
    })
    .await
}

#[post("/admin/header/menu/{id}/delete")]
pub async fn remove_item(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> impl Responder {
    let id = path.into_inner();
    edit_header(&state, &req, |header| {
        Ok(remove_by_id(&mut header.menu_items, &id).is_some())
    })
    .await
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(header_builder)
        .service(add_item)
        .service(step_item)
        .service(move_item)
        .service(remove_item)
        .service(update_item);
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::http::header;
    use actix_web::{test, App};
    use serde_json::json;

    use crate::web::helpers::TOKEN_COOKIE;
    use crate::web::testing::StubBackend;

    #[actix_web::test]
    async fn test_menu_move_and_update_reach_backend() {
        let dir = tempfile::tempdir().unwrap();
        let backend = StubBackend::default().with(
            "/cms/site-settings/header",
            json!({
                "menu_items": [
                    {"id": "home", "label": "Home", "href": "/"},
                    {"id": "blog", "label": "Blog", "href": "/blogs"},
                    {"id": "contact", "label": "Contact", "href": "/contact"}
                ],
                "mega_menu": {"enabled": false}
            }),
        );
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(backend.state(dir.path())))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/admin/header/menu/move")
            .cookie(Cookie::new(TOKEN_COOKIE, "token"))
            .set_form([("active_id", "home"), ("over_id", "contact")])
            .to_request();
        test::call_service(&app, req).await;

        // Same label and URL: nothing to save.
        let req = test::TestRequest::post()
            .uri("/admin/header/menu/blog")
            .cookie(Cookie::new(TOKEN_COOKIE, "token"))
            .set_form([("label", "Blog"), ("href", "/blogs")])
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.headers().get(header::LOCATION).unwrap(), "/admin/header");

        let puts = backend.puts();
        assert_eq!(puts.len(), 1);
        let body = &puts[0].1;
        let order: Vec<&str> = body["menu_items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["id"].as_str().unwrap())
            .collect();
        assert_eq!(order, vec!["blog", "contact", "home"]);
        assert_eq!(body["mega_menu"], json!({"enabled": false}));
    }

    #[actix_web::test]
    async fn test_builder_requires_session() {
        let dir = tempfile::tempdir().unwrap();
        let backend = StubBackend::default();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(backend.state(dir.path())))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/admin/header/menu")
            .set_form([("label", "Docs"), ("href", "/docs")])
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.headers().get(header::LOCATION).unwrap(), "/admin/login");
        assert!(backend.puts().is_empty());
    }
}
