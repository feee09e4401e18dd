use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};

use socialit::api::SettingsKey;
use socialit::common::ApiError;
use socialit::models::{FooterColumn, FooterConfig, FooterLink};
use socialit::services::reorder::{move_by_id, move_step, new_id, normalize_footer, remove_by_id};

use crate::web::forms::{
    non_empty, FooterColumnForm, FooterLinkForm, FooterMetaForm, MoveForm, NoticeQuery, StepForm,
};
use crate::web::handlers::builder::{edit_document, load_document};
use crate::web::helpers::{api_failure, render, require_token};
use crate::web::state::AppState;
use crate::web::templates::AdminFooterTemplate;

const BUILDER: &str = "/admin/footer";

async fn load_footer(state: &AppState) -> Result<FooterConfig, ApiError> {
    load_document(state, SettingsKey::Footer, normalize_footer).await
}

async fn edit_footer<F>(state: &AppState, req: &HttpRequest, edit: F) -> HttpResponse
where
    F: FnOnce(&mut FooterConfig) -> Result<bool, &'static str>,
{
    edit_document(state, req, SettingsKey::Footer, normalize_footer, BUILDER, edit).await
}

fn column<'a>(
    footer: &'a mut FooterConfig,
    id: &str,
) -> Result<&'a mut FooterColumn, &'static str> {
    footer.column_mut(id).ok_or("That column no longer exists")
}

#[get("/admin/footer")]
pub async fn footer_builder(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<NoticeQuery>,
) -> impl Responder {
    if let Err(resp) = require_token(&req) {
        return resp;
    }
    match load_footer(&state).await {
        Ok(footer) => render(AdminFooterTemplate {
            footer,
            error: query.error.clone(),
            saved: query.saved.is_some(),
        }),
        Err(e) => api_failure(&req, &e),
    }
}

#[post("/admin/footer/columns")]
pub async fn add_column(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<FooterColumnForm>,
) -> impl Responder {
    let title = non_empty(&form.title).unwrap_or_else(|| "New Column".to_string());
    edit_footer(&state, &req, |footer| {
        footer.columns.push(FooterColumn {
            id: new_id("column"),
            title,
            links: Vec::new(),
        });
        Ok(true)
    })
    .await
}

#[post("/admin/footer/columns/step")]
pub async fn step_column(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<StepForm>,
) -> impl Responder {
    edit_footer(&state, &req, |footer| {
        Ok(move_step(&mut footer.columns, &form.id, form.is_up()))
    })
    .await
}

#[post("/admin/footer/columns/move")]
pub async fn move_column(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<MoveForm>,
) -> impl Responder {
    edit_footer(&state, &req, |footer| {
        Ok(move_by_id(&mut footer.columns, &form.active_id, &form.over_id))
    })
    .await
}

#[post("/admin/footer/columns/{column}/title")]
pub async fn rename_column(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    form: web::Form<FooterColumnForm>,
) -> impl Responder {
    let id = path.into_inner();
    let title = non_empty(&form.title).ok_or("Column title is required");
    edit_footer(&state, &req, |footer| {
        column(footer, &id)?.title = title?;
        Ok(true)
    })
    .await
}

#[post("/admin/footer/columns/{column}/delete")]
pub async fn remove_column(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> impl Responder {
    let id = path.into_inner();
    edit_footer(&state, &req, |footer| {
        Ok(remove_by_id(&mut footer.columns, &id).is_some())
    })
    .await
}

#[post("/admin/footer/columns/{column}/links")]
pub async fn add_link(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    form: web::Form<FooterLinkForm>,
) -> impl Responder {
    let id = path.into_inner();
    let label = non_empty(&form.label).unwrap_or_else(|| "New Link".to_string());
    let href = non_empty(&form.href).unwrap_or_else(|| "/".to_string());
    edit_footer(&state, &req, |footer| {
        let column = column(footer, &id)?;
        column.links.push(FooterLink {
            id: new_id(&format!("{}-link", column.id)),
            label,
            href,
        });
        Ok(true)
    })
    .await
}

#[post("/admin/footer/columns/{column}/links/step")]
pub async fn step_link(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    form: web::Form<StepForm>,
) -> impl Responder {
    let id = path.into_inner();
    edit_footer(&state, &req, |footer| {
        Ok(move_step(&mut column(footer, &id)?.links, &form.id, form.is_up()))
    })
    .await
}

#[post("/admin/footer/columns/{column}/links/move")]
pub async fn move_link(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    form: web::Form<MoveForm>,
) -> impl Responder {
    let id = path.into_inner();
    edit_footer(&state, &req, |footer| {
        Ok(move_by_id(
            &mut column(footer, &id)?.links,
            &form.active_id,
            &form.over_id,
        ))
    })
    .await
}

#[post("/admin/footer/columns/{column}/links/{link}")]
pub async fn update_link(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(String, String)>,
    form: web::Form<FooterLinkForm>,
) -> impl Responder {
    let (column_id, link_id) = path.into_inner();
    let label = non_empty(&form.label).ok_or("Link label is required");
    let href = non_empty(&form.href).ok_or("Link URL is required");
    edit_footer(&state, &req, |footer| {
        let link = column(footer, &column_id)?
            .links
            .iter_mut()
            .find(|l| l.id == link_id)
            .ok_or("That link no longer exists")?;
        link.label = label?;
        link.href = href?;
        Ok(true)
    })
    .await
}

#[post("/admin/footer/columns/{column}/links/{link}/delete")]
pub async fn remove_link(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(String, String)>,
) -> impl Responder {
    let (column_id, link_id) = path.into_inner();
    edit_footer(&state, &req, |footer| {
        Ok(remove_by_id(&mut column(footer, &column_id)?.links, &link_id).is_some())
    })
    .await
}

#[post("/admin/footer/meta")]
pub async fn update_meta(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<FooterMetaForm>,
) -> impl Responder {
    let form = form.into_inner();
    edit_footer(&state, &req, move |footer| {
        footer.copyright_text = form.copyright_text.trim().to_string();
        footer.styling.background_color = form.background_color.trim().to_string();
        footer.styling.text_color = form.text_color.trim().to_string();
        footer.styling.link_color = form.link_color.trim().to_string();
        Ok(true)
    })
    .await
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(footer_builder)
        .service(add_column)
        .service(step_column)
        .service(move_column)
        .service(rename_column)
        .service(remove_column)
        .service(add_link)
        .service(step_link)
        .service(move_link)
        .service(remove_link)
        .service(update_link)
        .service(update_meta);
}
