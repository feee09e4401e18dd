use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use std::time::Duration;

use socialit::api::token_subject;
use socialit::common::ApiError;

use crate::web::forms::{AuthQuery, LoginForm};
use crate::web::helpers::{client_ip, current_token, redirect, removal_cookie, render, token_cookie};
use crate::web::security::{generic_error_message, validate_email};
use crate::web::state::AppState;
use crate::web::templates::AdminLoginTemplate;

const MAX_ATTEMPTS: usize = 5;
const ATTEMPT_WINDOW: Duration = Duration::from_secs(300);

fn login_error(code: &str) -> String {
    match code {
        "missing" => "Email and password are required".to_string(),
        "invalid" => "Invalid email or password".to_string(),
        "rate_limit" => "Too many login attempts. Please try again later.".to_string(),
        "unavailable" => "The CMS backend is unavailable. Please try again.".to_string(),
        "internal" => generic_error_message("signing you in"),
        other => other.to_string(),
    }
}

fn back_to_login(error: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", format!("/admin/login?error={error}")))
        .finish()
}

#[get("/admin/login")]
pub async fn login_form(req: HttpRequest, query: web::Query<AuthQuery>) -> impl Responder {
    if current_token(&req).is_some() {
        return redirect(&req, "/admin");
    }
    let error = query.error.as_deref().map(login_error);
    render(AdminLoginTemplate { error })
}

#[post("/admin/login")]
pub async fn login_submit(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<LoginForm>,
) -> impl Responder {
    let limit_key = format!("login:{}", client_ip(&req));
    if !state
        .rate_limiter
        .check(&limit_key, MAX_ATTEMPTS, ATTEMPT_WINDOW)
    {
        log::warn!("Login rate limit hit for {}", limit_key);
        return back_to_login("rate_limit");
    }

    let email = form.email.trim();
    if email.is_empty() || form.password.is_empty() {
        return back_to_login("missing");
    }
    if !validate_email(email) {
        return back_to_login("invalid");
    }

    let session = match state.cms().login(email, &form.password).await {
        Ok(session) => session,
        Err(ApiError::Unauthorized) | Err(ApiError::NotFound(_)) => {
            return back_to_login("invalid");
        }
        Err(ApiError::Status { status, .. }) if status == 400 || status == 403 => {
            return back_to_login("invalid");
        }
        Err(ApiError::Http(e)) => {
            log::error!("Login request failed: {}", e);
            return back_to_login("unavailable");
        }
        Err(e) => {
            log::error!("Login failed: {}", e);
            return back_to_login("internal");
        }
    };

    state.rate_limiter.reset(&limit_key);
    log::info!(
        "Admin signed in (user {})",
        token_subject(&session.access_token).unwrap_or_else(|| "unknown".to_string())
    );

    HttpResponse::SeeOther()
        .cookie(token_cookie(&session.access_token))
        .insert_header(("Location", "/admin"))
        .finish()
}

#[post("/admin/logout")]
pub async fn logout(req: HttpRequest) -> impl Responder {
    let mut res = redirect(&req, "/admin/login");
    if let Err(e) = res.add_cookie(&removal_cookie()) {
        log::error!("Failed to clear session cookie: {}", e);
    }
    res
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(login_form)
        .service(login_submit)
        .service(logout);
}
