use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use askama::Template;
use chrono::{Datelike, Utc};

use socialit::api::token_expired;
use socialit::common::ApiError;

pub const TOKEN_COOKIE: &str = "sit_token";
pub const LOGIN_PATH: &str = "/admin/login";

pub fn is_htmx(req: &HttpRequest) -> bool {
    req.headers()
        .get("HX-Request")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|s| s.eq_ignore_ascii_case("true"))
}

/// Bearer token from the session cookie, unless it is visibly expired.
pub fn current_token(req: &HttpRequest) -> Option<String> {
    req.cookie(TOKEN_COOKIE)
        .map(|c| c.value().trim().to_string())
        .filter(|t| !t.is_empty())
        .filter(|t| !token_expired(t, Utc::now().timestamp()))
}

pub fn require_token(req: &HttpRequest) -> Result<String, HttpResponse> {
    current_token(req).ok_or_else(|| session_expired(req))
}

pub fn token_cookie(token: &str) -> Cookie<'static> {
    Cookie::build(TOKEN_COOKIE, token.to_string())
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(actix_web::cookie::time::Duration::days(1))
        .finish()
}

pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(TOKEN_COOKIE, "")
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .finish();
    cookie.make_removal();
    cookie
}

/// 303 for plain forms, `HX-Redirect` for htmx requests.
pub fn redirect(req: &HttpRequest, location: &str) -> HttpResponse {
    if is_htmx(req) {
        HttpResponse::Ok()
            .insert_header(("HX-Redirect", location.to_string()))
            .finish()
    } else {
        HttpResponse::SeeOther()
            .insert_header(("Location", location.to_string()))
            .finish()
    }
}

/// Drops the session cookie and sends the browser to the login form.
pub fn session_expired(req: &HttpRequest) -> HttpResponse {
    let mut res = redirect(req, LOGIN_PATH);
    if let Err(e) = res.add_cookie(&removal_cookie()) {
        log::error!("Failed to clear session cookie: {}", e);
    }
    res
}

/// Response for a failed backend call made on behalf of an admin.
pub fn api_failure(req: &HttpRequest, err: &ApiError) -> HttpResponse {
    match err {
        ApiError::Unauthorized => session_expired(req),
        ApiError::NotFound(_) => HttpResponse::NotFound()
            .content_type("text/plain; charset=utf-8")
            .body("Not found"),
        ApiError::Status { status, detail } => {
            let code = StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY);
            HttpResponse::build(code)
                .content_type("text/plain; charset=utf-8")
                .body(detail.clone())
        }
        other => {
            log::error!("Backend request failed: {}", other);
            HttpResponse::BadGateway()
                .content_type("text/plain; charset=utf-8")
                .body(other.detail())
        }
    }
}

pub fn render<T: Template>(t: T) -> HttpResponse {
    render_status(StatusCode::OK, t)
}

pub fn render_status<T: Template>(status: StatusCode, t: T) -> HttpResponse {
    match t.render() {
        Ok(body) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            log::error!("Template error: {}", e);
            HttpResponse::InternalServerError()
                .content_type("text/plain; charset=utf-8")
                .body(format!("Template error: {e}"))
        }
    }
}

/// JSON for a `<textarea>`, pretty-printed.
pub fn pretty_json(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

pub fn current_year() -> i32 {
    Utc::now().year()
}

/// Client address used as the rate-limit key.
pub fn client_ip(req: &HttpRequest) -> String {
    req.connection_info()
        .realip_remote_addr()
        .unwrap_or("unknown")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_missing_token_redirects_to_login() {
        let req = TestRequest::get().uri("/admin").to_http_request();
        let res = require_token(&req).unwrap_err();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers().get("Location").unwrap(), LOGIN_PATH);
    }

    #[test]
    fn test_htmx_redirect_uses_header() {
        let req = TestRequest::get()
            .insert_header(("HX-Request", "true"))
            .to_http_request();
        let res = redirect(&req, "/admin");
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers().get("HX-Redirect").unwrap(), "/admin");
    }

    #[test]
    fn test_unauthorized_clears_cookie() {
        let req = TestRequest::get()
            .cookie(Cookie::new(TOKEN_COOKIE, "abc"))
            .to_http_request();
        assert_eq!(current_token(&req).as_deref(), Some("abc"));

        let res = api_failure(&req, &ApiError::Unauthorized);
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        let cleared = res
            .cookies()
            .find(|c| c.name() == TOKEN_COOKIE)
            .expect("removal cookie");
        assert_eq!(cleared.value(), "");
    }

    #[test]
    fn test_backend_detail_is_passed_through() {
        let req = TestRequest::get().to_http_request();
        let res = api_failure(
            &req,
            &ApiError::Status {
                status: 400,
                detail: "Slug already exists".into(),
            },
        );
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
