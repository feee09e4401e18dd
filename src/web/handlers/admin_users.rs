use actix_web::http::StatusCode;
use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use uuid::Uuid;

use socialit::api::CmsClient;
use socialit::common::ApiError;
use socialit::models::{Role, User, UserCreate, UserUpdate};

use crate::web::forms::{checked, non_empty, UserCreateForm, UserUpdateForm};
use crate::web::helpers::{api_failure, redirect, render, render_status, require_token};
use crate::web::security::validate_email;
use crate::web::state::AppState;
use crate::web::templates::{AdminUserFormTemplate, AdminUsersListTemplate};

/// Selected role from the form, as the backend's `role_ids` list.
fn role_ids(raw: &Option<String>) -> Result<Vec<Uuid>, &'static str> {
    match non_empty(raw) {
        None => Ok(Vec::new()),
        Some(id) => id
            .parse::<Uuid>()
            .map(|id| vec![id])
            .map_err(|_| "Unknown role"),
    }
}

async fn roles(cms: &CmsClient, token: &str) -> Vec<Role> {
    cms.list_roles(token).await.unwrap_or_else(|e| {
        log::warn!("Listing roles failed: {}", e);
        Vec::new()
    })
}

async fn form_page(
    cms: &CmsClient,
    token: &str,
    status: StatusCode,
    user: Option<User>,
    selected_role: String,
    error: Option<String>,
) -> HttpResponse {
    render_status(
        status,
        AdminUserFormTemplate {
            user,
            roles: roles(cms, token).await,
            selected_role,
            error,
        },
    )
}

#[get("/admin/users")]
pub async fn users_list(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let token = match require_token(&req) {
        Ok(t) => t,
        Err(resp) => return resp,
    };
    let (users, error) = match state.cms().list_users(&token).await {
        Ok(users) => (users, None),
        Err(ApiError::Unauthorized) => return api_failure(&req, &ApiError::Unauthorized),
        Err(e) => (Vec::new(), Some(e.detail())),
    };
    render(AdminUsersListTemplate { users, error })
}

#[get("/admin/users/new")]
pub async fn users_new(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let token = match require_token(&req) {
        Ok(t) => t,
        Err(resp) => return resp,
    };
    form_page(state.cms(), &token, StatusCode::OK, None, String::new(), None).await
}

#[post("/admin/users")]
pub async fn users_create(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<UserCreateForm>,
) -> impl Responder {
    let token = match require_token(&req) {
        Ok(t) => t,
        Err(resp) => return resp,
    };
    let form = form.into_inner();
    let selected = non_empty(&form.role_id).unwrap_or_default();
    let invalid = |message: &str| {
        form_page(
            state.cms(),
            &token,
            StatusCode::UNPROCESSABLE_ENTITY,
            None,
            selected.clone(),
            Some(message.to_string()),
        )
    };

    if let Err(msg) = form.validate() {
        return invalid(msg).await;
    }
    let role_ids = match role_ids(&form.role_id) {
        Ok(ids) => ids,
        Err(msg) => return invalid(msg).await,
    };

    let payload = UserCreate {
        email: form.email.trim().to_string(),
        username: form.username.trim().to_string(),
        password: form.password.clone(),
        first_name: non_empty(&form.first_name),
        last_name: non_empty(&form.last_name),
        is_active: checked(&form.is_active),
        role_ids,
    };
    match state.cms().create_user(&payload, &token).await {
        Ok(user) => {
            log::info!("Created user {}", user.id);
            redirect(&req, "/admin/users")
        }
        Err(ApiError::Unauthorized) => api_failure(&req, &ApiError::Unauthorized),
        Err(e) => invalid(&e.detail()).await,
    }
}

#[get("/admin/users/{id}/edit")]
pub async fn users_edit(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> impl Responder {
    let token = match require_token(&req) {
        Ok(t) => t,
        Err(resp) => return resp,
    };
    match state.cms().get_user(path.into_inner(), &token).await {
        Ok(user) => {
            let selected = user
                .roles
                .first()
                .map(|r| r.id.to_string())
                .unwrap_or_default();
            form_page(state.cms(), &token, StatusCode::OK, Some(user), selected, None).await
        }
        Err(e) => api_failure(&req, &e),
    }
}

/// Builds the partial update; unchanged fields stay `None`.
fn update_payload(user: &User, form: &UserUpdateForm) -> Result<UserUpdate, &'static str> {
    let email = form.email.trim();
    if !validate_email(email) {
        return Err("A valid email is required");
    }
    let username = form.username.trim();
    if username.is_empty() {
        return Err("Username is required");
    }
    let password = non_empty(&form.new_password);
    if password.as_ref().is_some_and(|p| p.len() < 8) {
        return Err("Password must be at least 8 characters");
    }

    let role_ids = role_ids(&form.role_id)?;
    let roles_changed = match role_ids.as_slice() {
        [] => !user.roles.is_empty(),
        [id] => !(user.roles.len() == 1 && user.has_role_id(id)),
        _ => true,
    };
    let first_name = non_empty(&form.first_name);
    let last_name = non_empty(&form.last_name);
    let is_active = checked(&form.is_active);

    Ok(UserUpdate {
        email: (email != user.email).then(|| email.to_string()),
        username: (username != user.username).then(|| username.to_string()),
        first_name: (first_name != user.first_name).then(|| first_name.unwrap_or_default()),
        last_name: (last_name != user.last_name).then(|| last_name.unwrap_or_default()),
        is_active: (is_active != user.is_active).then_some(is_active),
        password,
        role_ids: roles_changed.then_some(role_ids),
    })
}

#[post("/admin/users/{id}")]
pub async fn users_update(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    form: web::Form<UserUpdateForm>,
) -> impl Responder {
    let token = match require_token(&req) {
        Ok(t) => t,
        Err(resp) => return resp,
    };
    let id = path.into_inner();
    let user = match state.cms().get_user(id, &token).await {
        Ok(user) => user,
        Err(e) => return api_failure(&req, &e),
    };
    let selected = non_empty(&form.role_id).unwrap_or_default();

    let update = match update_payload(&user, &form) {
        Ok(update) => update,
        Err(msg) => {
            return form_page(
                state.cms(),
                &token,
                StatusCode::UNPROCESSABLE_ENTITY,
                Some(user),
                selected,
                Some(msg.to_string()),
            )
            .await
        }
    };
    if update.is_empty() {
        return redirect(&req, "/admin/users");
    }

    match state.cms().update_user(id, &update, &token).await {
        Ok(_) => {
            log::info!("Updated user {}", id);
            redirect(&req, "/admin/users")
        }
        Err(ApiError::Unauthorized) => api_failure(&req, &ApiError::Unauthorized),
        Err(e) => {
            form_page(
                state.cms(),
                &token,
                StatusCode::UNPROCESSABLE_ENTITY,
                Some(user),
                selected,
                Some(e.detail()),
            )
            .await
        }
    }
}

#[post("/admin/users/{id}/delete")]
pub async fn users_delete(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> impl Responder {
    let token = match require_token(&req) {
        Ok(t) => t,
        Err(resp) => return resp,
    };
    let id = path.into_inner();
    match state.cms().delete_user(id, &token).await {
        Ok(()) | Err(ApiError::NotFound(_)) => {
            log::info!("Deleted user {}", id);
            redirect(&req, "/admin/users")
        }
        Err(e) => api_failure(&req, &e),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(users_list)
        .service(users_new)
        .service(users_create)
        .service(users_edit)
        .service(users_update)
        .service(users_delete);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Option<Role>) -> User {
        User {
            email: "ana@example.com".into(),
            username: "ana".into(),
            first_name: Some("Ana".into()),
            is_active: true,
            roles: role.into_iter().collect(),
            ..User::default()
        }
    }

    fn form(role_id: Option<String>) -> UserUpdateForm {
        UserUpdateForm {
            email: "ana@example.com".into(),
            username: "ana".into(),
            first_name: Some("Ana".into()),
            last_name: None,
            is_active: Some("on".into()),
            role_id,
            new_password: None,
        }
    }

    #[test]
    fn test_unchanged_form_yields_empty_update() {
        let role = Role {
            id: Uuid::new_v4(),
            name: "editor".into(),
            description: None,
        };
        let user = user(Some(role.clone()));
        let update = update_payload(&user, &form(Some(role.id.to_string()))).unwrap();
        assert!(update.is_empty());
    }

    #[test]
    fn test_changed_fields_only() {
        let user = user(None);
        let mut f = form(None);
        f.username = "ana.m".into();
        f.is_active = None;
        let update = update_payload(&user, &f).unwrap();
        assert_eq!(update.username.as_deref(), Some("ana.m"));
        assert_eq!(update.is_active, Some(false));
        assert!(update.email.is_none());
        assert!(update.role_ids.is_none());
    }

    #[test]
    fn test_rejects_short_password_and_bad_role() {
        let user = user(None);
        let mut f = form(None);
        f.new_password = Some("short".into());
        assert!(update_payload(&user, &f).is_err());
        assert_eq!(role_ids(&Some("nope".into())), Err("Unknown role"));
        assert_eq!(role_ids(&Some("  ".into())), Ok(Vec::new()));
    }
}
