use serde::Deserialize;

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct AuthQuery {
    pub error: Option<String>,
}

/// Flash message carried across a redirect.
#[derive(Deserialize, Default)]
pub struct NoticeQuery {
    pub saved: Option<String>,
    pub error: Option<String>,
}

/// Raw JSON from one of the document editors.
#[derive(Deserialize)]
pub struct DocumentForm {
    pub document: String,
}

#[derive(Deserialize)]
pub struct StatusQuery {
    pub status: Option<String>,
}

/// Drag-and-drop result: `active_id` was dropped on `over_id`.
#[derive(Deserialize)]
pub struct MoveForm {
    pub active_id: String,
    pub over_id: String,
}

/// Up/down buttons.
#[derive(Deserialize)]
pub struct StepForm {
    pub id: String,
    pub direction: String,
}

impl StepForm {
    pub fn is_up(&self) -> bool {
        self.direction.eq_ignore_ascii_case("up")
    }
}

#[derive(Deserialize)]
pub struct FooterColumnForm {
    pub title: Option<String>,
}

#[derive(Deserialize)]
pub struct FooterLinkForm {
    pub label: Option<String>,
    pub href: Option<String>,
}

#[derive(Deserialize)]
pub struct FooterMetaForm {
    pub copyright_text: String,
    pub background_color: String,
    pub text_color: String,
    pub link_color: String,
}

#[derive(Deserialize)]
pub struct SectionForm {
    pub kind: String,
}

#[derive(Deserialize)]
pub struct MenuItemForm {
    pub label: String,
    pub href: String,
}

#[derive(Deserialize)]
pub struct UserCreateForm {
    pub email: String,
    pub username: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: Option<String>,
    pub role_id: Option<String>,
}

#[derive(Deserialize)]
pub struct UserUpdateForm {
    pub email: String,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: Option<String>,
    pub role_id: Option<String>,
    pub new_password: Option<String>,
}

/// Trimmed, `None` when blank.
pub fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// HTML checkboxes post `on` when ticked and nothing otherwise.
pub fn checked(value: &Option<String>) -> bool {
    matches!(value.as_deref(), Some("on" | "true" | "1"))
}

impl UserCreateForm {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !crate::web::security::validate_email(&self.email) {
            return Err("A valid email is required");
        }
        if self.username.trim().is_empty() {
            return Err("Username is required");
        }
        if self.password.len() < 8 {
            return Err("Password must be at least 8 characters");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_and_checked() {
        assert_eq!(non_empty(&Some("  x ".into())).as_deref(), Some("x"));
        assert!(non_empty(&Some("   ".into())).is_none());
        assert!(checked(&Some("on".into())));
        assert!(!checked(&None));
    }

    #[test]
    fn test_user_create_validation() {
        let form = UserCreateForm {
            email: "a@b.co".into(),
            username: "ann".into(),
            password: "short".into(),
            first_name: None,
            last_name: None,
            is_active: Some("on".into()),
            role_id: None,
        };
        assert_eq!(form.validate(), Err("Password must be at least 8 characters"));
    }
}
