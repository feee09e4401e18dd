use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::ContentKind;

pub const SETTINGS_PREFIX: &str = "/cms/site-settings";
pub const USERS_PATH: &str = "/cms/users";
pub const ROLES_PATH: &str = "/cms/roles";
pub const LOGIN_PATH: &str = "/auth/login";

/// Site-settings sub-resources.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SettingsKey {
    Theme,
    Header,
    Footer,
    Ui,
    Hero,
    AboutPage,
    ContactInfo,
    ServicesAiMlSection,
}

impl SettingsKey {
    pub const ALL: [SettingsKey; 8] = [
        Self::Theme,
        Self::Header,
        Self::Footer,
        Self::Ui,
        Self::Hero,
        Self::AboutPage,
        Self::ContactInfo,
        Self::ServicesAiMlSection,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Theme => "theme",
            Self::Header => "header",
            Self::Footer => "footer",
            Self::Ui => "ui",
            Self::Hero => "hero",
            Self::AboutPage => "about-page",
            Self::ContactInfo => "contact-info",
            Self::ServicesAiMlSection => "services-ai-ml-section",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Theme => "Theme",
            Self::Header => "Header",
            Self::Footer => "Footer",
            Self::Ui => "UI Settings",
            Self::Hero => "Hero",
            Self::AboutPage => "About Page",
            Self::ContactInfo => "Contact Info",
            Self::ServicesAiMlSection => "AI & ML Section",
        }
    }

    /// One-line help shown above the JSON editor.
    pub fn help(&self) -> &'static str {
        match self {
            Self::Theme => "Theme colors. Keys: primary, secondary, accent, background, surface, text, textSecondary, border, success, warning, error, info.",
            Self::Header => "Header config: logo, menu_items, cta_button, styling.",
            Self::Footer => "Footer config: columns (title, links), copyright_text (use {year}), styling.",
            Self::Ui => "Typography, spacing, radius, shadow, animation and layout tokens.",
            Self::Hero => "Homepage hero: design, headline, description, calls to action, data cards.",
            Self::AboutPage => "About page content: intro, stats, journey, vision, team.",
            Self::ContactInfo => "Contact page: email, addresses, phones, WhatsApp, form toggle.",
            Self::ServicesAiMlSection => "AI & ML solutions block on the services page.",
        }
    }

    pub fn path(&self) -> String {
        format!("{}/{}", SETTINGS_PREFIX, self.as_str())
    }
}

impl std::fmt::Display for SettingsKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SettingsKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("invalid settings key: {}", s))
    }
}

pub fn collection_path(kind: ContentKind) -> String {
    format!("/cms/{}", kind.as_str())
}

pub fn item_path(kind: ContentKind, id: Uuid) -> String {
    format!("/cms/{}/{}", kind.as_str(), id)
}

pub fn slug_path(kind: ContentKind, slug: &str) -> String {
    format!("/cms/{}/slug/{}", kind.as_str(), urlencoding::encode(slug))
}

pub fn user_path(id: Uuid) -> String {
    format!("{}/{}", USERS_PATH, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_paths() {
        assert_eq!(SettingsKey::Theme.path(), "/cms/site-settings/theme");
        assert_eq!(SettingsKey::AboutPage.path(), "/cms/site-settings/about-page");
        assert_eq!("contact-info".parse::<SettingsKey>(), Ok(SettingsKey::ContactInfo));
        assert!("nope".parse::<SettingsKey>().is_err());
    }

    #[test]
    fn test_content_paths() {
        let id = Uuid::nil();
        assert_eq!(collection_path(ContentKind::CaseStudies), "/cms/case-studies");
        assert_eq!(
            item_path(ContentKind::Jobs, id),
            "/cms/jobs/00000000-0000-0000-0000-000000000000"
        );
        assert_eq!(slug_path(ContentKind::Blogs, "a b"), "/cms/blogs/slug/a%20b");
    }
}
