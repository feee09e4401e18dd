use askama::Template;

use socialit::models::{
    AboutPage, AiMlSection, ContactInfo, FooterConfig, HeaderConfig, HeroConfig, Role, User,
};

use crate::web::views::{Card, Detail, SectionView, SiteChrome};

// Public site

#[derive(Template)]
#[template(path = "public/home.html")]
pub struct HomeTemplate {
    pub chrome: SiteChrome,
    pub hero: HeroConfig,
    pub hero_style: String,
    pub services: Vec<Card>,
    pub ai_ml: AiMlSection,
    pub blogs: Vec<Card>,
    pub case_studies: Vec<Card>,
}

#[derive(Template)]
#[template(path = "public/list.html")]
pub struct ListTemplate {
    pub chrome: SiteChrome,
    pub title: String,
    pub intro: String,
    pub cards: Vec<Card>,
    pub notice: String,
    pub ai_ml: Option<AiMlSection>,
}

#[derive(Template)]
#[template(path = "public/detail.html")]
pub struct DetailTemplate {
    pub chrome: SiteChrome,
    pub detail: Detail,
}

#[derive(Template)]
#[template(path = "public/about.html")]
pub struct AboutTemplate {
    pub chrome: SiteChrome,
    pub about: AboutPage,
}

#[derive(Template)]
#[template(path = "public/contact.html")]
pub struct ContactTemplate {
    pub chrome: SiteChrome,
    pub contact: ContactInfo,
    pub whatsapp: String,
}

#[derive(Template)]
#[template(path = "public/page.html")]
pub struct PageTemplate {
    pub chrome: SiteChrome,
    pub title: String,
    pub meta_description: String,
    pub sections: Vec<SectionView>,
}

#[derive(Template)]
#[template(path = "public/not_found.html")]
pub struct NotFoundTemplate {
    pub chrome: SiteChrome,
    pub heading: String,
    pub message: String,
}

// Admin

#[derive(Template)]
#[template(path = "admin/login.html")]
pub struct AdminLoginTemplate {
    pub error: Option<String>,
}

pub struct CountTile {
    pub label: String,
    pub href: String,
    pub count: String,
}

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
pub struct AdminDashboardTemplate {
    pub tiles: Vec<CountTile>,
}

pub struct SettingsLink {
    pub href: String,
    pub label: String,
    pub help: String,
}

#[derive(Template)]
#[template(path = "admin/settings_index.html")]
pub struct AdminSettingsIndexTemplate {
    pub links: Vec<SettingsLink>,
}

#[derive(Template)]
#[template(path = "admin/settings_edit.html")]
pub struct AdminSettingsEditTemplate {
    pub key: String,
    pub label: String,
    pub help: String,
    pub document: String,
    pub error: Option<String>,
    pub saved: bool,
    pub is_ui: bool,
    pub preview_style: String,
}

#[derive(Template)]
#[template(path = "admin/footer.html")]
pub struct AdminFooterTemplate {
    pub footer: FooterConfig,
    pub error: Option<String>,
    pub saved: bool,
}

#[derive(Template)]
#[template(path = "admin/header.html")]
pub struct AdminHeaderTemplate {
    pub header: HeaderConfig,
    pub error: Option<String>,
    pub saved: bool,
}

pub struct ContentRow {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub status: String,
    pub public_href: String,
}

pub struct SectionRow {
    pub id: String,
    pub kind: String,
    pub summary: String,
}

#[derive(Template)]
#[template(path = "admin/sections.html")]
pub struct AdminSectionsTemplate {
    pub page_id: String,
    pub title: String,
    pub sections: Vec<SectionRow>,
    pub kinds: Vec<String>,
    pub error: Option<String>,
    pub saved: bool,
}

#[derive(Template)]
#[template(path = "admin/content_list.html")]
pub struct AdminContentListTemplate {
    pub label: String,
    pub segment: String,
    pub singular: String,
    pub rows: Vec<ContentRow>,
    pub status: String,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/content_edit.html")]
pub struct AdminContentEditTemplate {
    pub label: String,
    pub segment: String,
    pub singular: String,
    /// `None` while creating.
    pub id: Option<String>,
    pub document: String,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/users_list.html")]
pub struct AdminUsersListTemplate {
    pub users: Vec<User>,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/user_form.html")]
pub struct AdminUserFormTemplate {
    /// `None` while creating.
    pub user: Option<User>,
    pub roles: Vec<Role>,
    pub selected_role: String,
    pub error: Option<String>,
}
