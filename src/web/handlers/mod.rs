pub mod admin_content;
pub mod admin_footer;
pub mod admin_header;
pub mod admin_pages;
pub mod admin_settings;
pub mod admin_users;
pub mod auth;
pub mod builder;
pub mod events;
pub mod public;

use actix_web::web;

/// Configure all routes EXCEPT the catch-all page route.
/// The catch-all must be registered last to avoid matching before specific routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    public::configure(cfg);
    events::configure(cfg);
    auth::configure(cfg);
    admin_content::configure(cfg);
    admin_pages::configure(cfg);
    admin_settings::configure(cfg);
    admin_footer::configure(cfg);
    admin_header::configure(cfg);
    admin_users::configure(cfg);
}

/// Configure the catch-all page route. This MUST be called last.
pub fn configure_catch_all(cfg: &mut web::ServiceConfig) {
    cfg.service(public::page);
}
