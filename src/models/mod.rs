pub use content::*;
pub use content_kind::*;
pub use content_status::*;
pub use documents::*;
pub use footer::*;
pub use header::*;
pub use hero::*;
pub use page::*;
pub use theme::*;
pub use ui_settings::*;
pub use user::*;

mod content;
mod content_kind;
mod content_status;
pub mod datetime;
mod documents;
mod footer;
mod header;
mod hero;
mod page;
mod theme;
mod ui_settings;
mod user;
