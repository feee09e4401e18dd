pub mod forms;
pub mod handlers;
pub mod helpers;
pub mod middleware;
pub mod security;
pub mod state;
pub mod templates;
#[cfg(test)]
pub mod testing;
pub mod views;

pub use state::AppState;
