use std::sync::Arc;

use socialit::api::CmsClient;
use socialit::services::SettingsSync;

use crate::web::security::RateLimiter;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<SettingsSync>,
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(settings: SettingsSync) -> Self {
        Self {
            settings: Arc::new(settings),
            rate_limiter: Arc::new(RateLimiter::new()),
        }
    }

    pub fn cms(&self) -> &CmsClient {
        self.settings.cms()
    }
}
