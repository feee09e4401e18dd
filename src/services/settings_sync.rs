use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::broadcast;

use crate::api::{CmsClient, SettingsKey};
use crate::common::{ApiError, SettingsError};
use crate::config::FetchPolicy;
use crate::models::{
    default_theme, AboutPage, AiMlSection, ContactInfo, FooterConfig, HeaderConfig, HeroConfig,
    Theme, UiSettings,
};

use super::cascade::{is_non_empty_object, merge_layers, resolve_theme, resolve_ui, SiteStyle};
use super::css::{theme_variables, ui_variables, CssVariables};
use super::fetch_cache::FetchCache;
use super::local_cache::{LocalSettingsCache, THEME_SLOT, UI_SLOT};
use super::reorder::{normalize_footer, normalize_header};

const EVENT_CAPACITY: usize = 64;

/// Pushed to every open tab when settings change.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsEvent {
    ThemeUpdated { variables: Value },
    UiSettingsUpdated { variables: Value },
    DocumentUpdated { key: SettingsKey },
}

impl SettingsEvent {
    /// SSE event name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ThemeUpdated { .. } => "theme-updated",
            Self::UiSettingsUpdated { .. } => "ui-settings-updated",
            Self::DocumentUpdated { .. } => "settings-updated",
        }
    }

    pub fn data(&self) -> Value {
        match self {
            Self::ThemeUpdated { variables } | Self::UiSettingsUpdated { variables } => {
                variables.clone()
            }
            Self::DocumentUpdated { key } => serde_json::json!({ "key": key.as_str() }),
        }
    }
}

/// Site settings as the pages see them: server documents behind the shared
/// fetch policy, theme and UI layered over the local cache, and change
/// notifications for open tabs.
pub struct SettingsSync {
    cms: CmsClient,
    cache: FetchCache,
    local: LocalSettingsCache,
    events: broadcast::Sender<SettingsEvent>,
}

impl SettingsSync {
    pub fn new(cms: CmsClient, policy: FetchPolicy, local: LocalSettingsCache) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            cms,
            cache: FetchCache::new(policy),
            local,
            events,
        }
    }

    pub fn cms(&self) -> &CmsClient {
        &self.cms
    }

    pub fn cache(&self) -> &FetchCache {
        &self.cache
    }

    pub fn local(&self) -> &LocalSettingsCache {
        &self.local
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SettingsEvent> {
        self.events.subscribe()
    }

    /// Server document through the fetch cache.
    pub async fn fetch(&self, key: SettingsKey) -> Result<Value, ApiError> {
        let cms = &self.cms;
        self.cache
            .get_with(&key.path(), || cms.get_setting(key))
            .await
    }

    async fn server_value(&self, key: SettingsKey) -> Option<Value> {
        match self.fetch(key).await {
            Ok(value) => Some(value),
            Err(e) if e.is_not_found() => None,
            Err(e) => {
                log::warn!("Using fallback {} settings: {}", key, e);
                None
            }
        }
    }

    async fn remember(&self, slot: &str, server: Option<&Value>) {
        if let Some(server) = server.filter(|v| is_non_empty_object(v)) {
            if let Err(e) = self.local.set(slot, server.clone()).await {
                log_err!("Updating local settings cache", e, serde_json::json!({ "slot": slot }));
            }
        }
    }

    pub async fn theme(&self) -> Theme {
        let server = self.server_value(SettingsKey::Theme).await;
        self.remember(THEME_SLOT, server.as_ref()).await;
        resolve_theme(self.local.get(THEME_SLOT).as_ref(), server.as_ref())
    }

    pub async fn ui(&self) -> UiSettings {
        let server = self.server_value(SettingsKey::Ui).await;
        self.remember(UI_SLOT, server.as_ref()).await;
        resolve_ui(self.local.get(UI_SLOT).as_ref(), server.as_ref())
    }

    pub async fn style(&self) -> SiteStyle {
        let (theme, ui) = tokio::join!(self.theme(), self.ui());
        SiteStyle { theme, ui }
    }

    async fn document<T: DeserializeOwned + Default>(&self, key: SettingsKey) -> T {
        match self.server_value(key).await {
            Some(value) if is_non_empty_object(&value) => {
                serde_json::from_value(value).unwrap_or_else(|e| {
                    log::warn!("Malformed {} settings, using defaults: {}", key, e);
                    T::default()
                })
            }
            _ => T::default(),
        }
    }

    pub async fn header(&self) -> HeaderConfig {
        let mut header: HeaderConfig = self.document(SettingsKey::Header).await;
        normalize_header(&mut header);
        header
    }

    pub async fn footer(&self) -> FooterConfig {
        let mut footer: FooterConfig = self.document(SettingsKey::Footer).await;
        normalize_footer(&mut footer);
        footer
    }

    pub async fn hero(&self) -> HeroConfig {
        self.document(SettingsKey::Hero).await
    }

    pub async fn about(&self) -> AboutPage {
        self.document(SettingsKey::AboutPage).await
    }

    pub async fn contact(&self) -> ContactInfo {
        self.document(SettingsKey::ContactInfo).await
    }

    pub async fn ai_ml(&self) -> AiMlSection {
        self.document(SettingsKey::ServicesAiMlSection).await
    }

    /// Current document for an editor, straight from the backend. Falls
    /// back to the built-in defaults when the backend has none.
    pub async fn editable(&self, key: SettingsKey) -> Result<Value, ApiError> {
        match self.cms.get_setting(key).await {
            Ok(value) if is_non_empty_object(&value) => Ok(value),
            Ok(_) | Err(ApiError::NotFound(_)) => Ok(default_document(key)),
            Err(e) => Err(e),
        }
    }

    /// Parses editor text into a settings document.
    pub fn parse_document(raw: &str) -> Result<Value, SettingsError> {
        let value: Value = serde_json::from_str(raw)?;
        if !value.is_object() {
            return Err(SettingsError::NotAnObject);
        }
        Ok(value)
    }

    /// Writes a document to the backend and tells every open tab.
    pub async fn save(
        &self,
        key: SettingsKey,
        value: Value,
        token: &str,
    ) -> Result<(), SettingsError> {
        if !value.is_object() {
            return Err(SettingsError::NotAnObject);
        }
        self.cms.put_setting(key, &value, token).await?;

        let path = key.path();
        self.cache.invalidate(&path);
        self.cache.insert(&path, value.clone());

        let event = match key {
            SettingsKey::Theme => {
                self.remember(THEME_SLOT, Some(&value)).await;
                let theme = resolve_theme(None, Some(&value));
                SettingsEvent::ThemeUpdated {
                    variables: theme_variables(&theme).to_json(),
                }
            }
            SettingsKey::Ui => {
                self.remember(UI_SLOT, Some(&value)).await;
                let ui = resolve_ui(None, Some(&value));
                SettingsEvent::UiSettingsUpdated {
                    variables: ui_variables(&ui).to_json(),
                }
            }
            key => SettingsEvent::DocumentUpdated { key },
        };
        log::info!("Saved {} settings", key);
        self.broadcast(event);
        Ok(())
    }

    /// CSS variables for unsaved UI settings. Only the editor that asked
    /// applies them; open pages keep the saved look until `save`.
    pub fn preview_ui(value: &Value) -> Result<CssVariables, SettingsError> {
        if !value.is_object() {
            return Err(SettingsError::NotAnObject);
        }
        Ok(ui_variables(&resolve_ui(None, Some(value))))
    }

    /// Default UI tokens for the editor. Nothing is broadcast or saved.
    pub fn reset_ui() -> CssVariables {
        ui_variables(&UiSettings::default())
    }

    fn broadcast(&self, event: SettingsEvent) {
        match self.events.send(event) {
            Ok(n) => log::debug!("Settings event sent to {} listeners", n),
            Err(_) => log::debug!("Settings event dropped, no listeners"),
        }
    }
}

/// Built-in document for a settings key.
pub fn default_document(key: SettingsKey) -> Value {
    let value = match key {
        SettingsKey::Theme => Ok(Value::Object(default_theme())),
        SettingsKey::Ui => Ok(Value::Object(UiSettings::default_map())),
        SettingsKey::Header => serde_json::to_value(HeaderConfig::default()),
        SettingsKey::Footer => serde_json::to_value(FooterConfig::default()),
        SettingsKey::Hero => serde_json::to_value(HeroConfig::default()),
        SettingsKey::AboutPage => serde_json::to_value(AboutPage::default()),
        SettingsKey::ContactInfo => serde_json::to_value(ContactInfo::default()),
        SettingsKey::ServicesAiMlSection => serde_json::to_value(AiMlSection::default()),
    };
    value.unwrap_or_else(|_| Value::Object(Default::default()))
}

/// Defaults merged under a partial document, as the editors preview it.
pub fn with_defaults(key: SettingsKey, value: &Value) -> Value {
    match default_document(key) {
        Value::Object(defaults) => Value::Object(merge_layers(&defaults, None, Some(value))),
        other => other,
    }
}

impl std::fmt::Debug for SettingsSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsSync")
            .field("api", &self.cms.base_url())
            .field("cache", &self.cache)
            .field("local", &self.local.path())
            .finish()
    }
}
