use serde_json::{Map, Value};

use crate::models::{default_theme, Theme, UiSettings};

use super::css::{theme_variables, ui_variables, CssVariables};

/// True for a JSON object with at least one key.
pub fn is_non_empty_object(value: &Value) -> bool {
    value.as_object().is_some_and(|m| !m.is_empty())
}

/// Shallow merge, later layers winning: defaults < cached < server.
///
/// The cached layer applies whenever it is an object. The server layer
/// applies only when it is a non-empty object; `{}`, arrays, scalars and
/// `null` leave the result as the lower layers made it.
pub fn merge_layers(
    defaults: &Map<String, Value>,
    cached: Option<&Value>,
    server: Option<&Value>,
) -> Map<String, Value> {
    let mut merged = defaults.clone();

    if let Some(Value::Object(cached)) = cached {
        for (k, v) in cached {
            merged.insert(k.clone(), v.clone());
        }
    }

    if let Some(Value::Object(server)) = server.filter(|v| is_non_empty_object(v)) {
        for (k, v) in server {
            merged.insert(k.clone(), v.clone());
        }
    }

    merged
}

pub fn resolve_theme(cached: Option<&Value>, server: Option<&Value>) -> Theme {
    Theme::from_map(&merge_layers(&default_theme(), cached, server))
}

pub fn resolve_ui(cached: Option<&Value>, server: Option<&Value>) -> UiSettings {
    let merged = merge_layers(&UiSettings::default_map(), cached, server);
    let (ui, rejected) = UiSettings::from_map(&merged);
    if !rejected.is_empty() {
        log::warn!("Ignoring invalid UI settings: {}", rejected.join(", "));
    }
    ui
}

/// Everything the `<style id="site-vars">` block carries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteStyle {
    pub theme: Theme,
    pub ui: UiSettings,
}

impl SiteStyle {
    pub fn variables(&self) -> CssVariables {
        let mut vars = theme_variables(&self.theme);
        vars.extend(ui_variables(&self.ui));
        vars
    }

    pub fn root_block(&self) -> String {
        self.variables().to_root_block()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn defaults() -> Map<String, Value> {
        json!({"primary": "#111", "secondary": "#222"})
            .as_object()
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_layers_apply_in_order() {
        let cached = json!({"primary": "#aaa", "accent": "#333"});
        let server = json!({"primary": "#bbb"});
        let merged = merge_layers(&defaults(), Some(&cached), Some(&server));
        assert_eq!(merged["primary"], "#bbb");
        assert_eq!(merged["secondary"], "#222");
        assert_eq!(merged["accent"], "#333");
    }

    #[test]
    fn test_empty_or_non_object_server_is_ignored() {
        let cached = json!({"primary": "#aaa"});
        for server in [json!({}), json!([]), json!(null), json!("x"), json!(3)] {
            let merged = merge_layers(&defaults(), Some(&cached), Some(&server));
            assert_eq!(merged["primary"], "#aaa", "server = {server}");
        }
    }

    #[test]
    fn test_non_object_cache_is_ignored() {
        let merged = merge_layers(&defaults(), Some(&json!("junk")), None);
        assert_eq!(merged, defaults());
    }

    #[test]
    fn test_resolve_ui_falls_back_per_field() {
        let server = json!({"baseFontSize": "huge", "gridGap": 10});
        let ui = resolve_ui(None, Some(&server));
        assert_eq!(ui.base_font_size, 16.0);
        assert_eq!(ui.grid_gap, 10.0);
    }

    #[test]
    fn test_site_style_root_block() {
        let style = SiteStyle {
            theme: resolve_theme(None, Some(&json!({"primary": "#000"}))),
            ui: UiSettings::default(),
        };
        let block = style.root_block();
        assert!(block.starts_with(":root{--color-primary:#000;"));
        assert!(block.contains("--ui-grid-gap:24px;"));
    }
}
