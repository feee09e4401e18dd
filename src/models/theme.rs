use serde_json::{Map, Value};

/// Color tokens the site understands, in the order they are emitted.
pub const THEME_KEYS: [&str; 12] = [
    "primary",
    "secondary",
    "accent",
    "background",
    "surface",
    "text",
    "textSecondary",
    "border",
    "success",
    "warning",
    "error",
    "info",
];

const DEFAULT_COLORS: [(&str, &str); 12] = [
    ("primary", "#6366f1"),
    ("secondary", "#8b5cf6"),
    ("accent", "#6366f1"),
    ("background", "#ffffff"),
    ("surface", "#f9fafb"),
    ("text", "#111827"),
    ("textSecondary", "#6b7280"),
    ("border", "#e5e7eb"),
    ("success", "#10b981"),
    ("warning", "#f59e0b"),
    ("error", "#ef4444"),
    ("info", "#3b82f6"),
];

pub fn default_theme() -> Map<String, Value> {
    DEFAULT_COLORS
        .iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect()
}

/// A resolved theme: only known keys with a non-empty string value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Theme {
    colors: Vec<(&'static str, String)>,
}

impl Theme {
    pub fn from_map(map: &Map<String, Value>) -> Self {
        let colors = THEME_KEYS
            .iter()
            .filter_map(|key| {
                map.get(*key)
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(|v| (*key, v.to_string()))
            })
            .collect();
        Self { colors }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.colors
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn colors(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.colors.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
