use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Typography, spacing, radius, shadow, animation and layout tokens.
/// Sizes are pixels, `letter_spacing` is em, `transition_duration` is ms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UiSettings {
    // Typography
    pub font_family: String,
    pub heading_font_family: String,
    pub base_font_size: f64,
    #[serde(rename = "heading1Size")]
    pub heading1_size: f64,
    #[serde(rename = "heading2Size")]
    pub heading2_size: f64,
    #[serde(rename = "heading3Size")]
    pub heading3_size: f64,
    pub line_height: f64,
    pub letter_spacing: f64,

    // Spacing
    pub section_padding_top: f64,
    pub section_padding_bottom: f64,
    pub container_padding: f64,
    pub card_padding: f64,
    pub button_padding_x: f64,
    pub button_padding_y: f64,

    // Border radius
    pub border_radius_small: f64,
    pub border_radius_medium: f64,
    pub border_radius_large: f64,
    pub button_border_radius: f64,
    pub card_border_radius: f64,

    // Shadows
    pub shadow_small: String,
    pub shadow_medium: String,
    pub shadow_large: String,
    pub card_shadow: String,
    pub button_shadow: String,

    // Animations
    pub transition_duration: f64,
    pub hover_scale: f64,
    pub hover_lift: f64,

    // Layout
    pub container_max_width: f64,
    pub grid_gap: f64,
    pub section_gap: f64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            font_family: "Inter, system-ui, sans-serif".to_string(),
            heading_font_family: "Inter, system-ui, sans-serif".to_string(),
            base_font_size: 16.0,
            heading1_size: 48.0,
            heading2_size: 36.0,
            heading3_size: 24.0,
            line_height: 1.6,
            letter_spacing: 0.0,
            section_padding_top: 80.0,
            section_padding_bottom: 80.0,
            container_padding: 24.0,
            card_padding: 24.0,
            button_padding_x: 24.0,
            button_padding_y: 12.0,
            border_radius_small: 4.0,
            border_radius_medium: 8.0,
            border_radius_large: 12.0,
            button_border_radius: 8.0,
            card_border_radius: 12.0,
            shadow_small: "0 1px 2px 0 rgba(0, 0, 0, 0.05)".to_string(),
            shadow_medium: "0 4px 6px -1px rgba(0, 0, 0, 0.1)".to_string(),
            shadow_large: "0 10px 15px -3px rgba(0, 0, 0, 0.1)".to_string(),
            card_shadow: "0 4px 6px -1px rgba(0, 0, 0, 0.1)".to_string(),
            button_shadow: "0 2px 4px 0 rgba(0, 0, 0, 0.1)".to_string(),
            transition_duration: 300.0,
            hover_scale: 1.05,
            hover_lift: 4.0,
            container_max_width: 1280.0,
            grid_gap: 24.0,
            section_gap: 80.0,
        }
    }
}

impl UiSettings {
    pub fn default_map() -> Map<String, Value> {
        match serde_json::to_value(Self::default()) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    /// Builds settings from a merged document. Each key is checked on its
    /// own, so one badly typed token falls back to its default instead of
    /// discarding the whole document. Returns the rejected keys alongside.
    pub fn from_map(map: &Map<String, Value>) -> (Self, Vec<String>) {
        let mut accepted = Map::new();
        let mut rejected = Vec::new();

        for (key, value) in map {
            let mut single = Map::new();
            single.insert(key.clone(), value.clone());
            match serde_json::from_value::<Self>(Value::Object(single)) {
                Ok(_) => {
                    accepted.insert(key.clone(), value.clone());
                }
                Err(_) => rejected.push(key.clone()),
            }
        }

        let settings = serde_json::from_value(Value::Object(accepted)).unwrap_or_default();
        (settings, rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_map_uses_wire_names() {
        let map = UiSettings::default_map();
        assert_eq!(map.get("baseFontSize"), Some(&json!(16.0)));
        assert!(map.contains_key("heading1Size"));
        assert!(map.contains_key("buttonPaddingX"));
    }

    #[test]
    fn test_from_map_rejects_only_bad_fields() {
        let map = json!({"baseFontSize": "huge", "gridGap": 32, "fontFamily": "Roboto"});
        let (settings, rejected) = UiSettings::from_map(map.as_object().unwrap());
        assert_eq!(rejected, vec!["baseFontSize".to_string()]);
        assert_eq!(settings.base_font_size, 16.0);
        assert_eq!(settings.grid_gap, 32.0);
        assert_eq!(settings.font_family, "Roboto");
    }
}
