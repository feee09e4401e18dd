use serde_json::{Map, Value};

use crate::models::{Theme, UiSettings};

/// Ordered CSS custom properties destined for `:root`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CssVariables {
    vars: Vec<(String, String)>,
}

impl CssVariables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `--<name>`. A repeated name replaces the earlier value in place.
    pub fn push(&mut self, name: &str, value: impl AsRef<str>) {
        let name = format!("--{}", sanitize_name(name.trim_start_matches('-')));
        let value = sanitize_value(value.as_ref());
        match self.vars.iter_mut().find(|(n, _)| *n == name) {
            Some(existing) => existing.1 = value,
            None => self.vars.push((name, value)),
        }
    }

    pub fn extend(&mut self, other: CssVariables) {
        for (name, value) in other.vars {
            self.push(&name, value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// `--a:b;--c:d;`, usable in a `style` attribute.
    pub fn to_declarations(&self) -> String {
        let mut out = String::new();
        for (name, value) in &self.vars {
            out.push_str(name);
            out.push(':');
            out.push_str(value);
            out.push(';');
        }
        out
    }

    /// `:root{--a:b;--c:d;}`
    pub fn to_root_block(&self) -> String {
        format!(":root{{{}}}", self.to_declarations())
    }

    /// Name/value object as pushed to browsers over the event stream.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .vars
            .iter()
            .map(|(n, v)| (n.clone(), Value::String(v.clone())))
            .collect();
        Value::Object(map)
    }
}

fn sanitize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

fn sanitize_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '{' | '}' | ';' | '\n' | '\r'))
        .collect::<String>()
        .trim()
        .to_string()
}

pub fn theme_variables(theme: &Theme) -> CssVariables {
    let mut vars = CssVariables::new();
    for (key, value) in theme.colors() {
        vars.push(&format!("color-{key}"), value);
    }
    vars
}

fn px(v: f64) -> String {
    format!("{}px", number(v))
}

fn number(v: f64) -> String {
    // f64 Display already drops a trailing ".0"
    format!("{}", v)
}

pub fn ui_variables(ui: &UiSettings) -> CssVariables {
    let mut vars = CssVariables::new();

    vars.push("ui-font-family", &ui.font_family);
    vars.push("ui-heading-font-family", &ui.heading_font_family);
    vars.push("ui-base-font-size", px(ui.base_font_size));
    vars.push("ui-heading1-size", px(ui.heading1_size));
    vars.push("ui-heading2-size", px(ui.heading2_size));
    vars.push("ui-heading3-size", px(ui.heading3_size));
    vars.push("ui-line-height", number(ui.line_height));
    vars.push("ui-letter-spacing", format!("{}em", number(ui.letter_spacing)));

    vars.push("ui-section-padding-top", px(ui.section_padding_top));
    vars.push("ui-section-padding-bottom", px(ui.section_padding_bottom));
    vars.push("ui-container-padding", px(ui.container_padding));
    vars.push("ui-card-padding", px(ui.card_padding));
    vars.push("ui-button-padding-x", px(ui.button_padding_x));
    vars.push("ui-button-padding-y", px(ui.button_padding_y));

    vars.push("ui-border-radius-small", px(ui.border_radius_small));
    vars.push("ui-border-radius-medium", px(ui.border_radius_medium));
    vars.push("ui-border-radius-large", px(ui.border_radius_large));
    vars.push("ui-button-border-radius", px(ui.button_border_radius));
    vars.push("ui-card-border-radius", px(ui.card_border_radius));

    vars.push("ui-shadow-small", &ui.shadow_small);
    vars.push("ui-shadow-medium", &ui.shadow_medium);
    vars.push("ui-shadow-large", &ui.shadow_large);
    vars.push("ui-card-shadow", &ui.card_shadow);
    vars.push("ui-button-shadow", &ui.button_shadow);

    vars.push(
        "ui-transition-duration",
        format!("{}ms", number(ui.transition_duration)),
    );
    vars.push("ui-hover-scale", number(ui.hover_scale));
    vars.push("ui-hover-lift", px(ui.hover_lift));

    vars.push("ui-container-max-width", px(ui.container_max_width));
    vars.push("ui-grid-gap", px(ui.grid_gap));
    vars.push("ui-section-gap", px(ui.section_gap));

    vars
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::default_theme;

    #[test]
    fn test_root_block() {
        let mut vars = CssVariables::new();
        vars.push("color-primary", "#111");
        vars.push("ui-grid-gap", "8px");
        assert_eq!(vars.to_root_block(), ":root{--color-primary:#111;--ui-grid-gap:8px;}");
    }

    #[test]
    fn test_values_cannot_escape_style_block() {
        let mut vars = CssVariables::new();
        vars.push("color-text", "red;}</style><script>");
        let block = vars.to_root_block();
        assert!(!block.contains("</style>"));
        assert_eq!(vars.get("--color-text"), Some("red/stylescript"));
    }

    #[test]
    fn test_repeated_name_replaces() {
        let mut vars = CssVariables::new();
        vars.push("a", "1");
        vars.push("b", "2");
        vars.push("a", "3");
        assert_eq!(vars.iter().collect::<Vec<_>>(), vec![("--a", "3"), ("--b", "2")]);
    }

    #[test]
    fn test_theme_variables() {
        let vars = theme_variables(&Theme::from_map(&default_theme()));
        assert_eq!(vars.len(), 12);
        assert_eq!(vars.get("--color-textSecondary"), Some("#6b7280"));
    }

    #[test]
    fn test_ui_units() {
        let vars = ui_variables(&UiSettings::default());
        assert_eq!(vars.get("--ui-base-font-size"), Some("16px"));
        assert_eq!(vars.get("--ui-line-height"), Some("1.6"));
        assert_eq!(vars.get("--ui-letter-spacing"), Some("0em"));
        assert_eq!(vars.get("--ui-transition-duration"), Some("300ms"));
        assert_eq!(vars.get("--ui-hover-scale"), Some("1.05"));
        assert_eq!(vars.get("--ui-container-max-width"), Some("1280px"));
    }
}
