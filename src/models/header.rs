use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub logo: Logo,
    pub menu_items: Vec<MenuItem>,
    pub cta_button: CtaButton,
    pub styling: HeaderStyling,
    /// Keys this site does not render (mega menu etc.) survive a round trip
    /// through the builder.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Logo {
    /// `text` or `image`.
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
    pub subtext: String,
    pub image_url: String,
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuItem {
    pub id: String,
    pub label: String,
    pub href: String,
    /// `link` or `dropdown`.
    #[serde(rename = "type")]
    pub kind: String,
    pub children: Vec<MenuItem>,
    pub open_in_new_tab: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CtaButton {
    pub enabled: bool,
    pub text: String,
    pub href: String,
    /// `solid`, `outline` or `gradient`.
    pub style: String,
    pub color: String,
    pub gradient_from: String,
    pub gradient_to: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderStyling {
    pub background_color: String,
    pub text_color: String,
    pub sticky: bool,
    pub padding_top: f64,
    pub padding_bottom: f64,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        let menu = [
            ("Home", "/"),
            ("About Us", "/about"),
            ("Services", "/services"),
            ("Careers", "/careers"),
            ("Work", "/case-studies"),
            ("Blogs", "/blogs"),
            ("Contact", "/contact"),
        ];
        Self {
            logo: Logo::default(),
            menu_items: menu
                .iter()
                .enumerate()
                .map(|(i, (label, href))| MenuItem::link(format!("menu-{i}"), label, href))
                .collect(),
            cta_button: CtaButton::default(),
            styling: HeaderStyling::default(),
            extra: Map::new(),
        }
    }
}

impl Default for Logo {
    fn default() -> Self {
        Self {
            kind: "text".to_string(),
            text: "Social IT".to_string(),
            subtext: "Digital Transformation Partner".to_string(),
            image_url: String::new(),
            link: "/".to_string(),
        }
    }
}

impl Default for CtaButton {
    fn default() -> Self {
        Self {
            enabled: true,
            text: "Contact Us".to_string(),
            href: "/contact".to_string(),
            style: "gradient".to_string(),
            color: "#ff00ff".to_string(),
            gradient_from: "#ff00ff".to_string(),
            gradient_to: "#8b00ff".to_string(),
        }
    }
}

impl Default for HeaderStyling {
    fn default() -> Self {
        Self {
            background_color: "#000000".to_string(),
            text_color: "#ffffff".to_string(),
            sticky: true,
            padding_top: 16.0,
            padding_bottom: 16.0,
        }
    }
}

impl MenuItem {
    pub fn link(id: impl Into<String>, label: &str, href: &str) -> Self {
        Self {
            id: id.into(),
            label: label.to_string(),
            href: href.to_string(),
            kind: "link".to_string(),
            children: Vec::new(),
            open_in_new_tab: false,
        }
    }

    pub fn is_dropdown(&self) -> bool {
        self.kind == "dropdown" && !self.children.is_empty()
    }
}

impl Logo {
    pub fn is_image(&self) -> bool {
        self.kind == "image" && !self.image_url.trim().is_empty()
    }
}

impl CtaButton {
    /// Inline style for the call-to-action button.
    pub fn inline_style(&self) -> String {
        match self.style.as_str() {
            "outline" => format!("border:2px solid {0};color:{0};background:transparent", self.color),
            "solid" => format!("background:{};color:#fff", self.color),
            _ => format!(
                "background:linear-gradient(to right,{},{});color:#fff",
                self.gradient_from, self.gradient_to
            ),
        }
    }
}

impl HeaderStyling {
    pub fn inline_style(&self) -> String {
        format!(
            "background:{};color:{};padding-top:{}px;padding-bottom:{}px",
            self.background_color, self.text_color, self.padding_top, self.padding_bottom
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_header_keeps_defaults_and_extras() {
        let header: HeaderConfig = serde_json::from_value(json!({
            "logo": {"text": "Acme"},
            "mega_menu": true
        }))
        .unwrap();
        assert_eq!(header.logo.text, "Acme");
        assert_eq!(header.logo.link, "/");
        assert!(header.cta_button.enabled);
        assert_eq!(header.extra.get("mega_menu"), Some(&json!(true)));

        let back = serde_json::to_value(&header).unwrap();
        assert_eq!(back["mega_menu"], json!(true));
    }

    #[test]
    fn test_menu_item_type_field() {
        let item: MenuItem = serde_json::from_value(json!({
            "label": "More", "href": "#", "type": "dropdown",
            "children": [{"label": "A", "href": "/a"}]
        }))
        .unwrap();
        assert!(item.is_dropdown());
        assert_eq!(item.children[0].label, "A");
    }

    #[test]
    fn test_cta_styles() {
        let mut cta = CtaButton::default();
        assert!(cta.inline_style().contains("linear-gradient"));
        cta.style = "outline".into();
        assert!(cta.inline_style().starts_with("border:2px solid #ff00ff"));
    }
}
