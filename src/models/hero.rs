use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_HERO_FONT: &str =
    "Inter, system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    pub enabled: bool,
    pub design: HeroDesign,
    pub headline: String,
    pub description: String,
    pub tagline: String,
    pub email_placeholder: String,
    pub cta_primary_text: String,
    pub cta_primary_link: String,
    pub cta_secondary_text: String,
    pub cta_secondary_link: String,
    pub awards_headline: String,
    pub award_logos: Vec<AwardLogo>,
    pub banner_image_url: String,
    pub background_image_url: String,
    pub chat_button_text: String,
    pub chat_button_link: String,
    pub data_cards: Vec<DataCard>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroDesign {
    /// `color`, `gradient` or `image`.
    pub background_type: String,
    pub background_color: String,
    pub gradient_from: String,
    pub gradient_to: String,
    pub background_image_url: String,
    pub overlay_opacity: f64,
    pub text_color: String,
    pub padding_top: f64,
    pub padding_bottom: f64,
    pub font_family: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwardLogo {
    pub image_url: String,
    pub link_url: String,
    pub alt: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataCard {
    pub title: String,
    pub value: String,
    pub label: String,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            design: HeroDesign::default(),
            headline: "Weaving Your Brand's Digital Success Story".to_string(),
            description: "Maintain a winning reputation, engage digitally, and deliver an \
                          exceptional customer experience - all from one intuitive platform."
                .to_string(),
            tagline: "Web Development Company in Kota".to_string(),
            email_placeholder: "Enter your email".to_string(),
            cta_primary_text: "Get A Demo".to_string(),
            cta_primary_link: "/contact".to_string(),
            cta_secondary_text: "Explore Case Study".to_string(),
            cta_secondary_link: "/case-studies".to_string(),
            awards_headline: "Trusted & Awarded By Global Leaders".to_string(),
            award_logos: ["JCI", "Indian Achievers", "Rotary"]
                .iter()
                .map(|alt| AwardLogo {
                    alt: alt.to_string(),
                    ..AwardLogo::default()
                })
                .collect(),
            banner_image_url: String::new(),
            background_image_url: String::new(),
            chat_button_text: "Let's Chat".to_string(),
            chat_button_link: "/contact".to_string(),
            data_cards: Vec::new(),
            extra: Map::new(),
        }
    }
}

impl Default for HeroDesign {
    fn default() -> Self {
        Self {
            background_type: "gradient".to_string(),
            background_color: "#0f172a".to_string(),
            gradient_from: "#0f172a".to_string(),
            gradient_to: "#1e1b4b".to_string(),
            background_image_url: String::new(),
            overlay_opacity: 0.5,
            text_color: "#ffffff".to_string(),
            padding_top: 96.0,
            padding_bottom: 96.0,
            font_family: DEFAULT_HERO_FONT.to_string(),
        }
    }
}

impl HeroDesign {
    pub fn inline_style(&self, fallback_image: &str) -> String {
        let background = match self.background_type.as_str() {
            "color" => self.background_color.clone(),
            "image" => {
                let url = if self.background_image_url.is_empty() {
                    fallback_image
                } else {
                    self.background_image_url.as_str()
                };
                if url.is_empty() {
                    self.background_color.clone()
                } else {
                    format!(
                        "linear-gradient(rgba(0,0,0,{0}),rgba(0,0,0,{0})),url('{1}') center/cover",
                        self.overlay_opacity.clamp(0.0, 1.0),
                        url.replace('\'', "%27")
                    )
                }
            }
            _ => format!(
                "linear-gradient(to bottom right,{},{})",
                self.gradient_from, self.gradient_to
            ),
        };
        format!(
            "background:{};color:{};padding-top:{}px;padding-bottom:{}px;font-family:{}",
            background, self.text_color, self.padding_top, self.padding_bottom, self.font_family
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_hero() {
        let hero: HeroConfig =
            serde_json::from_value(json!({"headline": "Hi", "design": {"background_type": "color"}}))
                .unwrap();
        assert_eq!(hero.headline, "Hi");
        assert_eq!(hero.cta_primary_link, "/contact");
        assert!(hero.design.inline_style("").starts_with("background:#0f172a;"));
    }

    #[test]
    fn test_image_background_uses_fallback() {
        let design = HeroDesign {
            background_type: "image".into(),
            ..HeroDesign::default()
        };
        assert!(design.inline_style("/banner.jpg").contains("url('/banner.jpg')"));
    }
}
