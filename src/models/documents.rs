//! Free-form page documents stored as site settings.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stat {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitledText {
    pub title: String,
    #[serde(alias = "description")]
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AboutPage {
    pub heading: String,
    pub intro: String,
    pub stats_heading: String,
    pub stats_subtext: String,
    pub stats: Vec<Stat>,
    pub journey_heading: String,
    pub journey_subheading: String,
    pub journey_text: String,
    pub vision_heading: String,
    pub vision_subheading: String,
    pub vision_text: String,
    pub what_sets_apart_heading: String,
    pub what_sets_apart_subheading: String,
    pub what_sets_apart_items: Vec<TitledText>,
    pub team_heading: String,
    pub team_subheading: String,
    pub team: Vec<TeamMember>,
    pub cta_text: String,
    pub cta_link: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for AboutPage {
    fn default() -> Self {
        Self {
            heading: "Get to Know Social IT".to_string(),
            intro: "Social IT transforms businesses with technology solutions and \
                    data-driven marketing expertise."
                .to_string(),
            stats_heading: "Let's talk numbers".to_string(),
            stats_subtext: String::new(),
            stats: [
                ("150+", "Happy Clients"),
                ("20K+", "Unique Designs"),
                ("8+", "Years Experience"),
                ("20+", "States Served"),
            ]
            .iter()
            .map(|(value, label)| Stat {
                value: value.to_string(),
                label: label.to_string(),
            })
            .collect(),
            journey_heading: "Discover Our Story".to_string(),
            journey_subheading: "Our Journey".to_string(),
            journey_text: String::new(),
            vision_heading: "Driving Innovation & Growth".to_string(),
            vision_subheading: "Our Vision".to_string(),
            vision_text: String::new(),
            what_sets_apart_heading: "Passionate About Results".to_string(),
            what_sets_apart_subheading: "What Sets Us Apart".to_string(),
            what_sets_apart_items: Vec::new(),
            team_heading: "The Minds Behind Social IT".to_string(),
            team_subheading: "Meet Our Leadership Team".to_string(),
            team: Vec::new(),
            cta_text: "Let's Chat".to_string(),
            cta_link: "/contact".to_string(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    pub heading: String,
    pub subtext: String,
    pub email: String,
    pub addresses: Vec<String>,
    pub phones: Vec<String>,
    pub whatsapp_number: String,
    pub whatsapp_text: String,
    pub show_contact_form: bool,
    pub form_heading: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            heading: "Contact us".to_string(),
            subtext: "Got a project in mind? Share the details of your project. \
                      We'll respond as soon as we can."
                .to_string(),
            email: "info@socialit.in".to_string(),
            addresses: Vec::new(),
            phones: Vec::new(),
            whatsapp_number: String::new(),
            whatsapp_text: "Let's Chat".to_string(),
            show_contact_form: true,
            form_heading: "Got a project in mind? Share the details of your project.".to_string(),
            extra: Map::new(),
        }
    }
}

impl ContactInfo {
    /// `https://wa.me/<digits>` link, if a number is configured.
    pub fn whatsapp_link(&self) -> Option<String> {
        let digits: String = self
            .whatsapp_number
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        (!digits.is_empty()).then(|| format!("https://wa.me/{digits}"))
    }
}

/// "AI & ML solutions" block on the services page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiMlSection {
    pub enabled: bool,
    pub title: String,
    pub overview: String,
    pub services: Vec<TitledText>,
    pub products: Vec<TitledText>,
    pub benefits: Vec<String>,
    pub cta_text: String,
    pub cta_link: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for AiMlSection {
    fn default() -> Self {
        Self {
            enabled: true,
            title: "Artificial Intelligence & Machine Learning Solutions".to_string(),
            overview: "We help enterprises harness AI and machine learning to automate \
                       processes, gain insights from data, and deliver smarter products."
                .to_string(),
            services: Vec::new(),
            products: Vec::new(),
            benefits: Vec::new(),
            cta_text: "Talk to Our AI Experts".to_string(),
            cta_link: "/contact".to_string(),
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_whatsapp_link() {
        let info = ContactInfo {
            whatsapp_number: "+91 88244-67277".into(),
            ..ContactInfo::default()
        };
        assert_eq!(info.whatsapp_link().as_deref(), Some("https://wa.me/918824467277"));
        assert!(ContactInfo::default().whatsapp_link().is_none());
    }

    #[test]
    fn test_ai_ml_services_accept_description_alias() {
        let section: AiMlSection = serde_json::from_value(json!({
            "services": [{"title": "Vision", "description": "Detect things"}]
        }))
        .unwrap();
        assert_eq!(section.services[0].text, "Detect things");
        assert!(section.enabled);
    }
}
