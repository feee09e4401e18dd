use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const YEAR_PLACEHOLDER: &str = "{year}";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterConfig {
    pub columns: Vec<FooterColumn>,
    /// May contain `{year}`.
    pub copyright_text: String,
    pub styling: FooterStyling,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterColumn {
    pub id: String,
    pub title: String,
    pub links: Vec<FooterLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterLink {
    pub id: String,
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterStyling {
    pub background_color: String,
    pub text_color: String,
    pub link_color: String,
}

impl Default for FooterConfig {
    fn default() -> Self {
        let column = |id: &str, title: &str, links: &[(&str, &str)]| FooterColumn {
            id: id.to_string(),
            title: title.to_string(),
            links: links
                .iter()
                .enumerate()
                .map(|(i, (label, href))| FooterLink {
                    id: format!("{id}-link-{i}"),
                    label: label.to_string(),
                    href: href.to_string(),
                })
                .collect(),
        };
        Self {
            columns: vec![
                column("column-0", "Services", &[("Services", "/services")]),
                column(
                    "column-1",
                    "Company",
                    &[("About Us", "/about"), ("Careers", "/careers"), ("Contact", "/contact")],
                ),
                column(
                    "column-2",
                    "Work",
                    &[("Case Studies", "/case-studies"), ("Blogs", "/blogs")],
                ),
            ],
            copyright_text: "© {year} Social IT. All rights reserved.".to_string(),
            styling: FooterStyling::default(),
            extra: Map::new(),
        }
    }
}

impl Default for FooterStyling {
    fn default() -> Self {
        Self {
            background_color: "#1f2937".to_string(),
            text_color: "#ffffff".to_string(),
            link_color: "#9ca3af".to_string(),
        }
    }
}

impl FooterConfig {
    pub fn copyright(&self, year: i32) -> String {
        self.copyright_text
            .replace(YEAR_PLACEHOLDER, &year.to_string())
    }

    pub fn column_mut(&mut self, id: &str) -> Option<&mut FooterColumn> {
        self.columns.iter_mut().find(|c| c.id == id)
    }
}

impl FooterStyling {
    pub fn inline_style(&self) -> String {
        format!("background:{};color:{}", self.background_color, self.text_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_copyright_year_substitution() {
        let footer = FooterConfig::default();
        assert_eq!(footer.copyright(2026), "© 2026 Social IT. All rights reserved.");
    }

    #[test]
    fn test_legacy_columns_without_ids() {
        let footer: FooterConfig = serde_json::from_value(json!({
            "columns": [{"title": "Links", "links": [{"label": "Blogs", "href": "/blogs"}]}]
        }))
        .unwrap();
        assert_eq!(footer.columns[0].id, "");
        assert_eq!(footer.columns[0].links[0].label, "Blogs");
        assert_eq!(footer.styling, FooterStyling::default());
    }
}
