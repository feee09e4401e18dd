use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::{ContentRecord, ContentStatus};

/// One block of a page built in the page builder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default = "raw_kind")]
    pub kind: String,
    #[serde(default)]
    pub data: Map<String, Value>,
}

fn raw_kind() -> String {
    "raw".to_string()
}

/// Section types the page builder can add.
pub const SECTION_KINDS: [&str; 7] = [
    "hero",
    "text",
    "image",
    "cta",
    "stats",
    "features",
    "testimonials",
];

impl Section {
    /// Starter block for the page builder, filled in from the page editor.
    pub fn blank(id: String, kind: &str) -> Self {
        let mut data = Map::new();
        match kind {
            "text" => {
                data.insert("content".into(), Value::String("New text".into()));
            }
            "image" => {
                data.insert("url".into(), Value::String(String::new()));
                data.insert("alt".into(), Value::String(String::new()));
            }
            "stats" | "features" | "testimonials" => {
                data.insert("title".into(), Value::String(String::new()));
                data.insert("items".into(), Value::Array(Vec::new()));
            }
            _ => {
                data.insert("heading".into(), Value::String("New section".into()));
            }
        }
        Self {
            id,
            kind: kind.to_string(),
            data,
        }
    }

    /// One-line label for builder lists.
    pub fn summary(&self) -> String {
        let text = ["heading", "title", "content", "alt"]
            .iter()
            .find_map(|key| self.text(key))
            .unwrap_or("");
        match text.char_indices().nth(60) {
            Some((cut, _)) => format!("{}…", &text[..cut]),
            None => text.to_string(),
        }
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.data
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn text_or<'a>(&'a self, key: &str, fallback: &'a str) -> &'a str {
        self.text(key).unwrap_or(fallback)
    }

    pub fn items(&self) -> &[Value] {
        self.data
            .get("items")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Accepts `null`, a single section object, or a list; list entries that
/// are not objects become empty `raw` sections. Missing ids are
/// `section-<index>`.
pub fn normalize_sections(value: Value) -> Vec<Section> {
    let items = match value {
        Value::Null => return Vec::new(),
        Value::Array(items) => items,
        obj @ Value::Object(_) => vec![obj],
        _ => return Vec::new(),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(mut map) => {
                let kind = map
                    .get("type")
                    .and_then(Value::as_str)
                    .unwrap_or("raw")
                    .to_string();
                let id = map
                    .get("id")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("section-{i}"));
                let data = match map.remove("data") {
                    Some(Value::Object(data)) => data,
                    _ => map,
                };
                Section { id, kind, data }
            }
            _ => Section {
                id: format!("section-{i}"),
                kind: raw_kind(),
                data: Map::new(),
            },
        })
        .collect()
}

fn sections<'de, D>(deserializer: D) -> Result<Vec<Section>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(normalize_sections(Value::deserialize(deserializer)?))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Page {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    #[serde(deserialize_with = "sections")]
    pub content: Vec<Section>,
    pub template: Option<String>,
    pub status: ContentStatus,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
}

impl ContentRecord for Page {
    fn id(&self) -> Uuid {
        self.id
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn slug(&self) -> &str {
        &self.slug
    }
    fn status(&self) -> ContentStatus {
        self.status
    }
    fn summary(&self) -> &str {
        self.meta_description.as_deref().unwrap_or("")
    }
}
