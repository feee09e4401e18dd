use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::{datetime, ContentStatus};

/// Common read-side surface of every CMS record, used by list views.
pub trait ContentRecord {
    fn id(&self) -> Uuid;
    fn title(&self) -> &str;
    fn slug(&self) -> &str;
    fn status(&self) -> ContentStatus;
    fn summary(&self) -> &str;
}

macro_rules! content_record {
    ($ty:ty, $summary:ident) => {
        impl ContentRecord for $ty {
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
                self.$summary.as_deref().unwrap_or("")
            }
        }
    };
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Blog {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub content: Option<Value>,
    pub featured_image_url: Option<String>,
    pub author_id: Option<Uuid>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: ContentStatus,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    #[serde(deserialize_with = "datetime::lenient")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "datetime::lenient")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Blog {
    pub fn published_on(&self) -> String {
        datetime::display_date(&self.published_at.or(self.created_at))
    }

    pub fn tag_list(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }

    /// Body paragraphs from the `content` document.
    pub fn body(&self) -> Vec<String> {
        body_paragraphs(self.content.as_ref())
    }
}

content_record!(Blog, excerpt);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseStudy {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub client_name: Option<String>,
    pub client_logo_url: Option<String>,
    pub excerpt: Option<String>,
    pub challenge: Option<String>,
    pub solution: Option<String>,
    pub results: Option<String>,
    pub content: Option<Value>,
    pub featured_image_url: Option<String>,
    pub gallery_images: Option<Vec<String>>,
    pub industry: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: ContentStatus,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    #[serde(deserialize_with = "datetime::lenient")]
    pub published_at: Option<DateTime<Utc>>,
}

impl CaseStudy {
    pub fn body(&self) -> Vec<String> {
        body_paragraphs(self.content.as_ref())
    }
}

content_record!(CaseStudy, excerpt);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Service {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub content: Option<Value>,
    pub featured_image_url: Option<String>,
    pub icon_url: Option<String>,
    pub status: ContentStatus,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
}

impl Service {
    pub fn body(&self) -> Vec<String> {
        body_paragraphs(self.content.as_ref())
    }
}

content_record!(Service, description);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Job {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    /// `internship` or `permanent`.
    pub job_type: String,
    pub location: Option<String>,
    pub employment_type: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub content: Option<Value>,
    pub status: ContentStatus,
    #[serde(deserialize_with = "datetime::lenient")]
    pub published_at: Option<DateTime<Utc>>,
}

impl Job {
    pub fn is_internship(&self) -> bool {
        self.job_type.eq_ignore_ascii_case("internship")
    }

    pub fn requirement_list(&self) -> &[String] {
        self.requirements.as_deref().unwrap_or(&[])
    }
}

content_record!(Job, description);

/// Flattens the free-form `content` document into paragraphs. Strings are
/// split on blank lines; objects contribute their `body`/`text`/`html`
/// fields; arrays are walked in order.
pub fn body_paragraphs(content: Option<&Value>) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(value) = content {
        collect_paragraphs(value, &mut out);
    }
    out
}

fn collect_paragraphs(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(s) => out.extend(
            s.split("\n\n")
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
        ),
        Value::Array(items) => items.iter().for_each(|v| collect_paragraphs(v, out)),
        Value::Object(map) => {
            for key in ["body", "text", "content", "html"] {
                if let Some(v) = map.get(key) {
                    collect_paragraphs(v, out);
                }
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blog_missing_fields_fall_back() {
        let blog: Blog = serde_json::from_value(json!({
            "slug": "hello",
            "title": "Hello",
            "status": "published",
            "created_at": "2025-01-02T03:04:05"
        }))
        .unwrap();
        assert!(blog.excerpt.is_none());
        assert!(blog.status.is_public());
        assert_eq!(blog.published_on(), "January 2, 2025");
        assert!(blog.tag_list().is_empty());
    }

    #[test]
    fn test_body_paragraphs_from_nested_document() {
        let content = json!({"body": "First.\n\nSecond.", "extra": 1});
        assert_eq!(body_paragraphs(Some(&content)), vec!["First.", "Second."]);

        let list = json!([{"text": "a"}, "b"]);
        assert_eq!(body_paragraphs(Some(&list)), vec!["a", "b"]);
        assert!(body_paragraphs(None).is_empty());
    }

    #[test]
    fn test_job_type() {
        let job: Job = serde_json::from_value(json!({"title": "Intern", "job_type": "Internship"}))
            .unwrap();
        assert!(job.is_internship());
    }
}
