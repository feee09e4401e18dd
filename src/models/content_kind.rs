use serde::{Deserialize, Serialize};

/// Content collections editable from the admin dashboard.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentKind {
    Blogs,
    CaseStudies,
    Services,
    Jobs,
    Pages,
}

impl ContentKind {
    pub const ALL: [ContentKind; 5] = [
        Self::Blogs,
        Self::CaseStudies,
        Self::Services,
        Self::Jobs,
        Self::Pages,
    ];

    /// Backend collection segment (`/cms/<segment>`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blogs => "blogs",
            Self::CaseStudies => "case-studies",
            Self::Services => "services",
            Self::Jobs => "jobs",
            Self::Pages => "pages",
        }
    }

    /// Segment used by both the public site and the admin routes.
    pub fn site_segment(&self) -> &'static str {
        match self {
            Self::Jobs => "careers",
            other => other.as_str(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Blogs => "Blogs",
            Self::CaseStudies => "Case Studies",
            Self::Services => "Services",
            Self::Jobs => "Careers",
            Self::Pages => "Pages",
        }
    }

    pub fn singular(&self) -> &'static str {
        match self {
            Self::Blogs => "blog post",
            Self::CaseStudies => "case study",
            Self::Services => "service",
            Self::Jobs => "job",
            Self::Pages => "page",
        }
    }

    /// Whether the backend exposes `GET /cms/<kind>/slug/{slug}`.
    pub fn has_slug_lookup(&self) -> bool {
        !matches!(self, Self::Services)
    }

    /// Starter document for the "new" editor.
    pub fn template(&self) -> serde_json::Value {
        use serde_json::json;
        match self {
            Self::Blogs => json!({
                "title": "", "slug": "", "excerpt": "", "content": {"body": ""},
                "category": null, "tags": [], "status": "draft", "author_id": null
            }),
            Self::CaseStudies => json!({
                "title": "", "slug": "", "client_name": "", "excerpt": "",
                "challenge": "", "solution": "", "results": "", "industry": null,
                "tags": [], "status": "draft"
            }),
            Self::Services => json!({
                "title": "", "slug": "", "subtitle": "", "description": "",
                "icon_url": null, "status": "draft"
            }),
            Self::Jobs => json!({
                "title": "", "slug": "", "job_type": "permanent", "location": "",
                "employment_type": "Full-time", "description": "", "requirements": [],
                "status": "draft"
            }),
            Self::Pages => json!({
                "title": "", "slug": "", "template": null, "status": "draft",
                "content": [{"id": "section-0", "type": "text", "data": {"title": "", "content": ""}}]
            }),
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl PartialEq<&str> for ContentKind {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl std::str::FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "blogs" => Ok(Self::Blogs),
            "case-studies" => Ok(Self::CaseStudies),
            "services" => Ok(Self::Services),
            "jobs" | "careers" => Ok(Self::Jobs),
            "pages" => Ok(Self::Pages),
            _ => Err(format!("invalid content kind: {}", s)),
        }
    }
}
