//! View models handed to the public templates.

use serde_json::Value;

use socialit::models::{
    body_paragraphs, Blog, CaseStudy, ContentKind, FooterConfig, HeaderConfig, Job, Section,
    Service, SECTION_KINDS,
};
use socialit::services::SettingsSync;

use crate::web::helpers::current_year;

/// Header, footer and CSS variables shared by every public page.
pub struct SiteChrome {
    /// Body of `<style id="site-vars">`.
    pub style_block: String,
    pub header: HeaderConfig,
    pub footer: FooterConfig,
    pub copyright: String,
}

impl SiteChrome {
    pub async fn load(settings: &SettingsSync) -> Self {
        let (style, header, footer) =
            tokio::join!(settings.style(), settings.header(), settings.footer());
        let copyright = footer.copyright(current_year());
        Self {
            style_block: style.root_block(),
            header,
            footer,
            copyright,
        }
    }
}

pub struct Card {
    pub title: String,
    pub summary: String,
    pub href: String,
    pub meta: String,
    pub image: String,
    pub badge: String,
}

fn href(kind: ContentKind, slug: &str) -> String {
    format!("/{}/{}", kind.site_segment(), urlencoding::encode(slug))
}

fn or_empty(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

impl From<&Blog> for Card {
    fn from(blog: &Blog) -> Self {
        Self {
            title: blog.title.clone(),
            summary: or_empty(&blog.excerpt),
            href: href(ContentKind::Blogs, &blog.slug),
            meta: blog.published_on(),
            image: or_empty(&blog.featured_image_url),
            badge: or_empty(&blog.category),
        }
    }
}

impl From<&CaseStudy> for Card {
    fn from(study: &CaseStudy) -> Self {
        Self {
            title: study.title.clone(),
            summary: or_empty(&study.excerpt),
            href: href(ContentKind::CaseStudies, &study.slug),
            meta: or_empty(&study.client_name),
            image: or_empty(&study.featured_image_url),
            badge: or_empty(&study.industry),
        }
    }
}

impl From<&Service> for Card {
    fn from(service: &Service) -> Self {
        Self {
            title: service.title.clone(),
            summary: service
                .description
                .clone()
                .or_else(|| service.subtitle.clone())
                .unwrap_or_default(),
            href: href(ContentKind::Services, &service.slug),
            meta: String::new(),
            image: service
                .icon_url
                .clone()
                .or_else(|| service.featured_image_url.clone())
                .unwrap_or_default(),
            badge: String::new(),
        }
    }
}

impl From<&Job> for Card {
    fn from(job: &Job) -> Self {
        let meta = [job.location.as_deref(), job.employment_type.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" · ");
        Self {
            title: job.title.clone(),
            summary: or_empty(&job.description),
            href: href(ContentKind::Jobs, &job.slug),
            meta,
            image: String::new(),
            badge: if job.is_internship() {
                "Internship".to_string()
            } else {
                "Permanent".to_string()
            },
        }
    }
}

pub struct Block {
    pub heading: String,
    pub text: String,
}

/// One record on its own page.
pub struct Detail {
    pub title: String,
    pub subtitle: String,
    pub meta: String,
    pub image: String,
    pub paragraphs: Vec<String>,
    pub blocks: Vec<Block>,
    pub tags: Vec<String>,
    pub bullets_heading: String,
    pub bullets: Vec<String>,
    pub back_href: String,
    pub back_label: String,
    pub cta_text: String,
    pub cta_link: String,
    pub meta_description: String,
}

impl Detail {
    fn new(kind: ContentKind, title: &str) -> Self {
        Self {
            title: title.to_string(),
            subtitle: String::new(),
            meta: String::new(),
            image: String::new(),
            paragraphs: Vec::new(),
            blocks: Vec::new(),
            tags: Vec::new(),
            bullets_heading: String::new(),
            bullets: Vec::new(),
            back_href: format!("/{}", kind.site_segment()),
            back_label: format!("All {}", kind.label().to_lowercase()),
            cta_text: String::new(),
            cta_link: String::new(),
            meta_description: String::new(),
        }
    }
}

impl From<&Blog> for Detail {
    fn from(blog: &Blog) -> Self {
        let mut detail = Self::new(ContentKind::Blogs, &blog.title);
        detail.subtitle = or_empty(&blog.excerpt);
        detail.meta = blog.published_on();
        detail.image = or_empty(&blog.featured_image_url);
        detail.paragraphs = blog.body();
        detail.tags = blog.tag_list().to_vec();
        detail.meta_description = blog
            .meta_description
            .clone()
            .or_else(|| blog.excerpt.clone())
            .unwrap_or_default();
        detail
    }
}

impl From<&CaseStudy> for Detail {
    fn from(study: &CaseStudy) -> Self {
        let mut detail = Self::new(ContentKind::CaseStudies, &study.title);
        detail.subtitle = or_empty(&study.excerpt);
        detail.meta = or_empty(&study.client_name);
        detail.image = or_empty(&study.featured_image_url);
        detail.paragraphs = study.body();
        detail.blocks = [
            ("The Challenge", &study.challenge),
            ("Our Solution", &study.solution),
            ("Results", &study.results),
        ]
        .into_iter()
        .filter_map(|(heading, text)| {
            let text = text.as_deref()?.trim();
            (!text.is_empty()).then(|| Block {
                heading: heading.to_string(),
                text: text.to_string(),
            })
        })
        .collect();
        detail.tags = study.tags.clone().unwrap_or_default();
        detail.meta_description = or_empty(&study.meta_description);
        detail
    }
}

impl From<&Service> for Detail {
    fn from(service: &Service) -> Self {
        let mut detail = Self::new(ContentKind::Services, &service.title);
        detail.subtitle = or_empty(&service.subtitle);
        detail.image = or_empty(&service.featured_image_url);
        detail.paragraphs = service.body();
        if detail.paragraphs.is_empty() {
            detail.paragraphs = body_paragraphs(
                service
                    .description
                    .as_ref()
                    .map(|d| Value::String(d.clone()))
                    .as_ref(),
            );
        }
        detail.cta_text = "Talk to us".to_string();
        detail.cta_link = "/contact".to_string();
        detail.meta_description = or_empty(&service.meta_description);
        detail
    }
}

impl From<&Job> for Detail {
    fn from(job: &Job) -> Self {
        let mut detail = Self::new(ContentKind::Jobs, &job.title);
        detail.meta = Card::from(job).meta;
        detail.subtitle = if job.is_internship() {
            "Internship".to_string()
        } else {
            "Permanent role".to_string()
        };
        detail.paragraphs = body_paragraphs(
            job.description
                .as_ref()
                .map(|d| Value::String(d.clone()))
                .as_ref(),
        );
        detail.paragraphs.extend(body_paragraphs(job.content.as_ref()));
        detail.bullets_heading = "Requirements".to_string();
        detail.bullets = job.requirement_list().to_vec();
        detail.cta_text = "Apply now".to_string();
        detail.cta_link = "/contact".to_string();
        detail
    }
}

pub struct SectionItem {
    pub title: String,
    pub text: String,
    pub meta: String,
    pub image: String,
}

/// A page-builder section ready for `page.html`.
pub struct SectionView {
    pub id: String,
    pub kind: String,
    pub heading: String,
    pub subtext: String,
    pub badge: String,
    pub paragraphs: Vec<String>,
    pub image_url: String,
    pub image_alt: String,
    pub caption: String,
    pub button_text: String,
    pub button_link: String,
    pub secondary_text: String,
    pub secondary_link: String,
    pub style: String,
    pub items: Vec<SectionItem>,
}

fn style_safe(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ';' | '{' | '}' | '<' | '>' | '"'))
        .collect()
}

fn item_text(item: &Value, key: &str) -> String {
    item.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .to_string()
}

impl SectionView {
    /// `None` for section types the site does not render, and for image
    /// sections without an image.
    pub fn from_section(section: &Section) -> Option<Self> {
        let kind = section.kind.as_str();
        if !SECTION_KINDS.contains(&kind) {
            return None;
        }

        let mut view = Self {
            id: section.id.clone(),
            kind: kind.to_string(),
            heading: String::new(),
            subtext: section.text_or("subtext", "").to_string(),
            badge: String::new(),
            paragraphs: Vec::new(),
            image_url: String::new(),
            image_alt: String::new(),
            caption: String::new(),
            button_text: String::new(),
            button_link: String::new(),
            secondary_text: String::new(),
            secondary_link: String::new(),
            style: String::new(),
            items: Vec::new(),
        };

        match kind {
            "hero" => {
                view.heading = section.text_or("heading", "Welcome").to_string();
                view.subtext = section.text_or("subheading", "").to_string();
                view.badge = section.text_or("badge", "").to_string();
                view.button_text = section.text_or("buttonText", "").to_string();
                view.button_link = section.text_or("buttonLink", "#").to_string();
                let color = style_safe(section.text_or("textColor", "#FFFFFF"));
                view.style = match section.text("gradientTo") {
                    Some(to) => format!(
                        "color:{};background:linear-gradient(to bottom right,var(--color-primary),{})",
                        color,
                        style_safe(to)
                    ),
                    None => format!("color:{color}"),
                };
            }
            "text" => {
                view.heading = section.text_or("title", "").to_string();
                view.paragraphs = body_paragraphs(section.data.get("content"));
            }
            "image" => {
                view.image_url = section.text("url")?.to_string();
                view.image_alt = section.text_or("alt", "Image").to_string();
                view.caption = section.text_or("caption", "").to_string();
            }
            "features" => {
                view.heading = section.text_or("title", "Features").to_string();
                view.items = section
                    .items()
                    .iter()
                    .filter_map(Value::as_str)
                    .map(|s| SectionItem {
                        title: s.to_string(),
                        text: String::new(),
                        meta: String::new(),
                        image: String::new(),
                    })
                    .collect();
            }
            "cta" => {
                view.heading = section.text_or("heading", "Get in touch").to_string();
                view.button_text = section.text_or("buttonText", "Contact").to_string();
                view.button_link = section.text_or("buttonLink", "#").to_string();
                if let (Some(text), Some(link)) =
                    (section.text("secondaryText"), section.text("secondaryLink"))
                {
                    view.secondary_text = text.to_string();
                    view.secondary_link = link.to_string();
                }
            }
            "stats" => {
                view.heading = section.text_or("title", "Let's talk numbers").to_string();
                view.items = section
                    .items()
                    .iter()
                    .map(|item| SectionItem {
                        title: item_text(item, "value"),
                        text: item_text(item, "label"),
                        meta: String::new(),
                        image: String::new(),
                    })
                    .collect();
            }
            _ => {
                view.heading = section.text_or("title", "What Our Clients Say").to_string();
                view.items = section
                    .items()
                    .iter()
                    .map(|item| SectionItem {
                        title: item_text(item, "author"),
                        text: item_text(item, "quote"),
                        meta: [item_text(item, "role"), item_text(item, "company")]
                            .into_iter()
                            .filter(|s| !s.is_empty())
                            .collect::<Vec<_>>()
                            .join(", "),
                        image: item_text(item, "image_url"),
                    })
                    .collect();
            }
        }
        Some(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use socialit::models::normalize_sections;

    #[test]
    fn test_unknown_sections_are_skipped() {
        let sections = normalize_sections(json!([
            {"type": "text", "data": {"title": "Hi", "content": "One\n\nTwo"}},
            {"type": "carousel", "data": {}},
            {"type": "image", "data": {"alt": "no url"}}
        ]));
        let views: Vec<_> = sections.iter().filter_map(SectionView::from_section).collect();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].heading, "Hi");
        assert_eq!(views[0].paragraphs, vec!["One", "Two"]);
    }

    #[test]
    fn test_testimonial_meta() {
        let sections = normalize_sections(json!([{
            "type": "testimonials",
            "data": {"items": [{"quote": "Great", "author": "Ann", "company": "Acme"}]}
        }]));
        let view = SectionView::from_section(&sections[0]).unwrap();
        assert_eq!(view.heading, "What Our Clients Say");
        assert_eq!(view.items[0].meta, "Acme");
    }

    #[test]
    fn test_hero_style_is_sanitized() {
        let sections = normalize_sections(json!([{
            "type": "hero",
            "data": {"heading": "Go", "gradientTo": "red;}<x>"}
        }]));
        let view = SectionView::from_section(&sections[0]).unwrap();
        assert!(view.style.ends_with(",redx)"));
    }

    #[test]
    fn test_job_card_badge() {
        let job = Job {
            slug: "intern".into(),
            job_type: "internship".into(),
            location: Some("Kota".into()),
            ..Job::default()
        };
        let card = Card::from(&job);
        assert_eq!(card.badge, "Internship");
        assert_eq!(card.href, "/careers/intern");
        assert_eq!(card.meta, "Kota");
    }
}
