use actix_web::http::StatusCode;
use actix_web::{get, web, HttpResponse, Responder};
use serde::de::DeserializeOwned;

use socialit::common::ApiError;
use socialit::models::{Blog, CaseStudy, ContentKind, ContentRecord, Job, Page, Service};

use crate::web::helpers::{render, render_status};
use crate::web::state::AppState;
use crate::web::templates::{
    AboutTemplate, ContactTemplate, DetailTemplate, HomeTemplate, ListTemplate,
    NotFoundTemplate, PageTemplate,
};
use crate::web::views::{Card, Detail, SectionView, SiteChrome};

const UNAVAILABLE: &str = "This content is temporarily unavailable. Please try again shortly.";

async fn published<T>(state: &AppState, kind: ContentKind) -> Result<Vec<T>, ApiError>
where
    T: DeserializeOwned + ContentRecord,
{
    state.cms().list_published::<T>(kind).await
}

fn cards<T>(items: &[T], limit: usize) -> Vec<Card>
where
    for<'a> Card: From<&'a T>,
{
    items.iter().take(limit).map(Card::from).collect()
}

async fn not_found(state: &AppState) -> HttpResponse {
    let chrome = SiteChrome::load(&state.settings).await;
    render_status(
        StatusCode::NOT_FOUND,
        NotFoundTemplate {
            chrome,
            heading: "Page not found".to_string(),
            message: "The page you are looking for does not exist or is no longer published."
                .to_string(),
        },
    )
}

async fn unavailable(state: &AppState) -> HttpResponse {
    let chrome = SiteChrome::load(&state.settings).await;
    render_status(
        StatusCode::BAD_GATEWAY,
        NotFoundTemplate {
            chrome,
            heading: "Temporarily unavailable".to_string(),
            message: UNAVAILABLE.to_string(),
        },
    )
}

#[get("/")]
pub async fn home(state: web::Data<AppState>) -> impl Responder {
    let settings = &state.settings;
    let (chrome, hero, ai_ml, service_items, blog_items, case_study_items) = tokio::join!(
        SiteChrome::load(settings),
        settings.hero(),
        settings.ai_ml(),
        published::<Service>(&state, ContentKind::Services),
        published::<Blog>(&state, ContentKind::Blogs),
        published::<CaseStudy>(&state, ContentKind::CaseStudies),
    );

    let or_log = |kind: ContentKind, r: Result<Vec<Card>, ApiError>| {
        r.unwrap_or_else(|e| {
            log::warn!("Homepage {} unavailable: {}", kind, e);
            Vec::new()
        })
    };

    let hero_style = hero.design.inline_style(&hero.background_image_url);
    render(HomeTemplate {
        chrome,
        hero,
        hero_style,
        services: or_log(ContentKind::Services, service_items.map(|s| cards(&s, 6))),
        ai_ml,
        blogs: or_log(ContentKind::Blogs, blog_items.map(|b| cards(&b, 3))),
        case_studies: or_log(
            ContentKind::CaseStudies,
            case_study_items.map(|c| cards(&c, 3)),
        ),
    })
}

async fn listing<T>(state: &AppState, kind: ContentKind, intro: &str) -> HttpResponse
where
    T: DeserializeOwned + ContentRecord,
    for<'a> Card: From<&'a T>,
{
    let (chrome, items) = tokio::join!(
        SiteChrome::load(&state.settings),
        published::<T>(state, kind)
    );
    let (cards, notice) = match items {
        Ok(items) => (cards(&items, usize::MAX), String::new()),
        Err(e) => {
            log::warn!("Listing {} failed: {}", kind, e);
            (Vec::new(), UNAVAILABLE.to_string())
        }
    };
    let ai_ml = match kind {
        ContentKind::Services => Some(state.settings.ai_ml().await).filter(|s| s.enabled),
        _ => None,
    };

    render(ListTemplate {
        chrome,
        title: kind.label().to_string(),
        intro: intro.to_string(),
        cards,
        notice,
        ai_ml,
    })
}

async fn detail<T>(state: &AppState, kind: ContentKind, slug: &str) -> HttpResponse
where
    T: DeserializeOwned + ContentRecord,
    for<'a> Detail: From<&'a T>,
{
    match state.cms().get_published_by_slug::<T>(kind, slug).await {
        Ok(item) => {
            let chrome = SiteChrome::load(&state.settings).await;
            render(DetailTemplate {
                chrome,
                detail: Detail::from(&item),
            })
        }
        Err(ApiError::NotFound(_)) => not_found(state).await,
        Err(e) => {
            log::warn!("Loading {} {} failed: {}", kind, slug, e);
            unavailable(state).await
        }
    }
}

#[get("/blogs")]
pub async fn blogs(state: web::Data<AppState>) -> impl Responder {
    listing::<Blog>(&state, ContentKind::Blogs, "Insights, news and ideas from our team.").await
}

#[get("/blogs/{slug}")]
pub async fn blog(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    detail::<Blog>(&state, ContentKind::Blogs, &path.into_inner()).await
}

#[get("/case-studies")]
pub async fn case_studies(state: web::Data<AppState>) -> impl Responder {
    listing::<CaseStudy>(
        &state,
        ContentKind::CaseStudies,
        "How we have helped businesses grow.",
    )
    .await
}

#[get("/case-studies/{slug}")]
pub async fn case_study(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    detail::<CaseStudy>(&state, ContentKind::CaseStudies, &path.into_inner()).await
}

#[get("/services")]
pub async fn services(state: web::Data<AppState>) -> impl Responder {
    listing::<Service>(
        &state,
        ContentKind::Services,
        "Technology and marketing services, end to end.",
    )
    .await
}

#[get("/services/{slug}")]
pub async fn service(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    detail::<Service>(&state, ContentKind::Services, &path.into_inner()).await
}

#[get("/careers")]
pub async fn careers(state: web::Data<AppState>) -> impl Responder {
    listing::<Job>(&state, ContentKind::Jobs, "Join the team behind Social IT.").await
}

#[get("/careers/{slug}")]
pub async fn career(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    detail::<Job>(&state, ContentKind::Jobs, &path.into_inner()).await
}

#[get("/about")]
pub async fn about(state: web::Data<AppState>) -> impl Responder {
    let (chrome, document) =
        tokio::join!(SiteChrome::load(&state.settings), state.settings.about());
    render(AboutTemplate {
        chrome,
        about: document,
    })
}

#[get("/contact")]
pub async fn contact(state: web::Data<AppState>) -> impl Responder {
    let (chrome, details) =
        tokio::join!(SiteChrome::load(&state.settings), state.settings.contact());
    let whatsapp = details.whatsapp_link().unwrap_or_default();
    render(ContactTemplate {
        chrome,
        contact: details,
        whatsapp,
    })
}

/// CMS page by slug. Registered after every other route.
#[get("/{slug}")]
pub async fn page(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let slug = path.into_inner();
    match state
        .cms()
        .get_published_by_slug::<Page>(ContentKind::Pages, &slug)
        .await
    {
        Ok(found) => {
            let chrome = SiteChrome::load(&state.settings).await;
            let sections = found
                .content
                .iter()
                .filter_map(SectionView::from_section)
                .collect();
            render(PageTemplate {
                chrome,
                title: found
                    .meta_title
                    .clone()
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or_else(|| found.title.clone()),
                meta_description: found.meta_description.clone().unwrap_or_default(),
                sections,
            })
        }
        Err(ApiError::NotFound(_)) => not_found(&state).await,
        Err(e) => {
            log::warn!("Loading page {} failed: {}", slug, e);
            unavailable(&state).await
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(home)
        .service(blogs)
        .service(blog)
        .service(case_studies)
        .service(case_study)
        .service(services)
        .service(service)
        .service(careers)
        .service(career)
        .service(about)
        .service(contact);
}
