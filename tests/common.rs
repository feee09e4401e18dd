#![allow(dead_code)]

use std::collections::HashMap;
use std::net::TcpListener;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use actix_web::http::{header, Method};
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use parking_lot::Mutex;
use serde_json::{json, Value};

use socialit::api::CmsClient;
use socialit::config::FetchPolicy;
use socialit::models::{FooterColumn, FooterLink};
use socialit::services::{LocalSettingsCache, SettingsSync};

/// Nothing listens on the discard port, so every request fails at connect.
pub const OFFLINE_API: &str = "http://127.0.0.1:9";

/// No retries, no waiting, nothing considered fresh.
pub fn eager_policy() -> FetchPolicy {
    FetchPolicy {
        dedupe_interval: Duration::ZERO,
        retry_count: 0,
        retry_delay: Duration::ZERO,
        capacity: 16,
    }
}

pub fn retrying_policy(retry_count: u32) -> FetchPolicy {
    FetchPolicy {
        retry_count,
        ..eager_policy()
    }
}

pub fn offline_sync(dir: &Path) -> SettingsSync {
    let cms = CmsClient::new(OFFLINE_API, Duration::from_millis(500))
        .expect("Failed to build CMS client");
    SettingsSync::new(cms, eager_policy(), LocalSettingsCache::open(dir))
}

pub fn get_seed_theme() -> Value {
    json!({
        "primary": "#0ea5e9",
        "secondary": "#14b8a6",
        "background": "#0b1120"
    })
}

pub fn get_seed_ui() -> Value {
    json!({
        "baseFontSize": 18,
        "lineHeight": 1.7,
        "fontFamily": "Roboto, sans-serif"
    })
}

pub fn footer_column(id: &str, links: &[&str]) -> FooterColumn {
    FooterColumn {
        id: id.to_string(),
        title: id.to_uppercase(),
        links: links
            .iter()
            .map(|l| FooterLink {
                id: l.to_string(),
                label: l.to_string(),
                href: format!("/{l}"),
            })
            .collect(),
    }
}

/// Settings documents served from memory, keyed by request path. Authorized
/// PUTs replace the document and are recorded.
#[derive(Clone, Default)]
pub struct StubBackend {
    documents: Arc<Mutex<HashMap<String, Value>>>,
    puts: Arc<Mutex<Vec<(String, Value)>>>,
}

impl StubBackend {
    pub fn with(self, path: &str, value: Value) -> Self {
        self.documents.lock().insert(path.to_string(), value);
        self
    }

    pub fn set(&self, path: &str, value: Value) {
        self.documents.lock().insert(path.to_string(), value);
    }

    pub fn puts(&self) -> Vec<(String, Value)> {
        self.puts.lock().clone()
    }

    /// Serves on a free local port. Needs an actix runtime
    /// (`#[actix_web::test]`).
    pub fn start(&self) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind stub backend");
        let addr = listener.local_addr().expect("Stub backend has no address");
        let stub = self.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(stub.clone()))
                .default_service(web::to(stub_respond))
        })
        .workers(1)
        .disable_signals()
        .listen(listener)
        .expect("Failed to listen")
        .run();
        actix_web::rt::spawn(server);
        format!("http://{addr}")
    }

    pub fn sync(&self, dir: &Path, policy: FetchPolicy) -> SettingsSync {
        let cms = CmsClient::new(&self.start(), Duration::from_secs(5))
            .expect("Failed to build CMS client");
        SettingsSync::new(cms, policy, LocalSettingsCache::open(dir))
    }
}

async fn stub_respond(
    stub: web::Data<StubBackend>,
    req: HttpRequest,
    body: web::Bytes,
) -> HttpResponse {
    let path = req.path().to_string();
    if req.method() == Method::GET {
        return match stub.documents.lock().get(&path) {
            Some(value) => HttpResponse::Ok().json(value),
            None => HttpResponse::NotFound().json(json!({"detail": "Not found"})),
        };
    }
    if req.method() != Method::PUT {
        return HttpResponse::MethodNotAllowed().finish();
    }
    if req.headers().get(header::AUTHORIZATION).is_none() {
        return HttpResponse::Unauthorized().json(json!({"detail": "Not authenticated"}));
    }
    let Ok(value) = serde_json::from_slice::<Value>(&body) else {
        return HttpResponse::UnprocessableEntity().json(json!({"detail": "Invalid body"}));
    };
    stub.documents.lock().insert(path.clone(), value.clone());
    stub.puts.lock().push((path, value.clone()));
    HttpResponse::Ok().json(value)
}
