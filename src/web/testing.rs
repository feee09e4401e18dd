//! In-process stand-in for the CMS backend, for handler tests.

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
use socialit::services::{LocalSettingsCache, SettingsSync};

use crate::web::state::AppState;

/// JSON documents keyed by request path. Every authorized PUT replaces the
/// document and is recorded in order.
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

    pub fn puts(&self) -> Vec<(String, Value)> {
        self.puts.lock().clone()
    }

    /// Serves on a free local port for the rest of the test.
    pub fn start(&self) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let stub = self.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(stub.clone()))
                .default_service(web::to(respond))
        })
        .workers(1)
        .disable_signals()
        .listen(listener)
        .unwrap()
        .run();
        actix_web::rt::spawn(server);
        format!("http://{addr}")
    }

    /// App state talking to a freshly started stub.
    pub fn state(&self, cache_dir: &Path) -> AppState {
        let cms = CmsClient::new(&self.start(), Duration::from_secs(5)).unwrap();
        let policy = FetchPolicy {
            dedupe_interval: Duration::ZERO,
            retry_count: 0,
            ..FetchPolicy::default()
        };
        AppState::new(SettingsSync::new(cms, policy, LocalSettingsCache::open(cache_dir)))
    }
}

async fn respond(stub: web::Data<StubBackend>, req: HttpRequest, body: web::Bytes) -> HttpResponse {
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
