//! Live settings updates over server-sent events.
//!
//! Every open tab subscribes to `/events/settings`. Theme and UI changes carry
//! the new CSS variables so the page restyles in place; other documents only
//! announce their key and the client reloads.

use actix_web::{get, web, HttpResponse, Responder};
use futures_util::stream::{self, StreamExt};
use serde_json::Value;
use std::time::Duration;
use tokio::time::{interval_at, Instant};
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::{BroadcastStream, IntervalStream};

use crate::web::state::AppState;

const KEEP_ALIVE: Duration = Duration::from_secs(15);

/// One SSE frame.
fn frame(event: &str, data: &Value) -> web::Bytes {
    web::Bytes::from(format!("event: {event}\ndata: {data}\n\n"))
}

#[get("/events/settings")]
pub async fn settings_events(state: web::Data<AppState>) -> impl Responder {
    let rx = state.settings.subscribe();
    log::debug!("Settings event subscriber connected");

    let connected = stream::once(async { frame("connected", &Value::Object(Default::default())) });

    let updates = BroadcastStream::new(rx).filter_map(|msg| async move {
        match msg {
            Ok(event) => Some(frame(event.name(), &event.data())),
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                log::warn!("Settings subscriber lagged, {} events skipped", skipped);
                None
            }
        }
    });

    let keep_alive = IntervalStream::new(interval_at(Instant::now() + KEEP_ALIVE, KEEP_ALIVE))
        .map(|_| web::Bytes::from_static(b": ping\n\n"));

    let body = connected
        .chain(stream::select(updates, keep_alive))
        .map(Ok::<_, actix_web::Error>);

    HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header(("Cache-Control", "no-cache"))
        .insert_header(("X-Accel-Buffering", "no"))
        .streaming(body)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(settings_events);
}
