use axum::{debug_handler, extract::Path, http::StatusCode, routing::get, Router};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::{
    num::NonZeroU32,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, RwLock,
    },
    time::Duration,
};
use tower_http::trace::TraceLayer;
use tracing::debug;

pub fn router() -> Router {
    Router::new()
        .route("/delay/ms/:delay_ms", get(delay))
        .route("/status/:code", get(status))
        .route("/alternate/:code/server/:server_id", get(alternate))
        .route(
            "/max/:max_tps/delay/ms/:delay_ms/server/:server_id",
            get(max),
        )
        .layer(TraceLayer::new_for_http())
}

pub async fn run(addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router()).await
}

/// `200 OK` after `delay_ms`.
#[debug_handler]
pub async fn delay(Path(delay_ms): Path<u64>) {
    TPS_MEASURE.fetch_add(1, Ordering::Relaxed);
    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
}

/// Always answers with `code`.
#[debug_handler]
pub async fn status(Path(code): Path<u16>) -> StatusCode {
    TPS_MEASURE.fetch_add(1, Ordering::Relaxed);
    StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST)
}

lazy_static! {
    static ref ALTERNATE_MAP: Arc<RwLock<HashMap<String, Arc<AtomicU64>>>> =
        Arc::new(RwLock::new(HashMap::new()));
}

/// Per `server_id`, even-numbered hits get `200 OK` and odd-numbered hits get `code`.
#[debug_handler]
pub async fn alternate(Path((code, server_id)): Path<(u16, String)>) -> StatusCode {
    TPS_MEASURE.fetch_add(1, Ordering::Relaxed);

    let read = ALTERNATE_MAP.read().unwrap().get(&server_id).cloned();
    let counter = if let Some(counter) = read {
        counter
    } else {
        ALTERNATE_MAP
            .write()
            .unwrap()
            .entry(server_id)
            .or_default()
            .clone()
    };

    let hit = counter.fetch_add(1, Ordering::SeqCst);
    if hit % 2 == 0 {
        StatusCode::OK
    } else {
        StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST)
    }
}

lazy_static! {
    static ref MAX_MAP: Arc<RwLock<HashMap<String, Arc<DefaultDirectRateLimiter>>>> =
        Arc::new(RwLock::new(HashMap::new()));
}

/// `200 OK` while under `max_tps` for this `server_id`, `500` beyond it.
#[debug_handler]
pub async fn max(
    Path((max_tps, delay_ms, server_id)): Path<(u32, u64, String)>,
) -> Result<(), StatusCode> {
    TPS_MEASURE.fetch_add(1, Ordering::Relaxed);
    tokio::time::sleep(Duration::from_millis(delay_ms)).await;

    let read = MAX_MAP.read().unwrap().get(&server_id).cloned();
    let limiter = if let Some(limiter) = read {
        limiter
    } else {
        MAX_MAP
            .write()
            .unwrap()
            .entry(server_id)
            .or_insert_with(|| Arc::new(rate_limiter(max_tps)))
            .clone()
    };

    match limiter.check() {
        Ok(_) => Ok(()),
        Err(_) => {
            debug!("Rate limit of {max_tps} TPS exceeded");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/** Utils **/

pub fn rate_limiter(tps: u32) -> DefaultDirectRateLimiter {
    RateLimiter::direct(Quota::per_second(
        NonZeroU32::new(tps).unwrap_or(NonZeroU32::MIN),
    ))
}

/** TPS Printer **/

static TPS_MEASURE: AtomicU64 = AtomicU64::new(0);

pub async fn tps_measure_task() {
    loop {
        tokio::time::sleep(Duration::from_millis(1000)).await;
        let transactions = TPS_MEASURE.swap(0, Ordering::Relaxed);
        println!("{transactions} TPS");
    }
}
