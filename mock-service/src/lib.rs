use axum::{debug_handler, extract::Path, http::StatusCode, routing::get, Router};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, RwLock};
use std::{num::NonZeroU32, time::Duration};
use tokio::net::TcpListener;
use tracing::debug;

pub fn router() -> Router {
    Router::new()
        .route("/delay/ms/:delay_ms", get(delay))
        .route("/status/:code", get(status))
        .route("/max/:max_tps/delay/ms/:delay_ms/scenario/:name", get(max))
}

pub async fn run(addr: SocketAddr) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&addr).await?;
    serve(listener).await
}

/// Bind an ephemeral local port and serve in the background.
pub async fn spawn() -> anyhow::Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = serve(listener).await {
            tracing::error!("Mock service stopped: {err}");
        }
    });

    Ok(addr)
}

async fn serve(listener: TcpListener) -> anyhow::Result<()> {
    debug!("Mock service listening on {}", listener.local_addr()?);
    axum::serve(listener, router()).await?;
    Ok(())
}

#[debug_handler]
pub async fn delay(Path(delay_ms): Path<u64>) -> &'static str {
    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    "ok"
}

#[debug_handler]
pub async fn status(Path(code): Path<u16>) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST)
}

lazy_static! {
    static ref MAX_MAP: Arc<RwLock<HashMap<String, Arc<DefaultDirectRateLimiter>>>> =
        Arc::new(RwLock::new(HashMap::new()));
}

/// Succeeds while the named limiter has capacity, 500 once it is exhausted.
#[debug_handler]
pub async fn max(
    Path((max_tps, delay_ms, name)): Path<(u32, u64, String)>,
) -> Result<(), StatusCode> {
    tokio::time::sleep(Duration::from_millis(delay_ms)).await;

    let limiter = limiter_for(&name, max_tps).ok_or(StatusCode::BAD_REQUEST)?;
    match limiter.check() {
        Ok(_) => Ok(()),
        Err(_) => {
            debug!("Limiter {name} exhausted");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn limiter_for(name: &str, max_tps: u32) -> Option<Arc<DefaultDirectRateLimiter>> {
    let existing = MAX_MAP.read().ok()?.get(name).cloned();
    if let Some(limiter) = existing {
        return Some(limiter);
    }

    let limiter = Arc::new(rate_limiter(NonZeroU32::new(max_tps)?));
    let mut map = MAX_MAP.write().ok()?;
    Some(map.entry(name.to_string()).or_insert(limiter).clone())
}

/** Utils **/

pub fn rate_limiter(tps: NonZeroU32) -> DefaultDirectRateLimiter {
    RateLimiter::direct(Quota::per_second(tps))
}
