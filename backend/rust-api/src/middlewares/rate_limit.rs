use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::middlewares::auth::AuthContext;
use crate::services::AppState;

const RATE_LIMIT_PER_USER: u32 = 100; // requests per minute
const RATE_LIMIT_PER_IP: u32 = 200; // requests per minute
const RATE_WINDOW_SECONDS: u64 = 60; // 1 minute

/// Fixed-window counter store. Process-local; each key gets an independent
/// window that resets `RATE_WINDOW_SECONDS` after its first hit.
#[derive(Default)]
pub struct RateLimiter {
    windows: RwLock<HashMap<String, WindowSlot>>,
}

struct WindowSlot {
    count: u32,
    window_start: Instant,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false once `limit` hits have landed inside the current
    /// window for `key`. Expired windows are replaced in place, so the map
    /// only grows with the number of distinct active keys.
    pub async fn check(&self, key: &str, limit: u32, window: Duration) -> bool {
        let mut windows = self.windows.write().await;
        let now = Instant::now();

        let slot = windows.entry(key.to_string()).or_insert(WindowSlot {
            count: 0,
            window_start: now,
        });

        if now.duration_since(slot.window_start) >= window {
            slot.count = 0;
            slot.window_start = now;
        }

        if slot.count >= limit {
            return false;
        }

        slot.count += 1;
        true
    }
}

fn extract_client_ip_from(headers: &HeaderMap, extensions: &axum::http::Extensions) -> String {
    // Preferred order: X-Forwarded-For, Forwarded, X-Real-IP, ConnectInfo
    if let Some(v) = headers.get("x-forwarded-for") {
        if let Ok(s) = v.to_str() {
            // x-forwarded-for can be a comma separated list; take first
            return s.split(',').next().unwrap_or(s).trim().to_string();
        }
    }

    if let Some(v) = headers.get("forwarded") {
        if let Ok(s) = v.to_str() {
            // forwarded: for=1.2.3.4; proto=http; by=...
            for part in s.split(';') {
                let p = part.trim();
                if let Some(val) = p.strip_prefix("for=") {
                    return val.trim().trim_matches('"').to_string();
                }
            }
        }
    }

    if let Some(v) = headers.get("x-real-ip") {
        if let Ok(s) = v.to_str() {
            return s.trim().to_string();
        }
    }

    if let Some(ci) = extensions.get::<ConnectInfo<SocketAddr>>() {
        return ci.0.ip().to_string();
    }

    "unknown".to_string()
}

pub async fn rate_limit_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // Allow disabling rate limits in local perf runs by setting RATE_LIMIT_DISABLED=1
    let rate_limit_disabled = std::env::var("RATE_LIMIT_DISABLED").unwrap_or_default() == "1";
    if rate_limit_disabled {
        tracing::debug!("Rate limiting disabled via RATE_LIMIT_DISABLED=1");
        return Ok(next.run(request).await);
    }

    let client_ip = extract_client_ip_from(request.headers(), request.extensions());
    let window = Duration::from_secs(RATE_WINDOW_SECONDS);

    // Authenticated requests also get a per-user window
    let user_id = request
        .extensions()
        .get::<AuthContext>()
        .and_then(|ctx| ctx.0.as_ref())
        .map(|claims| claims.sub.clone());

    if let Some(uid) = &user_id {
        // Allow overriding per-user limit via env RATE_LIMIT_PER_USER
        let user_limit = std::env::var("RATE_LIMIT_PER_USER")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(RATE_LIMIT_PER_USER);

        let allowed = state
            .rate_limiter
            .check(&format!("ratelimit:user:{}", uid), user_limit, window)
            .await;

        if !allowed {
            tracing::warn!("Rate limit exceeded for user: {}", uid);
            return Err(StatusCode::TOO_MANY_REQUESTS);
        }
    }

    // allow overriding per-IP limit via env RATE_LIMIT_PER_IP
    let ip_limit = std::env::var("RATE_LIMIT_PER_IP")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(RATE_LIMIT_PER_IP);

    let allowed = state
        .rate_limiter
        .check(&format!("ratelimit:ip:{}", client_ip), ip_limit, window)
        .await;

    if !allowed {
        tracing::warn!("Rate limit exceeded for IP: {}", client_ip);
        return Err(StatusCode::TOO_MANY_REQUESTS);
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn window_blocks_after_limit() {
        let limiter = RateLimiter::new();
        let window = Duration::from_secs(60);

        assert!(limiter.check("ip:1.2.3.4", 2, window).await);
        assert!(limiter.check("ip:1.2.3.4", 2, window).await);
        assert!(!limiter.check("ip:1.2.3.4", 2, window).await);
    }

    #[tokio::test]
    async fn keys_have_independent_windows() {
        let limiter = RateLimiter::new();
        let window = Duration::from_secs(60);

        assert!(limiter.check("ip:1.2.3.4", 1, window).await);
        assert!(!limiter.check("ip:1.2.3.4", 1, window).await);
        assert!(limiter.check("ip:5.6.7.8", 1, window).await);
    }

    #[tokio::test]
    async fn expired_window_resets() {
        let limiter = RateLimiter::new();
        let window = Duration::from_millis(10);

        assert!(limiter.check("ip:1.2.3.4", 1, window).await);
        assert!(!limiter.check("ip:1.2.3.4", 1, window).await);
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(limiter.check("ip:1.2.3.4", 1, window).await);
    }

    #[test]
    fn client_ip_prefers_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "1.2.3.4, 10.0.0.1".parse().unwrap());
        headers.insert("x-real-ip", "9.9.9.9".parse().unwrap());
        let extensions = axum::http::Extensions::new();

        assert_eq!(extract_client_ip_from(&headers, &extensions), "1.2.3.4");
    }
}
