//! In-memory request rate limiting
//!
//! Layered fixed windows per client IP: every configured rule must admit
//! the request (AND semantics), so the defaults of 1000/60s and 100/1s give
//! a sustained ceiling plus a burst brake. State lives in one mutex-guarded
//! map; the check and the increment happen under a single lock acquisition,
//! so concurrent requests can never over-admit. A per-key reaper task
//! removes idle entries once their longest window has elapsed, re-checking
//! under the same lock before it deletes.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use serde_json::json;
use std::{
    collections::HashMap,
    future::{ready, Ready},
    rc::Rc,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use tg_shared::{error_codes, ErrorResponse, RateLimitConfig, RateRule};

/// One fixed window of one rule for one client
#[derive(Debug)]
struct RateWindow {
    count: u32,
    window_start: Instant,
}

/// Per-client state: one window per rule
#[derive(Debug)]
struct ClientEntry {
    windows: Vec<RateWindow>,
    last_seen: Instant,
}

impl ClientEntry {
    fn new(rule_count: usize, now: Instant) -> Self {
        Self {
            windows: (0..rule_count)
                .map(|_| RateWindow {
                    count: 0,
                    window_start: now,
                })
                .collect(),
            last_seen: now,
        }
    }
}

/// Concurrent layered rate limiter
///
/// Cloning shares the underlying map.
#[derive(Clone)]
pub struct InMemoryRateLimiter {
    rules: Arc<Vec<RateRule>>,
    longest_window: Duration,
    clients: Arc<Mutex<HashMap<String, ClientEntry>>>,
}

impl InMemoryRateLimiter {
    /// Creates a limiter from the configured rules
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            rules: Arc::new(config.rules.clone()),
            longest_window: Duration::from_secs(config.longest_window_seconds()),
            clients: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Attempts to admit one request for `client_key`
    ///
    /// Returns `Err(retry_after_seconds)` when any rule is exhausted. An
    /// exceeded request advances no counters, so a client hammering past
    /// its burst limit does not push its sustained window further out.
    pub fn allow(&self, client_key: &str) -> Result<(), u64> {
        let now = Instant::now();

        let (is_new, decision) = {
            let mut clients = self.clients.lock().unwrap();

            let is_new = !clients.contains_key(client_key);
            let entry = clients
                .entry(client_key.to_string())
                .or_insert_with(|| ClientEntry::new(self.rules.len(), now));
            entry.last_seen = now;

            let mut retry_after: u64 = 0;
            for (rule, window) in self.rules.iter().zip(entry.windows.iter_mut()) {
                let elapsed = now.duration_since(window.window_start).as_secs();
                if elapsed >= rule.window_seconds {
                    window.count = 0;
                    window.window_start = now;
                }

                if window.count >= rule.limit {
                    let remaining = rule
                        .window_seconds
                        .saturating_sub(now.duration_since(window.window_start).as_secs());
                    retry_after = retry_after.max(remaining.max(1));
                }
            }

            let decision = if retry_after > 0 {
                Err(retry_after)
            } else {
                for window in entry.windows.iter_mut() {
                    window.count += 1;
                }
                Ok(())
            };

            (is_new, decision)
        };

        // Reap on insertion, not on first admission: an entry created by a
        // rejected request must still be collected.
        if is_new {
            self.spawn_reaper(client_key.to_string());
        }

        decision
    }

    /// Number of clients currently tracked
    pub fn tracked_clients(&self) -> usize {
        self.clients.lock().unwrap().len()
    }

    /// Removes the client's entry once it has been idle for the longest
    /// configured window. A client that keeps hitting resets the idle
    /// clock, so the task re-arms until the entry truly goes quiet.
    fn spawn_reaper(&self, client_key: String) {
        let clients = Arc::clone(&self.clients);
        let longest_window = self.longest_window;

        tokio::spawn(async move {
            loop {
                tokio::time::sleep(longest_window).await;

                let done = {
                    let mut clients = clients.lock().unwrap();
                    match clients.get(&client_key) {
                        Some(entry) if entry.last_seen.elapsed() >= longest_window => {
                            clients.remove(&client_key);
                            true
                        }
                        Some(_) => false,
                        None => true,
                    }
                };

                if done {
                    return;
                }
            }
        });
    }
}

/// Rate limiting middleware factory
pub struct RateLimit {
    limiter: Arc<InMemoryRateLimiter>,
    enabled: bool,
}

impl RateLimit {
    /// Creates the middleware from configuration
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            limiter: Arc::new(InMemoryRateLimiter::new(config)),
            enabled: config.enabled,
        }
    }

    /// Creates the middleware over an existing limiter
    pub fn with_limiter(limiter: Arc<InMemoryRateLimiter>, enabled: bool) -> Self {
        Self { limiter, enabled }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limiter: Arc::clone(&self.limiter),
            enabled: self.enabled,
        }))
    }
}

/// Rate limiting middleware service
pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limiter: Arc<InMemoryRateLimiter>,
    enabled: bool,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut std::task::Context<'_>) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let limiter = Arc::clone(&self.limiter);
        let enabled = self.enabled;

        Box::pin(async move {
            if !enabled {
                return Ok(service.call(req).await?.map_into_left_body());
            }

            let client_key = client_key(&req);

            match limiter.allow(&client_key) {
                Ok(()) => Ok(service.call(req).await?.map_into_left_body()),
                Err(retry_after) => {
                    log::warn!("Rate limit exceeded for {}", client_key);

                    let body = ErrorResponse::new(error_codes::RATE_LIMITED, "Too many requests")
                        .with_detail("retry_after_seconds", json!(retry_after));

                    let response = HttpResponse::TooManyRequests()
                        .insert_header((header::RETRY_AFTER, retry_after.to_string()))
                        .json(body);

                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

/// Client key for limiting: the peer IP, honoring proxy headers
fn client_key(req: &ServiceRequest) -> String {
    req.connection_info()
        .realip_remote_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
