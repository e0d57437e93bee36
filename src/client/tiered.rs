use std::time::{Duration, Instant};

use anyhow::Result;
use serde::Serialize;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);
const KEEPALIVE_IDLE: Duration = Duration::from_secs(90);
const MAX_IDLE_PER_HOST: usize = 100;

const FAST_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const SLOW_TIMEOUT: Duration = Duration::from_secs(30);

/// The three outbound client tiers, sharing one keep-alive connection pool.
/// Callers pick the tier at the call site.
#[derive(Clone)]
pub struct ClientPool {
    transport: reqwest::Client,
}

impl ClientPool {
    pub fn new() -> Result<Self> {
        let transport = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .pool_idle_timeout(KEEPALIVE_IDLE)
            .pool_max_idle_per_host(MAX_IDLE_PER_HOST)
            .build()?;
        Ok(Self { transport })
    }

    pub fn fast(&self) -> OutboundClient {
        OutboundClient {
            client: self.transport.clone(),
            timeout: FAST_TIMEOUT,
        }
    }

    pub fn default_tier(&self) -> OutboundClient {
        OutboundClient {
            client: self.transport.clone(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn slow(&self) -> OutboundClient {
        OutboundClient {
            client: self.transport.clone(),
            timeout: SLOW_TIMEOUT,
        }
    }
}

/// One transport tier. The timeout is total wall clock for the request:
/// connect, headers, and body.
#[derive(Clone)]
pub struct OutboundClient {
    client: reqwest::Client,
    timeout: Duration,
}

/// Envelope for a single timed outbound request. Transport failures arrive
/// already shaped into a status code, with the message in `body` and
/// `transport_failure` set so callers can tell them from real pool responses.
#[derive(Debug)]
pub struct TimedResponse {
    pub status_code: u16,
    pub body: String,
    pub content_language: Option<String>,
    pub elapsed_ms: i64,
    pub transport_failure: bool,
}

impl TimedResponse {
    pub fn is_ok(&self) -> bool {
        self.status_code == 200
    }
}

impl OutboundClient {
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn get(&self, url: &str, headers: &[(&str, &str)]) -> TimedResponse {
        let mut request = self.client.get(url).timeout(self.timeout);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        self.execute(url, request).await
    }

    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
        headers: &[(&str, &str)],
    ) -> TimedResponse {
        let mut request = self.client.post(url).json(body).timeout(self.timeout);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        self.execute(url, request).await
    }

    async fn execute(&self, url: &str, request: reqwest::RequestBuilder) -> TimedResponse {
        let start = Instant::now();
        match request.send().await {
            Err(err) => {
                let elapsed_ms = start.elapsed().as_millis() as i64;
                let (status_code, body) = shape_transport_error(url, &err);
                log_outbound(url, status_code, &body, elapsed_ms);
                TimedResponse {
                    status_code,
                    body,
                    content_language: None,
                    elapsed_ms,
                    transport_failure: true,
                }
            }
            Ok(response) => {
                let status_code = response.status().as_u16();
                let content_language = response
                    .headers()
                    .get(reqwest::header::CONTENT_LANGUAGE)
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_string);
                let body = response.text().await.unwrap_or_default();
                let elapsed_ms = start.elapsed().as_millis() as i64;
                log_outbound(url, status_code, &body, elapsed_ms);
                TimedResponse {
                    status_code,
                    body,
                    content_language,
                    elapsed_ms,
                    transport_failure: false,
                }
            }
        }
    }
}

/// Map a transport failure onto the status space the aggregator propagates:
/// timeouts become 408, refused connections 503, anything else 400 with the
/// underlying error text.
pub fn shape_transport_error(url: &str, err: &reqwest::Error) -> (u16, String) {
    if err.is_timeout() {
        return (408, format!("{} timed out", url));
    }
    if is_connection_refused(err) {
        return (503, format!("{} is offline", url));
    }
    shape_from_text(url, &err.to_string())
}

/// Fallback classification for transport errors whose source chain carries no
/// typed io error, matching on the message text.
pub fn shape_from_text(url: &str, text: &str) -> (u16, String) {
    if text.contains("Timeout") || text.contains("timed out") {
        return (408, format!("{} timed out", url));
    }
    if text.contains("connection refused") {
        return (503, format!("{} is offline", url));
    }
    (400, text.to_string())
}

fn is_connection_refused(err: &reqwest::Error) -> bool {
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        if let Some(io_err) = cause.downcast_ref::<std::io::Error>() {
            if io_err.kind() == std::io::ErrorKind::ConnectionRefused {
                return true;
            }
        }
        source = cause.source();
    }
    false
}

/// Pool timeouts (408) and not-implemented query families (501) are expected
/// in normal operation; keep them out of the error stream so log filters only
/// pick up real failures.
fn log_outbound(url: &str, status_code: u16, body: &str, elapsed_ms: i64) {
    match status_code {
        200..=299 => tracing::info!("{} responded {} in {}ms", url, status_code, elapsed_ms),
        408 => tracing::warn!("{} timed out after {}ms", url, elapsed_ms),
        501 => tracing::warn!("{} does not implement this request: {}", url, body),
        _ => tracing::error!(
            "{} failed {}:{} in {}ms",
            url,
            status_code,
            body,
            elapsed_ms
        ),
    }
}
