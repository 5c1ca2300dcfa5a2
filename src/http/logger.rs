//! Network logger
//!
//! Emits one debug record per HTTP exchange with the request line, headers,
//! response size and a pretty-printed body. Logging is best-effort: nothing
//! here returns an error, and a body that is not JSON is logged as malformed.

use crate::types::{JsonValue, Method};
use tracing::{debug, enabled, Level};
use url::Url;

/// Tracing target used for network records
pub const NETWORK_TARGET: &str = "catalog_pager::network";

const MALFORMED_BODY: &str = "json data malformed";

/// Request side of a logged exchange
#[derive(Debug, Clone, Copy)]
pub struct RequestLog<'a> {
    pub method: Method,
    pub url: &'a Url,
    pub headers: &'a [(String, String)],
    pub body: Option<&'a JsonValue>,
}

/// Response side of a logged exchange
#[derive(Debug, Clone, Copy)]
pub enum ResponseLog<'a> {
    /// A response was received
    Received { status: u16, body: &'a [u8] },
    /// The request never produced a response
    Failed { error: &'a str },
}

/// Logs HTTP exchanges through `tracing`
#[derive(Debug, Clone)]
pub struct NetworkLogger {
    log_bodies: bool,
}

impl Default for NetworkLogger {
    fn default() -> Self {
        Self::new(true)
    }
}

impl NetworkLogger {
    /// Create a logger; `log_bodies` controls whether response bodies are included
    pub fn new(log_bodies: bool) -> Self {
        Self { log_bodies }
    }

    /// Log a completed (or failed) exchange
    pub fn log_exchange(&self, request: &RequestLog<'_>, response: &ResponseLog<'_>) {
        if !enabled!(target: NETWORK_TARGET, Level::DEBUG) {
            return;
        }

        let status = match response {
            ResponseLog::Received { status, .. } => Some(*status),
            ResponseLog::Failed { .. } => None,
        };
        debug!(
            target: NETWORK_TARGET,
            method = %request.method,
            url = %request.url,
            status,
            "{}",
            self.render(request, response)
        );
    }

    /// Render an exchange as the multi-line text that gets logged
    pub fn render(&self, request: &RequestLog<'_>, response: &ResponseLog<'_>) -> String {
        let mut log = format!(
            "URL: {}\nMethod: {}\nHeaders: {}",
            request.url,
            request.method,
            render_headers(request.headers)
        );

        if let Some(body) = request.body {
            log.push_str(&format!("\nRequest Body: {body}"));
        }

        log.push_str("\n---");
        match response {
            ResponseLog::Received { status, body } => {
                log.push_str(&format!("\nstatus: {status}"));
                log.push_str(&format!("\nsize: {}", format_byte_count(body.len())));
                if self.log_bodies {
                    log.push_str(&format!("\nbody: {}", pretty_json(body)));
                }
            }
            ResponseLog::Failed { error } => {
                log.push_str(&format!("\nerror: {error}"));
            }
        }
        log
    }
}

fn render_headers(headers: &[(String, String)]) -> String {
    let rendered: Vec<String> = headers
        .iter()
        .map(|(name, value)| format!("{name}: {}", redact(name, value)))
        .collect();
    format!("[{}]", rendered.join(", "))
}

fn redact<'a>(name: &str, value: &'a str) -> &'a str {
    if name.eq_ignore_ascii_case("authorization") && value.trim() != "Bearer" {
        "Bearer ***"
    } else {
        value
    }
}

/// Pretty-print a JSON body, or return a malformed marker
pub fn pretty_json(data: &[u8]) -> String {
    serde_json::from_slice::<JsonValue>(data)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or_else(|| MALFORMED_BODY.to_string())
}

/// Human readable byte count using decimal units
pub fn format_byte_count(bytes: usize) -> String {
    const KB: f64 = 1000.0;
    const MB: f64 = KB * 1000.0;

    let size = bytes as f64;
    if size < KB {
        format!("{bytes} bytes")
    } else if size < MB {
        format!("{:.1} KB", size / KB)
    } else {
        format!("{:.1} MB", size / MB)
    }
}
