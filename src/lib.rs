//! Portfolio Worker - Stock portfolio simulator pages for Cloudflare Workers
//!
//! Renders the dashboard, buy, sell, search and leaderboard pages server-side
//! from JSON payloads published by the simulator backend.
//!
//! # Architecture
//! - Main entry point handles HTTP requests
//! - KV storage holds the latest payload of each page
//! - Rendering is pure: pages return their HTML plus any rows they dropped,
//!   and the entry point logs those
//!
//! # Features
//! - Record tables, ticker dropdowns, auto-dismissing alerts, modals
//! - Price, candlestick, value, performance and breakdown charts
//! - Buy/sell checks against cash on hand and shares owned, in the browser
//!   and again when the form is posted

// Clippy configuration for rendering code patterns
#![allow(clippy::cast_precision_loss)] // Share counts to f64 for amounts
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::too_many_lines)] // Page templates
#![allow(clippy::doc_markdown)] // Doc style flexibility
#![allow(clippy::needless_pass_by_value)] // Worker framework patterns
#![allow(clippy::map_unwrap_or)] // Explicit fallback preference

mod config;
mod error;
pub mod pages;
pub mod render;
pub mod surface;
pub mod trade;
mod types;

use worker::{
    Context, Env, Request, Response, Router, console_error, console_log, console_warn, event,
};

pub use config::{Config, LogLevel};
pub use error::DashboardError;
pub use pages::{Page, PageKind, PageStatus};
pub use trade::{Confirmation, TradeOutcome, TradeResponse};
pub use types::*;

use pages::submit::{Submission, submit_trade};
use pages::{PageRequest, payload_status, render_request, validate_payload};
use trade::validate_request;

/// Result type alias for worker operations
type WResult<T> = std::result::Result<T, worker::Error>;

/// KV namespace binding holding page payloads
const PAGES_KV: &str = "PAGES";

/// Main Worker entry point
#[event(fetch)]
async fn fetch(req: Request, env: Env, _ctx: Context) -> WResult<Response> {
    console_error_panic_hook::set_once();

    let router = Router::new();

    router
        // Health check
        .get_async("/health", |_req, ctx| async move {
            let config = match Config::from_env(&ctx.env) {
                Ok(c) => c,
                Err(e) => return Response::error(format!("Config error: {e}"), 500),
            };

            Response::from_json(&HealthResponse {
                status: "healthy".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                environment: config.environment,
                timestamp: chrono::Utc::now().to_rfc3339(),
            })
        })
        // Pages
        .get_async("/", |req, ctx| async move {
            serve_page(&req, &ctx.env, PageKind::Dashboard).await
        })
        .get_async("/dashboard", |req, ctx| async move {
            serve_page(&req, &ctx.env, PageKind::Dashboard).await
        })
        .get_async("/buy", |req, ctx| async move {
            serve_page(&req, &ctx.env, PageKind::Buy).await
        })
        .get_async("/sell", |req, ctx| async move {
            serve_page(&req, &ctx.env, PageKind::Sell).await
        })
        .get_async("/search", |req, ctx| async move {
            serve_page(&req, &ctx.env, PageKind::Search).await
        })
        .get_async("/leaderboard", |req, ctx| async move {
            serve_page(&req, &ctx.env, PageKind::Leaderboard).await
        })
        // Confirmed trades
        .post_async("/buy", |mut req, ctx| async move {
            let body = req.text().await?;
            submit_form(&ctx.env, TradeAction::Buy, &body).await
        })
        .post_async("/sell", |mut req, ctx| async move {
            let body = req.text().await?;
            submit_form(&ctx.env, TradeAction::Sell, &body).await
        })
        // Stored payload status for every page
        .get_async("/api/pages", |_req, ctx| async move {
            let env = &ctx.env;
            let statuses = payload_status(|kind| load_payload(env, kind)).await;
            Response::from_json(&statuses)
        })
        // Publish a page payload
        .put_async("/api/pages/:name", |mut req, ctx| async move {
            let kind = match ctx.param("name").map(|name| name.parse::<PageKind>()) {
                Some(Ok(kind)) => kind,
                Some(Err(e)) => return error_json(404, &e.to_string()),
                None => return error_json(404, "Missing page name"),
            };

            let config = Config::from_env(&ctx.env)?;
            let body = req.text().await?;
            if let Err(e) = validate_payload(kind, &body) {
                if config.logs(LogLevel::Warn) {
                    console_warn!("Rejected {} payload: {}", kind.as_str(), e);
                }
                return error_json(400, &e.to_string());
            }

            let size = body.len();
            store_payload(&ctx.env, kind, body).await?;
            if config.logs(LogLevel::Info) {
                console_log!("Stored {} payload ({} bytes)", kind.as_str(), size);
            }

            Response::from_json(&serde_json::json!({
                "stored": true,
                "page": kind.as_str(),
            }))
        })
        // Check a buy/sell form before its confirmation opens
        .post_async("/api/validate-trade", |mut req, _ctx| async move {
            let request = match req.json::<TradeRequest>().await {
                Ok(r) => r,
                Err(e) => return error_json(400, &format!("Invalid trade request: {e}")),
            };

            match validate_request(&request) {
                Ok(outcome) => Response::from_json(&TradeResponse::from(outcome)),
                Err(e) => error_json(400, &e.to_string()),
            }
        })
        // Fallback
        .run(req, env)
        .await
}

/// Render a page from its stored payload
async fn serve_page(req: &Request, env: &Env, kind: PageKind) -> WResult<Response> {
    let config = Config::from_env(env)?;
    let query = req.query::<PageQuery>().unwrap_or_default();
    let payload = load_payload(env, kind).await?;
    let request = PageRequest {
        ticker: query.ticker(),
        ..PageRequest::default()
    };

    match render_request(kind, payload.as_deref(), &request, &config) {
        Ok(page) => Response::from_html(logged(&config, page).html),
        Err(e) => {
            console_error!("Stored {} payload is unusable: {}", kind.as_str(), e);
            Response::error(format!("Could not render {}: {e}", kind.as_str()), 500)
        }
    }
}

/// Check a posted buy/sell form and forward it or show why it was refused
async fn submit_form(env: &Env, action: TradeAction, body: &str) -> WResult<Response> {
    let config = Config::from_env(env)?;
    let kind = match action {
        TradeAction::Buy => PageKind::Buy,
        TradeAction::Sell => PageKind::Sell,
    };
    let payload = load_payload(env, kind).await?;

    match submit_trade(action, body, payload.as_deref(), &config) {
        Ok(Submission::Forward(url)) => {
            if config.logs(LogLevel::Info) {
                console_log!("Forwarding {} order to {}", action, url);
            }
            Response::redirect_with_status(url, 307)
        }
        Ok(Submission::Page { page, status }) => {
            if config.logs(LogLevel::Info) {
                console_log!("Refused {} order with status {}", action, status);
            }
            Ok(Response::from_html(logged(&config, page).html)?.with_status(status))
        }
        Err(e) => {
            console_error!("Could not check {} order: {}", action, e);
            Response::error(format!("Could not check {action} order: {e}"), 500)
        }
    }
}

/// Log what was dropped while rendering `page`
fn logged(config: &Config, page: Page) -> Page {
    if config.logs(LogLevel::Warn) {
        for issue in &page.issues {
            console_warn!("{} page: {}", page.kind.as_str(), issue);
        }
    }
    page
}

/// Get a page payload from KV storage
async fn load_payload(env: &Env, kind: PageKind) -> error::Result<Option<String>> {
    let kv = env.kv(PAGES_KV)?;
    kv.get(&kind.storage_key())
        .text()
        .await
        .map_err(|e| DashboardError::Storage(e.to_string()))
}

/// Save a page payload to KV storage
async fn store_payload(env: &Env, kind: PageKind, payload: String) -> WResult<()> {
    let kv = env.kv(PAGES_KV)?;
    kv.put(&kind.storage_key(), payload)?.execute().await?;
    Ok(())
}

fn error_json(status: u16, message: &str) -> WResult<Response> {
    Ok(Response::from_json(&serde_json::json!({
        "error": true,
        "message": message,
    }))?
    .with_status(status))
}
