//! Submitted buy/sell forms
//!
//! The browser checks a trade before its confirmation opens, but the form
//! post is checked again here against the stored quote or holding. An
//! accepted trade is forwarded to the trade backend; a rejected one comes
//! back as the page with the reason flashed above it.

use serde_json::Value;
use url::{Url, form_urlencoded};

use crate::config::Config;
use crate::error::Result;
use crate::render::flash::FlashMessage;
use crate::trade::{TradeOutcome, parse_shares, validate_trade};
use crate::types::{BuyPayload, PRICE_FIELD, SHARES_FIELD, SellPayload, TradeAction, ticker};

use super::{Page, PageKind, PageRequest, render_request};

pub const TRADING_UNAVAILABLE: &str = "Trading is unavailable right now";

/// Fields of a posted trade form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeForm {
    pub ticker: String,
    pub shares: String,
}

impl TradeForm {
    /// Read an `application/x-www-form-urlencoded` body; unknown fields are ignored
    pub fn from_urlencoded(body: &str) -> Self {
        let mut form = Self::default();
        for (key, value) in form_urlencoded::parse(body.as_bytes()) {
            match key.as_ref() {
                "ticker" => form.ticker = value.trim().to_string(),
                "shares" => form.shares = value.into_owned(),
                _ => {}
            }
        }
        form
    }
}

/// How the worker answers a posted trade
#[derive(Debug)]
pub enum Submission {
    /// Hand the order to the trade backend
    Forward(Url),
    /// Show the page again with a flash explaining why
    Page { page: Page, status: u16 },
}

/// Limit and price for a trade, taken from what the page was rendered with
#[derive(Debug, Clone, Copy, PartialEq)]
struct Quote {
    max_shares: i64,
    price: f64,
}

fn buy_quote(payload: &BuyPayload, ticker: &str) -> Option<Quote> {
    payload
        .ticker
        .trim()
        .eq_ignore_ascii_case(ticker)
        .then_some(Quote {
            max_shares: payload.max_shares,
            price: payload.price,
        })
}

/// A ticker that is not held can not be sold, so its limit is zero
fn sell_quote(payload: &SellPayload, wanted: &str) -> Quote {
    let preselected = payload
        .ticker
        .as_deref()
        .is_some_and(|t| t.trim().eq_ignore_ascii_case(wanted));
    let Some(holding) = payload
        .holdings
        .iter()
        .find(|h| ticker(h).is_some_and(|t| t.eq_ignore_ascii_case(wanted)))
    else {
        return Quote {
            max_shares: 0,
            price: payload.price,
        };
    };

    let max_shares = holding
        .get(SHARES_FIELD)
        .and_then(whole_number)
        .or(preselected.then_some(payload.max_shares))
        .unwrap_or(0);
    let price = holding
        .get(PRICE_FIELD)
        .and_then(number)
        .unwrap_or(payload.price);
    Quote { max_shares, price }
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_start_matches('$').replace(',', "").parse().ok(),
        _ => None,
    }
    .filter(|v: &f64| v.is_finite())
}

fn whole_number(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| number(value).map(|v| v.floor() as i64))
}

/// Check a posted form against the stored payload of its page.
///
/// Without a stored payload there is nothing to trade against and the
/// empty page is shown. A malformed share count is a rejection, not an
/// error; only an unreadable stored payload is.
pub fn submit_trade(
    action: TradeAction,
    body: &str,
    stored: Option<&str>,
    config: &Config,
) -> Result<Submission> {
    let kind = match action {
        TradeAction::Buy => PageKind::Buy,
        TradeAction::Sell => PageKind::Sell,
    };
    let form = TradeForm::from_urlencoded(body);

    let rejected = |flash: FlashMessage, status: u16| -> Result<Submission> {
        let request = PageRequest {
            ticker: Some(form.ticker.as_str()).filter(|_| kind == PageKind::Buy),
            flashes: vec![flash],
        };
        let page = render_request(kind, stored, &request, config)?;
        Ok(Submission::Page { page, status })
    };

    let Some(json) = stored else {
        return rejected(FlashMessage::danger(format!("No quote for {}", form.ticker)), 409);
    };
    let quote = match action {
        TradeAction::Buy => buy_quote(&serde_json::from_str(json)?, &form.ticker),
        TradeAction::Sell => Some(sell_quote(&serde_json::from_str(json)?, &form.ticker)),
    };
    let Some(quote) = quote else {
        return rejected(FlashMessage::danger(format!("No quote for {}", form.ticker)), 409);
    };

    let shares = match parse_shares(&form.shares) {
        Ok(shares) => shares,
        Err(e) => return rejected(FlashMessage::danger(e.to_string()), 400),
    };

    match validate_trade(shares, quote.max_shares, &form.ticker, quote.price, action) {
        TradeOutcome::Rejected(flash) => rejected(flash, 400),
        TradeOutcome::Accepted(_) => match config.trade_url(kind.as_str())? {
            Some(url) => Ok(Submission::Forward(url)),
            None => rejected(FlashMessage::warning(TRADING_UNAVAILABLE), 503),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUY: &str = r#"{"ticker": "AAPL", "price": 12.5, "max_shares": 4}"#;
    const SELL: &str = r#"{
        "holdings": [
            {"Ticker": "AAPL", "Shares Owned": 3, "Current Price": 190.0},
            {"Ticker": "MSFT", "Shares Owned": "2", "Current Price": "$410.50"}
        ]
    }"#;

    fn backend() -> Config {
        Config {
            trade_backend_url: Some("https://sim.example.com/trade".to_string()),
            ..Config::default()
        }
    }

    fn page(submission: Submission) -> (Page, u16) {
        match submission {
            Submission::Page { page, status } => (page, status),
            Submission::Forward(url) => panic!("expected a page, got {url}"),
        }
    }

    #[test]
    fn test_form_body_parsing() {
        let form = TradeForm::from_urlencoded("ticker=+BRK.B+&price=1&shares=2%2E0");
        assert_eq!(form.ticker, "BRK.B");
        assert_eq!(form.shares, "2.0");
        assert_eq!(TradeForm::from_urlencoded(""), TradeForm::default());
    }

    #[test]
    fn test_accepted_buy_is_forwarded() {
        let submission =
            submit_trade(TradeAction::Buy, "ticker=AAPL&shares=4", Some(BUY), &backend()).unwrap();
        let Submission::Forward(url) = submission else {
            panic!("expected forward");
        };
        assert_eq!(url.as_str(), "https://sim.example.com/trade/buy");
    }

    #[test]
    fn test_buy_over_limit_is_rejected() {
        let submission =
            submit_trade(TradeAction::Buy, "ticker=AAPL&shares=5", Some(BUY), &backend()).unwrap();
        let (page, status) = page(submission);

        assert_eq!(status, 400);
        assert!(page.html.contains("You cannot afford 5 shares of AAPL!"));
        assert!(page.html.contains(r#"class="alert alert-danger"#));
        assert!(page.html.contains(r#"data-max-shares="4""#));
    }

    #[test]
    fn test_buy_for_other_ticker_has_no_quote() {
        let submission =
            submit_trade(TradeAction::Buy, "ticker=MSFT&shares=1", Some(BUY), &backend()).unwrap();
        let (page, status) = page(submission);

        assert_eq!(status, 409);
        assert!(page.html.contains("No quote for MSFT"));
        assert!(!page.html.contains(r#"value="AAPL""#));
    }

    #[test]
    fn test_sell_uses_holding_limit() {
        let config = backend();
        let accepted = submit_trade(TradeAction::Sell, "ticker=MSFT&shares=2", Some(SELL), &config);
        assert!(matches!(accepted.unwrap(), Submission::Forward(_)));

        let submission =
            submit_trade(TradeAction::Sell, "ticker=AAPL&shares=4", Some(SELL), &config).unwrap();
        let (page, status) = page(submission);
        assert_eq!(status, 400);
        assert!(page.html.contains("You do not own 4 shares of AAPL!"));

        let submission =
            submit_trade(TradeAction::Sell, "ticker=TSLA&shares=1", Some(SELL), &config).unwrap();
        let (page, _) = self::page(submission);
        assert!(page.html.contains("You do not own 1 shares of TSLA!"));
    }

    #[test]
    fn test_bad_share_count_is_flashed() {
        let submission =
            submit_trade(TradeAction::Buy, "ticker=AAPL&shares=1.5", Some(BUY), &backend())
                .unwrap();
        let (page, status) = page(submission);
        assert_eq!(status, 400);
        assert!(page.html.contains(r#"class="alert alert-danger"#));
        assert!(page.html.contains("Invalid number for shares"));
    }

    #[test]
    fn test_without_backend_trading_is_unavailable() {
        let submission =
            submit_trade(TradeAction::Buy, "ticker=AAPL&shares=1", Some(BUY), &Config::default())
                .unwrap();
        let (page, status) = page(submission);
        assert_eq!(status, 503);
        assert!(page.html.contains(r#"class="alert alert-warning"#));
        assert!(page.html.contains(TRADING_UNAVAILABLE));
    }

    #[test]
    fn test_without_payload_shows_empty_page() {
        let submission =
            submit_trade(TradeAction::Sell, "ticker=AAPL&shares=1", None, &backend()).unwrap();
        let (page, status) = page(submission);
        assert_eq!(status, 409);
        assert!(page.html.contains("No quote for AAPL"));
        assert!(page.html.contains("No data available yet"));
    }
}
