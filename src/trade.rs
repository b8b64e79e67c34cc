//! Buy/sell form validation
//!
//! Checks a requested share count against the most the user may trade and
//! either rejects it with a flash message or produces the confirmation shown
//! in the popup before the order is submitted.

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};
use crate::render::flash::{FlashLevel, FlashMessage};
use crate::types::{TradeAction, TradeRequest};

/// An accepted trade awaiting user confirmation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Confirmation {
    pub action: TradeAction,
    pub shares: i64,
    pub ticker: String,
    /// `shares * price`, rounded to cents
    pub amount: f64,
}

impl Confirmation {
    /// Popup prompt text
    pub fn prompt(&self) -> String {
        let preposition = match self.action {
            TradeAction::Buy => "worth",
            TradeAction::Sell => "for",
        };
        format!(
            "Are you sure you want to {} {} shares of {} {} ${:.2}?",
            self.action, self.shares, self.ticker, preposition, self.amount
        )
    }
}

/// Result of validating a trade form
#[derive(Debug, Clone)]
pub enum TradeOutcome {
    Rejected(FlashMessage),
    Accepted(Confirmation),
}

impl TradeOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, TradeOutcome::Accepted(_))
    }
}

/// Validate a requested trade.
///
/// More than `max_shares` is rejected as unaffordable (buy) or not owned
/// (sell); zero or negative counts are rejected as below the one-share
/// minimum.
pub fn validate_trade(
    requested_shares: i64,
    max_shares: i64,
    ticker: &str,
    price: f64,
    action: TradeAction,
) -> TradeOutcome {
    if requested_shares > max_shares {
        let message = match action {
            TradeAction::Buy => format!("You cannot afford {requested_shares} shares of {ticker}!"),
            TradeAction::Sell => format!("You do not own {requested_shares} shares of {ticker}!"),
        };
        return TradeOutcome::Rejected(FlashMessage::danger(message));
    }

    if requested_shares <= 0 {
        return TradeOutcome::Rejected(FlashMessage::danger(format!(
            "You must {action} at least 1 share of {ticker}!"
        )));
    }

    TradeOutcome::Accepted(Confirmation {
        action,
        shares: requested_shares,
        ticker: ticker.to_string(),
        amount: round_cents(requested_shares as f64 * price),
    })
}

/// Round to two decimal places
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Parse the raw share field. Blank counts as zero; fractional or
/// non-numeric text is an error.
pub fn parse_shares(raw: &str) -> Result<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }

    if let Ok(shares) = trimmed.parse::<i64>() {
        return Ok(shares);
    }

    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 9.0e15 => Ok(v as i64),
        _ => Err(DashboardError::InvalidNumber {
            field: "shares".to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Validate a request from the trade endpoint
pub fn validate_request(request: &TradeRequest) -> Result<TradeOutcome> {
    let shares = parse_shares(&request.shares)?;
    if !request.price.is_finite() || request.price < 0.0 {
        return Err(DashboardError::InvalidNumber {
            field: "price".to_string(),
            value: request.price.to_string(),
        });
    }

    Ok(validate_trade(
        shares,
        request.max_shares,
        &request.ticker,
        request.price,
        request.action,
    ))
}

/// JSON body returned by the trade endpoint
#[derive(Debug, Serialize)]
pub struct TradeResponse {
    pub accepted: bool,
    pub message: String,
    pub level: FlashLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<Confirmation>,
}

impl From<TradeOutcome> for TradeResponse {
    fn from(outcome: TradeOutcome) -> Self {
        match outcome {
            TradeOutcome::Rejected(flash) => Self {
                accepted: false,
                message: flash.message,
                level: flash.level,
                confirmation: None,
            },
            TradeOutcome::Accepted(confirmation) => Self {
                accepted: true,
                message: confirmation.prompt(),
                level: FlashLevel::Info,
                confirmation: Some(confirmation),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejection(outcome: TradeOutcome) -> String {
        match outcome {
            TradeOutcome::Rejected(flash) => {
                assert_eq!(flash.level, FlashLevel::Danger);
                flash.message
            }
            TradeOutcome::Accepted(c) => panic!("expected rejection, got {c:?}"),
        }
    }

    #[test]
    fn test_buy_more_than_affordable() {
        let msg = rejection(validate_trade(5, 3, "AAPL", 10.0, TradeAction::Buy));
        assert_eq!(msg, "You cannot afford 5 shares of AAPL!");
    }

    #[test]
    fn test_sell_more_than_owned() {
        let msg = rejection(validate_trade(5, 3, "AAPL", 10.0, TradeAction::Sell));
        assert_eq!(msg, "You do not own 5 shares of AAPL!");
    }

    #[test]
    fn test_zero_shares() {
        let msg = rejection(validate_trade(0, 10, "AAPL", 10.0, TradeAction::Sell));
        assert_eq!(msg, "You must sell at least 1 share of AAPL!");

        let msg = rejection(validate_trade(0, 10, "AAPL", 10.0, TradeAction::Buy));
        assert_eq!(msg, "You must buy at least 1 share of AAPL!");
    }

    #[test]
    fn test_negative_shares_rejected() {
        let msg = rejection(validate_trade(-2, 10, "AAPL", 10.0, TradeAction::Buy));
        assert!(msg.contains("at least 1 share"));
    }

    #[test]
    fn test_accepted_buy() {
        let outcome = validate_trade(2, 10, "AAPL", 12.50, TradeAction::Buy);
        let TradeOutcome::Accepted(confirmation) = outcome else {
            panic!("expected acceptance");
        };

        assert_eq!(confirmation.shares, 2);
        assert_eq!(confirmation.ticker, "AAPL");
        assert!((confirmation.amount - 25.00).abs() < f64::EPSILON);
        assert_eq!(
            confirmation.prompt(),
            "Are you sure you want to buy 2 shares of AAPL worth $25.00?"
        );
    }

    #[test]
    fn test_accepted_sell_prompt_and_rounding() {
        let outcome = validate_trade(3, 3, "MSFT", 10.337, TradeAction::Sell);
        let TradeOutcome::Accepted(confirmation) = outcome else {
            panic!("expected acceptance");
        };

        assert!((confirmation.amount - 31.01).abs() < 1e-9);
        assert_eq!(
            confirmation.prompt(),
            "Are you sure you want to sell 3 shares of MSFT for $31.01?"
        );
    }

    #[test]
    fn test_parse_shares() {
        assert_eq!(parse_shares("").unwrap(), 0);
        assert_eq!(parse_shares(" 7 ").unwrap(), 7);
        assert_eq!(parse_shares("4.0").unwrap(), 4);
        assert!(matches!(
            parse_shares("1.5"),
            Err(DashboardError::InvalidNumber { .. })
        ));
        assert!(parse_shares("many").is_err());
    }

    #[test]
    fn test_validate_request_response() {
        let request = TradeRequest {
            action: TradeAction::Buy,
            shares: "2".to_string(),
            max_shares: 10,
            ticker: "AAPL".to_string(),
            price: 12.5,
        };

        let response = TradeResponse::from(validate_request(&request).unwrap());
        assert!(response.accepted);
        assert_eq!(response.confirmation.unwrap().amount, 25.0);

        let bad_price = TradeRequest { price: f64::NAN, ..request };
        assert!(validate_request(&bad_price).is_err());
    }
}
