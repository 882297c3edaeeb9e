//! Quote request model and validation

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{QuoteValidationError, QuoteValidationResult};
use crate::constants::limits::{BPS_DENOMINATOR, DEFAULT_SLIPPAGE_BPS};
use crate::Amount;

/// Query parameters accepted by `GET /api/quote`
///
/// Everything arrives as text; conversion into [`QuoteRequest`] performs all
/// validation.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteParams {
	/// Address of the token to sell
	pub token_in: Option<String>,
	/// Address of the token to buy
	pub token_out: Option<String>,
	/// Amount to sell, in base units
	pub amount: Option<String>,
	/// Slippage tolerance as a percentage (default 0.5)
	pub slippage: Option<String>,
	/// Wallet requesting the quote, if connected
	pub user_address: Option<String>,
}

/// Validated swap quote request handed to every venue adapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
	token_in: String,
	token_out: String,
	amount: Amount,
	slippage_tolerance_bps: u32,
	user_address: Option<String>,
}

impl QuoteRequest {
	/// Build a request, validating the token identifiers and slippage
	pub fn new(
		token_in: impl Into<String>,
		token_out: impl Into<String>,
		amount: Amount,
		slippage_tolerance_bps: u32,
		user_address: Option<String>,
	) -> QuoteValidationResult<Self> {
		let token_in = required("tokenIn", Some(token_in.into()))?;
		let token_out = required("tokenOut", Some(token_out.into()))?;

		if slippage_tolerance_bps > BPS_DENOMINATOR {
			return Err(QuoteValidationError::InvalidSlippageBps {
				bps: slippage_tolerance_bps,
			});
		}

		Ok(Self {
			token_in,
			token_out,
			amount,
			slippage_tolerance_bps,
			user_address: user_address
				.map(|a| a.trim().to_string())
				.filter(|a| !a.is_empty()),
		})
	}

	/// Request with the default 0.5% slippage and no user
	pub fn with_default_slippage(
		token_in: impl Into<String>,
		token_out: impl Into<String>,
		amount: Amount,
	) -> QuoteValidationResult<Self> {
		Self::new(token_in, token_out, amount, DEFAULT_SLIPPAGE_BPS, None)
	}

	pub fn token_in(&self) -> &str {
		&self.token_in
	}

	pub fn token_out(&self) -> &str {
		&self.token_out
	}

	pub fn amount(&self) -> &Amount {
		&self.amount
	}

	pub fn slippage_tolerance_bps(&self) -> u32 {
		self.slippage_tolerance_bps
	}

	pub fn user_address(&self) -> Option<&str> {
		self.user_address.as_deref()
	}
}

impl TryFrom<QuoteParams> for QuoteRequest {
	type Error = QuoteValidationError;

	fn try_from(params: QuoteParams) -> Result<Self, Self::Error> {
		let token_in = required("tokenIn", params.token_in)?;
		let token_out = required("tokenOut", params.token_out)?;
		let raw_amount = required("amount", params.amount)?;

		let amount =
			Amount::parse(&raw_amount).map_err(|e| QuoteValidationError::InvalidAmount {
				field: "amount".to_string(),
				reason: e.to_string(),
			})?;

		let slippage_bps = match params.slippage.as_deref().map(str::trim) {
			None | Some("") => DEFAULT_SLIPPAGE_BPS,
			Some(raw) => percent_to_bps(raw)?,
		};

		Self::new(token_in, token_out, amount, slippage_bps, params.user_address)
	}
}

/// Convert a percentage such as `"0.5"` into basis points (`50`), rounding to
/// the nearest basis point
pub fn percent_to_bps(raw: &str) -> QuoteValidationResult<u32> {
	let invalid = || QuoteValidationError::InvalidSlippage {
		value: raw.to_string(),
	};

	let percent = Decimal::from_str(raw).map_err(|_| invalid())?;
	if percent.is_sign_negative() || percent > Decimal::ONE_HUNDRED {
		return Err(invalid());
	}

	(percent * Decimal::ONE_HUNDRED)
		.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
		.to_u32()
		.ok_or_else(invalid)
}

/// Render basis points as a percentage string: 50 -> "0.5", 125 -> "1.25"
pub fn bps_to_percent(bps: u32) -> String {
	Decimal::new(i64::from(bps), 2).normalize().to_string()
}

fn required(field: &str, value: Option<String>) -> QuoteValidationResult<String> {
	value
		.map(|v| v.trim().to_string())
		.filter(|v| !v.is_empty())
		.ok_or_else(|| QuoteValidationError::MissingRequiredField {
			field: field.to_string(),
		})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn params(token_in: &str, token_out: &str, amount: &str) -> QuoteParams {
		QuoteParams {
			token_in: Some(token_in.to_string()),
			token_out: Some(token_out.to_string()),
			amount: Some(amount.to_string()),
			slippage: None,
			user_address: None,
		}
	}

	#[test]
	fn test_params_defaults_to_half_percent_slippage() {
		let request = QuoteRequest::try_from(params("0xin", "0xout", "1000")).unwrap();
		assert_eq!(request.slippage_tolerance_bps(), 50);
		assert_eq!(request.amount(), &Amount::from(1000u64));
		assert_eq!(request.user_address(), None);
	}

	#[test]
	fn test_params_missing_fields() {
		let mut p = params("0xin", "0xout", "1000");
		p.token_in = None;
		assert_eq!(
			QuoteRequest::try_from(p).unwrap_err(),
			QuoteValidationError::MissingRequiredField {
				field: "tokenIn".to_string()
			}
		);

		let p = params("0xin", "  ", "1000");
		assert!(matches!(
			QuoteRequest::try_from(p),
			Err(QuoteValidationError::MissingRequiredField { field }) if field == "tokenOut"
		));

		let mut p = params("0xin", "0xout", "1000");
		p.amount = None;
		assert!(matches!(
			QuoteRequest::try_from(p),
			Err(QuoteValidationError::MissingRequiredField { field }) if field == "amount"
		));
	}

	#[test]
	fn test_params_invalid_amount() {
		let err = QuoteRequest::try_from(params("0xin", "0xout", "1e18")).unwrap_err();
		assert!(matches!(err, QuoteValidationError::InvalidAmount { .. }));
	}

	#[test]
	fn test_percent_to_bps() {
		assert_eq!(percent_to_bps("0.5").unwrap(), 50);
		assert_eq!(percent_to_bps("1").unwrap(), 100);
		assert_eq!(percent_to_bps("0").unwrap(), 0);
		assert_eq!(percent_to_bps("0.015").unwrap(), 2);
		assert_eq!(percent_to_bps("0.025").unwrap(), 3);
		assert_eq!(percent_to_bps("100").unwrap(), 10_000);
		assert!(percent_to_bps("-1").is_err());
		assert!(percent_to_bps("100.5").is_err());
		assert!(percent_to_bps("abc").is_err());
	}

	#[test]
	fn test_bps_to_percent() {
		assert_eq!(bps_to_percent(50), "0.5");
		assert_eq!(bps_to_percent(100), "1");
		assert_eq!(bps_to_percent(125), "1.25");
		assert_eq!(bps_to_percent(3333), "33.33");
		assert_eq!(bps_to_percent(5), "0.05");
		assert_eq!(bps_to_percent(0), "0");
		assert_eq!(bps_to_percent(10_000), "100");

		for bps in [0, 1, 50, 125, 9_999] {
			assert_eq!(percent_to_bps(&bps_to_percent(bps)).unwrap(), bps);
		}
	}

	#[test]
	fn test_params_custom_slippage_and_user() {
		let mut p = params("0xin", "0xout", "1000");
		p.slippage = Some("1.25".to_string());
		p.user_address = Some("0xuser".to_string());
		let request = QuoteRequest::try_from(p).unwrap();
		assert_eq!(request.slippage_tolerance_bps(), 125);
		assert_eq!(request.user_address(), Some("0xuser"));
	}

	#[test]
	fn test_blank_user_address_is_anonymous() {
		let request =
			QuoteRequest::new("0xin", "0xout", Amount::from(1u64), 50, Some(" ".to_string()))
				.unwrap();
		assert_eq!(request.user_address(), None);
	}

	#[test]
	fn test_new_rejects_slippage_above_whole() {
		let err = QuoteRequest::new("0xin", "0xout", Amount::from(1u64), 10_001, None).unwrap_err();
		assert_eq!(err, QuoteValidationError::InvalidSlippageBps { bps: 10_001 });
	}
}
