//! Arbitrary-precision base-unit token amounts

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::str::FromStr;

use crate::constants::limits::BPS_DENOMINATOR;

/// Token quantity in the token's smallest unit
///
/// Backed by an unbounded unsigned integer: base-unit amounts routinely exceed
/// both `u64` and the integer range of `f64`. Serialized as a decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Amount(BigUint);

/// Error returned when a string is not a base-10 unsigned integer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountParseError {
	#[error("amount cannot be empty")]
	Empty,

	#[error("amount must contain only digits: '{0}'")]
	InvalidDigits(String),
}

impl Amount {
	pub fn new(value: BigUint) -> Self {
		Self(value)
	}

	pub fn zero() -> Self {
		Self(BigUint::zero())
	}

	/// Parse a decimal string, rejecting signs, whitespace and fractions
	pub fn parse(value: &str) -> Result<Self, AmountParseError> {
		if value.is_empty() {
			return Err(AmountParseError::Empty);
		}
		if !value.bytes().all(|b| b.is_ascii_digit()) {
			return Err(AmountParseError::InvalidDigits(value.to_string()));
		}
		BigUint::parse_bytes(value.as_bytes(), 10)
			.map(Self)
			.ok_or_else(|| AmountParseError::InvalidDigits(value.to_string()))
	}

	pub fn as_biguint(&self) -> &BigUint {
		&self.0
	}

	pub fn is_zero(&self) -> bool {
		self.0.is_zero()
	}

	/// Minimum acceptable output after slippage:
	/// `self - floor(self * bps / 10000)`
	pub fn apply_slippage(&self, slippage_bps: u32) -> Self {
		let bps = BigUint::from(slippage_bps.min(BPS_DENOMINATOR));
		let tolerance = (&self.0 * bps) / BigUint::from(BPS_DENOMINATOR);
		Self(&self.0 - tolerance)
	}

	/// Whole-token quantity for venues that take human-readable amounts
	pub fn truncate_decimals(&self, decimals: u32) -> Self {
		Self(&self.0 / BigUint::from(10u32).pow(decimals))
	}

	/// Convert at a whole-token exchange rate between tokens of different
	/// decimals, truncating to base units
	///
	/// `self * rate * 10^to_decimals / 10^from_decimals`, computed exactly.
	/// Returns `None` for a negative rate.
	pub fn convert_at_rate(
		&self,
		rate: Decimal,
		from_decimals: u32,
		to_decimals: u32,
	) -> Option<Self> {
		if rate.is_sign_negative() {
			return None;
		}
		let mantissa = BigUint::from(rate.mantissa().unsigned_abs());
		let ten = BigUint::from(10u32);
		let numerator = &self.0 * mantissa * ten.pow(to_decimals);
		let denominator = ten.pow(rate.scale() + from_decimals);
		Some(Self(numerator / denominator))
	}

	/// Integer percentage by which `self` exceeds `baseline`:
	/// `((self - baseline) * 10000 / baseline) / 100`
	///
	/// Returns 0 for a zero baseline. Negative when `self < baseline`.
	pub fn percent_above(&self, baseline: &Amount) -> i64 {
		if baseline.is_zero() {
			return 0;
		}
		let (diff, sign) = match self.0.cmp(&baseline.0) {
			Ordering::Less => (&baseline.0 - &self.0, -1),
			_ => (&self.0 - &baseline.0, 1),
		};
		let scaled = (diff * BigUint::from(BPS_DENOMINATOR)) / &baseline.0;
		let percent = scaled / BigUint::from(100u32);
		// Saturates at i64::MAX
		percent.to_i64().unwrap_or(i64::MAX) * sign
	}
}

impl std::fmt::Display for Amount {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl FromStr for Amount {
	type Err = AmountParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

impl From<u64> for Amount {
	fn from(value: u64) -> Self {
		Self(BigUint::from(value))
	}
}

impl From<u128> for Amount {
	fn from(value: u128) -> Self {
		Self(BigUint::from(value))
	}
}

impl From<BigUint> for Amount {
	fn from(value: BigUint) -> Self {
		Self(value)
	}
}

// Amounts travel as JSON strings so clients never round them through a double
impl serde::Serialize for Amount {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_str(&self.0.to_str_radix(10))
	}
}

impl<'de> serde::Deserialize<'de> for Amount {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		let value = String::deserialize(deserializer)?;
		Self::parse(&value).map_err(serde::de::Error::custom)
	}
}
