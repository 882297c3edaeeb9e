//! Error types for quote operations

use thiserror::Error;

/// Validation errors for quote requests
///
/// These are the only failures the engine reports as errors; everything that
/// goes wrong at a venue is carried as data in the per-venue results.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuoteValidationError {
	#[error("Missing required field: {field}")]
	MissingRequiredField { field: String },

	#[error("Invalid amount: {field} - {reason}")]
	InvalidAmount { field: String, reason: String },

	#[error("Invalid slippage tolerance: {value} (must be a percentage between 0 and 100)")]
	InvalidSlippage { value: String },

	#[error("Invalid slippage tolerance: {bps} bps (must be at most 10000)")]
	InvalidSlippageBps { bps: u32 },
}
