//! Best-quote selection over a fan-out's results

use purple_types::{AdapterResult, BestQuoteSelection};

/// Pick the successful result with the highest output amount
///
/// Ties go to the result that appears first, i.e. the earliest registered
/// venue. Returns `None` when no venue produced a quote.
pub fn select_best_quote(results: &[AdapterResult]) -> Option<BestQuoteSelection> {
	let mut ranked: Vec<&AdapterResult> = results.iter().filter(|r| r.is_success()).collect();
	// Stable sort keeps registration order among equal outputs
	ranked.sort_by(|a, b| b.output_amount().cmp(&a.output_amount()));

	let best = *ranked.first()?;
	let savings_percent = match (best.output_amount(), ranked.last()) {
		(Some(best_amount), Some(worst)) if ranked.len() > 1 => worst
			.output_amount()
			.map(|worst_amount| best_amount.percent_above(worst_amount))
			.unwrap_or(0),
		_ => 0,
	};

	Some(BestQuoteSelection {
		chosen: best.clone(),
		savings_percent,
		compared_against: ranked.len(),
	})
}
