//! Purple Aggregator Server
//!
//! Main entry point for the quote aggregator server

use purple_aggregator::AggregatorBuilder;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	AggregatorBuilder::new().start_server().await
}
