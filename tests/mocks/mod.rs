//! Centralized mocks and fixtures for integration tests

pub mod adapters;
pub mod configs;
pub mod test_server;

#[allow(unused_imports)]
pub use adapters::TimingAdapters;
#[allow(unused_imports)]
pub use configs::MockConfigs;
#[allow(unused_imports)]
pub use test_server::TestServer;
