//! Purple Adapters
//!
//! Venue adapters for the Purple quote aggregator, plus the registry that
//! holds the set queried on every request.

mod http;

pub mod factory;
pub mod kyberswap_adapter;
pub mod mace_adapter;
pub mod mock_adapter;
pub mod openocean_adapter;
pub mod registry;
pub mod zerox_adapter;

pub use factory::AdapterFactory;
pub use kyberswap_adapter::KyberSwapAdapter;
pub use mace_adapter::MaceAdapter;
pub use mock_adapter::{MockBehavior, MockVenueAdapter};
pub use openocean_adapter::OpenOceanAdapter;
pub use registry::{AdapterRegistry, RegistryError};
pub use zerox_adapter::ZeroXAdapter;

pub use purple_types::{VenueAdapter, VenueError, VenueResult};
