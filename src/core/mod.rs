//! Chain data model, amounts, errors and application plumbing

pub mod asset;
pub mod chain;
pub mod config;
pub mod error;
pub mod log;

// Re-export main types for cleaner imports
pub use asset::{Asset, AssetParseError};
pub use chain::{AccountResources, ChainApi, RamMarketTable};
pub use error::{FetchError, PricingError};
