#[cfg(feature = "network")]
pub mod api;
pub mod benchmark;
pub mod calculate;
pub mod catalog;
pub mod error;
pub mod pricing;
pub mod rank;

#[cfg(feature = "network")]
pub use api::PricingClient;
pub use benchmark::{BenchmarkRecord, Field, Metric};
pub use catalog::Catalog;
pub use error::TcError;
pub use pricing::PricingRecord;
pub use rank::{Direction, SortKey};
