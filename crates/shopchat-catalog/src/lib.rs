pub mod client;
pub mod normalize;
pub mod summary;

pub use client::{CatalogClient, ShopifyClient};
pub use normalize::normalize;
pub use summary::{ProductSummary, CURRENCY};
