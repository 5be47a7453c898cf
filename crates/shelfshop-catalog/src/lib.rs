pub mod cache;
pub mod client;
pub mod error;
pub mod normalize;
pub mod query;
pub mod types;

pub use client::{CatalogClient, StorefrontClient};
pub use error::CatalogError;
pub use normalize::{normalize_product, normalize_products};
pub use query::{FEATURED_PRODUCTS_QUERY, MAX_PRODUCTS_PER_QUERY};
pub use types::{GraphqlResponse, ProductsData, RawProduct};
