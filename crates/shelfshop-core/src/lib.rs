pub mod app_config;
pub mod cart;
pub mod config;
pub mod filter;
pub mod products;

use thiserror::Error;

pub use app_config::{AppConfig, Environment, StorefrontCredentials};
pub use cart::{
    CartStorage, CartStorageError, CartStore, FileStorage, MemoryStorage, CART_COUNT_KEY,
};
pub use config::{load_app_config, load_app_config_from_env, DEFAULT_API_VERSION};
pub use filter::{
    filter_options, product_types, CategoryFilter, GalleryListing, ListingState, ProductFilter,
    ALL_CATEGORIES,
};
pub use products::{format_money, Money, NormalizedProduct, ProductImage, DEFAULT_PRODUCT_TYPE};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
