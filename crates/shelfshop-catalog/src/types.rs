//! Storefront API response types for the featured-products query.
//!
//! Every field the query selects is modelled as optional (or defaulted)
//! except `id` and `title`, which the platform declares non-null. The
//! platform sends `null` rather than omitting fields, and `productType` is an
//! empty string (not `null`) on products without a category; both cases are
//! handled in normalization, not here.

use serde::Deserialize;

/// Standard GraphQL response envelope.
///
/// `errors` is present when the request was accepted but the query failed
/// (e.g. throttling or a schema mismatch). Usually a list, but kept as raw
/// JSON so a string or object payload is still reported as a GraphQL error.
/// The platform may still return partial `data` alongside errors; callers
/// treat any non-null `errors` as fatal.
#[derive(Debug, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
    pub errors: Option<serde_json::Value>,
}

/// `data` payload of the featured-products query.
#[derive(Debug, Deserialize)]
pub struct ProductsData {
    #[serde(default)]
    pub products: Option<ProductConnection>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProductConnection {
    #[serde(default)]
    pub edges: Vec<ProductEdge>,
}

#[derive(Debug, Deserialize)]
pub struct ProductEdge {
    pub node: RawProduct,
}

/// A single product node as returned by the Storefront API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    /// Global ID, e.g. `"gid://shopify/Product/7982301233"`.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Plain-text description (the query does not request HTML).
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub featured_image: Option<RawImage>,
    /// First six gallery images.
    #[serde(default)]
    pub images: Option<ImageConnection>,
    #[serde(default)]
    pub price_range: Option<PriceRange>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageConnection {
    #[serde(default)]
    pub edges: Vec<ImageEdge>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageEdge {
    pub node: RawImage,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawImage {
    /// CDN URL.
    pub url: String,
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    #[serde(default)]
    pub min_variant_price: Option<MoneyV2>,
}

/// Platform money value; `amount` is a decimal string such as `"189.0"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyV2 {
    pub amount: String,
    pub currency_code: String,
}
