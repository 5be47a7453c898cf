//! Mapping from Storefront API product nodes to [`shelfshop_core::NormalizedProduct`].
//!
//! The mapping is total: every optional field has a fallback, so a node that
//! deserialized successfully always yields a complete display product.

use std::str::FromStr;

use rust_decimal::Decimal;
use shelfshop_core::{Money, NormalizedProduct, ProductImage, DEFAULT_PRODUCT_TYPE};

use crate::types::{GraphqlResponse, MoneyV2, ProductsData, RawImage, RawProduct};

/// Normalizes a raw [`RawProduct`] into a [`NormalizedProduct`].
#[must_use]
pub fn normalize_product(node: RawProduct) -> NormalizedProduct {
    let images: Vec<ProductImage> = node
        .images
        .map(|conn| conn.edges.into_iter().map(|e| normalize_image(e.node)).collect())
        .unwrap_or_default();

    let image = node
        .featured_image
        .map(normalize_image)
        .or_else(|| images.first().cloned());

    // Empty strings are treated the same as absent values.
    let handle = node
        .handle
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| node.id.clone());
    let product_type = node
        .product_type
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_PRODUCT_TYPE.to_string());

    let price = node
        .price_range
        .and_then(|range| range.min_variant_price)
        .and_then(|money| normalize_money(money, &node.id));

    NormalizedProduct {
        id: node.id,
        title: node.title,
        handle,
        product_type,
        tags: node.tags.unwrap_or_default(),
        description: node.description.unwrap_or_default(),
        image,
        images,
        price,
    }
}

/// Normalizes every product edge in a decoded response, preserving order.
///
/// A response without `data` or `products` yields an empty list.
#[must_use]
pub fn normalize_products(response: GraphqlResponse<ProductsData>) -> Vec<NormalizedProduct> {
    response
        .data
        .and_then(|data| data.products)
        .map(|conn| conn.edges)
        .unwrap_or_default()
        .into_iter()
        .map(|edge| normalize_product(edge.node))
        .collect()
}

fn normalize_image(image: RawImage) -> ProductImage {
    ProductImage {
        url: image.url,
        alt_text: image.alt_text,
        width: image.width,
        height: image.height,
    }
}

fn normalize_money(money: MoneyV2, product_id: &str) -> Option<Money> {
    match Decimal::from_str(money.amount.trim()) {
        Ok(amount) => Some(Money {
            amount,
            currency_code: money.currency_code,
        }),
        Err(e) => {
            tracing::warn!(
                product_id,
                amount = %money.amount,
                error = %e,
                "unparseable price amount; treating price as absent"
            );
            None
        }
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
