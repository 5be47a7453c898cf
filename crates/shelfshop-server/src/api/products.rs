use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use shelfshop_catalog::MAX_PRODUCTS_PER_QUERY;
use shelfshop_core::{
    filter_options, format_money, CategoryFilter, GalleryListing, ListingState, NormalizedProduct,
    ProductFilter,
};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ProductItem {
    #[serde(flatten)]
    product: NormalizedProduct,
    link_path: String,
    display_price: String,
}

impl From<&NormalizedProduct> for ProductItem {
    fn from(product: &NormalizedProduct) -> Self {
        Self {
            link_path: product.link_path(),
            display_price: format_money(product.price.as_ref()),
            product: product.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct ProductListing {
    products: Vec<ProductItem>,
    filters: Vec<String>,
    active_type: String,
    state: ListingState,
    /// Products in the catalog before filtering.
    total: usize,
    /// `true` when the catalog fetch failed and the listing fell back to empty.
    degraded: bool,
}

#[derive(Debug, Deserialize)]
pub(super) struct ProductQuery {
    pub first: Option<u32>,
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    pub q: Option<String>,
}

pub(super) fn normalize_first(first: Option<u32>, default: u32) -> u32 {
    first.unwrap_or(default).clamp(1, MAX_PRODUCTS_PER_QUERY)
}

/// Renders the featured-product gallery.
///
/// Catalog failures never fail the request: they are logged and the listing
/// degrades to empty with `degraded: true`. Malformed query parameters are a
/// `validation_error`.
pub(super) async fn list_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<ProductListing>>, ApiError> {
    let Query(query) =
        query.map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.body_text()))?;
    let first = normalize_first(query.first, state.featured_count);

    let (products, degraded) = match state.catalog.fetch_featured_products(first).await {
        Ok(products) => (products, false),
        Err(e) => {
            tracing::error!(
                error = %e,
                request_id = %req_id.0,
                first,
                "catalog fetch failed; rendering empty listing"
            );
            (Vec::new(), true)
        }
    };

    let filter = ProductFilter::new(
        CategoryFilter::from_label(query.product_type.as_deref()),
        query.q.as_deref().unwrap_or_default(),
    )
    .reconcile(&products);

    let listing = filter.listing(&products);
    let listing_state = listing.state();
    let items = match listing {
        GalleryListing::Products(matched) => matched.into_iter().map(ProductItem::from).collect(),
        GalleryListing::Empty | GalleryListing::NoMatches => Vec::new(),
    };

    Ok(Json(ApiResponse {
        data: ProductListing {
            products: items,
            filters: filter_options(&products),
            active_type: filter.category.label().to_string(),
            state: listing_state,
            total: products.len(),
            degraded,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_first_applies_default_and_bounds() {
        assert_eq!(normalize_first(None, 12), 12);
        assert_eq!(normalize_first(Some(0), 12), 1);
        assert_eq!(normalize_first(Some(1_000), 12), 250);
        assert_eq!(normalize_first(Some(24), 12), 24);
    }
}
