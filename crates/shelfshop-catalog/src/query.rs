//! GraphQL request construction for the Storefront API.

use serde::Serialize;

/// Largest `first` the Storefront API accepts for a products connection.
pub const MAX_PRODUCTS_PER_QUERY: u32 = 250;

/// Header carrying the Storefront access token.
pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Storefront-Access-Token";

/// Most recently updated products first, with the fields the storefront
/// displays. The gallery shows at most six images per product.
pub const FEATURED_PRODUCTS_QUERY: &str = r"
query FeaturedProducts($first: Int!) {
  products(first: $first, sortKey: UPDATED_AT, reverse: true) {
    edges {
      node {
        id
        title
        handle
        productType
        tags
        description
        featuredImage {
          url
          altText
          width
          height
        }
        images(first: 6) {
          edges {
            node {
              url
              altText
              width
              height
            }
          }
        }
        priceRange {
          minVariantPrice {
            amount
            currencyCode
          }
        }
      }
    }
  }
}
";

/// JSON body of a GraphQL POST.
#[derive(Debug, Serialize)]
pub struct GraphqlRequest<'a, V: Serialize> {
    pub query: &'a str,
    pub variables: V,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeaturedProductsVariables {
    pub first: u32,
}

/// Builds the featured-products request for `count` products.
///
/// `count` is clamped into `1..=MAX_PRODUCTS_PER_QUERY`.
#[must_use]
pub fn featured_products_request(count: u32) -> GraphqlRequest<'static, FeaturedProductsVariables> {
    GraphqlRequest {
        query: FEATURED_PRODUCTS_QUERY,
        variables: FeaturedProductsVariables {
            first: clamp_count(count),
        },
    }
}

#[must_use]
pub fn clamp_count(count: u32) -> u32 {
    count.clamp(1, MAX_PRODUCTS_PER_QUERY)
}
