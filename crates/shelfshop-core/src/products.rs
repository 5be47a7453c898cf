use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Category label used when the catalog does not supply a product type.
pub const DEFAULT_PRODUCT_TYPE: &str = "Shelving";

/// A catalog item in the stable display shape used by every storefront view,
/// independent of the commerce platform's schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedProduct {
    /// Opaque platform identifier, e.g. `"gid://shopify/Product/123"`.
    pub id: String,
    pub title: String,
    /// URL slug for the product page. Falls back to `id` when the catalog
    /// omits it, so it is never empty.
    pub handle: String,
    pub product_type: String,
    pub tags: Vec<String>,
    /// Plain-text description; empty when absent.
    pub description: String,
    /// Featured image, else the first gallery image.
    pub image: Option<ProductImage>,
    pub images: Vec<ProductImage>,
    /// Lowest variant price, absent when the catalog has no price.
    pub price: Option<Money>,
}

impl NormalizedProduct {
    /// Path of the product detail page, e.g. `"/products/corner-shelf"`.
    #[must_use]
    pub fn link_path(&self) -> String {
        format!("/products/{}", self.handle)
    }

    /// Alt text for the primary image, falling back to the product title.
    #[must_use]
    pub fn image_alt(&self) -> &str {
        self.image
            .as_ref()
            .and_then(|img| img.alt_text.as_deref())
            .filter(|alt| !alt.is_empty())
            .unwrap_or(&self.title)
    }
}

/// A product image reference served from the platform CDN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub url: String,
    pub alt_text: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// A price amount with its ISO 4217 currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// Serialized as a JSON number for display code.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub currency_code: String,
}

/// Renders a price in whole currency units, e.g. `"$1,299"`.
///
/// Known currencies get their symbol prefix; anything else is rendered as
/// `"<amount> <code>"`. An absent price renders as an em dash.
#[must_use]
pub fn format_money(price: Option<&Money>) -> String {
    let Some(price) = price else {
        return "—".to_string();
    };

    let rounded = price
        .amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = group_thousands(&rounded.abs().trunc().to_string());
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    match currency_symbol(&price.currency_code) {
        Some(symbol) => format!("{sign}{symbol}{digits}"),
        None => format!("{sign}{digits} {}", price.currency_code),
    }
}

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "USD" => Some("$"),
        "CAD" => Some("C$"),
        "AUD" => Some("A$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        _ => None,
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
