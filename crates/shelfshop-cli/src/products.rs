//! `products` command: fetch, filter, and print the featured catalog.

use shelfshop_catalog::CatalogClient;
use shelfshop_core::{
    format_money, AppConfig, CategoryFilter, GalleryListing, NormalizedProduct, ProductFilter,
};

#[derive(Debug)]
pub(crate) struct ListOptions {
    pub first: u32,
    pub product_type: Option<String>,
    pub query: String,
    pub json: bool,
}

/// Fetch featured products and print those passing the filter.
///
/// Unlike the HTTP listing, catalog errors are returned to the caller so the
/// command exits non-zero.
///
/// # Errors
///
/// Returns an error if the catalog client cannot be built, the fetch fails,
/// or JSON output cannot be serialized.
pub(crate) async fn run_list_products(config: &AppConfig, options: &ListOptions) -> anyhow::Result<()> {
    let catalog = CatalogClient::from_config(config)?;
    let products = catalog.fetch_featured_products(options.first).await?;

    let filter = ProductFilter::new(
        CategoryFilter::from_label(options.product_type.as_deref()),
        &options.query,
    )
    .reconcile(&products);

    match filter.listing(&products) {
        GalleryListing::Empty => {
            if !catalog.is_configured() {
                tracing::warn!("no storefront credentials; set SHOPIFY_STORE_DOMAIN and SHOPIFY_STOREFRONT_TOKEN");
            }
            if options.json {
                println!("[]");
            } else {
                println!("no products found");
            }
        }
        GalleryListing::NoMatches => {
            if options.json {
                println!("[]");
            } else {
                println!("no products match the current filter");
            }
        }
        GalleryListing::Products(matched) => {
            if options.json {
                println!("{}", serde_json::to_string_pretty(&matched)?);
            } else {
                for product in matched {
                    println!("{}", format_line(product));
                }
            }
        }
    }

    Ok(())
}

fn format_line(product: &NormalizedProduct) -> String {
    format!(
        "{:<40} {:<14} {:>10}  {}",
        product.title,
        product.product_type,
        format_money(product.price.as_ref()),
        product.link_path()
    )
}
