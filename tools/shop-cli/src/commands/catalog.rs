//! Catalog browsing commands.

use std::future::Future;

use anyhow::Result;
use serde::Serialize;
use shop_commerce::catalog::{CatalogSource, Category, Product};
use shop_commerce::search::{Filter, SearchQuery};
use shop_commerce::{CategoryId, CommerceError, ProductId};

use super::ProductsArgs;
use crate::context::Context;
use crate::output::{stars, stock_badge, truncate, wrap};

/// Await a catalog lookup behind a spinner. A rejected lookup is logged and
/// shown as an empty result.
pub(crate) async fn lookup<T, F>(ctx: &Context, msg: &str, fut: F) -> T
where
    T: Default,
    F: Future<Output = Result<T, CommerceError>>,
{
    match ctx.output.while_loading(msg, fut).await {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(error = %e, "catalog lookup failed");
            T::default()
        }
    }
}

/// List products with filters, sorting and paging.
pub async fn products(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog();
    let products = lookup(ctx, "Loading products...", catalog.list_products()).await;

    let mut query = SearchQuery::new()
        .with_sort(args.sort)
        .with_pagination(args.page, ctx.config.display.page_size);
    if let Some(text) = args.query {
        query = query.with_query(text);
    }
    if let Some(category) = args.category {
        query = query.with_filter(Filter::category(category));
    }
    if let Some(bucket) = args.price {
        query = query.with_filter(bucket);
    }
    if args.in_stock {
        query = query.with_filter(Filter::InStock);
    }
    if args.featured {
        query = query.with_filter(Filter::Featured);
    }

    let results = query.apply(&products);

    if ctx.output.is_json() {
        ctx.output.json(&results);
        return Ok(());
    }

    ctx.output.header("Products");
    if results.is_empty() {
        ctx.output.info("No products found. Try adjusting your search or filters.");
        return Ok(());
    }
    product_table(ctx, &results.items);

    let page = &results.pagination;
    ctx.output.line("");
    ctx.output.info(&format!(
        "Showing {}-{} of {} products (page {}/{}, sorted by {})",
        page.start_item(),
        page.end_item(),
        page.total,
        page.page,
        page.total_pages,
        query.sort.display_name()
    ));
    if page.has_next {
        ctx.output.info(&format!("Next page: --page {}", page.page + 1));
    }

    if !results.categories.is_empty() {
        let facets: Vec<String> = results
            .categories
            .iter()
            .map(|f| {
                let label = format!("{} ({})", f.value.replace('_', " "), f.count);
                if f.selected {
                    format!("[{label}]")
                } else {
                    label
                }
            })
            .collect();
        ctx.output.kv("Categories", &facets.join(", "));
    }

    Ok(())
}

#[derive(Serialize)]
struct ProductView<'a> {
    #[serde(flatten)]
    product: &'a Product,
    in_cart: u32,
    remaining_stock: u32,
}

/// Show a single product.
pub async fn product(id: &str, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog();
    let product_id = ProductId::new(id);
    let Some(product) = lookup(ctx, "Loading product...", catalog.get_product(&product_id)).await
    else {
        return Err(CommerceError::ProductNotFound(id.to_string()).into());
    };

    let in_cart = ctx.cart_state()?.quantity_of(&product.id);
    let remaining = product.remaining_stock(in_cart);

    if ctx.output.is_json() {
        ctx.output.json(&ProductView {
            product: &product,
            in_cart,
            remaining_stock: remaining,
        });
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("Price", &product.price.display());
    ctx.output.kv("Rating", &stars(product.rating));
    ctx.output.kv("Availability", &stock_badge(&product));
    ctx.output.kv("Category", &product.category.replace('_', " "));
    if product.featured {
        ctx.output.kv("Featured", "yes");
    }
    if in_cart > 0 {
        ctx.output.kv(
            "In your cart",
            &format!("{in_cart} ({remaining} more available)"),
        );
    }

    if !product.description.is_empty() {
        ctx.output.line("");
        let width = ctx.output.term_width().saturating_sub(4).min(80);
        for line in wrap(&product.description, width) {
            ctx.output.line(&format!("  {line}"));
        }
    }

    if !product.images.is_empty() {
        ctx.output.line("");
        ctx.output.kv("Images", "");
        for image in &product.images {
            ctx.output.list_item(image);
        }
    }

    if product.is_in_stock() {
        ctx.output.line("");
        ctx.output.info(&format!("Add it with `shop cart add {}`", product.id));
    }

    Ok(())
}

/// List featured products.
pub async fn featured(ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog();
    let products = lookup(ctx, "Loading featured products...", catalog.list_featured()).await;
    list(ctx, "Featured Products", &products, "No featured products right now.");
    Ok(())
}

/// Search product names and descriptions.
pub async fn search(text: &str, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog();
    let products = lookup(ctx, "Searching...", catalog.search(text)).await;
    list(
        ctx,
        &format!("Results for \"{}\"", text.trim()),
        &products,
        &format!("No products match \"{}\".", text.trim()),
    );
    Ok(())
}

#[derive(Serialize)]
struct CategoryView<'a> {
    #[serde(flatten)]
    category: &'a Category,
    slug: String,
    product_count: usize,
}

/// List categories with their product counts.
pub async fn categories(ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog();
    let (categories, products) = lookup(ctx, "Loading categories...", async {
        futures::try_join!(catalog.list_categories(), catalog.list_products())
    })
    .await;

    let views: Vec<CategoryView> = categories
        .iter()
        .map(|category| CategoryView {
            category,
            slug: category.slug(),
            product_count: products
                .iter()
                .filter(|p| p.in_category(&category.name))
                .count(),
        })
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&views);
        return Ok(());
    }

    ctx.output.header("Categories");
    if views.is_empty() {
        ctx.output.info("No categories found.");
        return Ok(());
    }
    ctx.output.table_row(&["ID", "NAME", "PRODUCTS", "DESCRIPTION"], &[4, 14, 8, 0]);
    for view in &views {
        ctx.output.table_row(
            &[
                view.category.id.as_str(),
                &view.category.name,
                &view.product_count.to_string(),
                &truncate(&view.category.description, 48),
            ],
            &[4, 14, 8, 0],
        );
    }
    Ok(())
}

/// Show a category and its products.
pub async fn category(id: &str, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog();
    let category_id = CategoryId::new(id);
    let Some(category) =
        lookup(ctx, "Loading category...", catalog.get_category(&category_id)).await
    else {
        return Err(CommerceError::CategoryNotFound(id.to_string()).into());
    };

    let products = lookup(
        ctx,
        "Loading products...",
        catalog.list_by_category(&category.name),
    )
    .await;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "category": category,
            "products": products,
        }));
        return Ok(());
    }

    ctx.output.header(&category.name);
    if !category.description.is_empty() {
        ctx.output.line(&category.description);
    }
    ctx.output.line("");
    if products.is_empty() {
        ctx.output.info("No products found in this category.");
    } else {
        product_table(ctx, &products);
    }
    Ok(())
}

fn list(ctx: &Context, title: &str, products: &[Product], empty: &str) {
    if ctx.output.is_json() {
        ctx.output.json(&products);
        return;
    }

    ctx.output.header(title);
    if products.is_empty() {
        ctx.output.info(empty);
    } else {
        product_table(ctx, products);
    }
}

const PRODUCT_COLUMNS: [usize; 5] = [4, 28, 10, 6, 0];

fn product_table(ctx: &Context, products: &[Product]) {
    ctx.output
        .table_row(&["ID", "NAME", "PRICE", "RATING", "STOCK"], &PRODUCT_COLUMNS);
    for product in products {
        let name = if product.featured {
            format!("{} *", truncate(&product.name, 26))
        } else {
            truncate(&product.name, 28)
        };
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &name,
                &product.price.display(),
                &format!("{:.1}", product.rating),
                &stock_badge(product),
            ],
            &PRODUCT_COLUMNS,
        );
    }
}
