//! Catalog subcommands: list, show, and the mock write operations.

use rust_decimal::Decimal;

use luxe_core::{Price, ProductId};
use luxe_storefront::models::{NewProduct, Product};
use luxe_storefront::{AppState, Result};

/// List products, optionally filtered to one category.
pub async fn list(state: &AppState, category: Option<&str>) -> Result<()> {
    let products = match category {
        Some(category) => state.catalog().products_by_category(category).await?,
        None => state.catalog().list_products().await?,
    };

    if products.is_empty() {
        println!("No products found.");
        return Ok(());
    }
    for product in &products {
        print_line(product);
    }
    println!("\n{} product(s)", products.len());
    Ok(())
}

/// Show one product in full.
pub async fn show(state: &AppState, id: i32) -> Result<()> {
    let product = state.catalog().get_product(ProductId::new(id)).await?;
    print_full(&product);
    Ok(())
}

/// Create a product. The mock API echoes it back without persisting it.
pub async fn create(
    state: &AppState,
    title: String,
    price: Decimal,
    description: String,
    image: String,
    category: String,
) -> Result<()> {
    let new = NewProduct {
        title,
        price: Price::new(price),
        description,
        image,
        category,
    };
    let created = state.catalog().create_product(&new).await?;
    println!("Created (not persisted upstream):");
    print_full(&created);
    Ok(())
}

/// Replace a product record.
pub async fn update(
    state: &AppState,
    id: i32,
    title: String,
    price: Decimal,
    description: String,
    image: String,
    category: String,
) -> Result<()> {
    let new = NewProduct {
        title,
        price: Price::new(price),
        description,
        image,
        category,
    };
    let updated = state
        .catalog()
        .update_product(ProductId::new(id), &new)
        .await?;
    println!("Updated (not persisted upstream):");
    print_full(&updated);
    Ok(())
}

/// Delete a product.
pub async fn delete(state: &AppState, id: i32) -> Result<()> {
    match state.catalog().delete_product(ProductId::new(id)).await? {
        Some(product) => {
            println!("Deleted (not persisted upstream):");
            print_line(&product);
        }
        None => println!("Deleted product {id} (no record echoed)."),
    }
    Ok(())
}

fn print_line(product: &Product) {
    println!(
        "  [{}] {} - {} ({})",
        product.id, product.title, product.price, product.category
    );
}

fn print_full(product: &Product) {
    println!("Product {}", product.id);
    println!("  Title:       {}", product.title);
    println!("  Price:       {}", product.price);
    println!("  Category:    {}", product.category);
    if !product.description.is_empty() {
        println!("  Description: {}", product.description);
    }
    if !product.image.is_empty() {
        println!("  Image:       {}", product.image);
    }
}
