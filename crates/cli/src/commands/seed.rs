//! Seed the product catalog.
//!
//! Without `--file`, inserts the built-in catalog if the products table is
//! empty (the same set the storefront seeds on first listing). With `--file`,
//! inserts the products from a JSON array; ids that already exist are skipped.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use vibe_commerce_storefront::db::{Database, PgProductStore, ProductStore};
use vibe_commerce_storefront::models::Product;
use vibe_commerce_storefront::services::CatalogService;

use super::{CommandError, database_url};

/// Seed products into the storefront database.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the file cannot be read
/// or parsed, or a store operation fails.
pub async fn run(file: Option<&Path>) -> Result<(), CommandError> {
    // Parse before connecting so a bad file fails fast
    let products = file.map(load_products).transpose()?;

    let database = Arc::new(Database::new(database_url()?, 1));
    let store = PgProductStore::new(database);

    let inserted = match products {
        Some(products) => {
            info!(count = products.len(), "Inserting products from file");
            store.insert_many(&products).await?
        }
        None => CatalogService::new(&store).ensure_seeded().await?,
    };

    if inserted == 0 {
        info!("No products inserted (catalog already present)");
    } else {
        info!(inserted, "Seeding complete");
    }
    Ok(())
}

fn load_products(path: &Path) -> Result<Vec<Product>, CommandError> {
    let display = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|source| CommandError::Io {
        path: display.clone(),
        source,
    })?;
    parse_products(&content).map_err(|source| CommandError::Parse {
        path: display,
        source,
    })
}

fn parse_products(content: &str) -> Result<Vec<Product>, serde_json::Error> {
    serde_json::from_str(content)
}
