//! E-commerce catalog with nested variants: `ecommerceDB.products`.
//!
//! Besides the CRUD shape, this module carries the canned catalog queries:
//! filter by category, filter by variant color, and a variant projection.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::store::{DocumentStore, Filter, Projection, StoreError};
use crate::{Document, Schematic};

/// Logical database holding the catalog collection.
pub const DATABASE: &str = "ecommerceDB";

/// One purchasable variation of a product. No field is enforced.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Schematic)]
pub struct Variant {
    pub color: Option<String>,
    pub size: Option<String>,
    pub stock: Option<i64>,
}

impl Variant {
    pub fn new(color: &str, size: &str, stock: i64) -> Self {
        Self {
            color: Some(color.to_string()),
            size: Some(size.to_string()),
            stock: Some(stock),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Document)]
#[document(collection = "products", name = "Product")]
pub struct CatalogProduct {
    #[document(id)]
    pub id: String,
    pub name: String,
    #[serde(with = "docgate::number")]
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl CatalogProduct {
    pub fn new(name: &str, price: f64, category: &str, variants: Vec<Variant>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            price,
            category: category.to_string(),
            variants,
        }
    }
}

/// The three sample products seeded by the demo.
pub fn sample_products() -> Vec<CatalogProduct> {
    vec![
        CatalogProduct::new(
            "Smartphone X1",
            45000.0,
            "Electronics",
            vec![
                Variant::new("Black", "128GB", 20),
                Variant::new("Blue", "256GB", 10),
            ],
        ),
        CatalogProduct::new(
            "Running Shoes",
            2500.0,
            "Footwear",
            vec![Variant::new("Red", "8", 15), Variant::new("Black", "9", 25)],
        ),
        CatalogProduct::new(
            "Cotton T-Shirt",
            800.0,
            "Clothing",
            vec![Variant::new("White", "M", 50), Variant::new("Blue", "L", 30)],
        ),
    ]
}

pub fn by_category<S: DocumentStore>(
    store: &S,
    category: &str,
) -> Result<Vec<CatalogProduct>, StoreError> {
    store.find_by(&Filter::eq("category", category))
}

/// Products having at least one variant of the given color.
pub fn with_variant_color<S: DocumentStore>(
    store: &S,
    color: &str,
) -> Result<Vec<CatalogProduct>, StoreError> {
    store.find_by(&Filter::eq("variants.color", color))
}

/// Name plus each variant's color and stock; price, category and id omitted.
pub fn variant_projection<S: DocumentStore>(store: &S) -> Result<Vec<Value>, StoreError> {
    store.project::<CatalogProduct>(
        &Filter::all(),
        &Projection::include(["name", "variants.color", "variants.stock"]).without_id(),
    )
}

/// Results of one run of the catalog demo.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogReport {
    pub cleared: usize,
    pub inserted: usize,
    pub all: Vec<CatalogProduct>,
    pub electronics: Vec<CatalogProduct>,
    pub variant_projection: Vec<Value>,
    pub blue_variants: Vec<CatalogProduct>,
}

/// Clear the catalog, seed the samples, and run the four canned queries.
pub fn run_demo<S: DocumentStore>(store: &S) -> Result<CatalogReport, StoreError> {
    let cleared = store.delete_all::<CatalogProduct>()?;
    let inserted = store.insert_many(&sample_products())?.len();
    info!(cleared, inserted, "sample products inserted");

    Ok(CatalogReport {
        cleared,
        inserted,
        all: store.find_models::<CatalogProduct>(&|_| true)?,
        electronics: by_category(store, "Electronics")?,
        variant_projection: variant_projection(store)?,
        blue_variants: with_variant_color(store, "Blue")?,
    })
}
