//! Product inventory: `productDB.products`.

use serde::{Deserialize, Serialize};

use crate::Document;

/// Logical database holding the product collection.
pub const DATABASE: &str = "productDB";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Document)]
#[document(collection = "products", name = "Product")]
pub struct Product {
    #[document(id)]
    pub id: String,
    pub name: String,
    #[serde(with = "docgate::number")]
    pub price: f64,
    pub category: String,
}
