use serde::{Deserialize, Serialize};

use crate::dto::{Payload, Versioned};

/// Product payload: the fields a product version stores in its JSON document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Product {
    pub title: String,
    pub description: String,
    pub price: f64,
}

impl Payload for Product {
    const KIND: &'static str = "product";
    const TABLE: &'static str = "products";
}

pub type ProductDto = Versioned<Product>;
