use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Product row as stored and as served over the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,              // server-assigned, immutable
    pub name: String,
    pub category: String,     // free-form, not a foreign key
    pub price: f64,           // NUMERIC column, read back as float8
    pub stock: i32,
}

/// A full product record without its id; what create and update write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: i32,
}

impl NewProduct {
    pub fn with_id(self, id: i64) -> Product {
        Product {
            id,
            name: self.name,
            category: self.category,
            price: self.price,
            stock: self.stock,
        }
    }
}

impl From<Product> for NewProduct {
    fn from(p: Product) -> Self {
        Self {
            name: p.name,
            category: p.category,
            price: p.price,
            stock: p.stock,
        }
    }
}
