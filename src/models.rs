use serde::{Deserialize, Serialize};

/// A catalog record as stored in the `items` table.
///
/// Every column except `id` is nullable in storage. A record is only usable
/// when it is complete, see [`Item::is_complete`].
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub sold: Option<bool>,
}

impl Item {
    /// True when `name`, `price` and `sold` are all set.
    pub fn is_complete(&self) -> bool {
        self.name.is_some() && self.price.is_some() && self.sold.is_some()
    }
}

/// Payload for creating an item. `sold` is not accepted here; new items always
/// start unsold.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateItemInput {
    pub name: String,
    pub price: f64,
}

/// Payload for a partial update. Absent (or `null`) fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateItemInput {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub sold: Option<bool>,
}

impl UpdateItemInput {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.sold.is_none()
    }
}
