//! Recipe domain model

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of decimal places prices are stored with
pub const PRICE_SCALE: u32 = 2;

/// A recipe owned by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub time_minutes: u32,
    pub price: Decimal,
    pub link: Option<String>,
    /// Tag IDs, all owned by `user_id`
    pub tags: Vec<Uuid>,
    /// Ingredient IDs, all owned by `user_id`
    pub ingredients: Vec<Uuid>,
    /// Storage-relative image path, see `services::upload`
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    /// Create a new recipe with required fields
    pub fn new(user_id: Uuid, title: impl Into<String>, time_minutes: u32, price: Decimal) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: title.into(),
            time_minutes,
            price: Self::normalize_price(price),
            link: None,
            tags: Vec::new(),
            ingredients: Vec::new(),
            image: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Round a price to the stored scale (banker's rounding, as `Decimal::round_dp`)
    pub fn normalize_price(price: Decimal) -> Decimal {
        let mut rounded = price.round_dp(PRICE_SCALE);
        rounded.rescale(PRICE_SCALE);
        rounded
    }

    /// Validate recipe data
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("recipe title cannot be empty");
        }
        if self.price < Decimal::ZERO {
            return Err("recipe price cannot be negative");
        }
        Ok(())
    }

    /// Add IDs to a list, skipping ones already present. Returns true if anything changed.
    pub(crate) fn merge_ids(list: &mut Vec<Uuid>, ids: &[Uuid]) -> bool {
        let mut changed = false;
        for id in ids {
            if !list.contains(id) {
                list.push(*id);
                changed = true;
            }
        }
        changed
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}
