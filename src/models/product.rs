use crate::models::Money;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Lowest accepted unit price, in cents
pub const MIN_PRICE_CENTS: i64 = 1;

/// Highest accepted unit price, in cents
pub const MAX_PRICE_CENTS: i64 = 99_999_999;

/// A handcrafted item offered for sale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub price: Money,
    pub stock: u32,
}

impl Product {
    pub fn from_draft(id: u64, draft: ProductDraft) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            stock: draft.stock,
        }
    }

    pub fn apply(&mut self, draft: ProductDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.price = draft.price;
        self.stock = draft.stock;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ProductDraft {
    #[validate(length(min = 4, max = 120, message = "name must be 4 to 120 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(min = 4, max = 1000, message = "description must be 4 to 1000 characters"))]
    pub description: Option<String>,

    #[validate(custom(function = "validate_price"))]
    pub price: Money,

    #[validate(range(max = 100_000, message = "stock must be between 0 and 100000"))]
    pub stock: u32,
}

impl ProductDraft {
    /// Trim text fields; a blank description becomes `None`.
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: self
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            price: self.price,
            stock: self.stock,
        }
    }
}

fn validate_price(price: &Money) -> Result<(), ValidationError> {
    if (MIN_PRICE_CENTS..=MAX_PRICE_CENTS).contains(&price.cents()) {
        Ok(())
    } else {
        let mut error = ValidationError::new("price_range");
        error.message = Some("price must be between 0.01 and 999999.99".into());
        Err(error)
    }
}
