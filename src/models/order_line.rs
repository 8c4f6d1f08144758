use crate::models::Money;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One product on an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: u64,
    pub order_id: u64,
    pub product_id: u64,
    pub quantity: u32,

    /// Product price captured when the line was last saved
    pub unit_price: Money,
}

impl OrderLine {
    pub fn subtotal(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

/// Line fields a caller may choose; the price always comes from the product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct OrderLineDraft {
    #[validate(range(min = 1, message = "product id must be 1 or greater"))]
    pub product_id: u64,

    #[validate(range(min = 1, max = 99_999, message = "quantity must be between 1 and 99999"))]
    pub quantity: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtotal() {
        let line = OrderLine {
            id: 1,
            order_id: 1,
            product_id: 2,
            quantity: 3,
            unit_price: Money::from_cents(1_999),
        };
        assert_eq!(line.subtotal(), Money::from_cents(5_997));
    }

    #[test]
    fn test_quantity_bounds() {
        let mut draft = OrderLineDraft {
            product_id: 1,
            quantity: 0,
        };
        assert!(draft.validate().is_err());

        draft.quantity = 99_999;
        assert!(draft.validate().is_ok());

        draft.quantity = 100_000;
        assert!(draft.validate().is_err());
    }
}
