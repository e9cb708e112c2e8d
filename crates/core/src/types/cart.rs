//! Cart line type shared by the cart store and the checkout flow.

use serde::{Deserialize, Serialize};

use super::{Price, Product};

/// One line of the client-held cart.
///
/// Quantity is at least 1 while the item is in a cart; a line whose
/// quantity would drop to zero is removed instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    /// Create a new cart line.
    #[must_use]
    pub const fn new(product: Product, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}
