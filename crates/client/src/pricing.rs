//! Client-side price preview.
//!
//! The preview is shown before an order exists. Once placed, the order's
//! `totalAmount` from the backend is what gets charged.

use rust_decimal::Decimal;

use shopfront_core::{CartItem, Price};

/// Sales tax applied to the subtotal, in percent.
pub const TAX_RATE_PERCENT: u32 = 8;

/// Subtotal, tax and total for a set of cart lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PricePreview {
    pub subtotal: Price,
    pub tax: Price,
    pub total: Price,
}

impl PricePreview {
    /// Preview for `items`, with tax rounded to whole cents.
    #[must_use]
    pub fn for_items(items: &[CartItem]) -> Self {
        let subtotal: Price = items.iter().map(CartItem::subtotal).sum();
        Self::for_subtotal(subtotal)
    }

    /// Preview for a known subtotal.
    #[must_use]
    pub fn for_subtotal(subtotal: Price) -> Self {
        let tax = subtotal
            .scaled(Decimal::new(i64::from(TAX_RATE_PERCENT), 2))
            .rounded();
        Self {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}

#[cfg(test)]
mod tests {
    use shopfront_core::{Product, ProductId};

    use super::*;

    fn line(cents: i64, quantity: u32) -> CartItem {
        CartItem::new(
            Product {
                product_id: ProductId::new(cents),
                name: "Item".to_string(),
                description: String::new(),
                price: Price::from_cents(cents),
                stock: 10,
                image: None,
                category: None,
            },
            quantity,
        )
    }

    #[test]
    fn test_preview_adds_eight_percent() {
        let preview = PricePreview::for_items(&[line(3999, 2), line(1500, 1)]);
        assert_eq!(preview.subtotal, Price::from_cents(9498));
        assert_eq!(preview.tax, Price::from_cents(760));
        assert_eq!(preview.total, Price::from_cents(10258));
    }

    #[test]
    fn test_empty_preview_is_zero() {
        assert_eq!(PricePreview::for_items(&[]), PricePreview::default());
    }

    #[test]
    fn test_tax_rounds_half_up() {
        // 0.08 * 0.5625 = 0.045 -> 0.05
        let preview = PricePreview::for_subtotal(Price::new(Decimal::new(5625, 4)));
        assert_eq!(preview.tax, Price::from_cents(5));
    }
}
