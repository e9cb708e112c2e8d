//! Client-held shopping cart.
//!
//! The cart is an ordered list of lines, at most one per product. Every
//! mutation republishes the whole list to subscribers and then mirrors it to
//! the persistent store. Mirroring is best-effort: a failed write is logged
//! and recorded as a breadcrumb, never surfaced to the caller.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, instrument, warn};

use shopfront_core::{CartItem, Price, Product, ProductId};

use crate::error::add_breadcrumb;
use crate::storage::{KeyValueStore, StorageError, keys, read_json, write_json};

/// Observable cart backed by a [`KeyValueStore`].
pub struct CartStore {
    store: Arc<dyn KeyValueStore>,
    items: watch::Sender<Vec<CartItem>>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &*self.items.borrow())
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Open the cart, restoring whatever the store holds.
    ///
    /// A missing entry yields an empty cart; so does an entry that cannot be
    /// read or decoded, after logging a warning.
    #[must_use]
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let items = match read_json::<Vec<CartItem>>(store.as_ref(), keys::CART) {
            Ok(Some(items)) => items
                .into_iter()
                .filter(|item| item.quantity > 0)
                .collect(),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Discarding unreadable persisted cart");
                Vec::new()
            }
        };
        debug!(lines = items.len(), "Cart loaded");

        let (items, _) = watch::channel(items);
        Self { store, items }
    }

    /// Observe the cart. The receiver sees the full list after every mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<CartItem>> {
        self.items.subscribe()
    }

    /// Snapshot of the current lines.
    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        self.items.borrow().clone()
    }

    /// Add `quantity` units of `product`, merging into an existing line.
    ///
    /// Adding zero units leaves the cart untouched.
    #[instrument(skip(self, product), fields(product_id = %product.product_id))]
    pub fn add_to_cart(&self, product: Product, quantity: u32) {
        if quantity == 0 {
            return;
        }
        let product_id = product.product_id;
        self.items.send_modify(|items| {
            if let Some(line) = items.iter_mut().find(|line| line.product.product_id == product_id) {
                line.quantity = line.quantity.saturating_add(quantity);
            } else {
                items.push(CartItem::new(product, quantity));
            }
        });
        add_breadcrumb(
            "cart",
            "Added to cart",
            Some(&[("product_id", product_id.to_string().as_str())]),
        );
        self.persist();
    }

    /// Set the quantity of a line. Zero or less removes the line.
    #[instrument(skip(self))]
    pub fn update_quantity(&self, product_id: ProductId, quantity: i64) {
        let quantity = u32::try_from(quantity.max(0)).unwrap_or(u32::MAX);
        if quantity == 0 {
            self.remove_from_cart(product_id);
            return;
        }
        self.items.send_modify(|items| {
            if let Some(line) = items.iter_mut().find(|line| line.product.product_id == product_id) {
                line.quantity = quantity;
            }
        });
        self.persist();
    }

    /// Drop the line for `product_id`, if present.
    #[instrument(skip(self))]
    pub fn remove_from_cart(&self, product_id: ProductId) {
        self.items
            .send_modify(|items| items.retain(|line| line.product.product_id != product_id));
        add_breadcrumb(
            "cart",
            "Removed from cart",
            Some(&[("product_id", product_id.to_string().as_str())]),
        );
        self.persist();
    }

    /// Add one unit, unless that would exceed the product's stock.
    ///
    /// Returns whether the quantity changed.
    pub fn increment(&self, product_id: ProductId) -> bool {
        let changed = self.items.send_if_modified(|items| {
            match items
                .iter_mut()
                .find(|line| line.product.product_id == product_id)
            {
                Some(line) if line.quantity < line.product.stock => {
                    line.quantity += 1;
                    true
                }
                _ => false,
            }
        });
        if changed {
            self.persist();
        }
        changed
    }

    /// Remove one unit, never going below one.
    ///
    /// Returns whether the quantity changed.
    pub fn decrement(&self, product_id: ProductId) -> bool {
        let changed = self.items.send_if_modified(|items| {
            match items
                .iter_mut()
                .find(|line| line.product.product_id == product_id)
            {
                Some(line) if line.quantity > 1 => {
                    line.quantity -= 1;
                    true
                }
                _ => false,
            }
        });
        if changed {
            self.persist();
        }
        changed
    }

    /// Empty the cart and erase the persisted copy.
    #[instrument(skip(self))]
    pub fn clear_cart(&self) {
        self.items.send_modify(Vec::clear);
        add_breadcrumb("cart", "Cleared cart", None);
        if let Err(e) = self.store.remove(keys::CART) {
            persist_failed(&e);
        }
    }

    /// Sum of price times quantity over every line.
    #[must_use]
    pub fn cart_total(&self) -> Price {
        self.items.borrow().iter().map(CartItem::subtotal).sum()
    }

    /// Total number of units in the cart.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .borrow()
            .iter()
            .fold(0, |count, line| count.saturating_add(line.quantity))
    }

    /// Whether `product_id` has a line in the cart.
    #[must_use]
    pub fn is_in_cart(&self, product_id: ProductId) -> bool {
        self.items
            .borrow()
            .iter()
            .any(|line| line.product.product_id == product_id)
    }

    /// Price times quantity of a single line.
    #[must_use]
    pub fn item_subtotal(&self, product_id: ProductId) -> Option<Price> {
        self.items
            .borrow()
            .iter()
            .find(|line| line.product.product_id == product_id)
            .map(CartItem::subtotal)
    }

    fn persist(&self) {
        let snapshot = self.items();
        match write_json(self.store.as_ref(), keys::CART, &snapshot) {
            Ok(()) => debug!(lines = snapshot.len(), "Cart persisted"),
            Err(e) => persist_failed(&e),
        }
    }
}

fn persist_failed(error: &StorageError) {
    warn!(error = %error, "Failed to persist cart");
    add_breadcrumb(
        "cart",
        "Failed to persist cart",
        Some(&[("error", error.to_string().as_str())]),
    );
}
