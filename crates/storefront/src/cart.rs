//! The buyer's working cart.
//!
//! Cart state is independent of login state: it belongs to the installation
//! (the browser, in the original frontend), not to an account. Every
//! mutation is written through to durable storage, and totals are recomputed
//! from the lines on every read - there is no cached total to invalidate.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use ecobazaar_core::{CurrencyCode, Price, ProductId};

use crate::api::types::Product;
use crate::storage::{CART_KEY, Storage};

/// One product-and-quantity entry in the cart.
///
/// `product` is a snapshot taken at add-time; catalog changes after that
/// (price, stock, description) do not retroactively affect the line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// The price of this line (unit price × quantity).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.line_total(self.quantity)
    }
}

/// The buyer's working selection of products.
///
/// Lines are keyed by product ID (unique) and kept in insertion order for
/// display. A line's quantity is always at least 1; a line driven to zero is
/// removed, never stored.
pub struct CartStore {
    storage: Storage,
    lines: watch::Sender<Vec<CartLine>>,
}

impl CartStore {
    /// Open the cart, hydrating from durable storage.
    ///
    /// Corrupt or unparsable persisted data is treated as an empty cart:
    /// the error is logged and never surfaced.
    #[must_use]
    pub fn open(storage: Storage) -> Self {
        let initial = match storage.get::<Vec<CartLine>>(CART_KEY) {
            Ok(Some(lines)) => lines,
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "persisted cart is unreadable, starting empty");
                Vec::new()
            }
        };

        let (lines, _) = watch::channel(initial);
        Self { storage, lines }
    }

    /// Add one unit of `product`.
    ///
    /// If a line for this product already exists its quantity goes up by 1;
    /// otherwise a new line is appended with quantity 1, snapshotting the
    /// product as passed.
    pub fn add(&self, product: &Product) {
        self.mutate(|lines| {
            if let Some(line) = lines.iter_mut().find(|l| l.product.id == product.id) {
                line.quantity += 1;
            } else {
                lines.push(CartLine {
                    product: product.clone(),
                    quantity: 1,
                });
            }
        });
    }

    /// Remove the line for `product_id`. No-op if there is none.
    pub fn remove(&self, product_id: ProductId) {
        self.mutate(|lines| lines.retain(|l| l.product.id != product_id));
    }

    /// Set the quantity of the line for `product_id` exactly.
    ///
    /// A quantity of zero or less removes the line. Setting the quantity of
    /// an absent line is a no-op.
    pub fn set_quantity(&self, product_id: ProductId, quantity: i32) {
        let Ok(quantity) = u32::try_from(quantity) else {
            self.remove(product_id);
            return;
        };
        if quantity == 0 {
            self.remove(product_id);
            return;
        }

        self.mutate(|lines| {
            if let Some(line) = lines.iter_mut().find(|l| l.product.id == product_id) {
                line.quantity = quantity;
            }
        });
    }

    /// Empty the cart unconditionally.
    pub fn clear(&self) {
        self.mutate(Vec::clear);
    }

    /// The current lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> Vec<CartLine> {
        self.lines.borrow().clone()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.borrow().is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.lines.borrow().iter().map(|l| l.quantity).sum()
    }

    /// Sum of price × quantity across all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines
            .borrow()
            .iter()
            .map(CartLine::line_total)
            .fold(Price::zero(CurrencyCode::default()), |acc, p| acc + p)
    }

    /// Observe cart changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<CartLine>> {
        self.lines.subscribe()
    }

    /// Apply `f` to the lines, then persist and notify.
    fn mutate(&self, f: impl FnOnce(&mut Vec<CartLine>)) {
        self.lines.send_modify(f);
        let lines = self.lines.borrow().clone();
        if let Err(e) = self.storage.set(CART_KEY, &lines) {
            tracing::warn!(error = %e, "failed to persist cart");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use chrono::NaiveDateTime;
    use ecobazaar_core::SellerId;
    use rust_decimal::Decimal;

    use crate::api::types::SellerSummary;

    fn product(id: i64, price: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            stock: 100,
            category: "Groceries".into(),
            image_path: None,
            carbon_emission: 0.5,
            price: Price::new(price.parse().unwrap(), CurrencyCode::INR),
            created_at: NaiveDateTime::default(),
            zero_waste: false,
            seller: SellerSummary {
                id: SellerId::new(1),
                name: "Asha".into(),
                email: "asha@greengoods.in".into(),
                business_name: "Green Goods".into(),
            },
        }
    }

    fn open_cart() -> (tempfile::TempDir, CartStore) {
        let dir = tempfile::tempdir().unwrap();
        let cart = CartStore::open(Storage::new(dir.path()));
        (dir, cart)
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_empty_cart() {
        let (_dir, cart) = open_cart();
        assert!(cart.is_empty());
        assert_eq!(cart.count(), 0);
        assert_eq!(cart.total().amount, Decimal::ZERO);
    }

    #[test]
    fn test_totals_match_price_times_quantity() {
        let (_dir, cart) = open_cart();
        cart.add(&product(1, "12.99"));
        cart.add(&product(1, "12.99"));
        cart.add(&product(2, "19.99"));

        assert_eq!(cart.count(), 3);
        assert_eq!(cart.total().amount, dec("45.97"));
    }

    #[test]
    fn test_adding_same_product_merges_into_one_line() {
        let (_dir, cart) = open_cart();
        cart.add(&product(1, "12.99"));
        cart.add(&product(1, "12.99"));

        let lines = cart.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines.first().unwrap().quantity, 2);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let (_dir, cart) = open_cart();
        cart.add(&product(2, "19.99"));
        cart.add(&product(1, "12.99"));
        cart.add(&product(2, "19.99"));

        let ids: Vec<i64> = cart.lines().iter().map(|l| l.product.id.as_i64()).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_snapshot_price_wins_over_catalog_change() {
        let (_dir, cart) = open_cart();
        cart.add(&product(1, "12.99"));
        // The catalog price changed after the line was added.
        let mut repriced = product(1, "99.99");
        repriced.name = "Product 1 (new)".into();
        cart.add(&repriced);

        let lines = cart.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines.first().unwrap().quantity, 2);
        // The original snapshot is retained.
        assert_eq!(lines.first().unwrap().product.price.amount, dec("12.99"));
        assert_eq!(cart.total().amount, dec("25.98"));
    }

    #[test]
    fn test_set_quantity_is_absolute() {
        let (_dir, cart) = open_cart();
        cart.add(&product(1, "12.99"));
        cart.add(&product(1, "12.99"));
        cart.add(&product(2, "19.99"));

        cart.set_quantity(ProductId::new(1), 5);

        let lines = cart.lines();
        assert_eq!(lines.first().unwrap().quantity, 5);
        assert_eq!(cart.count(), 6);
    }

    #[test]
    fn test_set_quantity_zero_or_negative_removes_line() {
        let (_dir, cart) = open_cart();
        cart.add(&product(1, "12.99"));
        cart.set_quantity(ProductId::new(1), 0);
        assert!(cart.is_empty());

        cart.add(&product(1, "12.99"));
        cart.set_quantity(ProductId::new(1), -1);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_on_absent_line_is_noop() {
        let (_dir, cart) = open_cart();
        cart.add(&product(1, "12.99"));
        cart.set_quantity(ProductId::new(99), 5);
        assert_eq!(cart.count(), 1);
    }

    #[test]
    fn test_remove_absent_line_is_noop() {
        let (_dir, cart) = open_cart();
        cart.add(&product(1, "12.99"));
        cart.remove(ProductId::new(99));
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_clear() {
        let (_dir, cart) = open_cart();
        cart.add(&product(1, "12.99"));
        cart.add(&product(2, "19.99"));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total().amount, Decimal::ZERO);
    }

    #[test]
    fn test_cart_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let cart = CartStore::open(Storage::new(dir.path()));
            cart.add(&product(1, "12.99"));
            cart.add(&product(1, "12.99"));
        }

        let cart = CartStore::open(Storage::new(dir.path()));
        assert_eq!(cart.count(), 2);
        assert_eq!(cart.total().amount, dec("25.98"));
    }

    #[test]
    fn test_corrupt_persisted_cart_resets_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path());
        std::fs::write(storage.path_for(CART_KEY), "{{ not json").unwrap();

        let cart = CartStore::open(storage);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_subscribers_see_mutations() {
        let (_dir, cart) = open_cart();
        let mut rx = cart.subscribe();

        cart.add(&product(1, "12.99"));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);
    }
}
