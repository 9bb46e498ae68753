//! Shopping cart lines and quantity transitions.
//!
//! The cart is an ordered list of lines, one per product. It lives in the
//! visitor's session only and is never persisted.

use serde::{Deserialize, Serialize};

use crate::product::Product;
use crate::types::{CurrencyCode, Price, ProductId};

/// One cart line: a product and how many of it.
///
/// `quantity` is at least 1 for as long as the line exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    /// Price of this line (unit price times quantity).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price * self.quantity
    }
}

/// The visitor's cart plus the visibility of the cart panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
    #[serde(default)]
    open: bool,
}

impl Cart {
    /// Create an empty, closed cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cart lines in the order products were first added.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Look up the line for a product.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.product.id == id)
    }

    /// Add one unit of `product` and open the cart panel.
    ///
    /// Repeat adds increment the existing line; a first add appends a new
    /// line with quantity 1.
    pub fn add(&mut self, product: &Product) {
        match self
            .items
            .iter_mut()
            .find(|item| item.product.id == product.id)
        {
            Some(item) => item.quantity = item.quantity.saturating_add(1),
            None => self.items.push(CartItem {
                product: product.clone(),
                quantity: 1,
            }),
        }
        self.open = true;
    }

    /// Remove the line for `id`, whatever its quantity.
    ///
    /// Returns `true` if a line was removed.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.product.id != id);
        self.items.len() != before
    }

    /// Adjust the quantity of the line for `id` by `delta`.
    ///
    /// A change that would take the quantity below 1 is ignored; use
    /// [`Cart::remove`] to drop a line. Returns `true` if the cart changed.
    pub fn update_quantity(&mut self, id: &ProductId, delta: i32) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| &item.product.id == id) else {
            return false;
        };

        let next = i64::from(item.quantity) + i64::from(delta);
        match u32::try_from(next) {
            Ok(quantity) if quantity >= 1 && quantity != item.quantity => {
                item.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Total number of units across all lines (the navbar badge).
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items
            .iter()
            .map(CartItem::line_total)
            .reduce(|acc, line| acc + line)
            .unwrap_or_else(|| Price::zero(CurrencyCode::default()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the cart panel is showing.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    pub const fn open(&mut self) {
        self.open = true;
    }

    pub const fn close(&mut self) {
        self.open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    fn product(id: &str, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Price::lkr(price),
            category: Category::Headset,
            description: String::new(),
            image: String::new(),
            badge: None,
        }
    }

    #[test]
    fn test_add_appends_then_increments() {
        let headset = product("3", 12000);
        let mut cart = Cart::new();

        cart.add(&headset);
        cart.add(&headset);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.get(&headset.id).map(|item| item.quantity), Some(2));
        assert_eq!(cart.subtotal(), Price::lkr(24000));
    }

    #[test]
    fn test_add_opens_panel() {
        let mut cart = Cart::new();
        assert!(!cart.is_open());
        cart.add(&product("1", 8500));
        assert!(cart.is_open());
        cart.close();
        assert!(!cart.is_open());
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut cart = Cart::new();
        cart.add(&product("2", 3200));
        cart.add(&product("1", 8500));
        cart.add(&product("2", 3200));

        let ids: Vec<&str> = cart.items().iter().map(|i| i.product.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[test]
    fn test_remove_drops_whole_line() {
        let mouse = product("2", 3200);
        let mut cart = Cart::new();
        cart.add(&mouse);
        cart.add(&mouse);
        cart.add(&mouse);

        assert!(cart.remove(&mouse.id));
        assert!(cart.is_empty());
        assert!(!cart.remove(&mouse.id));
    }

    #[test]
    fn test_remove_then_add_starts_fresh() {
        let mouse = product("2", 3200);
        let mut cart = Cart::new();
        cart.add(&mouse);
        cart.add(&mouse);
        cart.remove(&mouse.id);
        cart.add(&mouse);

        assert_eq!(cart.get(&mouse.id).map(|item| item.quantity), Some(1));
    }

    #[test]
    fn test_update_quantity_never_below_one() {
        let mat = product("7", 1800);
        let mut cart = Cart::new();
        cart.add(&mat);
        cart.update_quantity(&mat.id, 2);
        assert_eq!(cart.total_quantity(), 3);

        for _ in 0..10 {
            cart.update_quantity(&mat.id, -1);
        }
        assert_eq!(cart.get(&mat.id).map(|item| item.quantity), Some(1));
    }

    #[test]
    fn test_update_quantity_rejects_large_negative_delta() {
        let mat = product("7", 1800);
        let mut cart = Cart::new();
        cart.add(&mat);
        cart.update_quantity(&mat.id, 4);

        assert!(!cart.update_quantity(&mat.id, -5));
        assert_eq!(cart.get(&mat.id).map(|item| item.quantity), Some(5));
    }

    #[test]
    fn test_update_quantity_unknown_line() {
        let mut cart = Cart::new();
        assert!(!cart.update_quantity(&ProductId::new("missing"), 1));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_empty_cart_subtotal_is_zero() {
        let cart = Cart::new();
        assert_eq!(cart.subtotal(), Price::lkr(0));
        assert_eq!(cart.total_quantity(), 0);
    }
}
