use crate::data_types::api_data_types::{MenuItem, OrderItem};
use crate::data_types::MealCategory;

/// One selected menu item with a quantity. Carries a denormalized snapshot of
/// the item so staff edits mid-session don't change what the student sees.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub item_id: String,
    pub name: String,
    pub price: f64,
    pub category: MealCategory,
    pub image_url: String,
    pub quantity: u32,
}

impl CartLine {
    pub fn subtotal(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

/// Ordered selection of menu items. One cart is shared across all category
/// tabs; the category an order is tagged with comes from the active tab at
/// confirm time (see [`crate::checkout::Checkout::confirm`]).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge-or-append: an already-present item id bumps its quantity instead
    /// of creating a second line. Always succeeds; returns the transient
    /// notice text for the UI.
    pub fn add_item(&mut self, item: &MenuItem) -> String {
        match self.lines.iter_mut().find(|l| l.item_id == item.id) {
            Some(line) => line.quantity += 1,
            None => self.lines.push(CartLine {
                item_id: item.id.clone(),
                name: item.name.clone(),
                price: item.price,
                category: item.category,
                image_url: item.image_url.clone(),
                quantity: 1,
            }),
        }
        format!("{} added to cart", item.name)
    }

    /// Quantities below 1 remove the line. An out-of-range index is a no-op.
    pub fn update_quantity(&mut self, index: usize, quantity: i64) {
        if quantity < 1 {
            self.remove_item(index);
        } else if let Some(line) = self.lines.get_mut(index) {
            line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
    }

    /// No-op on an invalid index.
    pub fn remove_item(&mut self, index: usize) {
        if index < self.lines.len() {
            self.lines.remove(index);
        }
    }

    /// Recomputed on every read so it can never go stale.
    pub fn total(&self) -> f64 {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Frozen copy of the current lines for an order request.
    pub fn to_order_items(&self) -> Vec<OrderItem> {
        self.lines
            .iter()
            .map(|l| OrderItem {
                id: l.item_id.clone(),
                name: l.name.clone(),
                price: l.price,
                category: l.category,
                image_url: l.image_url.clone(),
                quantity: l.quantity,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dosa() -> MenuItem {
        MenuItem {
            id: "a".into(),
            name: "Masala Dosa".into(),
            price: 50.0,
            category: MealCategory::Breakfast,
            image_url: "https://img.example/dosa.jpg".into(),
        }
    }

    fn chai() -> MenuItem {
        MenuItem {
            id: "b".into(),
            name: "Chai".into(),
            price: 12.5,
            category: MealCategory::Breakfast,
            image_url: String::new(),
        }
    }

    #[test]
    fn adding_same_item_twice_merges_into_one_line() {
        let mut cart = Cart::new();
        cart.add_item(&dosa());
        let notice = cart.add_item(&dosa());

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.total(), 100.0);
        assert_eq!(notice, "Masala Dosa added to cart");
    }

    #[test]
    fn total_tracks_any_sequence_of_mutations() {
        let mut cart = Cart::new();
        cart.add_item(&dosa());
        cart.add_item(&chai());
        cart.update_quantity(1, 4);
        assert_eq!(cart.total(), 50.0 + 4.0 * 12.5);

        cart.remove_item(0);
        assert_eq!(cart.total(), 50.0);

        cart.clear();
        assert_eq!(cart.total(), 0.0);
        assert!(cart.is_empty());
    }

    #[test]
    fn quantity_below_one_removes_the_line() {
        for q in [0, -1] {
            let mut cart = Cart::new();
            cart.add_item(&dosa());
            cart.update_quantity(0, q);
            assert!(cart.is_empty(), "quantity {q} should remove the line");
        }
    }

    #[test]
    fn oversized_quantities_saturate() {
        let mut cart = Cart::new();
        cart.add_item(&dosa());
        cart.update_quantity(0, i64::from(u32::MAX) + 7);
        assert_eq!(cart.lines()[0].quantity, u32::MAX);
    }

    #[test]
    fn out_of_range_indices_are_no_ops() {
        let mut cart = Cart::new();
        cart.add_item(&dosa());
        let before = cart.clone();

        cart.update_quantity(5, 3);
        cart.remove_item(5);
        assert_eq!(cart, before);
    }

    #[test]
    fn order_items_snapshot_the_line_state() {
        let mut cart = Cart::new();
        cart.add_item(&dosa());
        cart.add_item(&dosa());

        let items = cart.to_order_items();
        cart.update_quantity(0, 7);

        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].name, "Masala Dosa");
    }
}
