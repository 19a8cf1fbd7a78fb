use std::{
    collections::BTreeMap,
    env,
    time::{Duration, Instant},
};

use chrono::{DateTime, Local};

use crate::constants::{CART_NOTICE_TTL, CURRENCY};
use crate::data_types::api_data_types::{HistoryDay, MenuItem, Order, QrReceipt};
use crate::data_types::MealCategory;

pub fn logger_init(module: &str) {
    let app_level = if env::var(pretty_env_logger::env_logger::DEFAULT_FILTER_ENV)
        .unwrap_or_default()
        == "debug"
    {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    pretty_env_logger::formatted_timed_builder()
        .filter_level(log::LevelFilter::Info)
        // fetch timings are logged from the library, not the binaries
        .filter_module("foodcard_rs", app_level)
        .filter_module(module, app_level)
        .init();
}

/// Transient one-line notices ("Masala Dosa added to cart") that expire on
/// their own instead of requiring a dismissal.
#[derive(Debug, Default)]
pub struct NoticeBoard {
    current: Option<(String, Instant)>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, text: String) {
        self.set_with_ttl(text, CART_NOTICE_TTL);
    }

    fn set_with_ttl(&mut self, text: String, ttl: Duration) {
        self.current = Some((text, Instant::now() + ttl));
    }

    pub fn current(&self) -> Option<&str> {
        match &self.current {
            Some((text, deadline)) if Instant::now() < *deadline => Some(text),
            _ => None,
        }
    }
}

pub fn menu_by_category(menu: &[MenuItem], category: MealCategory) -> Vec<&MenuItem> {
    menu.iter().filter(|item| item.category == category).collect()
}

/// Per-category order counts for the today's-summary header, zero-filled so
/// every tab always has a number.
pub fn todays_order_counts(orders: &[Order]) -> BTreeMap<MealCategory, usize> {
    let mut counts: BTreeMap<MealCategory, usize> =
        MealCategory::ALL.iter().map(|c| (*c, 0)).collect();
    for order in orders {
        *counts.entry(order.order_type).or_default() += 1;
    }
    counts
}

/// JSON shown as a QR code at the counter. `total` is the frozen checkout
/// total, not a recomputation.
pub fn build_qr_payload(order: &Order, student_name: &str, total: f64) -> String {
    let receipt = QrReceipt {
        order_id: order.id.clone(),
        student_id: order.student_id.clone(),
        student_name: student_name.to_string(),
        amount: total,
        order_type: order.order_type,
        time: Local::now().format("%d/%m/%Y, %H:%M:%S").to_string(),
    };
    serde_json::to_string(&receipt).unwrap()
}

pub fn format_menu(menu: &[MenuItem]) -> String {
    let mut out = String::new();
    let mut grouped: BTreeMap<MealCategory, Vec<&MenuItem>> = BTreeMap::new();
    for item in menu {
        grouped.entry(item.category).or_default().push(item);
    }

    if grouped.is_empty() {
        out += "no menu items available.\n";
    }
    for (category, items) in grouped {
        out += &format!("\n{category}\n");
        for item in items {
            out += &format!(" • {} — {}{}\n", item.name, CURRENCY, item.price);
        }
    }
    out
}

pub fn format_order(order: &Order) -> String {
    let mut out = format!("{} ({})\n", order.order_type, format_order_time(&order.created_at));
    for item in &order.items {
        out += &format!(
            " • {} × {} = {}{}\n",
            item.name,
            item.quantity,
            CURRENCY,
            item.price * item.quantity as f64
        );
    }
    out
}

pub fn format_history(days: &[HistoryDay]) -> String {
    if days.is_empty() {
        return "No previous orders found.\n".to_string();
    }

    let mut out = String::new();
    for day in days {
        out += &format!(
            "📅 {} — {} orders ({}{})\n",
            day.date, day.total_orders, CURRENCY, day.total_spent
        );
        for order in &day.orders {
            out += &format_order(order);
        }
        out.push('\n');
    }
    out
}

fn format_order_time(created_at: &str) -> String {
    match DateTime::parse_from_rfc3339(created_at) {
        Ok(ts) => ts.with_timezone(&Local).format("%H:%M:%S").to_string(),
        Err(_) => created_at.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::api_data_types::OrderItem;

    fn order(id: &str, category: MealCategory) -> Order {
        Order {
            id: id.into(),
            student_id: "s1".into(),
            items: vec![OrderItem {
                id: "a".into(),
                name: "Masala Dosa".into(),
                price: 50.0,
                category,
                image_url: String::new(),
                quantity: 2,
            }],
            order_type: category,
            created_at: "2026-08-25T08:12:00+00:00".into(),
        }
    }

    #[test]
    fn counts_are_zero_filled_and_tally_per_category() {
        let counts = todays_order_counts(&[]);
        assert_eq!(counts[&MealCategory::Breakfast], 0);
        assert_eq!(counts[&MealCategory::Dinner], 0);

        let orders = vec![
            order("o1", MealCategory::Breakfast),
            order("o2", MealCategory::Breakfast),
            order("o3", MealCategory::Lunch),
        ];
        let counts = todays_order_counts(&orders);
        assert_eq!(counts[&MealCategory::Breakfast], 2);
        assert_eq!(counts[&MealCategory::Lunch], 1);
        assert_eq!(counts[&MealCategory::Dinner], 0);
    }

    #[test]
    fn notices_expire_on_their_own() {
        let mut board = NoticeBoard::new();
        board.set("Chai added to cart".into());
        assert_eq!(board.current(), Some("Chai added to cart"));

        board.set_with_ttl("stale".into(), Duration::ZERO);
        assert_eq!(board.current(), None);
    }

    #[test]
    fn qr_payload_echoes_the_order() {
        let payload = build_qr_payload(&order("o9", MealCategory::Dinner), "Asha", 100.0);
        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(value["orderId"], "o9");
        assert_eq!(value["studentName"], "Asha");
        assert_eq!(value["amount"], 100.0);
        assert_eq!(value["type"], "dinner");
        assert!(value["time"].as_str().is_some());
    }

    #[test]
    fn menu_grouping_and_filtering() {
        let menu = vec![
            MenuItem {
                id: "a".into(),
                name: "Dosa".into(),
                price: 50.0,
                category: MealCategory::Breakfast,
                image_url: String::new(),
            },
            MenuItem {
                id: "b".into(),
                name: "Thali".into(),
                price: 80.0,
                category: MealCategory::Lunch,
                image_url: String::new(),
            },
        ];
        assert_eq!(menu_by_category(&menu, MealCategory::Lunch).len(), 1);

        let text = format_menu(&menu);
        assert!(text.contains("breakfast"));
        assert!(text.contains(" • Dosa — ₹50"));
    }
}
