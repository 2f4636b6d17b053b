//! Plain-text rendering for the command line.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::domain::{timestamp, Cart, Menu, Order, OrderStatus};
use crate::session::OrderTracking;

pub fn render_menu(menu: &Menu) -> String {
    if menu.is_empty() {
        return "The menu is empty.\n".to_string();
    }

    let mut out = String::new();
    for (category, items) in menu.by_category() {
        let _ = writeln!(out, "{category}");
        for item in items {
            let mut tags = Vec::new();
            if item.veg {
                tags.push("veg");
            }
            if item.spicy {
                tags.push("spicy");
            }
            let tags = if tags.is_empty() {
                String::new()
            } else {
                format!(" [{}]", tags.join(", "))
            };
            let _ = writeln!(
                out,
                "  {:<8} {:<28} {:>8.2}{}",
                item.id, item.name, item.price, tags
            );
        }
    }
    out
}

fn render_lines(out: &mut String, items: &Cart) {
    for (_, line) in items.lines() {
        let _ = writeln!(
            out,
            "    {} x {:<24} {:>8.2}",
            line.quantity,
            line.name,
            line.subtotal()
        );
    }
}

pub fn render_board(orders: &[&Order], summary: &BTreeMap<OrderStatus, usize>) -> String {
    let mut out = String::new();
    let counts: Vec<String> = summary
        .iter()
        .map(|(status, count)| format!("{status}: {count}"))
        .collect();
    let _ = writeln!(out, "{} orders  {}", orders.len(), counts.join("  "));

    for order in orders {
        let _ = writeln!(
            out,
            "[{}] {}  table {}  {}  total {:.2}",
            order.status,
            order.id,
            order.table,
            timestamp::format(&order.created_at),
            order.computed_total()
        );
        render_lines(&mut out, &order.items);
    }
    out
}

pub fn render_ticket(tracking: &OrderTracking) -> String {
    let order = &tracking.order;
    let mut out = String::new();
    let _ = writeln!(out, "Order {} for table {}", order.id, order.table);
    let _ = writeln!(out, "  Status: {}", order.status);
    render_lines(&mut out, &order.items);
    let _ = writeln!(out, "  Total: {:.2}", order.computed_total());
    if tracking.feedback_open {
        let _ = writeln!(out, "  Your order is complete. Tell us how it was with `feedback`.");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MenuItem, OrderCreate};
    use chrono::{TimeZone, Utc};

    #[test]
    fn ticket_offers_feedback_only_when_open() {
        let mut items = Cart::new();
        items.add(&MenuItem::new("A", "Thali", "Mains", 180.0));
        let order = Order::from_create(
            "o1",
            OrderCreate {
                table: "2".to_string(),
                items,
            },
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        );

        let pending = render_ticket(&OrderTracking {
            order: order.clone(),
            feedback_open: false,
        });
        assert!(pending.contains("Status: Pending"));
        assert!(pending.contains("Total: 180.00"));
        assert!(!pending.contains("feedback"));

        let done = render_ticket(&OrderTracking {
            order,
            feedback_open: true,
        });
        assert!(done.contains("feedback"));
    }

    #[test]
    fn menu_marks_dietary_flags() {
        let mut paneer = MenuItem::new("S1", "Chilli Paneer", "Starters", 240.0);
        paneer.veg = true;
        paneer.spicy = true;

        let text = render_menu(&Menu::new(vec![paneer]));

        assert!(text.starts_with("Starters\n"));
        assert!(text.contains("[veg, spicy]"));
    }
}
