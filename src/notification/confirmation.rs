use super::OutgoingEmail;
use crate::model::Order;
use rust_decimal::Decimal;
use std::fmt::Write;

/// One line of the confirmation, already resolved to a product name.
#[derive(Debug, Clone)]
pub struct ConfirmationLine {
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl ConfirmationLine {
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Plain-text summary sent to the customer once an order is placed.
#[derive(Debug, Clone)]
pub struct OrderConfirmation<'a> {
    pub order: &'a Order,
    pub restaurant_name: &'a str,
    pub lines: Vec<ConfirmationLine>,
    pub driver_name: &'a str,
}

impl OrderConfirmation<'_> {
    pub fn subject(&self) -> String {
        format!("Order #{} confirmed", self.order.id.0)
    }

    pub fn body(&self) -> String {
        let order = self.order;
        let mut body = String::new();

        let _ = writeln!(body, "Thank you for your order!");
        let _ = writeln!(body);
        let _ = writeln!(body, "Order #{} from {}", order.id.0, self.restaurant_name);
        let _ = writeln!(body);
        for line in &self.lines {
            let _ = writeln!(
                body,
                "  {} x {} @ {} = {}",
                line.quantity,
                line.product_name,
                line.unit_price,
                line.subtotal()
            );
        }
        let _ = writeln!(body);
        let _ = writeln!(body, "Total: {}", order.total);
        let _ = writeln!(body, "Delivery address: {}", order.delivery_address);
        let _ = writeln!(body, "Payment method: {}", order.payment_method);
        if !order.comments.trim().is_empty() {
            let _ = writeln!(body, "Comments: {}", order.comments.trim());
        }
        let _ = writeln!(body, "Driver: {}", self.driver_name);

        body
    }

    pub fn render(&self, to: &str) -> OutgoingEmail {
        OutgoingEmail {
            to: to.to_string(),
            subject: self.subject(),
            body: self.body(),
        }
    }
}

/// Email carrying the account activation link.
pub fn activation_email(to: &str, display_name: &str, link: &str) -> OutgoingEmail {
    OutgoingEmail {
        to: to.to_string(),
        subject: "Activate your account".to_string(),
        body: format!(
            "Hi {display_name},\n\nConfirm your email address to activate your account:\n\n{link}\n\nIf you did not register, ignore this message.\n"
        ),
    }
}
