use crate::model::ProductId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Product id to quantity, in the order products were first added.
///
/// No line ever holds a zero quantity: operations that reach zero remove the
/// line instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn quantity(&self, product_id: ProductId) -> u32 {
        self.position(product_id)
            .map(|i| self.lines[i].quantity)
            .unwrap_or(0)
    }

    /// Adds one unit, appending the line if the product is new.
    pub fn add(&mut self, product_id: ProductId) -> u32 {
        match self.position(product_id) {
            Some(i) => {
                self.lines[i].quantity = self.lines[i].quantity.saturating_add(1);
                self.lines[i].quantity
            }
            None => {
                self.lines.push(CartLine {
                    product_id,
                    quantity: 1,
                });
                1
            }
        }
    }

    /// Removes the line. Returns whether there was one.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        match self.position(product_id) {
            Some(i) => {
                self.lines.remove(i);
                true
            }
            None => false,
        }
    }

    /// Takes one unit away; the line goes when it reaches zero. Returns the
    /// new quantity, or `None` if the product was not in the cart.
    pub fn decrement(&mut self, product_id: ProductId) -> Option<u32> {
        let i = self.position(product_id)?;
        let quantity = self.lines[i].quantity.saturating_sub(1);
        if quantity == 0 {
            self.lines.remove(i);
        } else {
            self.lines[i].quantity = quantity;
        }
        Some(quantity)
    }

    /// Sets an explicit quantity; zero removes the line. An existing line
    /// keeps its position.
    pub fn set(&mut self, product_id: ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove(product_id);
            return;
        }
        match self.position(product_id) {
            Some(i) => self.lines[i].quantity = quantity,
            None => self.lines.push(CartLine {
                product_id,
                quantity,
            }),
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.lines.iter().position(|l| l.product_id == product_id)
    }
}

/// Reads the quantity typed into the cart form. Anything that is not an
/// integer counts as 1; negative numbers count as 0.
pub fn parse_quantity(raw: &str) -> u32 {
    match raw.trim().parse::<i64>() {
        Ok(n) if n <= 0 => 0,
        Ok(n) => u32::try_from(n).unwrap_or(u32::MAX),
        Err(_) => 1,
    }
}
