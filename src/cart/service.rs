use super::{parse_quantity, Cart, CartError};
use crate::clients::{ActorClient, ProductClient};
use crate::model::{Product, ProductId};
use crate::session::FlashMessage;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::instrument;

/// A cart line resolved against the live catalog.
#[derive(Debug, Clone, Serialize)]
pub struct CartLineView {
    pub product: Product,
    pub quantity: u32,
    pub subtotal: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub total: Decimal,
}

/// Applies cart operations, checking products against the catalog.
///
/// Each mutation returns the flash message to show after the redirect, or
/// `None` when nothing changed.
#[derive(Clone)]
pub struct CartService {
    products: ProductClient,
}

impl CartService {
    pub fn new(products: ProductClient) -> Self {
        Self { products }
    }

    async fn product(&self, id: ProductId) -> Result<Product, CartError> {
        self.products
            .get(id)
            .await?
            .ok_or(CartError::ProductNotFound(id))
    }

    #[instrument(skip(self, cart))]
    pub async fn add(&self, cart: &mut Cart, id: ProductId) -> Result<FlashMessage, CartError> {
        let product = self.product(id).await?;
        cart.add(id);
        Ok(FlashMessage::success(format!("Added to cart: {}", product.name)))
    }

    /// Does not look the product up, so lines for deleted products can
    /// still be removed.
    pub fn remove(&self, cart: &mut Cart, id: ProductId) -> Option<FlashMessage> {
        cart.remove(id)
            .then(|| FlashMessage::info("Product removed from cart"))
    }

    #[instrument(skip(self, cart))]
    pub async fn increment(&self, cart: &mut Cart, id: ProductId) -> Result<FlashMessage, CartError> {
        let product = self.product(id).await?;
        cart.add(id);
        Ok(FlashMessage::success(format!(
            "Increased the quantity of {}",
            product.name
        )))
    }

    #[instrument(skip(self, cart))]
    pub async fn decrement(
        &self,
        cart: &mut Cart,
        id: ProductId,
    ) -> Result<Option<FlashMessage>, CartError> {
        let product = self.product(id).await?;
        Ok(cart.decrement(id).map(|left| {
            if left == 0 {
                FlashMessage::info(format!("{} removed from cart", product.name))
            } else {
                FlashMessage::success(format!("Reduced the quantity of {}", product.name))
            }
        }))
    }

    /// `raw` is the text typed into the quantity field.
    #[instrument(skip(self, cart))]
    pub async fn set_quantity(
        &self,
        cart: &mut Cart,
        id: ProductId,
        raw: &str,
    ) -> Result<FlashMessage, CartError> {
        let product = self.product(id).await?;
        let quantity = parse_quantity(raw);
        cart.set(id, quantity);
        Ok(if quantity == 0 {
            FlashMessage::info(format!("{} removed from cart", product.name))
        } else {
            FlashMessage::success(format!(
                "Quantity of {} updated to {}",
                product.name, quantity
            ))
        })
    }

    /// Resolves every line at the current price. Fails if any product has
    /// been deleted since it was added.
    #[instrument(skip_all, fields(lines = cart.len()))]
    pub async fn view(&self, cart: &Cart) -> Result<CartView, CartError> {
        let mut items = Vec::with_capacity(cart.len());
        let mut total = Decimal::ZERO;
        for line in cart.lines() {
            let product = self.product(line.product_id).await?;
            let subtotal = product.subtotal(line.quantity);
            total += subtotal;
            items.push(CartLineView {
                product,
                quantity: line.quantity,
                subtotal,
            });
        }
        Ok(CartView { items, total })
    }
}
