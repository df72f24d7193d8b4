use super::{AppError, AppState, Authenticated};
use crate::cart::CartView;
use crate::checkout::{CheckoutError, CheckoutForm, OrderSummary};
use crate::clients::ActorClient;
use crate::model::{OrderId, PaymentMethod};
use crate::session::FlashMessage;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Serialize;
use tracing::warn;

const CART_PAGE: &str = "/cart/";

#[derive(Serialize)]
pub struct CheckoutPage {
    #[serde(flatten)]
    pub cart: CartView,
    /// Suggested delivery address.
    pub delivery_address: String,
    pub payment_methods: [PaymentMethod; 3],
    pub messages: Vec<FlashMessage>,
}

pub async fn checkout_page(
    State(state): State<AppState>,
    Authenticated {
        account,
        mut session,
    }: Authenticated,
) -> Result<Response, AppError> {
    if session.data.cart.is_empty() {
        session.flash(FlashMessage::warning("Your cart is empty"));
        session.save().await;
        return Ok(Redirect::to(CART_PAGE).into_response());
    }

    let cart = state.cart.view(&session.data.cart).await?;
    let client_address = match account.client_id {
        Some(id) => state.stores.clients.get(id).await?.map(|c| c.address),
        None => None,
    }
    .unwrap_or_default();
    let delivery_address = if client_address.trim().is_empty() {
        account.profile.default_address.clone()
    } else {
        client_address
    };

    let messages = session.data.take_messages();
    session.save().await;
    Ok(Json(CheckoutPage {
        cart,
        delivery_address,
        payment_methods: [
            PaymentMethod::CreditCard,
            PaymentMethod::DebitCard,
            PaymentMethod::Cash,
        ],
        messages,
    })
    .into_response())
}

/// Places the session cart. Failures keep the cart and go back to it with a
/// message; a product that no longer exists is a 404.
pub async fn checkout(
    State(state): State<AppState>,
    Authenticated {
        account,
        mut session,
    }: Authenticated,
    Form(form): Form<CheckoutForm>,
) -> Result<Redirect, AppError> {
    let result = state
        .checkout
        .checkout(&account, &mut session.data.cart, &form)
        .await;

    let redirect = match result {
        Ok(receipt) => {
            let order_id = receipt.summary.order.id;
            session.flash(FlashMessage::success(format!(
                "Payment completed. Order #{} created and driver assigned.",
                order_id.0
            )));
            if !receipt.notified {
                session.flash(FlashMessage::info(
                    "We could not email your confirmation, but the order is placed.",
                ));
            }
            Redirect::to(&format!("/checkout/success/{}/", order_id.0))
        }
        Err(CheckoutError::ProductNotFound(id)) => {
            return Err(AppError::NotFound(id.to_string()));
        }
        Err(CheckoutError::EmptyCart) => {
            session.flash(FlashMessage::warning("Your cart is empty"));
            Redirect::to(CART_PAGE)
        }
        Err(e @ (CheckoutError::Unavailable { .. } | CheckoutError::Validation(_))) => {
            session.flash(FlashMessage::warning(e.to_string()));
            Redirect::to(CART_PAGE)
        }
        Err(e) => {
            warn!(account_id = %account.id, error = %e, "Checkout failed");
            session.flash(FlashMessage::error(
                "We could not place your order. Please try again.",
            ));
            Redirect::to(CART_PAGE)
        }
    };

    session.save().await;
    Ok(redirect)
}

#[derive(Serialize)]
pub struct SuccessPage {
    #[serde(flatten)]
    pub summary: OrderSummary,
    pub messages: Vec<FlashMessage>,
}

/// Only the customer who placed the order can see it.
pub async fn success(
    State(state): State<AppState>,
    Path(order_id): Path<u32>,
    Authenticated {
        account,
        mut session,
    }: Authenticated,
) -> Result<Json<SuccessPage>, AppError> {
    let order_id = OrderId(order_id);
    let summary = state
        .checkout
        .summary(order_id)
        .await?
        .filter(|s| Some(s.order.client_id) == account.client_id)
        .ok_or_else(|| AppError::NotFound(order_id.to_string()))?;

    let messages = session.data.take_messages();
    session.save().await;
    Ok(Json(SuccessPage { summary, messages }))
}
