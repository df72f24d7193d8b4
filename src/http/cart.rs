//! Session cart pages. Every mutation redirects back to `/cart/`.

use super::{AppError, AppState, CurrentSession};
use crate::cart::CartView;
use crate::model::ProductId;
use crate::session::FlashMessage;
use axum::{
    extract::{Path, State},
    response::Redirect,
    Form, Json,
};
use serde::{Deserialize, Serialize};

const CART_PAGE: &str = "/cart/";

#[derive(Serialize)]
pub struct CartPage {
    #[serde(flatten)]
    pub cart: CartView,
    pub messages: Vec<FlashMessage>,
}

#[derive(Deserialize)]
pub struct QuantityForm {
    #[serde(default)]
    quantity: String,
}

pub async fn view_cart(
    State(state): State<AppState>,
    mut session: CurrentSession,
) -> Result<Json<CartPage>, AppError> {
    let cart = state.cart.view(&session.data.cart).await?;
    let messages = session.data.take_messages();
    session.save().await;
    Ok(Json(CartPage { cart, messages }))
}

pub async fn add(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    mut session: CurrentSession,
) -> Result<Redirect, AppError> {
    let message = state.cart.add(&mut session.data.cart, ProductId(id)).await?;
    session.flash(message);
    session.save().await;
    Ok(Redirect::to(CART_PAGE))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    mut session: CurrentSession,
) -> Redirect {
    if let Some(message) = state.cart.remove(&mut session.data.cart, ProductId(id)) {
        session.flash(message);
        session.save().await;
    }
    Redirect::to(CART_PAGE)
}

pub async fn increment(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    mut session: CurrentSession,
) -> Result<Redirect, AppError> {
    let message = state
        .cart
        .increment(&mut session.data.cart, ProductId(id))
        .await?;
    session.flash(message);
    session.save().await;
    Ok(Redirect::to(CART_PAGE))
}

pub async fn decrement(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    mut session: CurrentSession,
) -> Result<Redirect, AppError> {
    if let Some(message) = state
        .cart
        .decrement(&mut session.data.cart, ProductId(id))
        .await?
    {
        session.flash(message);
        session.save().await;
    }
    Ok(Redirect::to(CART_PAGE))
}

pub async fn set_quantity(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    mut session: CurrentSession,
    Form(form): Form<QuantityForm>,
) -> Result<Redirect, AppError> {
    let raw = if form.quantity.trim().is_empty() {
        "1"
    } else {
        form.quantity.as_str()
    };
    let message = state
        .cart
        .set_quantity(&mut session.data.cart, ProductId(id), raw)
        .await?;
    session.flash(message);
    session.save().await;
    Ok(Redirect::to(CART_PAGE))
}
