//! Catalog and order history pages.

use super::{AppError, AppState, Authenticated, CurrentSession};
use crate::clients::ActorClient;
use crate::model::{Order, Product, Restaurant, RestaurantId};
use crate::session::FlashMessage;
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

const HOME_RESTAURANTS: usize = 20;

#[derive(Serialize)]
pub struct RestaurantListPage {
    pub restaurants: Vec<Restaurant>,
    pub messages: Vec<FlashMessage>,
}

#[derive(Serialize)]
pub struct RestaurantPage {
    pub restaurant: Restaurant,
    pub products: Vec<Product>,
}

#[derive(Serialize)]
pub struct OrderHistoryPage {
    pub orders: Vec<Order>,
    pub messages: Vec<FlashMessage>,
}

/// Highest rated first; equal ratings keep id order.
async fn restaurants_by_rating(state: &AppState) -> Result<Vec<Restaurant>, AppError> {
    let mut restaurants = state.stores.restaurants.all().await?;
    restaurants.sort_by(|a, b| b.rating.cmp(&a.rating));
    Ok(restaurants)
}

pub async fn index(
    State(state): State<AppState>,
    mut session: CurrentSession,
) -> Result<Json<RestaurantListPage>, AppError> {
    let mut restaurants = restaurants_by_rating(&state).await?;
    restaurants.truncate(HOME_RESTAURANTS);

    let messages = session.data.take_messages();
    session.save().await;
    Ok(Json(RestaurantListPage {
        restaurants,
        messages,
    }))
}

pub async fn restaurant_list(
    State(state): State<AppState>,
    mut session: CurrentSession,
) -> Result<Json<RestaurantListPage>, AppError> {
    let restaurants = restaurants_by_rating(&state).await?;
    let messages = session.data.take_messages();
    session.save().await;
    Ok(Json(RestaurantListPage {
        restaurants,
        messages,
    }))
}

pub async fn restaurant_detail(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<RestaurantPage>, AppError> {
    let id = RestaurantId(id);
    let restaurant = state
        .stores
        .restaurants
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(id.to_string()))?;
    let products = state.stores.products.menu(id).await?;

    Ok(Json(RestaurantPage {
        restaurant,
        products,
    }))
}

pub async fn my_orders(
    State(state): State<AppState>,
    Authenticated {
        account,
        mut session,
    }: Authenticated,
) -> Result<Json<OrderHistoryPage>, AppError> {
    let orders = match account.client_id {
        Some(client_id) => state.stores.orders.history(client_id).await?,
        None => Vec::new(),
    };

    let messages = session.data.take_messages();
    session.save().await;
    Ok(Json(OrderHistoryPage { orders, messages }))
}
