use super::query::QuerySpec;
use crate::cart::CartLine;
use crate::checkout::CheckoutForm;
use crate::clients::ActorClient;
use crate::http::{AppError, AppState};
use crate::identity::ValidationErrors;
use crate::model::{
    Account, ClientCreate, ClientId, ClientUpdate, Delivery, DeliveryCreate, DeliveryId,
    DeliveryUpdate, DriverCreate, DriverId, DriverUpdate, Order, OrderId, OrderUpdate,
    ProductCreate, ProductId, ProductUpdate, RestaurantCreate, RestaurantId, RestaurantUpdate,
    ReviewCreate, ReviewId, ReviewUpdate,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A store exposed under `/api/<NAME>/`.
///
/// Records travel as JSON values so list queries can run over any of them.
#[async_trait]
pub trait ApiResource: Send + Sync + 'static {
    const NAME: &'static str;
    const QUERY: QuerySpec;

    type Create: DeserializeOwned + Send + 'static;
    type Update: DeserializeOwned + Send + 'static;

    async fn list(state: &AppState) -> Result<Vec<Value>, AppError>;

    async fn retrieve(state: &AppState, id: u32) -> Result<Value, AppError>;

    async fn create(state: &AppState, account: &Account, body: Self::Create) -> Result<Value, AppError>;

    async fn update(state: &AppState, id: u32, body: Self::Update) -> Result<Value, AppError>;

    async fn destroy(state: &AppState, id: u32) -> Result<(), AppError>;
}

fn to_value(record: &impl Serialize) -> Result<Value, AppError> {
    serde_json::to_value(record).map_err(|e| AppError::Internal(e.to_string()))
}

/// Serializes `record` and adds display names next to its foreign keys.
fn annotated<const N: usize>(
    record: &impl Serialize,
    names: [(&str, Option<String>); N],
) -> Result<Value, AppError> {
    let mut value = to_value(record)?;
    if let Value::Object(map) = &mut value {
        for (key, name) in names {
            map.insert(key.to_string(), name.map(Value::String).unwrap_or(Value::Null));
        }
    }
    Ok(value)
}

fn not_found(id: impl ToString) -> AppError {
    AppError::NotFound(id.to_string())
}

fn single(mut values: Vec<Value>, id: impl ToString) -> Result<Value, AppError> {
    values.pop().ok_or_else(|| not_found(id))
}

fn check(errors: ValidationErrors) -> Result<(), AppError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

async fn client_names(state: &AppState) -> Result<HashMap<ClientId, String>, AppError> {
    Ok(state
        .stores
        .clients
        .all()
        .await?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect())
}

pub struct Orders;

/// Body of `POST /api/orders/`: explicit lines plus the checkout fields.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRequest {
    pub items: Vec<CartLine>,
    #[serde(flatten)]
    pub form: CheckoutForm,
}

impl Orders {
    async fn values(state: &AppState, orders: Vec<Order>) -> Result<Vec<Value>, AppError> {
        let clients = client_names(state).await?;
        let restaurants: HashMap<RestaurantId, String> = state
            .stores
            .restaurants
            .all()
            .await?
            .into_iter()
            .map(|r| (r.id, r.name))
            .collect();

        orders
            .iter()
            .map(|order| {
                annotated(
                    order,
                    [
                        ("client", clients.get(&order.client_id).cloned()),
                        ("restaurant", restaurants.get(&order.restaurant_id).cloned()),
                    ],
                )
            })
            .collect()
    }
}

#[async_trait]
impl ApiResource for Orders {
    const NAME: &'static str = "orders";
    const QUERY: QuerySpec = QuerySpec {
        filters: &["client_id", "restaurant_id", "status", "total"],
        search: &["client", "restaurant"],
        ordering: &["creation_date", "status", "total"],
        default_ordering: "-creation_date",
    };

    type Create = OrderRequest;
    type Update = OrderUpdate;

    async fn list(state: &AppState) -> Result<Vec<Value>, AppError> {
        let orders = state.stores.orders.all().await?;
        Self::values(state, orders).await
    }

    async fn retrieve(state: &AppState, id: u32) -> Result<Value, AppError> {
        let id = OrderId(id);
        let order = state.stores.orders.get(id).await?.ok_or_else(|| not_found(id))?;
        single(Self::values(state, vec![order]).await?, id)
    }

    /// Runs the checkout workflow over the given lines. The session cart is
    /// not touched.
    async fn create(state: &AppState, account: &Account, body: OrderRequest) -> Result<Value, AppError> {
        if body.items.is_empty() {
            return Err(AppError::invalid("items", "at least one item is required"));
        }
        let receipt = state
            .checkout
            .place_order(account, &body.items, &body.form)
            .await?;
        to_value(&receipt)
    }

    async fn update(state: &AppState, id: u32, body: OrderUpdate) -> Result<Value, AppError> {
        let order = state.stores.orders.update_order(OrderId(id), body).await?;
        single(Self::values(state, vec![order]).await?, OrderId(id))
    }

    async fn destroy(state: &AppState, id: u32) -> Result<(), AppError> {
        Ok(state.stores.orders.delete(OrderId(id)).await?)
    }
}

pub struct Products;

#[async_trait]
impl ApiResource for Products {
    const NAME: &'static str = "products";
    const QUERY: QuerySpec = QuerySpec {
        filters: &["restaurant_id", "availability"],
        search: &["name"],
        ordering: &["price", "availability"],
        default_ordering: "-price",
    };

    type Create = ProductCreate;
    type Update = ProductUpdate;

    async fn list(state: &AppState) -> Result<Vec<Value>, AppError> {
        state.stores.products.all().await?.iter().map(to_value).collect()
    }

    async fn retrieve(state: &AppState, id: u32) -> Result<Value, AppError> {
        let id = ProductId(id);
        let product = state.stores.products.get(id).await?.ok_or_else(|| not_found(id))?;
        to_value(&product)
    }

    async fn create(state: &AppState, _account: &Account, body: ProductCreate) -> Result<Value, AppError> {
        if state.stores.restaurants.get(body.restaurant_id).await?.is_none() {
            return Err(AppError::invalid("restaurant_id", "restaurant does not exist"));
        }
        let id = state.stores.products.create_product(body).await?;
        Self::retrieve(state, id.0).await
    }

    async fn update(state: &AppState, id: u32, body: ProductUpdate) -> Result<Value, AppError> {
        to_value(&state.stores.products.update_product(ProductId(id), body).await?)
    }

    async fn destroy(state: &AppState, id: u32) -> Result<(), AppError> {
        Ok(state.stores.products.delete(ProductId(id)).await?)
    }
}

pub struct Restaurants;

#[async_trait]
impl ApiResource for Restaurants {
    const NAME: &'static str = "restaurants";
    const QUERY: QuerySpec = QuerySpec {
        filters: &["name", "opening_time", "closing_time"],
        search: &["name"],
        ordering: &["rating", "opening_time", "closing_time"],
        default_ordering: "-rating",
    };

    type Create = RestaurantCreate;
    type Update = RestaurantUpdate;

    async fn list(state: &AppState) -> Result<Vec<Value>, AppError> {
        state.stores.restaurants.all().await?.iter().map(to_value).collect()
    }

    async fn retrieve(state: &AppState, id: u32) -> Result<Value, AppError> {
        let id = RestaurantId(id);
        let restaurant = state.stores.restaurants.get(id).await?.ok_or_else(|| not_found(id))?;
        to_value(&restaurant)
    }

    async fn create(state: &AppState, _account: &Account, body: RestaurantCreate) -> Result<Value, AppError> {
        let id = state.stores.restaurants.create_restaurant(body).await?;
        Self::retrieve(state, id.0).await
    }

    async fn update(state: &AppState, id: u32, body: RestaurantUpdate) -> Result<Value, AppError> {
        to_value(&state.stores.restaurants.update_restaurant(RestaurantId(id), body).await?)
    }

    async fn destroy(state: &AppState, id: u32) -> Result<(), AppError> {
        Ok(state.stores.restaurants.delete(RestaurantId(id)).await?)
    }
}

pub struct Clients;

#[async_trait]
impl ApiResource for Clients {
    const NAME: &'static str = "clients";
    const QUERY: QuerySpec = QuerySpec {
        filters: &["name", "email", "registration_date"],
        search: &["name", "email"],
        ordering: &["registration_date"],
        default_ordering: "-registration_date",
    };

    type Create = ClientCreate;
    type Update = ClientUpdate;

    async fn list(state: &AppState) -> Result<Vec<Value>, AppError> {
        state.stores.clients.all().await?.iter().map(to_value).collect()
    }

    async fn retrieve(state: &AppState, id: u32) -> Result<Value, AppError> {
        let id = ClientId(id);
        let client = state.stores.clients.get(id).await?.ok_or_else(|| not_found(id))?;
        to_value(&client)
    }

    async fn create(state: &AppState, _account: &Account, body: ClientCreate) -> Result<Value, AppError> {
        let id = state.stores.clients.create_client(body).await?;
        Self::retrieve(state, id.0).await
    }

    async fn update(state: &AppState, id: u32, body: ClientUpdate) -> Result<Value, AppError> {
        to_value(&state.stores.clients.update_client(ClientId(id), body).await?)
    }

    async fn destroy(state: &AppState, id: u32) -> Result<(), AppError> {
        Ok(state.stores.clients.delete(ClientId(id)).await?)
    }
}

pub struct Drivers;

#[async_trait]
impl ApiResource for Drivers {
    const NAME: &'static str = "drivers";
    const QUERY: QuerySpec = QuerySpec {
        filters: &["name", "email", "availability"],
        search: &["name", "email"],
        ordering: &["availability"],
        default_ordering: "-availability",
    };

    type Create = DriverCreate;
    type Update = DriverUpdate;

    async fn list(state: &AppState) -> Result<Vec<Value>, AppError> {
        state.stores.drivers.all().await?.iter().map(to_value).collect()
    }

    async fn retrieve(state: &AppState, id: u32) -> Result<Value, AppError> {
        let id = DriverId(id);
        let driver = state.stores.drivers.get(id).await?.ok_or_else(|| not_found(id))?;
        to_value(&driver)
    }

    async fn create(state: &AppState, _account: &Account, body: DriverCreate) -> Result<Value, AppError> {
        let id = state.stores.drivers.create_driver(body).await?;
        Self::retrieve(state, id.0).await
    }

    async fn update(state: &AppState, id: u32, body: DriverUpdate) -> Result<Value, AppError> {
        to_value(&state.stores.drivers.update_driver(DriverId(id), body).await?)
    }

    async fn destroy(state: &AppState, id: u32) -> Result<(), AppError> {
        Ok(state.stores.drivers.delete(DriverId(id)).await?)
    }
}

pub struct Reviews;

#[async_trait]
impl ApiResource for Reviews {
    const NAME: &'static str = "reviews";
    const QUERY: QuerySpec = QuerySpec {
        filters: &["client_id", "restaurant_id", "order_id", "rating"],
        search: &["comment"],
        ordering: &["review_date", "rating"],
        default_ordering: "-review_date",
    };

    type Create = ReviewCreate;
    type Update = ReviewUpdate;

    async fn list(state: &AppState) -> Result<Vec<Value>, AppError> {
        state.stores.reviews.all().await?.iter().map(to_value).collect()
    }

    async fn retrieve(state: &AppState, id: u32) -> Result<Value, AppError> {
        let id = ReviewId(id);
        let review = state.stores.reviews.get(id).await?.ok_or_else(|| not_found(id))?;
        to_value(&review)
    }

    async fn create(state: &AppState, _account: &Account, body: ReviewCreate) -> Result<Value, AppError> {
        let mut errors = ValidationErrors::new();
        if state.stores.clients.get(body.client_id).await?.is_none() {
            errors.add("client_id", "client does not exist");
        }
        if state.stores.restaurants.get(body.restaurant_id).await?.is_none() {
            errors.add("restaurant_id", "restaurant does not exist");
        }
        if state.stores.orders.get(body.order_id).await?.is_none() {
            errors.add("order_id", "order does not exist");
        }
        check(errors)?;

        let id = state.stores.reviews.create_review(body).await?;
        Self::retrieve(state, id.0).await
    }

    async fn update(state: &AppState, id: u32, body: ReviewUpdate) -> Result<Value, AppError> {
        to_value(&state.stores.reviews.update_review(ReviewId(id), body).await?)
    }

    async fn destroy(state: &AppState, id: u32) -> Result<(), AppError> {
        Ok(state.stores.reviews.delete(ReviewId(id)).await?)
    }
}

pub struct Deliveries;

impl Deliveries {
    async fn values(state: &AppState, deliveries: Vec<Delivery>) -> Result<Vec<Value>, AppError> {
        let clients = client_names(state).await?;
        let order_clients: HashMap<OrderId, ClientId> = state
            .stores
            .orders
            .all()
            .await?
            .into_iter()
            .map(|o| (o.id, o.client_id))
            .collect();
        let drivers: HashMap<DriverId, String> = state
            .stores
            .drivers
            .all()
            .await?
            .into_iter()
            .map(|d| (d.id, d.name))
            .collect();

        deliveries
            .iter()
            .map(|delivery| {
                let client = order_clients
                    .get(&delivery.order_id)
                    .and_then(|id| clients.get(id))
                    .cloned();
                annotated(
                    delivery,
                    [
                        ("client", client),
                        ("driver", drivers.get(&delivery.driver_id).cloned()),
                    ],
                )
            })
            .collect()
    }
}

#[async_trait]
impl ApiResource for Deliveries {
    const NAME: &'static str = "deliveries";
    const QUERY: QuerySpec = QuerySpec {
        filters: &["order_id", "driver_id", "delivery_date", "delivery_time", "delivery_status"],
        search: &["client", "driver"],
        ordering: &["delivery_date", "delivery_time", "delivery_status"],
        default_ordering: "-delivery_date",
    };

    type Create = DeliveryCreate;
    type Update = DeliveryUpdate;

    async fn list(state: &AppState) -> Result<Vec<Value>, AppError> {
        let deliveries = state.stores.deliveries.all().await?;
        Self::values(state, deliveries).await
    }

    async fn retrieve(state: &AppState, id: u32) -> Result<Value, AppError> {
        let id = DeliveryId(id);
        let delivery = state.stores.deliveries.get(id).await?.ok_or_else(|| not_found(id))?;
        single(Self::values(state, vec![delivery]).await?, id)
    }

    async fn create(state: &AppState, _account: &Account, body: DeliveryCreate) -> Result<Value, AppError> {
        let mut errors = ValidationErrors::new();
        if state.stores.orders.get(body.order_id).await?.is_none() {
            errors.add("order_id", "order does not exist");
        }
        if state.stores.drivers.get(body.driver_id).await?.is_none() {
            errors.add("driver_id", "driver does not exist");
        }
        check(errors)?;

        let id = state.stores.deliveries.create_delivery(body).await?;
        Self::retrieve(state, id.0).await
    }

    async fn update(state: &AppState, id: u32, body: DeliveryUpdate) -> Result<Value, AppError> {
        if let Some(driver_id) = body.driver_id {
            if state.stores.drivers.get(driver_id).await?.is_none() {
                return Err(AppError::invalid("driver_id", "driver does not exist"));
            }
        }
        let delivery = state.stores.deliveries.update_delivery(DeliveryId(id), body).await?;
        single(Self::values(state, vec![delivery]).await?, DeliveryId(id))
    }

    async fn destroy(state: &AppState, id: u32) -> Result<(), AppError> {
        Ok(state.stores.deliveries.delete(DeliveryId(id)).await?)
    }
}
