use chrono::{NaiveTime, Utc};
use food_delivery::clients::{ActorClient, DeliveryClient, OrderItemClient, ReviewClient};
use food_delivery::model::{
    ClientId, Delivery, DeliveryId, DeliveryStatus, DriverId, OrderCreate, OrderId,
    OrderItem, OrderItemId, OrderStatus, PaymentMethod, ProductId, RestaurantId, Review,
};
use food_delivery::order_actor::{OrderContext, OrderError};
use resource_actor::mock::MockClient;
use resource_actor::FrameworkError;
use rust_decimal::Decimal;

fn order_params() -> OrderCreate {
    OrderCreate {
        client_id: ClientId(1),
        restaurant_id: RestaurantId(1),
        status: OrderStatus::Pending,
        total: Decimal::new(1350, 2),
        delivery_date: Utc::now(),
        delivery_address: "Calle 5 #12".to_string(),
        payment_method: PaymentMethod::Cash,
        comments: String::new(),
    }
}

struct Mocks {
    items: MockClient<OrderItem>,
    deliveries: MockClient<Delivery>,
    reviews: MockClient<Review>,
}

impl Mocks {
    fn new() -> Self {
        Self {
            items: MockClient::new(),
            deliveries: MockClient::new(),
            reviews: MockClient::new(),
        }
    }

    fn context(&self) -> OrderContext {
        OrderContext {
            order_items: OrderItemClient::new(self.items.client()),
            deliveries: DeliveryClient::new(self.deliveries.client()),
            reviews: ReviewClient::new(self.reviews.client()),
        }
    }

    fn verify(&self) {
        self.items.verify();
        self.deliveries.verify();
        self.reviews.verify();
    }
}

/// Real Order actor, mocked stores below it.
#[tokio::test]
async fn test_order_delete_cascades_to_items_and_delivery() {
    let mut mocks = Mocks::new();
    let (order_actor, orders) = food_delivery::order_actor::new();
    let handle = tokio::spawn(order_actor.run(mocks.context()));

    let order_id = orders.create_order(order_params()).await.unwrap();
    assert_eq!(order_id, OrderId(1));

    mocks.items.expect_list().return_ok(vec![OrderItem {
        id: OrderItemId(4),
        order_id,
        product_id: ProductId(2),
        quantity: 2,
        unit_price: Decimal::new(500, 2),
    }]);
    mocks.items.expect_delete(OrderItemId(4)).return_ok(());
    mocks.deliveries.expect_list().return_ok(vec![Delivery {
        id: DeliveryId(9),
        order_id,
        driver_id: DriverId(1),
        delivery_date: Utc::now(),
        delivery_time: NaiveTime::from_hms_opt(12, 30, 0).unwrap(),
        delivery_status: DeliveryStatus::Pending,
    }]);
    mocks.deliveries.expect_delete(DeliveryId(9)).return_ok(());
    mocks.reviews.expect_list().return_ok(vec![]);

    orders.delete(order_id).await.unwrap();
    assert!(orders.get(order_id).await.unwrap().is_none());
    mocks.verify();

    drop(orders);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_failed_cascade_keeps_the_order() {
    let mut mocks = Mocks::new();
    let (order_actor, orders) = food_delivery::order_actor::new();
    let handle = tokio::spawn(order_actor.run(mocks.context()));
    let order_id = orders.create_order(order_params()).await.unwrap();

    mocks.items.expect_list().return_ok(vec![]);
    mocks.deliveries.expect_list().return_err(FrameworkError::ActorClosed);

    let err = orders.delete(order_id).await.unwrap_err();
    assert!(matches!(err, OrderError::ActorCommunicationError(msg) if msg.starts_with("cascade failed")));
    assert!(orders.get(order_id).await.unwrap().is_some());
    mocks.verify();

    drop(orders);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_negative_total_is_rejected() {
    let mocks = Mocks::new();
    let (order_actor, orders) = food_delivery::order_actor::new();
    let handle = tokio::spawn(order_actor.run(mocks.context()));

    let mut params = order_params();
    params.total = Decimal::new(-1, 2);
    let err = orders.create_order(params).await.unwrap_err();
    assert!(matches!(err, OrderError::ValidationError(_)));
    assert!(orders.all().await.unwrap().is_empty());

    drop(orders);
    handle.await.unwrap();
}
