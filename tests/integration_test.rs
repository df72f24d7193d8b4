use chrono::{NaiveTime, Utc};
use food_delivery::cart::{Cart, CartService};
use food_delivery::checkout::{CheckoutError, CheckoutForm, CheckoutService};
use food_delivery::clients::ActorClient;
use food_delivery::delivery_actor::DeliveryError;
use food_delivery::lifecycle::{DeliverySystem, Stores};
use food_delivery::model::{
    Account, AccountCreate, ClientCreate, ClientId, DeliveryCreate, DeliveryStatus, DriverCreate, DriverId,
    OrderCreate, OrderId, OrderStatus, PaymentMethod, ProductCreate, ProductId, ProductUpdate,
    Profile, RestaurantCreate, RestaurantId,
};
use food_delivery::notification::MemoryMailer;
use rust_decimal::Decimal;
use std::sync::Arc;

fn restaurant(name: &str) -> RestaurantCreate {
    RestaurantCreate {
        name: name.to_string(),
        address: "Av. Central 100".to_string(),
        phone_number: "555-0100".to_string(),
        opening_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        closing_time: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
        rating: Decimal::new(45, 1),
    }
}

fn product(restaurant_id: RestaurantId, name: &str, cents: i64, availability: bool) -> ProductCreate {
    ProductCreate {
        restaurant_id,
        name: name.to_string(),
        price: Decimal::new(cents, 2),
        description: String::new(),
        availability,
    }
}

fn driver(name: &str, availability: bool) -> DriverCreate {
    DriverCreate {
        name: name.to_string(),
        email: format!("{}@drivers.test", name.to_lowercase()),
        phone_number: String::new(),
        vehicle_type: "Bike".to_string(),
        availability,
    }
}

async fn account(stores: &Stores, username: &str) -> Account {
    let id = stores
        .accounts
        .create_account(AccountCreate {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            first_name: String::new(),
            last_name: String::new(),
            password_hash: "unused".to_string(),
            profile: Profile {
                phone: String::new(),
                default_address: "Calle 5 #12".to_string(),
            },
        })
        .await
        .expect("Failed to create account");
    stores.accounts.get(id).await.unwrap().expect("Account not found")
}

struct Fixture {
    system: DeliverySystem,
    mailer: MemoryMailer,
    checkout: CheckoutService,
    restaurant: RestaurantId,
    burger: ProductId,
    fries: ProductId,
}

async fn fixture() -> Fixture {
    let system = DeliverySystem::new();
    let stores = &system.stores;

    let restaurant = stores.restaurants.create_restaurant(restaurant("Burger Barn")).await.unwrap();
    let burger = stores
        .products
        .create_product(product(restaurant, "Burger", 500, true))
        .await
        .unwrap();
    let fries = stores
        .products
        .create_product(product(restaurant, "Fries", 350, true))
        .await
        .unwrap();

    let mailer = MemoryMailer::new();
    let checkout = CheckoutService::new(stores.clone(), Arc::new(mailer.clone()));
    Fixture {
        system,
        mailer,
        checkout,
        restaurant,
        burger,
        fries,
    }
}

#[tokio::test]
async fn test_checkout_places_order_with_items_and_delivery() {
    let f = fixture().await;
    let stores = &f.system.stores;
    stores.drivers.create_driver(driver("Dana", true)).await.unwrap();
    let alice = account(stores, "alice").await;

    let mut cart = Cart::new();
    cart.set(f.burger, 2);
    cart.set(f.fries, 1);

    let form = CheckoutForm {
        delivery_address: String::new(),
        payment_method: PaymentMethod::CreditCard,
        comments: "Ring twice".to_string(),
    };
    let receipt = f.checkout.checkout(&alice, &mut cart, &form).await.unwrap();

    let order = &receipt.summary.order;
    assert_eq!(order.total, Decimal::new(1350, 2));
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.restaurant_id, f.restaurant);
    assert_eq!(order.delivery_address, "Calle 5 #12");
    assert_eq!(receipt.summary.items.len(), 2);
    assert_eq!(
        receipt.summary.delivery.as_ref().map(|d| d.delivery_status),
        Some(DeliveryStatus::Pending)
    );
    assert_eq!(receipt.summary.driver.as_ref().map(|d| d.name.as_str()), Some("Dana"));
    assert!(cart.is_empty());

    let order_id = order.id;
    let deliveries = stores.deliveries.find(move |d| d.order_id == order_id).await.unwrap();
    assert_eq!(deliveries.len(), 1);

    // The account is now linked to the client the order was placed for.
    let alice = stores.accounts.get(alice.id).await.unwrap().unwrap();
    assert_eq!(alice.client_id, Some(order.client_id));

    assert!(receipt.notified);
    let sent = f.mailer.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "alice@example.com");
    assert!(sent[0].body.contains("Total: 13.50"));
    assert!(sent[0].body.contains("Dana"));
}

#[tokio::test]
async fn test_items_keep_the_price_paid() {
    let f = fixture().await;
    let stores = &f.system.stores;
    stores.drivers.create_driver(driver("Dana", true)).await.unwrap();
    let alice = account(stores, "alice").await;

    let mut cart = Cart::new();
    cart.set(f.burger, 2);
    let receipt = f
        .checkout
        .checkout(&alice, &mut cart, &CheckoutForm::default())
        .await
        .unwrap();
    let order_id = receipt.summary.order.id;

    stores
        .products
        .update_product(
            f.burger,
            ProductUpdate {
                price: Some(Decimal::new(999, 2)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let items = stores.order_items.for_order(order_id).await.unwrap();
    assert_eq!(items[0].unit_price, Decimal::new(500, 2));
    let order = stores.orders.get(order_id).await.unwrap().unwrap();
    assert_eq!(order.total, Decimal::new(1000, 2));
}

#[tokio::test]
async fn test_least_loaded_available_driver_is_assigned() {
    let f = fixture().await;
    let stores = &f.system.stores;
    let d1 = stores.drivers.create_driver(driver("D1", true)).await.unwrap();
    let d2 = stores.drivers.create_driver(driver("D2", true)).await.unwrap();
    stores.drivers.create_driver(driver("D3", false)).await.unwrap();

    // Two open deliveries for D1.
    for _ in 0..2 {
        let order_id = stores
            .orders
            .create_order(OrderCreate {
                client_id: ClientId(99),
                restaurant_id: f.restaurant,
                status: OrderStatus::Pending,
                total: Decimal::new(500, 2),
                delivery_date: Utc::now(),
                delivery_address: "Elsewhere".to_string(),
                payment_method: PaymentMethod::Cash,
                comments: String::new(),
            })
            .await
            .unwrap();
        stores
            .deliveries
            .create_delivery(DeliveryCreate {
                order_id,
                driver_id: d1,
                delivery_date: Utc::now(),
                delivery_time: Utc::now().time(),
                delivery_status: DeliveryStatus::InTransit,
            })
            .await
            .unwrap();
    }

    let alice = account(stores, "alice").await;
    let mut cart = Cart::new();
    cart.add(f.fries);
    let receipt = f
        .checkout
        .checkout(&alice, &mut cart, &CheckoutForm::default())
        .await
        .unwrap();

    assert_eq!(receipt.summary.delivery.map(|d| d.driver_id), Some(d2));
}

#[tokio::test]
async fn test_stand_in_driver_created_when_none_exist() {
    let f = fixture().await;
    let stores = &f.system.stores;
    let alice = account(stores, "alice").await;

    let mut cart = Cart::new();
    cart.add(f.burger);
    let receipt = f
        .checkout
        .checkout(&alice, &mut cart, &CheckoutForm::default())
        .await
        .unwrap();

    let drivers = stores.drivers.all().await.unwrap();
    assert_eq!(drivers.len(), 1);
    assert_eq!(drivers[0].name, "Assigned Driver");
    assert_eq!(receipt.summary.delivery.map(|d| d.driver_id), Some(drivers[0].id));
}

#[tokio::test]
async fn test_unavailable_or_missing_product_creates_nothing() {
    let f = fixture().await;
    let stores = &f.system.stores;
    let alice = account(stores, "alice").await;
    let sold_out = stores
        .products
        .create_product(product(f.restaurant, "Milkshake", 400, false))
        .await
        .unwrap();

    let mut cart = Cart::new();
    cart.add(f.burger);
    cart.add(sold_out);
    let err = f
        .checkout
        .checkout(&alice, &mut cart, &CheckoutForm::default())
        .await
        .unwrap_err();
    assert!(matches!(err, CheckoutError::Unavailable { id, .. } if id == sold_out));
    assert_eq!(cart.len(), 2);

    let mut cart = Cart::new();
    cart.add(ProductId(404));
    let err = f
        .checkout
        .checkout(&alice, &mut cart, &CheckoutForm::default())
        .await
        .unwrap_err();
    assert_eq!(err, CheckoutError::ProductNotFound(ProductId(404)));

    assert!(stores.orders.all().await.unwrap().is_empty());
    assert!(stores.order_items.all().await.unwrap().is_empty());
    assert!(stores.deliveries.all().await.unwrap().is_empty());
    assert!(f.mailer.sent().await.is_empty());
}

#[tokio::test]
async fn test_empty_cart_is_rejected() {
    let f = fixture().await;
    let alice = account(&f.system.stores, "alice").await;

    let err = f
        .checkout
        .checkout(&alice, &mut Cart::new(), &CheckoutForm::default())
        .await
        .unwrap_err();
    assert_eq!(err, CheckoutError::EmptyCart);
}

#[tokio::test]
async fn test_mail_failure_does_not_fail_the_order() {
    let f = fixture().await;
    let stores = &f.system.stores;
    let alice = account(stores, "alice").await;
    f.mailer.set_failing(true);

    let mut cart = Cart::new();
    cart.add(f.burger);
    let receipt = f
        .checkout
        .checkout(&alice, &mut cart, &CheckoutForm::default())
        .await
        .unwrap();

    assert!(!receipt.notified);
    assert_eq!(stores.orders.all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_confirmation_goes_to_the_account_email() {
    let f = fixture().await;
    let stores = &f.system.stores;
    // Another customer already registered under the same display name.
    let namesake = stores
        .clients
        .create_client(ClientCreate {
            name: "alice".to_string(),
            email: "stranger@other.test".to_string(),
            address: "Somewhere else".to_string(),
            phone_number: String::new(),
        })
        .await
        .unwrap();
    let alice = account(stores, "alice").await;
    assert!(alice.client_id.is_none());

    let mut cart = Cart::new();
    cart.add(f.burger);
    let receipt = f
        .checkout
        .checkout(&alice, &mut cart, &CheckoutForm::default())
        .await
        .unwrap();
    assert_eq!(receipt.summary.order.client_id, namesake);

    let sent = f.mailer.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "alice@example.com");
}

#[tokio::test]
async fn test_checkout_address_is_stored_on_the_client() {
    let f = fixture().await;
    let stores = &f.system.stores;
    let alice = account(stores, "alice").await;

    let mut cart = Cart::new();
    cart.add(f.fries);
    let form = CheckoutForm {
        delivery_address: "  Rue 9 ".to_string(),
        ..Default::default()
    };
    let receipt = f.checkout.checkout(&alice, &mut cart, &form).await.unwrap();

    assert_eq!(receipt.summary.order.delivery_address, "Rue 9");
    let client = stores
        .clients
        .get(receipt.summary.order.client_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(client.address, "Rue 9");
}

#[tokio::test]
async fn test_second_delivery_for_an_order_conflicts() {
    let f = fixture().await;
    let stores = &f.system.stores;
    stores.drivers.create_driver(driver("Dana", true)).await.unwrap();
    let alice = account(stores, "alice").await;

    let mut cart = Cart::new();
    cart.add(f.burger);
    let receipt = f
        .checkout
        .checkout(&alice, &mut cart, &CheckoutForm::default())
        .await
        .unwrap();

    let again = stores
        .deliveries
        .create_delivery(DeliveryCreate {
            order_id: receipt.summary.order.id,
            driver_id: DriverId(1),
            delivery_date: Utc::now(),
            delivery_time: Utc::now().time(),
            delivery_status: DeliveryStatus::Pending,
        })
        .await;
    assert!(matches!(again, Err(DeliveryError::Conflict(_))));
}

#[tokio::test]
async fn test_deleting_a_restaurant_cascades() {
    let f = fixture().await;
    let stores = &f.system.stores;
    stores.drivers.create_driver(driver("Dana", true)).await.unwrap();
    let alice = account(stores, "alice").await;

    let other = stores.restaurants.create_restaurant(restaurant("Taco Town")).await.unwrap();
    let taco = stores
        .products
        .create_product(product(other, "Taco", 300, true))
        .await
        .unwrap();

    let mut cart = Cart::new();
    cart.add(f.burger);
    f.checkout
        .checkout(&alice, &mut cart, &CheckoutForm::default())
        .await
        .unwrap();

    stores.restaurants.delete(f.restaurant).await.unwrap();

    let products = stores.products.all().await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, taco);
    assert!(stores.orders.all().await.unwrap().is_empty());
    assert!(stores.order_items.all().await.unwrap().is_empty());
    assert!(stores.deliveries.all().await.unwrap().is_empty());
    assert_eq!(stores.drivers.all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_history_lists_newest_first() {
    let f = fixture().await;
    let stores = &f.system.stores;
    stores.drivers.create_driver(driver("Dana", true)).await.unwrap();
    let alice = account(stores, "alice").await;

    let mut ids = Vec::new();
    for product_id in [f.burger, f.fries] {
        let alice = stores.accounts.get(alice.id).await.unwrap().unwrap();
        let mut cart = Cart::new();
        cart.add(product_id);
        let receipt = f
            .checkout
            .checkout(&alice, &mut cart, &CheckoutForm::default())
            .await
            .unwrap();
        ids.push(receipt.summary.order.id);
    }

    let client_id = stores.accounts.get(alice.id).await.unwrap().unwrap().client_id.unwrap();
    let history: Vec<OrderId> = stores
        .orders
        .history(client_id)
        .await
        .unwrap()
        .into_iter()
        .map(|o| o.id)
        .collect();
    assert_eq!(history, vec![ids[1], ids[0]]);
    assert_eq!(stores.clients.all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_decrement_to_zero_removes_line() {
    let f = fixture().await;
    let service = CartService::new(f.system.stores.products.clone());
    let mut cart = Cart::new();

    service.add(&mut cart, f.burger).await.unwrap();
    let message = service.decrement(&mut cart, f.burger).await.unwrap();

    assert_eq!(message.map(|m| m.text), Some("Burger removed from cart".to_string()));
    assert!(cart.is_empty());
}

#[tokio::test]
async fn test_shutdown_stops_every_actor() {
    let f = fixture().await;
    drop(f.checkout);
    f.system.shutdown().await.expect("Shutdown failed");
}
