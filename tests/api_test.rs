//! HTTP round trips through the full router, sessions included.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::NaiveTime;
use food_delivery::config::Config;
use food_delivery::http::{router, AppState};
use food_delivery::identity::RegistrationForm;
use food_delivery::lifecycle::DeliverySystem;
use food_delivery::model::{ProductCreate, RestaurantCreate, RestaurantId};
use food_delivery::notification::MemoryMailer;
use food_delivery::session::{MemorySessionStore, SessionStore};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

struct TestApp {
    _system: DeliverySystem,
    app: Router,
    sessions: Arc<MemorySessionStore>,
    cookie: Option<String>,
}

impl TestApp {
    async fn send(&mut self, request: Request<Body>) -> Response {
        let response = self.app.clone().oneshot(request).await.unwrap();
        if let Some(set) = response.headers().get(header::SET_COOKIE) {
            let pair = set.to_str().unwrap().split(';').next().unwrap().to_string();
            self.cookie = Some(pair);
        }
        response
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    async fn get(&mut self, uri: &str) -> Response {
        let request = self.request("GET", uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    async fn post_form(&mut self, uri: &str, body: &str) -> Response {
        let request = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn send_json(&mut self, method: &str, uri: &str, body: Value) -> Response {
        let request = self
            .request(method, uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn login(&mut self) {
        let response = self
            .post_form("/login/", "username=alice&password=rabbit-hole")
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/perfil/");
    }
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn names(list: &Value) -> Vec<&str> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect()
}

async fn restaurant(system: &DeliverySystem, name: &str, rating: i64) -> RestaurantId {
    system
        .stores
        .restaurants
        .create_restaurant(RestaurantCreate {
            name: name.to_string(),
            address: "Av. Central 100".to_string(),
            phone_number: "555-0100".to_string(),
            opening_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            closing_time: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
            rating: Decimal::new(rating, 1),
        })
        .await
        .unwrap()
}

async fn product(system: &DeliverySystem, restaurant_id: RestaurantId, name: &str, cents: i64, availability: bool) {
    system
        .stores
        .products
        .create_product(ProductCreate {
            restaurant_id,
            name: name.to_string(),
            price: Decimal::new(cents, 2),
            description: String::new(),
            availability,
        })
        .await
        .unwrap();
}

/// Two restaurants, four products and an active account `alice`.
async fn setup() -> TestApp {
    let system = DeliverySystem::new();
    let barn = restaurant(&system, "Burger Barn", 45).await;
    let tacos = restaurant(&system, "Taco Town", 48).await;
    product(&system, barn, "Burger", 500, true).await;
    product(&system, barn, "Veggie Burger", 1250, false).await;
    product(&system, barn, "Fries", 350, true).await;
    product(&system, tacos, "Taco", 300, true).await;

    // With DEBUG set, a failed activation email activates the account.
    let mailer = MemoryMailer::new();
    mailer.set_failing(true);
    let config = Config {
        debug: true,
        bcrypt_cost: 4,
        ..Config::default()
    };
    let mut state = AppState::new(config, system.stores.clone(), Arc::new(mailer));
    let sessions = Arc::new(MemorySessionStore::new());
    let store: Arc<dyn SessionStore> = sessions.clone();
    state.sessions = store;
    state
        .identity
        .register(RegistrationForm {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "rabbit-hole".to_string(),
            password_confirm: "rabbit-hole".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    TestApp {
        _system: system,
        app: router(state),
        sessions,
        cookie: None,
    }
}

#[tokio::test]
async fn test_api_requires_login() {
    let mut app = setup().await;

    let response = app.get("/api/products/").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.get("/api/me/").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_wrong_password_is_unauthorized() {
    let mut app = setup().await;
    let response = app
        .post_form("/login/", "username=alice&password=not-it")
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_product_list_filter_search_ordering() {
    let mut app = setup().await;
    app.login().await;

    let response = app.get("/api/products/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        names(&json_body(response).await),
        ["Veggie Burger", "Burger", "Fries", "Taco"]
    );

    let response = app.get("/api/products/?restaurant_id=1&availability=true&ordering=price").await;
    assert_eq!(names(&json_body(response).await), ["Fries", "Burger"]);

    let response = app.get("/api/products/?search=BURGER").await;
    assert_eq!(names(&json_body(response).await), ["Veggie Burger", "Burger"]);

    let response = app.get("/api/products/?ordering=colour&page=3").await;
    assert_eq!(json_body(response).await.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_restaurants_default_to_best_rated() {
    let mut app = setup().await;
    app.login().await;

    let response = app.get("/api/restaurants/").await;
    assert_eq!(names(&json_body(response).await), ["Taco Town", "Burger Barn"]);

    let response = app.get("/api/restaurants/?name=Burger%20Barn").await;
    assert_eq!(names(&json_body(response).await), ["Burger Barn"]);
}

#[tokio::test]
async fn test_cart_posts_redirect_to_cart() {
    let mut app = setup().await;

    let response = app.post_form("/cart/add/1/", "").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/cart/");
    app.post_form("/cart/inc/1/", "").await;
    app.post_form("/cart/add/3/", "").await;

    let cart = json_body(app.get("/cart/").await).await;
    assert_eq!(cart["total"], "13.50");
    assert_eq!(cart["messages"].as_array().unwrap().len(), 3);

    app.post_form("/cart/set/3/", "quantity=0").await;
    let cart = json_body(app.get("/cart/").await).await;
    assert_eq!(cart["items"].as_array().unwrap().len(), 1);
    assert_eq!(cart["messages"][0]["text"], "Fries removed from cart");

    let response = app.post_form("/cart/add/99/", "").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_checkout_through_pages() {
    let mut app = setup().await;
    app.login().await;

    let response = app.post_form("/checkout/", "payment_method=cash").await;
    assert_eq!(response.headers()[header::LOCATION], "/cart/");

    app.post_form("/cart/add/1/", "").await;
    let response = app
        .post_form("/checkout/", "delivery_address=Rue+9&payment_method=debit_card")
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/checkout/success/1/");

    let page = json_body(app.get("/checkout/success/1/").await).await;
    assert_eq!(page["order"]["total"], "5.00");
    assert_eq!(page["order"]["delivery_address"], "Rue 9");

    let cart = json_body(app.get("/cart/").await).await;
    assert!(cart["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_order_created_through_api() {
    let mut app = setup().await;
    app.login().await;

    let response = app
        .send_json(
            "POST",
            "/api/orders/",
            json!({
                "items": [{"product_id": 1, "quantity": 2}],
                "payment_method": "credit_card",
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let receipt = json_body(response).await;
    assert_eq!(receipt["order"]["total"], "10.00");
    assert_eq!(receipt["driver"]["name"], "Assigned Driver");

    let orders = json_body(app.get("/api/orders/").await).await;
    assert_eq!(orders[0]["restaurant"], "Burger Barn");
    assert_eq!(orders[0]["client"], "alice");

    let deliveries = json_body(app.get("/api/deliveries/?order_id=1").await).await;
    assert_eq!(deliveries.as_array().unwrap().len(), 1);
    assert_eq!(deliveries[0]["driver"], "Assigned Driver");

    let response = app
        .send_json("POST", "/api/orders/", json!({"items": [{"product_id": 2, "quantity": 1}]}))
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_crud_and_referential_checks() {
    let mut app = setup().await;
    app.login().await;

    let response = app
        .send_json(
            "POST",
            "/api/reviews/",
            json!({"client_id": 1, "restaurant_id": 1, "order_id": 42, "rating": 5}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["errors"]["order_id"][0], "order does not exist");

    let response = app
        .send_json("PATCH", "/api/drivers/1/", json!({"availability": false}))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.send_json("DELETE", "/api/restaurants/1/", json!({})).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let products = json_body(app.get("/api/products/").await).await;
    assert_eq!(names(&products), ["Taco"]);
    let response = app.get("/api/restaurants/1/").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_me_reads_and_updates_profile() {
    let mut app = setup().await;
    app.login().await;

    let me = json_body(app.get("/api/me/").await).await;
    assert_eq!(me["username"], "alice");
    assert!(me.get("password_hash").is_none());

    let response = app
        .send_json("PATCH", "/api/me/", json!({"first_name": "Alicia"}))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["first_name"], "Alicia");

    app.get("/logout/").await;
    let response = app.get("/api/me/").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_anonymous_browsing_stores_no_session() {
    let mut app = setup().await;

    for uri in ["/", "/restaurants/", "/restaurants/1/", "/cart/", "/login/"] {
        app.cookie = None;
        let response = app.get(uri).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
    }
    app.get("/").await;
    assert!(app.sessions.is_empty().await);

    app.post_form("/cart/add/1/", "").await;
    assert_eq!(app.sessions.len().await, 1);
}

#[tokio::test]
async fn test_login_issues_a_new_session_key() {
    let mut app = setup().await;
    app.post_form("/cart/add/1/", "").await;
    let before = app.cookie.clone().unwrap();

    app.login().await;
    let after = app.cookie.clone().unwrap();
    assert_ne!(before, after);
    assert_eq!(app.sessions.len().await, 1);

    // The cart moves to the new key.
    let cart = json_body(app.get("/cart/").await).await;
    assert_eq!(cart["items"].as_array().unwrap().len(), 1);

    // The old key no longer carries the login.
    app.cookie = Some(before);
    let response = app.get("/api/me/").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    app.cookie = Some(after);
    app.get("/logout/").await;
    assert!(app.sessions.is_empty().await);
}
