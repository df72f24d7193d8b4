//! # REST API
//!
//! One set of generic handlers serves every resource; what differs per
//! resource lives behind [`ApiResource`]. All endpoints need a logged-in
//! session.

pub mod query;
mod resources;

pub use resources::{
    ApiResource, Clients, Deliveries, Drivers, OrderRequest, Orders, Products, Restaurants, Reviews,
};

use super::{AppError, AppState, Authenticated};
use crate::identity::ProfileForm;
use crate::model::Account;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;
use std::collections::HashMap;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/me/", get(me).patch(update_me))
        .merge(resource::<Orders>())
        .merge(resource::<Products>())
        .merge(resource::<Restaurants>())
        .merge(resource::<Clients>())
        .merge(resource::<Drivers>())
        .merge(resource::<Reviews>())
        .merge(resource::<Deliveries>())
}

fn resource<R: ApiResource>() -> Router<AppState> {
    Router::new()
        .route(&format!("/api/{}/", R::NAME), get(list::<R>).post(create::<R>))
        .route(
            &format!("/api/{}/{{id}}/", R::NAME),
            get(retrieve::<R>)
                .put(update::<R>)
                .patch(update::<R>)
                .delete(destroy::<R>),
        )
}

async fn list<R: ApiResource>(
    State(state): State<AppState>,
    _auth: Authenticated,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Value>>, AppError> {
    let records = R::list(&state).await?;
    Ok(Json(query::apply(&R::QUERY, &params, records)))
}

async fn retrieve<R: ApiResource>(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(id): Path<u32>,
) -> Result<Json<Value>, AppError> {
    Ok(Json(R::retrieve(&state, id).await?))
}

async fn create<R: ApiResource>(
    State(state): State<AppState>,
    auth: Authenticated,
    Json(body): Json<R::Create>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let created = R::create(&state, &auth.account, body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update<R: ApiResource>(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(id): Path<u32>,
    Json(body): Json<R::Update>,
) -> Result<Json<Value>, AppError> {
    Ok(Json(R::update(&state, id, body).await?))
}

async fn destroy<R: ApiResource>(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(id): Path<u32>,
) -> Result<StatusCode, AppError> {
    R::destroy(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn me(auth: Authenticated) -> Json<Account> {
    Json(auth.account)
}

async fn update_me(
    State(state): State<AppState>,
    auth: Authenticated,
    Json(form): Json<ProfileForm>,
) -> Result<Json<Account>, AppError> {
    let account = state.identity.update_profile(auth.account.id, form).await?;
    Ok(Json(account))
}
