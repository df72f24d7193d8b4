//! # HTTP Surface
//!
//! Pages answer with JSON view models (the data a template would render);
//! every form post answers `303 See Other` to the next page, with the outcome
//! queued as a flash message in the session. The REST API lives under
//! `/api/` and requires a logged-in session.

pub mod api;
mod auth;
mod cart;
mod checkout;
mod error;
mod pages;
mod session;
mod state;

pub use error::{AppError, NON_FIELD_ERRORS};
pub use session::{Authenticated, CurrentSession, SESSION_COOKIE};
pub use state::AppState;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
use tower_cookies::CookieManagerLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/restaurants/", get(pages::restaurant_list))
        .route("/restaurants/{id}/", get(pages::restaurant_detail))
        .route("/orders/", get(pages::my_orders))
        .route("/login/", get(auth::login_page).post(auth::login))
        .route("/logout/", get(auth::logout))
        .route("/registro/", get(auth::register_page).post(auth::register))
        .route("/perfil/", get(auth::profile).post(auth::update_profile))
        .route("/activate/{user_id}/{token}/", get(auth::activate))
        .route("/cart/", get(cart::view_cart))
        .route("/cart/add/{product_id}/", post(cart::add))
        .route("/cart/remove/{product_id}/", post(cart::remove))
        .route("/cart/inc/{product_id}/", post(cart::increment))
        .route("/cart/dec/{product_id}/", post(cart::decrement))
        .route("/cart/set/{product_id}/", post(cart::set_quantity))
        .route("/checkout/", get(checkout::checkout_page).post(checkout::checkout))
        .route("/checkout/success/{order_id}/", get(checkout::success))
        .merge(api::routes())
        .layer(CookieManagerLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves until Ctrl+C or SIGTERM.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    let app = router(state);
    if let Ok(address) = listener.local_addr() {
        info!("Server running on {address}");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
