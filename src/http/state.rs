use crate::cart::CartService;
use crate::checkout::CheckoutService;
use crate::config::Config;
use crate::identity::IdentityService;
use crate::lifecycle::Stores;
use crate::notification::Mailer;
use crate::session::{MemorySessionStore, SessionStore};
use std::sync::Arc;

/// Shared by every handler. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub stores: Stores,
    pub sessions: Arc<dyn SessionStore>,
    pub cart: CartService,
    pub checkout: CheckoutService,
    pub identity: IdentityService,
}

impl AppState {
    /// Builds the services over `stores`, with in-memory sessions.
    pub fn new(config: Config, stores: Stores, mailer: Arc<dyn Mailer>) -> Self {
        let config = Arc::new(config);
        Self {
            cart: CartService::new(stores.products.clone()),
            checkout: CheckoutService::new(stores.clone(), mailer.clone()),
            identity: IdentityService::new(
                stores.accounts.clone(),
                stores.clients.clone(),
                mailer,
                config.clone(),
            ),
            sessions: Arc::new(MemorySessionStore::new()),
            stores,
            config,
        }
    }
}
