//! Custom actions for the Account actor.

use crate::model::ClientId;

/// Operations on an account beyond plain field updates.
#[derive(Debug, Clone)]
pub enum AccountAction {
    /// Marks the account active. Idempotent.
    Activate,
    /// Sets the explicit link to the account's customer record.
    LinkClient(ClientId),
}

/// Results from AccountActions - variants match 1:1 with AccountAction
#[derive(Debug, Clone, PartialEq)]
pub enum AccountActionResult {
    /// `true` when the account was inactive before.
    Activate(bool),
    LinkClient(()),
}
