//! # Identity
//!
//! Registration, email activation, login and profile edits.
//!
//! Accounts are created inactive. The activation link carries a signed,
//! time-boxed token bound to the account id and email, so changing the email
//! invalidates links already sent.

mod error;
mod form;
mod password;
mod service;
mod token;

pub use error::IdentityError;
pub use form::{LoginForm, ProfileForm, RegistrationForm, ValidationErrors, MIN_PASSWORD_LEN};
pub use password::{hash_password, verify_password};
pub use service::{ActivationOutcome, IdentityService, Registration};
pub use token::{ActivationClaims, TokenError, TokenSigner};
