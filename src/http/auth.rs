//! Login, registration, profile and activation pages.

use super::{AppError, AppState, Authenticated, CurrentSession};
use crate::identity::{ActivationOutcome, LoginForm, ProfileForm, RegistrationForm, MIN_PASSWORD_LEN};
use crate::model::{Account, AccountId};
use crate::session::FlashMessage;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Serialize;
use serde_json::json;

const PROFILE_PAGE: &str = "/perfil/";
const LOGIN_PAGE: &str = "/login/";

#[derive(Serialize)]
pub struct ProfilePage {
    pub account: Account,
    pub messages: Vec<FlashMessage>,
}

/// Logged-in visitors are sent to their profile instead.
pub async fn login_page(mut session: CurrentSession) -> Response {
    if session.data.account_id.is_some() {
        return Redirect::to(PROFILE_PAGE).into_response();
    }
    let messages = session.data.take_messages();
    session.save().await;
    Json(json!({ "fields": ["username", "password"], "messages": messages })).into_response()
}

pub async fn login(
    State(state): State<AppState>,
    mut session: CurrentSession,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, AppError> {
    let account = state.identity.login(form).await?;

    session.cycle_key().await;
    session.data.account_id = Some(account.id);
    session.flash(FlashMessage::success(format!(
        "Welcome, {}!",
        account.display_name()
    )));
    session.save().await;
    Ok(Redirect::to(PROFILE_PAGE))
}

/// Forgets the account and everything else held in the session.
pub async fn logout(session: CurrentSession) -> Redirect {
    session.flush().await;
    Redirect::to("/")
}

pub async fn register_page(session: CurrentSession) -> Response {
    if session.data.account_id.is_some() {
        return Redirect::to(PROFILE_PAGE).into_response();
    }
    Json(json!({
        "fields": [
            "username", "email", "first_name", "last_name",
            "password", "password_confirm", "phone", "default_address"
        ],
        "min_password_length": MIN_PASSWORD_LEN,
    }))
    .into_response()
}

pub async fn register(
    State(state): State<AppState>,
    mut session: CurrentSession,
    Form(form): Form<RegistrationForm>,
) -> Result<Redirect, AppError> {
    let registration = state.identity.register(form).await?;

    session.flash(if registration.account.is_active {
        FlashMessage::success("Account created. You can log in now.")
    } else {
        FlashMessage::success("Account created. Check your email to activate it.")
    });
    session.save().await;
    Ok(Redirect::to(LOGIN_PAGE))
}

pub async fn profile(
    Authenticated {
        account,
        mut session,
    }: Authenticated,
) -> Json<ProfilePage> {
    let messages = session.data.take_messages();
    session.save().await;
    Json(ProfilePage { account, messages })
}

pub async fn update_profile(
    State(state): State<AppState>,
    Authenticated {
        account,
        mut session,
    }: Authenticated,
    Form(form): Form<ProfileForm>,
) -> Result<Redirect, AppError> {
    state.identity.update_profile(account.id, form).await?;
    session.flash(FlashMessage::success("Profile updated"));
    session.save().await;
    Ok(Redirect::to(PROFILE_PAGE))
}

pub async fn activate(
    State(state): State<AppState>,
    Path((user_id, token)): Path<(u32, String)>,
    mut session: CurrentSession,
) -> Result<Redirect, AppError> {
    let outcome = state.identity.activate(AccountId(user_id), &token).await?;

    session.flash(match outcome {
        ActivationOutcome::Activated => FlashMessage::success("Account activated. You can log in now."),
        ActivationOutcome::AlreadyActive => FlashMessage::info("Your account is already active."),
    });
    session.save().await;
    Ok(Redirect::to(LOGIN_PAGE))
}
