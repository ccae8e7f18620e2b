//! Login, registration and password recovery.

use crate::error::ServiceResult;
use maison_commerce::user::{Credentials, ForgotPassword, Registration, ResetPassword, User};
use maison_data::{FetchClient, Response};

/// A signed-in user plus the `Set-Cookie` header to relay to the browser.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: User,
    pub set_cookie: Option<String>,
}

fn relay_cookie(response: &Response) -> Option<String> {
    response.header("Set-Cookie").map(str::to_string)
}

pub async fn login(client: &FetchClient, credentials: &Credentials) -> ServiceResult<Session> {
    credentials.validate()?;

    let response = client
        .post("/auth/login")
        .json(credentials)?
        .send()
        .await?
        .error_for_status()?;
    let user: User = response.data()?;
    tracing::info!(user_id = %user.id, "logged in");

    Ok(Session {
        set_cookie: relay_cookie(&response),
        user,
    })
}

/// End the session. Returns the cookie-clearing header when the backend sends one.
pub async fn logout(client: &FetchClient) -> ServiceResult<Option<String>> {
    let response = client.post("/auth/logout").send().await?.error_for_status()?;
    Ok(relay_cookie(&response))
}

/// The signed-in user, or `None` for guests.
pub async fn me(client: &FetchClient) -> ServiceResult<Option<User>> {
    match client.get("/auth/me").send_data::<User>().await {
        Ok(user) => Ok(Some(user)),
        Err(e) if e.is_unauthorized() => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub async fn register(client: &FetchClient, registration: &Registration) -> ServiceResult<Session> {
    registration.validate()?;

    let response = client
        .post("/auth/register")
        .json(registration)?
        .send()
        .await?
        .error_for_status()?;
    let user: User = response.data()?;
    tracing::info!(user_id = %user.id, "registered");

    Ok(Session {
        set_cookie: relay_cookie(&response),
        user,
    })
}

/// Ask for a reset link. Succeeds whether or not the address has an account.
pub async fn forgot_password(client: &FetchClient, email: &str) -> ServiceResult<()> {
    maison_commerce::validate::email("email", email)?;
    client
        .post("/auth/forgot-password")
        .json(&ForgotPassword {
            email: email.trim().to_string(),
        })?
        .send()
        .await?
        .error_for_status()?;
    Ok(())
}

pub async fn reset_password(client: &FetchClient, reset: &ResetPassword) -> ServiceResult<()> {
    reset.validate()?;
    client
        .post("/auth/reset-password")
        .json(reset)?
        .send()
        .await?
        .error_for_status()?;
    Ok(())
}
