use crate::app::ApiClient;
use crate::errors::ClientError;
use crate::models::{AuthResponse, Credentials, Navigation, Registration, Validate};
use crate::state::Page;
use tracing::{info, warn};

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Submits a registration. Success sends the user to the login page; a
/// rejection shows the server's own message.
pub async fn register(api: &ApiClient, page: &mut Page, registration: &Registration) -> Result<(), ClientError> {
    page.form_error = None;
    if let Err(err) = registration.validate() {
        page.form_error = Some(err.to_string());
        return Ok(());
    }

    let response = api.post_public("/api/auth/register", registration).await?;
    if response.status().is_success() {
        info!(username = %registration.username, "registered");
        page.navigate(Navigation::Login);
    } else {
        let status = response.status();
        let message = response.text().await?;
        warn!(%status, "registration rejected");
        page.form_error = Some(message);
    }
    Ok(())
}

/// Exchanges credentials for a token, stores it in the session and sends
/// the user to the application root.
pub async fn login(api: &ApiClient, page: &mut Page, credentials: &Credentials) -> Result<(), ClientError> {
    page.form_error = None;
    if let Err(err) = credentials.validate() {
        page.form_error = Some(err.to_string());
        return Ok(());
    }

    let response = api.post_public("/api/auth/login", credentials).await?;
    if !response.status().is_success() {
        warn!(status = %response.status(), "login rejected");
        page.form_error = Some(INVALID_CREDENTIALS.to_string());
        return Ok(());
    }

    let bytes = response.bytes().await?;
    let AuthResponse { jwt } = serde_json::from_slice(&bytes)?;
    if jwt.trim().is_empty() {
        warn!("login answered without a token");
        page.form_error = Some(INVALID_CREDENTIALS.to_string());
        return Ok(());
    }
    api.session().store(jwt).await?;
    info!(username = %credentials.username, "signed in");
    page.navigate(Navigation::Root);
    Ok(())
}

pub async fn logout(api: &ApiClient, page: &mut Page) -> Result<(), ClientError> {
    api.session().clear().await?;
    info!("signed out");
    page.navigate(Navigation::Login);
    Ok(())
}
