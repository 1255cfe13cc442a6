use crate::config::AppConfig;
use crate::error::SyncError;
use log::debug;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Obtain a bearer token through the OAuth2 client-credentials grant.
///
/// Fails with [`SyncError::Auth`] on any transport error or non-2xx answer;
/// callers treat that as fatal for the whole command.
pub async fn fetch_access_token(http: &reqwest::Client, config: &AppConfig) -> Result<String, SyncError> {
    debug!("Requesting access token from {}", config.auth_url);

    let response = http
        .post(&config.auth_url)
        .basic_auth(&config.client_id, Some(&config.client_secret))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await
        .map_err(|e| SyncError::Auth(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SyncError::Auth(format!("{} {}", status, body.trim())));
    }

    let token: TokenResponse = response
        .json()
        .await
        .map_err(|e| SyncError::Auth(format!("unexpected token response: {}", e)))?;

    debug!("Access token acquired (expires in {:?}s)", token.expires_in);
    Ok(token.access_token)
}
