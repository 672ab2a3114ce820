use super::wire::{read_json, AuthorizeAccountResponse};
use crate::error::AuthError;
use crate::models::SessionContext;
use base64::Engine;
use reqwest::header::AUTHORIZATION;

pub const AUTHORIZE_ACCOUNT_PATH: &str = "/b2api/v2/b2_authorize_account";

/// Exchange the application key for a session with `b2_authorize_account`.
///
/// One attempt, no retry. The returned session is meant for a single upload.
pub async fn authorize_account(
    client: &reqwest::Client,
    api_base: &str,
    key_id: &str,
    app_key: &str,
) -> Result<SessionContext, AuthError> {
    let url = format!("{}{}", api_base.trim_end_matches('/'), AUTHORIZE_ACCOUNT_PATH);
    let credentials =
        base64::engine::general_purpose::STANDARD.encode(format!("{}:{}", key_id, app_key));

    let response = client
        .get(&url)
        .header(AUTHORIZATION, format!("Basic {}", credentials))
        .send()
        .await
        .map_err(|e| AuthError(e.into()))?;

    let body: AuthorizeAccountResponse = read_json(response).await.map_err(|e| {
        tracing::warn!("b2_authorize_account failed: {}", e);
        AuthError(e)
    })?;

    tracing::debug!("Authorized B2 account, api url {}", body.api_url);

    Ok(SessionContext {
        api_url: body.api_url,
        authorization_token: body.authorization_token,
        download_url: body.download_url,
        recommended_part_size: body.recommended_part_size,
    })
}
