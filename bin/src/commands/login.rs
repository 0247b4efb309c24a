//! Login command and session handling.

use anyhow::{Context, Result};
use inquire::Text;
use optweek_lib::{ClientConfig, KiteClient};
use tracing::info;

use crate::KiteArgs;

/// Create a session and print its access token.
pub(crate) async fn login(kite: &KiteArgs) -> Result<()> {
    let client = create_session(kite).await?;
    let token = client.access_token().context("Session has no access token")?;

    println!("Access token: {token}");
    println!("\nTo reuse this session today:");
    println!("  export KITE_ACCESS_TOKEN={token}");
    Ok(())
}

/// Returns a client for the configured credentials.
///
/// An existing access token is used as is; otherwise a new session is created.
pub(crate) async fn authenticate(kite: &KiteArgs) -> Result<KiteClient> {
    match &kite.access_token {
        Some(token) => Ok(client(kite)?.with_access_token(token.clone())),
        None => create_session(kite).await,
    }
}

fn client(kite: &KiteArgs) -> Result<KiteClient> {
    KiteClient::new(ClientConfig::default(), kite.api_key.clone()).context("Failed to create HTTP client")
}

async fn create_session(kite: &KiteArgs) -> Result<KiteClient> {
    let secret = kite
        .api_secret
        .as_deref()
        .context("KITE_API_SECRET is required to create a session")?;
    let mut client = client(kite)?;

    let request_token = match &kite.request_token {
        Some(token) => token.clone(),
        None => {
            println!("Log in at:\n  {}\n", client.login_url());
            let answer = Text::new("Request token (or the full redirect URL):")
                .prompt()
                .context("No request token entered")?;
            extract_request_token(&answer)
        }
    };

    let session = client
        .generate_session(&request_token, secret)
        .await
        .context("Failed to create session")?;
    info!(user_id = %session.user_id, "Logged in");
    Ok(client)
}

/// Pulls `request_token` out of a redirect URL, or returns the input trimmed.
fn extract_request_token(input: &str) -> String {
    let input = input.trim();
    input
        .split(['?', '&'])
        .find_map(|pair| pair.strip_prefix("request_token="))
        .unwrap_or(input)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_request_token() {
        assert_eq!(extract_request_token(" abc123 "), "abc123");
        assert_eq!(
            extract_request_token("https://example.com/cb?action=login&request_token=xyz789&status=success"),
            "xyz789"
        );
    }
}
