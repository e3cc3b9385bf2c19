//! Implicit-grant token acquisition
//!
//! The user opens the authorize URL, approves access, and pastes back the
//! URL Spotify redirected to. The access token is read from its fragment and
//! kept in memory for the session only.

use std::collections::HashSet;
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use chrono::Utc;
use rspotify::Token;
use thiserror::Error;

use crate::config::SpotifyConfig;

const AUTHORIZE_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_EXPIRES_IN_SECS: i64 = 3600;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("redirect URL has no #fragment")]
    MissingFragment,
    #[error("authorization denied: {0}")]
    Denied(String),
    #[error("redirect URL carries no access_token")]
    MissingToken,
}

/// Token handed back in the redirect fragment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImplicitGrant {
    pub access_token: String,
    pub expires_in: i64,
}

impl ImplicitGrant {
    pub fn into_token(self, scopes: &str) -> Token {
        Token {
            access_token: self.access_token,
            expires_in: chrono::Duration::seconds(self.expires_in),
            expires_at: Some(Utc::now() + chrono::Duration::seconds(self.expires_in)),
            scopes: scopes
                .split_whitespace()
                .map(|s| s.to_string())
                .collect::<HashSet<String>>(),
            refresh_token: None,
        }
    }
}

pub fn authorize_url(config: &SpotifyConfig) -> String {
    format!(
        "{}?client_id={}&response_type=token&scope={}&redirect_uri={}",
        AUTHORIZE_URL,
        urlencoding::encode(&config.client_id),
        urlencoding::encode(&config.scopes),
        urlencoding::encode(&config.redirect_uri),
    )
}

/// Read the token out of `...#access_token=...&expires_in=...`
pub fn parse_redirect(url: &str) -> Result<ImplicitGrant, TokenError> {
    let (_, fragment) = url.trim().split_once('#').ok_or(TokenError::MissingFragment)?;

    let mut access_token = None;
    let mut expires_in = DEFAULT_EXPIRES_IN_SECS;

    for (key, value) in fragment.split('&').filter_map(|pair| pair.split_once('=')) {
        let value = urlencoding::decode(value)
            .map(|v| v.into_owned())
            .unwrap_or_else(|_| value.to_string());
        match key {
            "access_token" if !value.is_empty() => access_token = Some(value),
            "expires_in" => expires_in = value.parse().unwrap_or(DEFAULT_EXPIRES_IN_SECS),
            "error" => return Err(TokenError::Denied(value)),
            _ => {}
        }
    }

    access_token
        .map(|access_token| ImplicitGrant { access_token, expires_in })
        .ok_or(TokenError::MissingToken)
}

/// Print the authorize URL and wait for the redirected URL on stdin
pub async fn prompt_for_token(config: &SpotifyConfig) -> Result<ImplicitGrant> {
    tracing::info!("Starting implicit-grant authorization");
    let url = authorize_url(config);

    let line = tokio::task::spawn_blocking(move || -> Result<String> {
        let mut stdout = io::stdout();
        writeln!(stdout, "Open this URL in your browser to authorize Jammming:\n\n  {}\n", url)?;
        write!(stdout, "Paste the URL you were redirected to: ")?;
        stdout.flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line)
    })
    .await
    .context("Authorization prompt task failed")??;

    let grant = parse_redirect(&line)?;
    tracing::info!(expires_in = grant.expires_in, "Access token received");
    Ok(grant)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorize_url_encodes_params() {
        let config = SpotifyConfig {
            client_id: "abc".to_string(),
            redirect_uri: "http://127.0.0.1:8898/callback".to_string(),
            scopes: "playlist-modify-public playlist-read-private".to_string(),
        };
        let url = authorize_url(&config);

        assert!(url.starts_with("https://accounts.spotify.com/authorize?client_id=abc"));
        assert!(url.contains("response_type=token"));
        assert!(url.contains("scope=playlist-modify-public%20playlist-read-private"));
        assert!(url.contains("redirect_uri=http%3A%2F%2F127.0.0.1%3A8898%2Fcallback"));
    }

    #[test]
    fn test_parse_redirect() {
        let grant = parse_redirect(
            "http://127.0.0.1:8898/callback#access_token=BQD%2Fx&token_type=Bearer&expires_in=1800\n",
        )
        .unwrap();
        assert_eq!(grant.access_token, "BQD/x");
        assert_eq!(grant.expires_in, 1800);
    }

    #[test]
    fn test_parse_redirect_errors() {
        assert_eq!(
            parse_redirect("http://127.0.0.1:8898/callback?code=xyz"),
            Err(TokenError::MissingFragment)
        );
        assert_eq!(
            parse_redirect("http://127.0.0.1:8898/callback#error=access_denied"),
            Err(TokenError::Denied("access_denied".to_string()))
        );
        assert_eq!(
            parse_redirect("http://127.0.0.1:8898/callback#token_type=Bearer"),
            Err(TokenError::MissingToken)
        );
    }

    #[test]
    fn test_into_token_uses_default_expiry() {
        let grant = parse_redirect("x#access_token=abc").unwrap();
        assert_eq!(grant.expires_in, 3600);

        let token = grant.into_token("playlist-modify-public");
        assert_eq!(token.access_token, "abc");
        assert!(token.scopes.contains("playlist-modify-public"));
        assert!(token.refresh_token.is_none());
    }
}
