//! Supabase GoTrue client - admin password sign-in and sign-out

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Auth provider client (anon key scope - this is the public auth surface)
#[derive(Clone)]
pub struct AuthClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

/// Session issued after a successful password grant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
    pub token_type: String,
}

impl AuthClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            base_url: config.supabase_url.clone(),
            anon_key: config.supabase_anon_key.clone(),
        }
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    /// Pre-flight connectivity probe against the auth health endpoint.
    /// Lets the login flow tell "cannot reach the server" apart from
    /// "wrong credentials".
    pub async fn check_connectivity(&self) -> Result<(), AuthError> {
        self.client
            .head(self.auth_url("health"))
            .header("apikey", &self.anon_key)
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .map_err(|e| AuthError::Connectivity(e.to_string()))?;

        Ok(())
    }

    /// Sign in with email and password (GoTrue password grant)
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.check_connectivity().await?;

        #[derive(Serialize)]
        struct Credentials<'a> {
            email: &'a str,
            password: &'a str,
        }

        let response = self
            .client
            .post(self.auth_url("token?grant_type=password"))
            .header("apikey", &self.anon_key)
            .json(&Credentials { email, password })
            .send()
            .await
            .map_err(AuthError::Request)?;

        let status = response.status();

        if status == reqwest::StatusCode::BAD_REQUEST
            || status == reqwest::StatusCode::UNAUTHORIZED
        {
            #[derive(Deserialize)]
            struct ErrorBody {
                #[serde(default)]
                error_description: Option<String>,
                #[serde(default)]
                msg: Option<String>,
            }

            let body: ErrorBody = response.json().await.unwrap_or(ErrorBody {
                error_description: None,
                msg: None,
            });
            let message = body
                .error_description
                .or(body.msg)
                .unwrap_or_else(|| "Invalid login credentials".to_string());
            return Err(AuthError::InvalidCredentials(message));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Api { status: status.as_u16(), body });
        }

        response.json().await.map_err(AuthError::Request)
    }

    /// Revoke the session behind the given access token
    pub async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let response = self
            .client
            .post(self.auth_url("logout"))
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", access_token))
            .send()
            .await
            .map_err(AuthError::Request)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Api { status: status.as_u16(), body });
        }

        Ok(())
    }
}

/// Auth provider errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Cannot reach auth server: {0}")]
    Connectivity(String),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Auth API error (status {status}): {body}")]
    Api { status: u16, body: String },
}
