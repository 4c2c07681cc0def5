//! Credential exchange with the backend.

use std::collections::HashMap;
use std::future::Future;

use serde::{Deserialize, Serialize};

use eara_auth::Identity;

use crate::{AuthenticationError, SessionConfig};

const LOGIN_FAILED: &str = "Login failed";

/// Body of the login call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Reply of the login call: `{success, user?, error?}`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub user: Option<Identity>,
    #[serde(default)]
    pub error: Option<String>,
}

/// The external authentication collaborator.
pub trait LoginClient: Send + Sync {
    fn login(&self, request: &LoginRequest) -> impl Future<Output = Result<Identity, AuthenticationError>> + Send;
}

/// Turn a raw HTTP reply into an identity or an [`AuthenticationError`].
///
/// A reply counts as success only when the status is 2xx *and* the body
/// says `success: true` with a user attached.
pub fn interpret_login_reply(status: u16, body: &str) -> Result<Identity, AuthenticationError> {
    let ok_status = (200..300).contains(&status);

    let reply: LoginReply = match serde_json::from_str(body) {
        Ok(reply) => reply,
        Err(e) if ok_status => return Err(AuthenticationError::MalformedReply(e.to_string())),
        Err(_) => return Err(AuthenticationError::Rejected(LOGIN_FAILED.to_string())),
    };

    if !ok_status || !reply.success {
        let message = reply
            .error
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| LOGIN_FAILED.to_string());
        return Err(AuthenticationError::Rejected(message));
    }

    reply
        .user
        .ok_or_else(|| AuthenticationError::MalformedReply("success reply without user".to_string()))
}

/// reqwest-backed [`LoginClient`] calling `POST {base}/auth/login`.
#[derive(Debug, Clone)]
pub struct HttpLoginClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpLoginClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.api_base_url.clone())
    }

    pub fn login_url(&self) -> String {
        format!("{}/auth/login", self.base_url.trim_end_matches('/'))
    }
}

impl LoginClient for HttpLoginClient {
    async fn login(&self, request: &LoginRequest) -> Result<Identity, AuthenticationError> {
        let resp = self
            .client
            .post(self.login_url())
            .json(request)
            .send()
            .await
            .map_err(|e| AuthenticationError::Network(e.to_string()))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| AuthenticationError::Network(e.to_string()))?;

        interpret_login_reply(status, &body)
    }
}

/// Fixed account directory, for tests and offline demos.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLoginClient {
    accounts: HashMap<String, (String, Identity)>,
}

impl InMemoryLoginClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(mut self, password: impl Into<String>, identity: Identity) -> Self {
        self.accounts
            .insert(identity.email.to_ascii_lowercase(), (password.into(), identity));
        self
    }
}

impl LoginClient for InMemoryLoginClient {
    async fn login(&self, request: &LoginRequest) -> Result<Identity, AuthenticationError> {
        match self.accounts.get(&request.email.to_ascii_lowercase()) {
            Some((password, identity)) if *password == request.password => Ok(identity.clone()),
            _ => Err(AuthenticationError::Rejected("Invalid credentials".to_string())),
        }
    }
}
