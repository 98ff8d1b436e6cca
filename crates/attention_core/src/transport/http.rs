//! HTTP change source backed by `reqwest`.

use crate::config::NotifierConfig;
use crate::host::{ChangeSource, FetchError};
use crate::model::account::Account;
use crate::model::change::ChangeSummary;
use crate::transport::wire::parse_change_list;
use async_trait::async_trait;
use log::{info, warn};
use std::fmt::{Debug, Formatter};
use std::time::Instant;
use url::Url;

/// HTTP basic credentials for the remote's authenticated `/a/` endpoints.
#[derive(Clone, PartialEq, Eq)]
pub struct HttpCredentials {
    pub username: String,
    pub password: String,
}

impl Debug for HttpCredentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Fetches `GET {origin}/changes/?O=..&S=0&n=..&q=..`.
///
/// Without credentials the request is anonymous, so `attention:self` only
/// matches when the remote grants a session some other way. With credentials
/// the `/a/changes/` endpoint is used with basic auth.
pub struct HttpChangeSource {
    client: reqwest::Client,
    endpoint: Url,
    credentials: Option<HttpCredentials>,
}

impl HttpChangeSource {
    pub fn new(config: &NotifierConfig) -> Result<Self, FetchError> {
        Ok(Self::with_client(default_client()?, change_query_url(config)?))
    }

    pub fn with_credentials(
        config: &NotifierConfig,
        credentials: HttpCredentials,
    ) -> Result<Self, FetchError> {
        Ok(Self {
            client: default_client()?,
            endpoint: authenticated_change_query_url(config)?,
            credentials: Some(credentials),
        })
    }

    pub fn with_client(client: reqwest::Client, endpoint: Url) -> Self {
        Self {
            client,
            endpoint,
            credentials: None,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }
}

fn default_client() -> Result<reqwest::Client, FetchError> {
    reqwest::Client::builder()
        .user_agent(concat!("attention_core/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|err| FetchError::Transport(err.to_string()))
}

/// Builds the anonymous list endpoint URL for the configured query.
pub fn change_query_url(config: &NotifierConfig) -> Result<Url, FetchError> {
    query_url(config, "changes/")
}

/// Same as [`change_query_url`] under the authenticated `/a/` prefix.
pub fn authenticated_change_query_url(config: &NotifierConfig) -> Result<Url, FetchError> {
    query_url(config, "a/changes/")
}

fn query_url(config: &NotifierConfig, endpoint: &str) -> Result<Url, FetchError> {
    let mut base = config
        .origin_url()
        .map_err(|err| FetchError::InvalidRequest(err.to_string()))?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    let mut url = base
        .join(endpoint)
        .map_err(|err| FetchError::InvalidRequest(err.to_string()))?;
    url.query_pairs_mut()
        .append_pair("O", &config.query_options)
        .append_pair("S", "0")
        .append_pair("n", &config.query_limit.to_string())
        .append_pair("q", config.query.trim());
    Ok(url)
}

#[async_trait]
impl ChangeSource for HttpChangeSource {
    async fn fetch_attention_changes(
        &self,
        _account: &Account,
    ) -> Result<Vec<ChangeSummary>, FetchError> {
        let started_at = Instant::now();

        let mut request = self
            .client
            .get(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(&credentials.username, Some(&credentials.password));
        }
        let response = request
            .send()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                "event=change_fetch module=transport status=error http_status={} duration_ms={}",
                status.as_u16(),
                started_at.elapsed().as_millis()
            );
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        let changes = parse_change_list(&body)?;
        info!(
            "event=change_fetch module=transport status=ok count={} duration_ms={}",
            changes.len(),
            started_at.elapsed().as_millis()
        );
        Ok(changes)
    }
}
