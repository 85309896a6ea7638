use reqwest::Client;
use reqwest::RequestBuilder;
use reqwest::Response;
use reqwest::Url;
use secrecy::ExposeSecret;
use secrecy::Secret;
use serde::Deserialize;

use crate::config::BackendConfig;

const API_KEY_HEADER: &str = "apikey";

/// HTTP client for the hosted backend (identity and data APIs).
///
/// Holds the service key; callers decide per request whether the bearer is the
/// service key or a caller's token.
#[derive(Clone)]
pub struct BackendClient {
    http_client: Client,
    base_url: Url,
    service_role_key: Secret<String>,
}

impl BackendClient {
    /// # Errors
    /// Fails if `base_url` is not an absolute URL
    pub fn new(
        base_url: &str,
        service_role_key: Secret<String>,
        http_client: Client,
    ) -> Result<Self, anyhow::Error> {
        // A trailing slash keeps `join` from dropping the last path segment.
        let base_url = if base_url.ends_with('/') {
            Url::parse(base_url)?
        } else {
            Url::parse(&format!("{}/", base_url))?
        };

        Ok(Self {
            http_client,
            base_url,
            service_role_key,
        })
    }

    pub fn from_config(config: &BackendConfig) -> Result<Self, anyhow::Error> {
        Self::new(&config.url, config.service_role_key.clone(), Client::new())
    }

    pub fn url(&self, path: &str) -> Result<Url, String> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| e.to_string())
    }

    /// Request authenticated as the service itself.
    pub fn service_request(&self, method: reqwest::Method, url: Url) -> RequestBuilder {
        let key = self.service_role_key.expose_secret();
        self.http_client
            .request(method, url)
            .header(API_KEY_HEADER, key)
            .bearer_auth(key)
    }

    /// Request on behalf of a caller holding `token`.
    pub fn user_request(&self, method: reqwest::Method, url: Url, token: &str) -> RequestBuilder {
        self.http_client
            .request(method, url)
            .header(API_KEY_HEADER, self.service_role_key.expose_secret())
            .bearer_auth(token)
    }
}

/// Error payload shapes returned by the backend's APIs.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

/// Pull a human-readable message out of a failed response.
///
/// Falls back to the raw body, then to the status line.
pub async fn error_message(response: Response) -> String {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
    body.msg
        .or(body.message)
        .or(body.error_description)
        .or(body.error)
        .filter(|m| !m.is_empty())
        .or_else(|| Some(text.trim().to_string()).filter(|t| !t.is_empty()))
        .unwrap_or_else(|| status.to_string())
}
