//! HTTP client shared by every provider endpoint.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{query::Query, Error};

const USER_AGENT: &str = concat!("superpac/", env!("CARGO_PKG_VERSION"));

/// How requests to a provider are authenticated.
///
/// Resolution is deterministic: an access token always wins over an API key,
/// and a provider with neither is called anonymously.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Auth {
    /// `Authorization: Bearer <token>`.
    Bearer(String),
    /// The key is sent in a provider-specific header (e.g. `X-Api-Key`).
    ApiKey { header: String, key: String },
    /// Unauthenticated access, usually with a lower upstream rate limit.
    Anonymous,
}

impl Auth {
    /// Picks the auth scheme from the credentials that are present.
    /// Blank strings count as absent.
    pub fn resolve(access_token: Option<&str>, api_key: Option<&str>, key_header: &str) -> Self {
        let present = |v: Option<&str>| v.map(str::trim).filter(|s| !s.is_empty()).map(String::from);
        if let Some(token) = present(access_token) {
            Auth::Bearer(token)
        } else if let Some(key) = present(api_key) {
            Auth::ApiKey {
                header: key_header.to_string(),
                key,
            }
        } else {
            Auth::Anonymous
        }
    }

    fn headers(&self) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        match self {
            Auth::Bearer(token) => {
                let value = HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|_| Error::RequestFailed("access token is not a valid header value".into()))?;
                headers.insert(AUTHORIZATION, value);
            }
            Auth::ApiKey { header, key } => {
                let name = HeaderName::from_bytes(header.as_bytes())
                    .map_err(|_| Error::RequestFailed(format!("invalid auth header name {}", header)))?;
                let value = HeaderValue::from_str(key)
                    .map_err(|_| Error::RequestFailed("api key is not a valid header value".into()))?;
                headers.insert(name, value);
            }
            Auth::Anonymous => {}
        }
        Ok(headers)
    }
}

/// JSON-over-HTTP client for one provider.
///
/// Holds the base URL, the resolved auth scheme and a per-request timeout.
/// Nothing in here changes after construction.
pub struct Client {
    http: reqwest::Client,
    base_api_url: String,
    auth: Auth,
    timeout: Duration,
}

impl Client {
    /// Builds a client for `base_url`. The timeout bounds the whole request,
    /// from connecting until the body has been read.
    pub fn new(base_url: &str, auth: Auth, timeout: Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed(e.to_string())
            })?;
        Ok(Self {
            http,
            base_api_url: base_url.trim_end_matches('/').to_string(),
            auth,
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn get_url(&self, path: &str, query: &impl Query) -> Result<Url, Error> {
        let url = Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::InvalidUrl(e.to_string())
        })?;
        Ok(query.add_to_url(&url))
    }

    /// Performs a GET and deserializes the JSON body.
    ///
    /// HTTP 429 maps to [`Error::RateLimited`], any other non-success status
    /// to [`Error::HttpStatus`].
    pub async fn get_json<T, Q>(&self, path: &str, query: &Q) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let url = self.get_url(path, query)?;
        tracing::debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .headers(self.auth.headers()?)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.transport_error(e))?;

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimited);
        }
        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        serde_json::from_str::<T>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::Parse(e.to_string())
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else {
            tracing::error!("Failed to get resource: {}", e);
            Error::RequestFailed(e.to_string())
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
