use std::sync::Arc;
use std::time::Duration;

use pt_core::ports::{DataAccessError, IdentityProviderPort};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// JSON client for the pantry backend.
///
/// 后端 JSON 客户端：附带 Bearer 令牌，401 时让身份提供方登出。
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    identity: Arc<dyn IdentityProviderPort>,
}

impl RestClient {
    pub fn new(
        base_url: &str,
        identity: Arc<dyn IdentityProviderPort>,
    ) -> Result<Self, DataAccessError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DataAccessError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            identity,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `path` with percent-encoded query values.
    pub(crate) fn url(&self, path: &str, query: &[(&str, String)]) -> String {
        let mut url = format!("{}{}", self.base_url, path);
        if !query.is_empty() {
            let pairs: Vec<String> = query
                .iter()
                .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
                .collect();
            url.push('?');
            url.push_str(&pairs.join("&"));
        }
        url
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, DataAccessError> {
        let url = self.url(path, query);
        let response = self.send(self.http.get(&url), &url).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| DataAccessError::Decode(e.to_string()))
    }

    /// Send a JSON body; the response body is ignored.
    pub(crate) async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<(), DataAccessError> {
        let url = self.url(path, &[]);
        self.send(self.http.request(method, &url).json(body), &url)
            .await
            .map(|_| ())
    }

    async fn send(&self, request: RequestBuilder, url: &str) -> Result<Response, DataAccessError> {
        let request = match self.identity.id_token().await {
            Ok(Some(token)) => request.bearer_auth(token),
            Ok(None) => request,
            Err(err) => {
                warn!(error = %err, "Could not read id token, sending request anonymously");
                request
            }
        };

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        debug!(url, status = status.as_u16(), "backend response");

        match status {
            StatusCode::UNAUTHORIZED => {
                warn!(url, "Backend rejected credentials, signing out");
                if let Err(err) = self.identity.sign_out().await {
                    warn!(error = %err, "Sign-out after 401 failed");
                }
                Err(DataAccessError::Unauthorized)
            }
            StatusCode::NOT_FOUND => Err(DataAccessError::NotFound(url.to_string())),
            status if !status.is_success() => {
                let message = response.text().await.unwrap_or_default();
                Err(DataAccessError::Status {
                    status: status.as_u16(),
                    message,
                })
            }
            _ => Ok(response),
        }
    }
}

fn transport_error(error: reqwest::Error) -> DataAccessError {
    if error.is_timeout() {
        DataAccessError::Transport("request timed out".to_string())
    } else if error.is_decode() {
        DataAccessError::Decode(error.to_string())
    } else {
        DataAccessError::Transport(error.to_string())
    }
}
