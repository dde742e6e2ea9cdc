use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use super::{ApiError, UserBackend, UserPayload, UserRecord, user_url, users_url};

/// Blocking HTTP client for the users endpoint.
///
/// Requests run on the UI thread and suspend only the handler that issued them.
/// There is no request timeout and no retry.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    api_url: String,
    client: Client,
}

impl HttpBackend {
    pub fn new(api_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(None::<std::time::Duration>)
            .build()?;
        Ok(Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn send(&self, req: RequestBuilder) -> Result<String, ApiError> {
        let resp = req.send()?;
        let status = resp.status();
        let body = resp.text()?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ApiError> {
        let body = self.send(req)?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl UserBackend for HttpBackend {
    fn list_users(&self, backend: &str) -> Result<Vec<UserRecord>, ApiError> {
        let url = users_url(&self.api_url, backend);
        tracing::debug!(%url, "GET users");
        self.send_json(self.client.get(url))
    }

    fn fetch_user(&self, backend: &str, id: i64) -> Result<UserRecord, ApiError> {
        let url = user_url(&self.api_url, backend, id);
        tracing::debug!(%url, "GET user");
        self.send_json(self.client.get(url))
    }

    fn create_user(&self, backend: &str, payload: &UserPayload) -> Result<UserRecord, ApiError> {
        let url = users_url(&self.api_url, backend);
        tracing::debug!(%url, "POST user");
        self.send_json(self.client.post(url).json(payload))
    }

    fn update_user(
        &self,
        backend: &str,
        id: i64,
        payload: &UserPayload,
    ) -> Result<UserRecord, ApiError> {
        let url = user_url(&self.api_url, backend, id);
        tracing::debug!(%url, "PUT user");
        self.send_json(self.client.put(url).json(payload))
    }

    fn delete_user(&self, backend: &str, id: i64) -> Result<(), ApiError> {
        let url = user_url(&self.api_url, backend, id);
        tracing::debug!(%url, "DELETE user");
        self.send(self.client.delete(url)).map(|_| ())
    }
}
