//! CLI Commands

pub mod analytics;
pub mod config;
pub mod preview;
pub mod risks;

use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Error body returned by the API
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
}

/// API client
pub struct ApiClient {
    pub base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, String> {
        let req = self.client.get(self.url(path)).query(query);
        Self::read(req).await
    }

    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(&self, path: &str, body: &B) -> Result<T, String> {
        let req = self.client.post(self.url(path)).json(body);
        Self::read(req).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read<T: DeserializeOwned>(req: reqwest::RequestBuilder) -> Result<T, String> {
        let resp = req.send().await.map_err(|e| {
            if e.is_connect() {
                "Cannot connect to the Risk Register API. Is it running?".to_string()
            } else {
                e.to_string()
            }
        })?;

        let status = resp.status();
        if status.is_success() {
            return resp.json().await.map_err(|e| e.to_string());
        }

        let text = resp.text().await.map_err(|e| e.to_string())?;
        Err(error_message(status.as_u16(), &text))
    }
}

/// Message for a failed response, preferring the API's own error text
fn error_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) if body.is_empty() => format!("request failed with status {}", status),
        Err(_) => format!("request failed with status {}: {}", status, body),
    }
}
