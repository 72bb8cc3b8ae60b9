use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde_json::{Value, json};

use crate::error::MetaError;

pub trait ExhibitClient: Send + Sync {
    /// Returns the raw response body so the orchestrator can back it up
    /// byte-for-byte before patching.
    fn fetch(&self, url: &str) -> Result<String, MetaError>;
}

#[derive(Clone)]
pub struct ExhibitHttpClient {
    client: Client,
}

impl ExhibitHttpClient {
    pub fn new() -> Result<Self, MetaError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("minerva-meta/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| MetaError::ExhibitHttp(err.to_string()))?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| MetaError::ExhibitHttp(err.to_string()))?;
        Ok(Self { client })
    }
}

impl ExhibitClient for ExhibitHttpClient {
    fn fetch(&self, url: &str) -> Result<String, MetaError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| MetaError::ExhibitHttp(err.to_string()))?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .unwrap_or_else(|_| "exhibit request failed".to_string());
            return Err(MetaError::ExhibitStatus { status, message });
        }
        response
            .text()
            .map_err(|err| MetaError::ExhibitHttp(err.to_string()))
    }
}

pub fn parse_exhibit(url: &str, body: &str) -> Result<Value, MetaError> {
    serde_json::from_str(body).map_err(|err| MetaError::ExhibitParse {
        url: url.to_string(),
        message: err.to_string(),
    })
}

/// Overlays the three published keys on the exhibit document; all other
/// fields are preserved untouched.
pub fn patch_exhibit(
    url: &str,
    doc: &mut Value,
    title: &str,
    description: &str,
) -> Result<(), MetaError> {
    let object = doc.as_object_mut().ok_or_else(|| MetaError::ExhibitParse {
        url: url.to_string(),
        message: "document root is not a JSON object".to_string(),
    })?;
    object.insert("Name".to_string(), Value::String(title.to_string()));
    object.insert("Header".to_string(), Value::String(description.to_string()));
    object.insert("FirstViewport".to_string(), default_viewport());
    Ok(())
}

pub fn default_viewport() -> Value {
    json!({ "Pan": [0.5, 0.5], "Zoom": 1.0 })
}
