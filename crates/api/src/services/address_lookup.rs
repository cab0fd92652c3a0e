//! Postal code (CEP) lookup against the ViaCEP service.
//!
//! [`ViaCepClient`] calls `{base}/{cep}/json/`. ViaCEP answers unknown CEPs
//! with HTTP 200 and an `erro` field, which is reported as `Ok(None)`.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// HTTP request timeout for a single lookup.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Address details resolved from a CEP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressInfo {
    pub street: String,
    pub complement: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum AddressLookupError {
    /// The underlying HTTP request failed (network, DNS, timeout, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The lookup service returned a non-2xx status code.
    #[error("Address lookup returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// AddressLookup
// ---------------------------------------------------------------------------

/// Resolves a normalised 8-digit CEP to an address.
#[async_trait]
pub trait AddressLookup: Send + Sync {
    async fn lookup(&self, cep: &str) -> Result<Option<AddressInfo>, AddressLookupError>;
}

/// Raw ViaCEP payload. Every field is optional because error payloads carry
/// only `erro`.
#[derive(Debug, Deserialize)]
struct ViaCepPayload {
    /// `true` (or `"true"` on newer deployments) when the CEP is unknown.
    erro: Option<serde_json::Value>,
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    complemento: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
}

impl ViaCepPayload {
    fn into_address(self) -> Option<AddressInfo> {
        if self.erro.is_some() {
            return None;
        }
        Some(AddressInfo {
            street: self.logradouro,
            complement: self.complemento,
            neighborhood: self.bairro,
            city: self.localidade,
            state: self.uf,
        })
    }
}

/// [`AddressLookup`] backed by the ViaCEP HTTP API.
pub struct ViaCepClient {
    client: reqwest::Client,
    base_url: String,
}

impl ViaCepClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, AddressLookupError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn url_for(&self, cep: &str) -> String {
        format!("{}/{cep}/json/", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl AddressLookup for ViaCepClient {
    async fn lookup(&self, cep: &str) -> Result<Option<AddressInfo>, AddressLookupError> {
        let response = self.client.get(self.url_for(cep)).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(cep, status = status.as_u16(), "Address lookup failed");
            return Err(AddressLookupError::HttpStatus(status.as_u16()));
        }

        let payload: ViaCepPayload = response.json().await?;
        Ok(payload.into_address())
    }
}
