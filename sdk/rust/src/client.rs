use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A record to store; `metadata` may be omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewContext {
    pub user_id: String,
    pub context_type: String,
    pub context_data: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

/// A record as held by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredContextRecord {
    pub id: String,
    pub user_id: String,
    pub context_type: String,
    pub context_data: Map<String, Value>,
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContextFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveResponse {
    pub success: bool,
    pub message: String,
    pub data: StoredContextRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<StoredContextRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
    pub endpoints: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
}

/// A non-success reply from the vault.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Vault returned error status {}: {}", self.status, self.body)
    }
}

impl std::error::Error for ApiError {}

pub struct VaultClient {
    client: Client,
    vault_url: String,
}

impl VaultClient {
    pub fn new(vault_url: &str) -> Self {
        Self {
            client: Client::new(),
            vault_url: vault_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn info(&self) -> Result<ServiceInfo, Box<dyn std::error::Error>> {
        let resp = self.client.get(format!("{}/", self.vault_url)).send().await?;
        decode(resp).await
    }

    pub async fn health(&self) -> Result<HealthStatus, Box<dyn std::error::Error>> {
        let resp = self
            .client
            .get(format!("{}/health", self.vault_url))
            .send()
            .await?;
        decode(resp).await
    }

    /// Save a record and return the stored row.
    pub async fn save(&self, record: &NewContext) -> Result<SaveResponse, Box<dyn std::error::Error>> {
        let resp = self
            .client
            .post(format!("{}/vault/save", self.vault_url))
            .json(record)
            .send()
            .await?;
        decode(resp).await
    }

    /// List records matching the filter, newest first.
    pub async fn query(&self, filter: &ContextFilter) -> Result<QueryResponse, Box<dyn std::error::Error>> {
        let resp = self
            .client
            .get(format!("{}/vault/context", self.vault_url))
            .query(filter)
            .send()
            .await?;
        decode(resp).await
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, Box<dyn std::error::Error>> {
    let status = resp.status();
    let text = resp.text().await?;

    if !status.is_success() {
        return Err(Box::new(ApiError { status, body: text }));
    }

    Ok(serde_json::from_str::<T>(&text)?)
}
