//! Hosted document database reached over its HTTPS data API

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::message::NewMessage;
use super::store::{Connection, DocumentStore, StoreError};
use crate::config::DataApiConfig;

/// How long to wait for the data API host to accept a connection
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Store backed by a data API's `insertOne` action
#[derive(Debug, Clone)]
pub struct DataApiStore {
    config: DataApiConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InsertOneRequest<'a> {
    data_source: &'a str,
    database: &'a str,
    collection: &'a str,
    document: &'a NewMessage,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InsertOneResponse {
    inserted_id: serde_json::Value,
}

impl DataApiStore {
    /// Requires an endpoint and an API key
    pub fn new(config: DataApiConfig) -> Result<Self, StoreError> {
        if config.endpoint.trim().is_empty() {
            return Err(StoreError::Config(
                "contact.data_api.endpoint is not set (or FOLIO_DATA_API_ENDPOINT)".to_string(),
            ));
        }
        if config.api_key.trim().is_empty() {
            return Err(StoreError::Config(
                "contact.data_api.api_key is not set (or FOLIO_DATA_API_KEY)".to_string(),
            ));
        }
        Ok(Self { config })
    }

    fn insert_url(&self) -> String {
        format!(
            "{}/action/insertOne",
            self.config.endpoint.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl DocumentStore for DataApiStore {
    async fn connect(&self) -> Result<Box<dyn Connection>, StoreError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;

        Ok(Box::new(DataApiConnection {
            client: Some(client),
            url: self.insert_url(),
            config: self.config.clone(),
        }))
    }
}

struct DataApiConnection {
    client: Option<reqwest::Client>,
    url: String,
    config: DataApiConfig,
}

#[async_trait]
impl Connection for DataApiConnection {
    async fn insert_one(
        &mut self,
        collection: &str,
        message: &NewMessage,
    ) -> Result<String, StoreError> {
        let client = self.client.as_ref().ok_or(StoreError::Closed)?;

        let body = InsertOneRequest {
            data_source: &self.config.data_source,
            database: &self.config.database,
            collection,
            document: message,
        };

        let resp = client
            .post(&self.url)
            .header("api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    StoreError::Unreachable(e)
                } else {
                    StoreError::Http(e)
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: InsertOneResponse = resp.json().await?;
        Ok(inserted_id_to_string(parsed.inserted_id))
    }

    async fn close(mut self: Box<Self>) -> Result<(), StoreError> {
        self.client.take();
        Ok(())
    }
}

/// Ids come back as plain strings or as `{"$oid": "..."}`
fn inserted_id_to_string(value: serde_json::Value) -> String {
    if let Some(oid) = value.get("$oid").and_then(|v| v.as_str()) {
        return oid.to_string();
    }
    match value {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> DataApiConfig {
        DataApiConfig {
            endpoint: "https://data.example.com/app/blog/endpoint/data/v1/".to_string(),
            api_key: "key".to_string(),
            data_source: "Cluster0".to_string(),
            database: "blog".to_string(),
        }
    }

    #[test]
    fn test_requires_endpoint_and_key() {
        let mut missing_key = config();
        missing_key.api_key.clear();
        assert!(matches!(
            DataApiStore::new(missing_key),
            Err(StoreError::Config(_))
        ));

        let mut missing_endpoint = config();
        missing_endpoint.endpoint = "  ".to_string();
        assert!(DataApiStore::new(missing_endpoint).is_err());
    }

    #[test]
    fn test_insert_url() {
        let store = DataApiStore::new(config()).unwrap();
        assert_eq!(
            store.insert_url(),
            "https://data.example.com/app/blog/endpoint/data/v1/action/insertOne"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let message = NewMessage {
            email: "a@b.com".to_string(),
            name: "A".to_string(),
            message: "hi".to_string(),
        };
        let body = InsertOneRequest {
            data_source: "Cluster0",
            database: "blog",
            collection: "messages",
            document: &message,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "dataSource": "Cluster0",
                "database": "blog",
                "collection": "messages",
                "document": {"email": "a@b.com", "name": "A", "message": "hi"}
            })
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_a_connect_failure() {
        let store = DataApiStore::new(DataApiConfig {
            endpoint: "http://127.0.0.1:1/app/v1".to_string(),
            ..config()
        })
        .unwrap();
        let message = NewMessage {
            email: "a@b.com".to_string(),
            name: "A".to_string(),
            message: "hi".to_string(),
        };

        let mut conn = store.connect().await.unwrap();
        let err = conn.insert_one("messages", &message).await.unwrap_err();
        assert!(matches!(err, StoreError::Unreachable(_)), "got {:?}", err);
        conn.close().await.unwrap();

        let err = crate::contact::store_message(&store, "messages", message)
            .await
            .unwrap_err();
        assert!(matches!(err, crate::contact::ContactError::Connect(_)));
        assert_eq!(err.to_string(), "Could not connect to database.");
    }

    #[test]
    fn test_inserted_id_formats() {
        assert_eq!(inserted_id_to_string(json!("abc")), "abc");
        assert_eq!(inserted_id_to_string(json!({"$oid": "def"})), "def");
        assert_eq!(inserted_id_to_string(json!(7)), "7");
    }
}
