use crate::errors::{Error, Result};
use crate::model::IngestRecord;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::config::Region;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, info};

/// Single-item write into the backing table
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn put_item(&self, record: &IngestRecord) -> Result<()>;
}

/// DynamoDB-backed store; the client is built once and shared by every request.
#[derive(Debug, Clone)]
pub struct DynamoStore {
    client: Client,
    table: String,
}

impl DynamoStore {
    pub async fn connect(region: &str, table: &str) -> Self {
        info!("Loading AWS configuration for region {}", region);
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;

        info!("DynamoDB client ready for table {}", table);
        Self::new(Client::new(&sdk_config), table)
    }

    pub fn new(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }
}

#[async_trait]
impl RecordStore for DynamoStore {
    async fn put_item(&self, record: &IngestRecord) -> Result<()> {
        debug!("PutItem into {} for device {}", self.table, record.device_id);

        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(to_item(record)))
            .send()
            .await
            .map_err(|e| Error::StorageWrite(DisplayErrorContext(&e).to_string()))?;

        Ok(())
    }
}

/// Attribute map for one record: `deviceId` and `Time` as strings,
/// `temperature` in whatever type the device sent.
pub fn to_item(record: &IngestRecord) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (
            "deviceId".to_string(),
            AttributeValue::S(record.device_id.clone()),
        ),
        ("temperature".to_string(), to_attribute(&record.temperature)),
        ("Time".to_string(), AttributeValue::S(record.time.clone())),
    ])
}

fn to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        // DynamoDB numbers travel as strings, so the JSON spelling is kept exactly.
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(items) => AttributeValue::L(items.iter().map(to_attribute).collect()),
        Value::Object(fields) => AttributeValue::M(
            fields
                .iter()
                .map(|(k, v)| (k.clone(), to_attribute(v)))
                .collect(),
        ),
    }
}


#[cfg(test)]
mod tests {
    use super::testing::MemoryStore;
    use super::*;
    use serde_json::json;

    fn record(temperature: Value) -> IngestRecord {
        IngestRecord {
            device_id: "sensor-1".to_string(),
            temperature,
            time: "2024-03-05 07:08:09".to_string(),
        }
    }

    #[test]
    fn test_item_attributes() {
        let item = to_item(&record(json!(21.5)));

        assert_eq!(item.len(), 3);
        assert_eq!(item["deviceId"], AttributeValue::S("sensor-1".to_string()));
        assert_eq!(item["temperature"], AttributeValue::N("21.5".to_string()));
        assert_eq!(
            item["Time"],
            AttributeValue::S("2024-03-05 07:08:09".to_string())
        );
    }

    #[test]
    fn test_integer_temperature_stays_integer() {
        let item = to_item(&record(json!(-3)));
        assert_eq!(item["temperature"], AttributeValue::N("-3".to_string()));
    }

    #[test]
    fn test_non_numeric_temperature_kept_verbatim() {
        assert_eq!(
            to_item(&record(json!("warm")))["temperature"],
            AttributeValue::S("warm".to_string())
        );
        assert_eq!(
            to_item(&record(json!(null)))["temperature"],
            AttributeValue::Null(true)
        );
        assert_eq!(
            to_item(&record(json!([1, true])))["temperature"],
            AttributeValue::L(vec![
                AttributeValue::N("1".to_string()),
                AttributeValue::Bool(true)
            ])
        );
    }

    #[test]
    fn test_memory_store_keeps_records() {
        tokio_test::block_on(async {
            let store = MemoryStore::default();
            store.put_item(&record(json!(20))).await.unwrap();
            store.put_item(&record(json!(21))).await.unwrap();

            let records = store.records();
            assert_eq!(records.len(), 2);
            assert_eq!(records[1].temperature, json!(21));
        });
    }
}
