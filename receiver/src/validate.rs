use crate::errors::{Error, Result};
use serde_json::Value;

pub const DEVICE_ID_KEY: &str = "deviceId";
pub const TEMPERATURE_KEY: &str = "temperature";

/// Parses a raw request body as JSON
pub fn parse_body(payload: &[u8]) -> Result<Value> {
    serde_json::from_slice(payload).map_err(Error::InvalidBody)
}

/// Validates the shape of an ingest payload and splits it into its
/// `deviceId` and `temperature` values.
///
/// The payload must be an object whose key set is exactly
/// `{deviceId, temperature}`. Key order is irrelevant; extra keys are
/// rejected just like missing ones.
pub fn validate(body: Value) -> Result<(Value, Value)> {
    let Value::Object(mut fields) = body else {
        return Err(Error::InvalidShape);
    };
    if fields.len() != 2 {
        return Err(Error::InvalidShape);
    }

    match (fields.remove(DEVICE_ID_KEY), fields.remove(TEMPERATURE_KEY)) {
        (Some(device_id), Some(temperature)) => Ok((device_id, temperature)),
        _ => Err(Error::InvalidShape),
    }
}

/// String form of a `deviceId` value.
///
/// Strings pass through untouched, numbers keep their JSON spelling,
/// booleans and null use the capitalized `True`/`False`/`None` spellings,
/// and composite values are stored as compact JSON.
pub fn device_id_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Null => "None".to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_payload() {
        let body = json!({"deviceId": "dev-1", "temperature": 25.0});
        let (device_id, temperature) = validate(body).unwrap();
        assert_eq!(device_id, json!("dev-1"));
        assert_eq!(temperature, json!(25.0));
    }

    #[test]
    fn test_key_order_ignored() {
        let body = parse_body(br#"{"temperature": 25.0, "deviceId": "dev-1"}"#).unwrap();
        assert!(validate(body).is_ok());
    }

    #[test]
    fn test_extra_key_rejected() {
        let body = json!({"deviceId": "dev-1", "temperature": 25.0, "humidity": 60.0});
        assert!(matches!(validate(body), Err(Error::InvalidShape)));
    }

    #[test]
    fn test_missing_temperature_rejected() {
        let body = json!({"deviceId": "dev-1"});
        assert!(matches!(validate(body), Err(Error::InvalidShape)));
    }

    #[test]
    fn test_empty_object_rejected() {
        assert!(matches!(validate(json!({})), Err(Error::InvalidShape)));
    }

    #[test]
    fn test_wrong_key_names_rejected() {
        let body = json!({"device_id": "dev-1", "temperature": 25.0});
        assert!(matches!(validate(body), Err(Error::InvalidShape)));
    }

    #[test]
    fn test_null_and_non_objects_rejected() {
        for body in [json!(null), json!([1, 2]), json!("text"), json!(3.5)] {
            assert!(matches!(validate(body), Err(Error::InvalidShape)));
        }
    }

    #[test]
    fn test_parse_body_rejects_garbage() {
        assert!(matches!(parse_body(b"invalid json"), Err(Error::InvalidBody(_))));
        assert!(matches!(parse_body(b""), Err(Error::InvalidBody(_))));
    }

    #[test]
    fn test_device_id_string() {
        assert_eq!(device_id_string(&json!("sensor-1")), "sensor-1");
        assert_eq!(device_id_string(&json!(42)), "42");
        assert_eq!(device_id_string(&json!(-7)), "-7");
        assert_eq!(device_id_string(&json!(4.5)), "4.5");
        assert_eq!(device_id_string(&json!(true)), "True");
        assert_eq!(device_id_string(&json!(null)), "None");
        assert_eq!(device_id_string(&json!([1, 2])), "[1,2]");
    }

    #[test]
    fn test_device_id_string_keeps_wide_integers() {
        let body = parse_body(br#"{"deviceId": 12345678901234567890123, "temperature": 1}"#).unwrap();
        let (device_id, _) = validate(body).unwrap();
        assert_eq!(device_id_string(&device_id), "12345678901234567890123");
    }
}
