use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Body must be JSON")]
    InvalidBody(#[source] serde_json::Error),

    #[error("Body must contain exactly deviceId and temperature")]
    InvalidShape,

    #[error("Failed to write to DynamoDB: {0}")]
    StorageWrite(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_body_message_is_fixed() {
        let parse_err = serde_json::from_slice::<serde_json::Value>(b"{oops").unwrap_err();
        assert_eq!(Error::InvalidBody(parse_err).to_string(), "Body must be JSON");
    }

    #[test]
    fn test_storage_write_message_carries_cause() {
        let err = Error::StorageWrite("ResourceNotFoundException: table missing".to_string());
        assert_eq!(
            err.to_string(),
            "Failed to write to DynamoDB: ResourceNotFoundException: table missing"
        );
    }
}
