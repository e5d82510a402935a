use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;
use serde_json::Value;

use crate::errors::Result;
use crate::validate::{device_id_string, validate};

/// Layout of `Time` and `stored_at`: local wall clock, no zone suffix.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One device reading as written to the table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestRecord {
    #[serde(rename = "deviceId")]
    pub device_id: String,
    pub temperature: Value,
    #[serde(rename = "Time")]
    pub time: String,
}

impl IngestRecord {
    /// Builds a record from a parsed request body.
    ///
    /// Fails with [`crate::errors::Error::InvalidShape`] unless the body is an object whose
    /// keys are exactly `deviceId` and `temperature`.
    pub fn from_payload(body: Value, time: String) -> Result<Self> {
        let (device_id, temperature) = validate(body)?;

        Ok(Self {
            device_id: device_id_string(&device_id),
            temperature,
            time,
        })
    }
}

/// Success body for `POST /ingest`
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub ok: bool,
    pub id: String,
    pub stored_at: String,
}

/// Body for `GET /metrics`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

pub fn format_timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format(TIME_FORMAT).to_string()
}

pub fn local_timestamp() -> String {
    format_timestamp(&Local::now())
}
