use crate::errors::Result;
use crate::metrics::{
    INVALID_BODY_TOTAL, INVALID_SHAPE_TOTAL, RECORDS_STORED_TOTAL, REQUESTS_TOTAL,
    WRITE_FAILURES_TOTAL, WRITE_LATENCY_SECONDS,
};
use crate::model::{local_timestamp, IngestRecord, IngestResponse};
use crate::store::RecordStore;
use crate::validate::parse_body;
use std::time::Instant;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Validates one reading and writes it to the store.
///
/// Returns `Ok(None)` when the body parses but does not have exactly the
/// `deviceId` and `temperature` keys and `strict` is off; nothing is written
/// in that case. With `strict` on the same input yields
/// [`crate::errors::Error::InvalidShape`].
pub async fn ingest(
    store: &dyn RecordStore,
    strict: bool,
    payload: &[u8],
    path: &str,
) -> Result<Option<IngestResponse>> {
    REQUESTS_TOTAL.inc();

    let id = Uuid::new_v4().to_string();
    let stored_at = local_timestamp();

    info!("Correlation id: {}", id);
    info!("Time: {}", stored_at);
    info!("Path: {}", path);

    let body = match parse_body(payload) {
        Ok(body) => body,
        Err(e) => {
            INVALID_BODY_TOTAL.inc();
            warn!("Request {} body is not JSON", id);
            return Err(e);
        }
    };

    let record = match IngestRecord::from_payload(body, stored_at.clone()) {
        Ok(record) => record,
        Err(e) => {
            INVALID_SHAPE_TOTAL.inc();
            warn!("Invalid data is received (request {})", id);
            if strict {
                return Err(e);
            }
            return Ok(None);
        }
    };

    info!("Storing record {:?}", record);

    let start = Instant::now();
    let written = store.put_item(&record).await;
    WRITE_LATENCY_SECONDS.observe(start.elapsed().as_secs_f64());
    if let Err(e) = written {
        WRITE_FAILURES_TOTAL.inc();
        error!("Write for request {} failed: {}", id, e);
        return Err(e);
    }
    RECORDS_STORED_TOTAL.inc();

    Ok(Some(IngestResponse {
        ok: true,
        id,
        stored_at,
    }))
}
