use lazy_static::lazy_static;
use prometheus::{Counter, Encoder, Histogram, HistogramOpts, Opts, Registry, TextEncoder};
use tracing::error;

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();
    pub static ref REQUESTS_TOTAL: Counter = Counter::with_opts(Opts::new(
        "receiver_requests_total",
        "Total ingest requests received"
    ))
    .unwrap();
    pub static ref RECORDS_STORED_TOTAL: Counter = Counter::with_opts(Opts::new(
        "receiver_records_stored_total",
        "Total records written to the table"
    ))
    .unwrap();
    pub static ref INVALID_BODY_TOTAL: Counter = Counter::with_opts(Opts::new(
        "receiver_invalid_body_total",
        "Total requests whose body was not JSON"
    ))
    .unwrap();
    pub static ref INVALID_SHAPE_TOTAL: Counter = Counter::with_opts(Opts::new(
        "receiver_invalid_shape_total",
        "Total requests without exactly deviceId and temperature"
    ))
    .unwrap();
    pub static ref WRITE_FAILURES_TOTAL: Counter = Counter::with_opts(Opts::new(
        "receiver_write_failures_total",
        "Total failed table writes"
    ))
    .unwrap();
    pub static ref WRITE_LATENCY_SECONDS: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "receiver_write_latency_seconds",
            "Time taken to write one record to the table"
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0
        ])
    )
    .unwrap();
}

pub fn init_metrics() -> prometheus::Result<()> {
    REGISTRY.register(Box::new(REQUESTS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(RECORDS_STORED_TOTAL.clone()))?;
    REGISTRY.register(Box::new(INVALID_BODY_TOTAL.clone()))?;
    REGISTRY.register(Box::new(INVALID_SHAPE_TOTAL.clone()))?;
    REGISTRY.register(Box::new(WRITE_FAILURES_TOTAL.clone()))?;
    REGISTRY.register(Box::new(WRITE_LATENCY_SECONDS.clone()))?;
    Ok(())
}

pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        error!("Failed to encode metrics: {}", e);
    }
    String::from_utf8_lossy(&buffer).into_owned()
}
