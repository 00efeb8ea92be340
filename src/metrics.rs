use lazy_static::lazy_static;
use prometheus::{
    Counter, CounterVec, Gauge, Histogram, register_counter, register_counter_vec, register_gauge,
    register_histogram,
};


lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("contact_requests_total", "Total number of submission requests").unwrap();
    pub static ref SUBMISSIONS_ACCEPTED: Counter = register_counter!(
        "contact_submissions_accepted_total",
        "Submissions persisted to the store"
    )
    .unwrap();
    pub static ref REJECTIONS: CounterVec = register_counter_vec!(
        "contact_rejections_total",
        "Rejected submissions by reason",
        &["reason"]
    )
    .unwrap();
    pub static ref REQUEST_LATENCY: Histogram = register_histogram!(
        "contact_request_latency_seconds",
        "Submission latency in seconds"
    )
    .unwrap();
    pub static ref RATE_LIMIT_ENTRIES: Gauge =
        register_gauge!("contact_rate_limit_entries", "Client identities in the rate limit table").unwrap();
}
