use chrono::{DateTime, Local, Utc};

// Get current local timestamp as a formatted string
pub fn current_local_timestamp_str(format_str: &str) -> String {
    let now: DateTime<Local> = Local::now();
    now.format(format_str).to_string()
}

// Nanoseconds since the epoch, for names that must not collide within a run
pub fn current_utc_nanos() -> i64 {
    let now: DateTime<Utc> = Utc::now();
    now.timestamp_nanos_opt().unwrap_or_else(|| now.timestamp_micros() * 1_000)
}
