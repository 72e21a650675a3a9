use chrono::{DateTime, SecondsFormat, Utc};
use tokio::time::Instant;

pub fn get_instant() -> Instant {
    Instant::now()
}

pub fn to_rfc3339(date_time: &DateTime<Utc>) -> String {
    date_time.to_rfc3339_opts(SecondsFormat::Secs, true)
}
