use chrono::{DateTime, Utc};

/// Bearer token returned by the password grant. Expiry is provider-defined and not tracked.
#[derive(Clone)]
pub struct AccessToken {
    pub value: String,
    pub acquired_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn new(value: String) -> Self {
        Self {
            value,
            acquired_at: Utc::now(),
        }
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"***")
            .field("acquired_at", &self.acquired_at)
            .finish()
    }
}
