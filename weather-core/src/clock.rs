use chrono::{DateTime, FixedOffset, Local, Utc};

/// Wall clock shown on the dashboard, either local or at the queried place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
    #[default]
    Local,
    /// Fixed shift from UTC, as reported by the forecast payload.
    Offset(FixedOffset),
}

impl Clock {
    /// Clock for a UTC shift in seconds; out-of-range shifts fall back to local time.
    pub fn from_offset_seconds(seconds: Option<i32>) -> Self {
        seconds
            .and_then(FixedOffset::east_opt)
            .map(Clock::Offset)
            .unwrap_or(Clock::Local)
    }

    /// `HH:MM:SS` for the given instant.
    pub fn format_at(&self, now: DateTime<Utc>) -> String {
        match self {
            Clock::Local => now.with_timezone(&Local).format("%H:%M:%S").to_string(),
            Clock::Offset(offset) => now.with_timezone(offset).format("%H:%M:%S").to_string(),
        }
    }

    pub fn now(&self) -> String {
        self.format_at(Utc::now())
    }

    pub fn zone_label(&self) -> String {
        match self {
            Clock::Local => "local".to_string(),
            Clock::Offset(offset) => format!("UTC{offset}"),
        }
    }
}
