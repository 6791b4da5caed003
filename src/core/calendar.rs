//! # Calendar Listing
//!
//! The interview list behind the calendar view, its search query, and the
//! display helpers for the table. Filtering is recomputed on every render,
//! so it always reflects the current query and data.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use log::{info, warn};

use crate::api::{ApiError, Interview};

/// Asia/Kolkata: UTC+05:30, no daylight saving.
const DISPLAY_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;
/// e.g. `01/05/2024, 10:00:00 am`
const DISPLAY_FORMAT: &str = "%d/%m/%Y, %I:%M:%S %P";

#[derive(Debug, Default)]
pub struct CalendarState {
    pub items: Vec<Interview>,
    pub is_loading: bool,
    pub query: String,
    /// Sequence number of the newest fetch; older results are ignored.
    fetch_seq: u64,
}

impl CalendarState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a fetch as started and returns its sequence number.
    pub fn begin_fetch(&mut self) -> u64 {
        self.fetch_seq += 1;
        self.is_loading = true;
        self.fetch_seq
    }

    /// Applies a fetch result. Failures leave an empty list.
    pub fn apply_fetch(&mut self, seq: u64, result: Result<Vec<Interview>, ApiError>) -> bool {
        if seq != self.fetch_seq {
            info!("Dropping superseded interview fetch #{}", seq);
            return false;
        }

        self.items = match result {
            Ok(items) => items,
            Err(e) => {
                warn!("Failed to fetch interviews: {}", e);
                Vec::new()
            }
        };
        self.is_loading = false;
        true
    }

    pub fn filtered(&self) -> Vec<&Interview> {
        filter(&self.items, &self.query)
    }
}

/// Case-insensitive substring match over id, candidate name and interviewer id.
pub fn matches(interview: &Interview, query: &str) -> bool {
    let query = query.to_lowercase();
    interview.id.to_lowercase().contains(&query)
        || interview
            .candidate_name
            .as_deref()
            .unwrap_or("")
            .to_lowercase()
            .contains(&query)
        || interview.interviewer_id.to_lowercase().contains(&query)
}

pub fn filter<'a>(items: &'a [Interview], query: &str) -> Vec<&'a Interview> {
    items.iter().filter(|i| matches(i, query)).collect()
}

/// Formats a backend timestamp in the fixed display zone.
///
/// Missing values render as `-`; values that do not parse are returned
/// unchanged. Timestamps without an offset are taken as UTC.
pub fn format_time(value: Option<&str>) -> String {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return "-".to_string();
    };

    let Some(zone) = FixedOffset::east_opt(DISPLAY_OFFSET_SECS) else {
        return raw.to_string();
    };

    match parse_timestamp(raw) {
        Some(dt) => dt.with_timezone(&zone).format(DISPLAY_FORMAT).to_string(),
        None => raw.to_string(),
    }
}

/// `HH:MM` in the display zone for an epoch-milliseconds timestamp.
pub fn format_clock(millis: i64) -> String {
    let zone = FixedOffset::east_opt(DISPLAY_OFFSET_SECS);
    match (DateTime::from_timestamp_millis(millis), zone) {
        (Some(dt), Some(zone)) => dt.with_timezone(&zone).format("%H:%M").to_string(),
        _ => String::new(),
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }

    let utc = FixedOffset::east_opt(0)?;
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(naive.and_utc().with_timezone(&utc));
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().with_timezone(&utc))
}
