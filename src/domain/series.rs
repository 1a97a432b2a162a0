// Sample series domain model and feed parsing
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const INVALID_DATE_LABEL: &str = "Invalid Date";

/// Index-aligned values and time labels from the most recent successful fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SampleSeries {
    pub data: Vec<f64>,
    pub labels: Vec<String>,
}

impl SampleSeries {
    pub fn new(data: Vec<f64>, labels: Vec<String>) -> Self {
        Self { data, labels }
    }

    /// True before the first successful fetch has been published.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Build a series from a feed response.
    ///
    /// Entries whose field value is not numeric are dropped from `data`, while
    /// labels are taken from every entry in order and then cut to the length
    /// of `data`. When invalid entries are not a trailing suffix of the feed,
    /// labels end up shifted relative to the values they sit under.
    ///
    /// A `null` entry fails the whole feed.
    pub fn from_feed(
        response: &FeedResponse,
        field_id: &str,
        time_zone: LabelTimeZone,
    ) -> Result<Self, FeedParseError> {
        if let Some(index) = response.feeds.iter().position(Value::is_null) {
            return Err(FeedParseError::NullEntry { index });
        }

        let key = format!("field{}", field_id);

        let data: Vec<f64> = response
            .feeds
            .iter()
            .filter_map(|entry| field_value(entry, &key))
            .collect();

        let labels: Vec<String> = response
            .feeds
            .iter()
            .map(|entry| {
                let created_at = entry.get("created_at").and_then(Value::as_str);
                format_time_label(created_at, time_zone)
            })
            .take(data.len())
            .collect();

        Ok(Self::new(data, labels))
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum FeedParseError {
    #[error("feed entry {index} is null")]
    NullEntry { index: usize },
}

/// Channel feed body as returned by the telemetry API.
///
/// Entries stay untyped because the measurement key (`field{N}`) is chosen at runtime.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedResponse {
    #[serde(default)]
    pub channel: Option<ChannelInfo>,
    pub feeds: Vec<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChannelInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub last_entry_id: Option<u64>,
}

/// Time zone the time-of-day labels are rendered in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelTimeZone {
    #[default]
    Local,
    Utc,
}

fn field_value(entry: &Value, key: &str) -> Option<f64> {
    let value = match entry.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_leading_float(s),
        _ => None,
    }?;

    (!value.is_nan()).then_some(value)
}

/// Parse the longest numeric prefix of `input`, ignoring leading whitespace
/// and any trailing characters. Returns `None` when no digits lead the string.
pub fn parse_leading_float(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let len = bytes.len();

    let mut end = 0;
    let negative = matches!(bytes.first(), Some(b'-'));
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let int_start = end;
    while end < len && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < len && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < len && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < len && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < len && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < len && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%#z"];
const LOCAL_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Parse a feed timestamp.
///
/// Date-times carrying an offset are exact; date-times without one are read
/// as local time; a bare date is UTC midnight.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(time) = DateTime::parse_from_rfc3339(raw) {
        return Some(time.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(time) = DateTime::parse_from_str(raw, format) {
            return Some(time.with_timezone(&Utc));
        }
    }

    for format in LOCAL_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return naive
                .and_local_timezone(Local)
                .earliest()
                .map(|time| time.with_timezone(&Utc));
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Format a timestamp as a time of day, e.g. `10:00:00 AM`.
pub fn format_time_label(created_at: Option<&str>, time_zone: LabelTimeZone) -> String {
    let Some(time) = created_at.and_then(parse_timestamp) else {
        return INVALID_DATE_LABEL.to_string();
    };

    const FORMAT: &str = "%-I:%M:%S %p";
    match time_zone {
        LabelTimeZone::Local => time.with_timezone(&Local).format(FORMAT).to_string(),
        LabelTimeZone::Utc => time.format(FORMAT).to_string(),
    }
}
