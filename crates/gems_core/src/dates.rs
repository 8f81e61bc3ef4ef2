use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d %b %Y", "%b %d, %Y"];

/// Parse an ISO-ish date string into epoch milliseconds. Dates in the feed
/// come from many RSS sources and are only loosely normalized; anything
/// unparsable sorts as epoch 0.
pub fn parse_date_epoch(raw: &str) -> i64 {
    let raw = raw.trim();
    if raw.is_empty() {
        return 0;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.timestamp_millis();
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return dt.timestamp_millis();
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return dt.and_utc().timestamp_millis();
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
            return d.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc().timestamp_millis();
        }
    }

    0
}

/// Current time in epoch milliseconds, used for cache-busting query strings.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
