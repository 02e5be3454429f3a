//! Date parsing for range buckets and selection boundaries.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};

use crate::error::{FacetError, FacetResult};

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

pub fn parse_date(value: &str) -> FacetResult<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Ok(date.with_timezone(&Utc));
    }
    for format in DATETIME_FORMATS {
        if let Ok(date) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(date.and_utc());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            if let Some(date) = date.and_hms_opt(0, 0, 0) {
                return Ok(date.and_utc());
            }
        }
    }
    Err(FacetError::InvalidDateFormat { value: value.to_string() })
}

/// True if `candidate` falls in `[boundary, boundary + gap)`.
pub fn is_near(candidate: DateTime<Utc>, boundary: DateTime<Utc>, gap: TimeDelta) -> bool {
    let diff = candidate - boundary;
    diff >= TimeDelta::zero() && diff < gap
}

pub fn format_date(value: &str, format: &str) -> FacetResult<String> {
    Ok(parse_date(value)?.format(format).to_string())
}
