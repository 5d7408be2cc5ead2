use std::fmt;
use std::sync::OnceLock;

use anyhow::{Result, anyhow};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// A raw cell value as supplied by a feed loader.
///
/// Cells are carried as `Option<Value>`; `None` is a missing entry and always
/// renders as the empty string. Non-finite floats are treated as missing too,
/// so `NaN` never leaks into output text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Time(NaiveTime),
    Duration(TimeDelta),
    Point(Point),
}

impl Value {
    /// Plain string conversion, used by the identity rule and as the
    /// last-resort fallback of every other rule.
    pub fn as_display(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => {
                // The integer shortcut only holds where the cast is exact.
                if f.fract() == 0.0 && f.is_finite() && f.abs() < i64::MAX as f64 {
                    (*f as i64).to_string()
                } else {
                    f.to_string()
                }
            }
            Value::Boolean(b) => b.to_string(),
            Value::Date(d) => d.format("%Y-%m-%d").to_string(),
            Value::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            Value::Time(t) => t.format("%H:%M:%S").to_string(),
            Value::Duration(d) => format!("{}s", d.num_seconds()),
            Value::Point(p) => format!("POINT ({} {})", p.x, p.y),
        }
    }

    /// Missing means "renders as empty": absent cells and non-finite floats.
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Float(f) if !f.is_finite())
    }

    /// Coerces the value to `f64` where a numeric reading exists.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::String(s) => {
                let parsed: f64 = s.trim().parse().ok()?;
                parsed.is_finite().then_some(parsed)
            }
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

pub fn parse_naive_date(value: &str) -> Result<NaiveDate> {
    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%Y/%m/%d", "%d-%m-%Y"];
    for fmt in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(value, fmt) {
            return Ok(parsed);
        }
    }
    Err(anyhow!("Failed to parse '{value}' as date"))
}

pub fn parse_naive_datetime(value: &str) -> Result<NaiveDateTime> {
    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%d/%m/%Y %H:%M:%S",
        "%m/%d/%Y %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];
    for fmt in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, fmt) {
            return Ok(parsed);
        }
    }
    Err(anyhow!("Failed to parse '{value}' as datetime"))
}

fn duration_clock_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:(\d+)\s*days?\s*,?\s*)?(\d+):(\d{1,2})(?::(\d{1,2})(?:\.(\d+))?)?$")
            .unwrap()
    })
}

fn duration_unit_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d+(?:\.\d+)?)\s*(s|sec|secs|seconds?|m|min|mins|minutes?|h|hr|hrs|hours?)$")
            .unwrap()
    })
}

/// Parses a duration string into whole elapsed seconds.
///
/// Service days in GTFS run past midnight, so hours are unbounded: accepts
/// `"26:05:00"`, `"1 day 02:00:00"`, `"14:30"`, and single-unit forms such as
/// `"90min"` or `"3600s"`. Fractional seconds are truncated.
pub fn parse_service_duration(value: &str) -> Result<i64> {
    let trimmed = value.trim();
    if let Some(caps) = duration_clock_re().captures(trimmed) {
        let days: i64 = caps.get(1).map_or(Ok(0), |m| m.as_str().parse())?;
        let hours: i64 = caps[2].parse()?;
        let minutes: i64 = caps[3].parse()?;
        let seconds: i64 = caps.get(4).map_or(Ok(0), |m| m.as_str().parse())?;
        if minutes > 59 || seconds > 59 {
            return Err(anyhow!("Failed to parse '{value}' as duration"));
        }
        return Ok(days * 86_400 + hours * 3_600 + minutes * 60 + seconds);
    }
    if let Some(caps) = duration_unit_re().captures(&trimmed.to_ascii_lowercase()) {
        let amount: f64 = caps[1].parse()?;
        let scale = match &caps[2] {
            s if s.starts_with('s') => 1.0,
            m if m.starts_with('m') => 60.0,
            _ => 3_600.0,
        };
        return Ok((amount * scale).round() as i64);
    }
    Err(anyhow!("Failed to parse '{value}' as duration"))
}
