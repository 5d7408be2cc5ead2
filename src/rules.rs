//! Column-name-driven GTFS coercion rules.
//!
//! Every GTFS column name maps to exactly one of six formatting rules via a
//! fixed, case-sensitive lookup table; unknown names fall through to the
//! identity rule. Each rule is a total function over `Option<&Value>`: a
//! missing cell always renders as `""`, and every unparseable value resolves
//! to a documented fallback string instead of an error.
//!
//! Rounding policy: wherever a rule rounds a float to an integer it rounds
//! half away from zero (`f64::round`), so `0.5` is truthy and `2.5` renders
//! as `3`.

use crate::value::{Value, parse_naive_date, parse_naive_datetime, parse_service_duration};

pub const TIME_COLUMNS: &[&str] = &["arrival_time", "departure_time", "start_time", "end_time"];

pub const DATE_COLUMNS: &[&str] = &["date", "start_date", "end_date"];

pub const ZERO_ONE_COLUMNS: &[&str] = &[
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
    "pickup_type",
    "drop_off_type",
    "wheelchair_accessible",
    "bikes_allowed",
];

pub const INTEGER_COLUMNS: &[&str] = &[
    "stop_sequence",
    "direction_id",
    "route_type",
    "exception_type",
    "location_type",
    "transfer_type",
];

pub const FLOAT_COLUMNS: &[&str] = &[
    "stop_lat",
    "stop_lon",
    "shape_dist_traveled",
    "shape_pt_lat",
    "shape_pt_lon",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Time,
    Date,
    ZeroOne,
    Integer,
    Float,
    Identity,
}

impl Rule {
    pub fn label(self) -> &'static str {
        match self {
            Rule::Time => "time",
            Rule::Date => "date",
            Rule::ZeroOne => "zero-or-one",
            Rule::Integer => "integer",
            Rule::Float => "float",
            Rule::Identity => "identity",
        }
    }
}

/// Selects the formatting rule for a column name. Exact, case-sensitive
/// match; anything unrecognized gets the identity rule.
pub fn rule_for(column: &str) -> Rule {
    if TIME_COLUMNS.contains(&column) {
        Rule::Time
    } else if DATE_COLUMNS.contains(&column) {
        Rule::Date
    } else if ZERO_ONE_COLUMNS.contains(&column) {
        Rule::ZeroOne
    } else if INTEGER_COLUMNS.contains(&column) {
        Rule::Integer
    } else if FLOAT_COLUMNS.contains(&column) {
        Rule::Float
    } else {
        Rule::Identity
    }
}

/// Applies `rule` to a single cell. Total: never panics, never errors.
pub fn format_cell(rule: Rule, cell: Option<&Value>) -> String {
    let value = match cell {
        Some(v) if !v.is_missing() => v,
        _ => return String::new(),
    };
    match rule {
        Rule::Time => format_time(value),
        Rule::Date => format_date(value),
        Rule::ZeroOne => format_zero_one(value),
        Rule::Integer => format_integer(value),
        Rule::Float => format_float(value),
        Rule::Identity => value.as_display(),
    }
}

fn clock(total_seconds: i64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        total_seconds / 3_600,
        total_seconds % 3_600 / 60,
        total_seconds % 60
    )
}

/// Re-renders `H:M:S` strings zero-padded, keeping hours unbounded so
/// past-midnight service times like `26:05:00` survive.
fn reparse_clock_string(s: &str) -> Option<String> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
        return None;
    }
    let hours: i64 = parts[0].parse().ok()?;
    let minutes: i64 = parts[1].parse().ok()?;
    // Seconds tolerate a fractional part, truncated rather than rounded.
    let seconds = parts[2].parse::<f64>().ok()? as i64;
    Some(format!("{hours:02}:{minutes:02}:{seconds:02}"))
}

fn format_time(value: &Value) -> String {
    match value {
        Value::String(raw) => {
            let s = raw.trim();
            if s.is_empty() {
                return String::new();
            }
            if let Some(rendered) = reparse_clock_string(s) {
                return rendered;
            }
            match parse_service_duration(s) {
                Ok(total) => clock(total),
                Err(_) => s.to_string(),
            }
        }
        Value::Duration(d) => clock(d.num_seconds()),
        // Only the time-of-day component, date part discarded.
        Value::DateTime(dt) => dt.time().format("%H:%M:%S").to_string(),
        Value::Time(t) => t.format("%H:%M:%S").to_string(),
        Value::Integer(i) => clock(*i),
        Value::Float(f) => clock(f.round() as i64),
        other => other.as_display(),
    }
}

fn format_date(value: &Value) -> String {
    match value {
        Value::String(raw) => {
            let s = raw.trim();
            if s.is_empty() {
                return String::new();
            }
            if s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit()) {
                return s.to_string();
            }
            if let Ok(date) = parse_naive_date(s) {
                return date.format("%Y%m%d").to_string();
            }
            if let Ok(datetime) = parse_naive_datetime(s) {
                return datetime.format("%Y%m%d").to_string();
            }
            s.to_string()
        }
        Value::Date(d) => d.format("%Y%m%d").to_string(),
        Value::DateTime(dt) => dt.format("%Y%m%d").to_string(),
        other => other.as_display(),
    }
}

fn format_zero_one(value: &Value) -> String {
    match value {
        Value::String(raw) => {
            let s = raw.trim();
            if s == "0" || s == "1" {
                return s.to_string();
            }
            match s.to_ascii_lowercase().as_str() {
                "true" | "t" | "yes" | "y" => "1".to_string(),
                "false" | "f" | "no" | "n" => "0".to_string(),
                // Unrecognized tokens pass through untouched.
                _ => s.to_string(),
            }
        }
        Value::Boolean(b) => if *b { "1" } else { "0" }.to_string(),
        Value::Integer(i) => if *i != 0 { "1" } else { "0" }.to_string(),
        Value::Float(f) => if f.round() as i64 != 0 { "1" } else { "0" }.to_string(),
        other => other.as_display(),
    }
}

fn format_integer(value: &Value) -> String {
    if let Some(f) = value.as_f64() {
        return (f.round() as i64).to_string();
    }
    let s = value.as_display().trim().to_string();
    // Stringified missing markers must not leak into the feed.
    if s.eq_ignore_ascii_case("nan") || s.eq_ignore_ascii_case("none") {
        String::new()
    } else {
        s
    }
}

fn format_float(value: &Value) -> String {
    let Some(f) = value.as_f64() else {
        return value.as_display();
    };
    let fixed = format!("{f:.12}");
    let stripped = fixed.trim_end_matches('0').trim_end_matches('.');
    if stripped.is_empty() {
        "0".to_string()
    } else {
        stripped.to_string()
    }
}
