use chrono::NaiveDate;
use gtfs_canon::canon::canonicalize;
use gtfs_canon::frame::{Column, Frame};
use gtfs_canon::geometry::Point;
use gtfs_canon::rules::{Rule, format_cell, rule_for};
use gtfs_canon::value::Value;
use proptest::prelude::*;

fn raw(values: &[&str]) -> Vec<Option<Value>> {
    values
        .iter()
        .map(|v| {
            if v.is_empty() {
                None
            } else {
                Some(Value::String((*v).to_string()))
            }
        })
        .collect()
}

#[test]
fn stop_times_table_round_trips_to_canonical_strings() {
    let frame = Frame::new(vec![
        Column::new("trip_id", raw(&["T1", "T2", "T3"])),
        Column::new("arrival_time", raw(&["5:3:0", "26:05:00", ""])),
        Column::new(
            "departure_time",
            vec![
                Some(Value::Integer(3_725)),
                Some(Value::String("oddball".to_string())),
                None,
            ],
        ),
        Column::new("stop_sequence", raw(&["1", "2.0", "nan"])),
        Column::new("shape_dist_traveled", raw(&["0.500", "", "12.250000"])),
        Column::new(
            "pickup_type",
            vec![
                Some(Value::String("yes".to_string())),
                Some(Value::String("No".to_string())),
                Some(Value::Integer(2)),
            ],
        ),
    ])
    .unwrap();

    let canonical = canonicalize(&frame);
    assert_eq!(canonical.column("arrival_time").unwrap(), ["05:03:00", "26:05:00", ""]);
    assert_eq!(
        canonical.column("departure_time").unwrap(),
        ["01:02:05", "oddball", ""]
    );
    assert_eq!(canonical.column("stop_sequence").unwrap(), ["1", "2", ""]);
    assert_eq!(
        canonical.column("shape_dist_traveled").unwrap(),
        ["0.5", "", "12.25"]
    );
    assert_eq!(canonical.column("pickup_type").unwrap(), ["1", "0", "1"]);
}

#[test]
fn service_flag_strings_outside_the_token_set_pass_through() {
    let frame = Frame::new(vec![Column::new(
        "bikes_allowed",
        raw(&["2", "unknown", "1"]),
    )])
    .unwrap();
    let canonical = canonicalize(&frame);
    assert_eq!(canonical.column("bikes_allowed").unwrap(), ["2", "unknown", "1"]);
}

#[test]
fn calendar_table_renders_dates_and_service_flags() {
    let frame = Frame::new(vec![
        Column::new("service_id", raw(&["WK"])),
        Column::new("monday", vec![Some(Value::Boolean(true))]),
        Column::new("sunday", vec![Some(Value::Integer(0))]),
        Column::new("start_date", raw(&["2024-03-07"])),
        Column::new(
            "end_date",
            vec![Some(Value::Date(
                NaiveDate::from_ymd_opt(2024, 12, 14).unwrap(),
            ))],
        ),
    ])
    .unwrap();

    let canonical = canonicalize(&frame);
    assert_eq!(canonical.column("monday").unwrap(), ["1"]);
    assert_eq!(canonical.column("sunday").unwrap(), ["0"]);
    assert_eq!(canonical.column("start_date").unwrap(), ["20240307"]);
    assert_eq!(canonical.column("end_date").unwrap(), ["20241214"]);
}

#[test]
fn stops_table_fills_coordinates_from_geometry() {
    let frame = Frame::new(vec![
        Column::new("stop_id", raw(&["S1", "S2"])),
        Column::new("stop_lat", vec![None, Some(Value::Float(48.137))]),
        Column::new("stop_lon", vec![None, Some(Value::Float(11.575))]),
        Column::new(
            "geometry",
            vec![
                Some(Value::Point(Point::new(11.2, 49.3))),
                Some(Value::Point(Point::new(0.0, 0.0))),
            ],
        ),
    ])
    .unwrap();

    let canonical = canonicalize(&frame);
    assert_eq!(canonical.headers(), ["stop_id", "stop_lat", "stop_lon"]);
    assert_eq!(canonical.column("stop_lat").unwrap(), ["49.3", "48.137"]);
    assert_eq!(canonical.column("stop_lon").unwrap(), ["11.2", "11.575"]);
}

#[test]
fn output_shape_matches_input_shape() {
    let frame = Frame::new(vec![
        Column::new("route_id", raw(&["R1", "R2"])),
        Column::new("route_short_name", raw(&["565", ""])),
        Column::new("route_type", raw(&["3", "3"])),
    ])
    .unwrap();
    let canonical = canonicalize(&frame);
    assert_eq!(canonical.column_count(), frame.column_count());
    assert_eq!(canonical.row_count(), frame.row_count());
    assert_eq!(canonical.row(1).unwrap(), ["R2", "", "3"]);
    assert_eq!(canonical.row(frame.row_count()), None);
}

proptest! {
    // Re-parsing a float-rule rendering and formatting it again must not
    // change the text.
    #[test]
    fn float_rule_is_idempotent(f in -1.0e6..1.0e6f64) {
        let first = format_cell(Rule::Float, Some(&Value::Float(f)));
        let reparsed: f64 = first.parse().unwrap();
        let second = format_cell(Rule::Float, Some(&Value::Float(reparsed)));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn zero_one_rule_output_is_constrained(s in "\\PC*") {
        let out = format_cell(Rule::ZeroOne, Some(&Value::String(s.clone())));
        let passthrough = s.trim().to_string();
        prop_assert!(
            out.is_empty() || out == "0" || out == "1" || out == passthrough,
            "unexpected output {:?} for {:?}",
            out,
            s
        );
    }

    #[test]
    fn integer_rule_never_emits_decimal_points_or_padding(f in -1.0e9..1.0e9f64) {
        let out = format_cell(Rule::Integer, Some(&Value::Float(f)));
        prop_assert!(!out.contains('.'));
        prop_assert_eq!(out.trim(), out.as_str());
    }

    #[test]
    fn unknown_columns_get_the_identity_rule(name in "[a-z_]{1,24}") {
        prop_assume!(rule_for(&name) == Rule::Identity);
        let out = format_cell(Rule::Identity, Some(&Value::String(name.clone())));
        prop_assert_eq!(out, name);
    }
}
