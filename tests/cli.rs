use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

mod common;
use common::TestWorkspace;

fn cargo_bin() -> Command {
    Command::cargo_bin("gtfs-canon").expect("binary exists")
}

#[test]
fn format_writes_fully_quoted_gtfs_csv() {
    let ws = TestWorkspace::new();
    let input = ws.write(
        "stop_times.csv",
        "trip_id,arrival_time,departure_time,stop_sequence\n\
         T1,5:3:0,05:04:00,1\n\
         T2,26:05:00,,2.0\n",
    );
    let output = ws.path().join("stop_times.txt");

    cargo_bin()
        .args([
            "format",
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .success();

    let written = fs::read_to_string(&output).expect("read output");
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(
        lines[0],
        "\"trip_id\",\"arrival_time\",\"departure_time\",\"stop_sequence\""
    );
    assert_eq!(lines[1], "\"T1\",\"05:03:00\",\"05:04:00\",\"1\"");
    assert_eq!(lines[2], "\"T2\",\"26:05:00\",\"\",\"2\"");
    assert!(written.ends_with('\n'));
    assert!(!written.contains('\r'));
}

#[test]
fn format_drops_geometry_column_and_maps_service_flags() {
    let ws = TestWorkspace::new();
    let input = ws.write(
        "calendar.csv",
        "service_id,monday,sunday,start_date,end_date,geometry\n\
         WK,yes,No,2024-03-07,20241214,POINT (11.2 49.3)\n",
    );

    cargo_bin()
        .args(["format", "-i", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains(
            "\"service_id\",\"monday\",\"sunday\",\"start_date\",\"end_date\"",
        ))
        .stdout(contains("\"WK\",\"1\",\"0\",\"20240307\",\"20241214\""))
        .stdout(contains("geometry").not());
}

#[test]
fn format_reads_stdin_with_explicit_delimiter() {
    cargo_bin()
        .args(["format", "-i", "-", "--delimiter", ";", "--output-delimiter", ","])
        .write_stdin("stop_id;stop_lat;stop_lon\nS1;49.300;11.200000000000\n")
        .assert()
        .success()
        .stdout(contains("\"S1\",\"49.3\",\"11.2\""));
}

#[test]
fn format_fails_cleanly_on_missing_input() {
    let ws = TestWorkspace::new();
    let missing = ws.path().join("absent.csv");
    cargo_bin()
        .args(["format", "-i", missing.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(contains("Opening input file"));
}

#[test]
fn rules_reports_the_rule_for_each_column() {
    cargo_bin()
        .args(["rules", "arrival_time", "stop_lat", "stop_name"])
        .assert()
        .success()
        .stdout(contains("arrival_time\ttime"))
        .stdout(contains("stop_lat\tfloat"))
        .stdout(contains("stop_name\tidentity"));
}

#[test]
fn rules_without_arguments_lists_the_builtin_table() {
    cargo_bin()
        .arg("rules")
        .assert()
        .success()
        .stdout(contains("wheelchair_accessible\tzero-or-one"))
        .stdout(contains("shape_dist_traveled\tfloat"));
}
