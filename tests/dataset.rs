use std::path::Path;

use boomplot::data::atmosphere::SoundingCategory;
use boomplot::data::dataset::{parse_atmosphere, parse_signature, FlightDataset};
use boomplot::LoadError;

const HEADER: &str = "time,Mach,AngleOfAttack,Altitude,Latitude,Longitude\n";

#[test]
fn signature_skips_blank_lines() {
    let sig = parse_signature("0 0.0\n\n1 1.5\n  2   -1.0  extra\n", Path::new("sig.dat")).unwrap();
    assert_eq!(sig.position, vec![0.0, 1.0, 2.0]);
    assert_eq!(sig.pressure, vec![0.0, 1.5, -1.0]);
}

#[test]
fn signature_error_names_line() {
    let err = parse_signature("0 1\n1 x\n", Path::new("sig.dat")).unwrap_err();
    match err {
        LoadError::NotNumeric { line, token, .. } => {
            assert_eq!(line, 2);
            assert_eq!(token, "x");
        }
        other => panic!("unexpected error {other}"),
    }
    let err = parse_signature("0 1\n\n7\n", Path::new("sig.dat")).unwrap_err();
    assert!(matches!(err, LoadError::ShortRow { line: 3, found: 1, .. }));
    assert!(err.to_string().contains("sig.dat:3"));
}

#[test]
fn atmosphere_blocks_by_label() {
    let text = "\
Temperature [C]
0 15.0
1000 8.5
X-Wind [m/s]
0 5.0
1000 7.0
Pressure [Pa]
0 101325
Relative Humidity [%]
0 70
1000 60
";
    let profile = parse_atmosphere(text, Path::new("atm.input")).unwrap();
    assert_eq!(profile.altitude, vec![0.0, 1000.0]);
    assert_eq!(profile.values(SoundingCategory::Temperature), &[15.0, 8.5]);
    assert_eq!(profile.values(SoundingCategory::XWind), &[5.0, 7.0]);
    assert!(profile.values(SoundingCategory::YWind).is_empty());
    assert_eq!(profile.values(SoundingCategory::Humidity), &[70.0, 60.0]);
    assert_eq!(profile.curve(SoundingCategory::XWind), vec![[5.0, 0.0], [7.0, 1000.0]]);
}

#[test]
fn atmosphere_bad_value_names_line() {
    let err = parse_atmosphere("Temperature\n0 15\n100 warm\n", Path::new("atm.input")).unwrap_err();
    assert!(matches!(err, LoadError::NotNumeric { line: 3, .. }));
}

#[test]
fn replay_table_loads_sorted_rows() {
    let csv = format!("{HEADER}0.0,0.5,6.0,100,34.9,-117.9\n0.5,0.6,5.9,120,34.9,-117.9\n");
    let ds = FlightDataset::from_reader(csv.as_bytes(), Path::new("flight.csv")).unwrap();
    assert_eq!(ds.len(), 2);
    assert_eq!(ds.times(), &[0.0, 0.5]);
    assert_eq!(ds.rows()[1].altitude, 120.0);
    assert_eq!(ds.duration(), 0.5);
}

#[test]
fn replay_table_rejects_unsorted_time() {
    let csv = format!("{HEADER}1.0,0.5,6,100,0,0\n0.5,0.6,6,100,0,0\n");
    let err = FlightDataset::from_reader(csv.as_bytes(), Path::new("flight.csv")).unwrap_err();
    assert!(matches!(err, LoadError::UnsortedTime { line: 3, .. }));
}

#[test]
fn unsorted_line_counts_comments_and_blank_lines() {
    let csv = format!("{HEADER}# climb\n1.0,0.5,6,100,0,0\n\n0.5,0.6,6,100,0,0\n");
    let err = FlightDataset::from_reader(csv.as_bytes(), Path::new("flight.csv")).unwrap_err();
    assert!(matches!(err, LoadError::UnsortedTime { line: 5, .. }), "{err}");
}

#[test]
fn replay_table_rejects_non_finite_time() {
    let csv = format!("{HEADER}0.0,0.5,6,100,0,0\nNaN,0.6,6,100,0,0\n0.5,0.6,6,100,0,0\n");
    let err = FlightDataset::from_reader(csv.as_bytes(), Path::new("flight.csv")).unwrap_err();
    assert!(matches!(err, LoadError::NonFiniteTime { line: 3, .. }), "{err}");
    assert!(err.to_string().contains("flight.csv:3"));
}

#[test]
fn replay_table_needs_two_rows() {
    let csv = format!("{HEADER}1.0,0.5,6,100,0,0\n");
    let err = FlightDataset::from_reader(csv.as_bytes(), Path::new("flight.csv")).unwrap_err();
    assert!(matches!(err, LoadError::TooFewRows { found: 1, .. }));
}

#[test]
fn replay_table_rejects_non_numeric_cells() {
    let csv = format!("{HEADER}0.0,fast,6,100,0,0\n1.0,0.6,6,100,0,0\n");
    let err = FlightDataset::from_reader(csv.as_bytes(), Path::new("flight.csv")).unwrap_err();
    assert!(matches!(err, LoadError::Csv { .. }));
    assert!(err.to_string().contains("flight.csv"));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = FlightDataset::load(Path::new("does/not/exist.csv")).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}
