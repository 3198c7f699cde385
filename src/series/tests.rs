use super::*;
use std::io::Write;

const SAMPLE: &str = "time,0mm,12.5mm,25mm\n0.0,40.1,41.3,39.8\n0.1,40.4,41.9,40.0\n";

fn parse(text: &str) -> Result<SeriesTable, SeriesError> {
    SeriesTable::from_reader(text.as_bytes())
}

fn write_file(dir: &std::path::Path, name: &str, value: f64, times: &[f64]) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "time,0mm,10mm").unwrap();
    for t in times {
        writeln!(file, "{},{},{}", t, value, value + 1.0).unwrap();
    }
    path
}

#[test]
fn test_parse_sample_table() {
    let table = parse(SAMPLE).unwrap();
    assert_eq!(table.times(), &[0.0, 0.1]);
    assert_eq!(table.distance(), &[0.0, 12.5, 25.0]);
    assert_eq!(table.len(), 2);
    assert_eq!(table.row(1), Some(&[40.4, 41.9, 40.0][..]));
    assert_eq!(table.row(2), None);
    assert_eq!(table.rows().count(), 2);
    assert_eq!(table.name(), None);
}

#[test]
fn test_parse_tolerates_whitespace_and_bom() {
    let table = parse("\u{feff}time , 1 mm, 2cm\n 0 , 40 , 41 \n\n").unwrap();
    assert_eq!(table.distance(), &[1.0, 2.0]);
    assert_eq!(table.times(), &[0.0]);
}

#[test]
fn test_missing_time_column() {
    assert!(matches!(
        parse("t,0mm\n0,40\n"),
        Err(SeriesError::MalformedInput(_))
    ));
}

#[test]
fn test_no_distance_columns() {
    assert!(matches!(
        parse("time\n0\n1\n"),
        Err(SeriesError::MalformedInput(_))
    ));
}

#[test]
fn test_bad_distance_header() {
    assert!(matches!(
        parse("time,left\n0,40\n"),
        Err(SeriesError::MalformedInput(_))
    ));
    assert_eq!(parse_distance_header("7.5mm").unwrap(), 7.5);
    assert_eq!(parse_distance_header(" 3 ").unwrap(), 3.0);
    assert!(parse_distance_header("mm").is_err());
}

#[test]
fn test_ragged_row() {
    assert!(matches!(
        parse("time,0mm,1mm\n0,40,41\n1,40\n"),
        Err(SeriesError::MalformedInput(_))
    ));
}

#[test]
fn test_non_numeric_cell() {
    assert!(matches!(
        parse("time,0mm\n0,hot\n"),
        Err(SeriesError::MalformedInput(_))
    ));
}

#[test]
fn test_times_must_ascend() {
    assert!(matches!(
        parse("time,0mm\n1,40\n1,41\n"),
        Err(SeriesError::MalformedInput(_))
    ));
    assert!(matches!(
        parse("time,0mm\n2,40\n1,41\n"),
        Err(SeriesError::MalformedInput(_))
    ));
}

#[test]
fn test_header_only_is_degenerate() {
    assert!(matches!(
        parse("time,0mm,1mm\n"),
        Err(SeriesError::DegenerateSeries(_))
    ));
}

#[test]
fn test_single_distance_column_loads() {
    let table = parse("time,5mm\n0,40\n1,41\n").unwrap();
    assert_eq!(table.distance(), &[5.0]);
}

#[test]
fn test_write_csv_reproduces_table() {
    let table = parse(SAMPLE).unwrap();
    let mut out = Vec::new();
    table.write_csv(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("time,0mm,12.5mm,25mm\n"));
    assert_eq!(parse(&text).unwrap(), table);
}

#[test]
fn test_summary() {
    let summary = parse(SAMPLE).unwrap().with_name("run").summary();
    assert_eq!(summary.name.as_deref(), Some("run"));
    assert_eq!(summary.time_points, 2);
    assert_eq!(summary.distance_max, 25.0);
    assert_eq!(summary.temperature_min, 39.8);
    assert_eq!(summary.temperature_max, 41.9);
    assert!(summary.to_string().starts_with("run: 2 time points"));
}

#[test]
fn test_nearest_index_on_table() {
    let table = parse(SAMPLE).unwrap();
    assert_eq!(table.nearest_index(0.04), 0);
    assert_eq!(table.nearest_index(0.07), 1);
    assert_eq!(table.nearest_index(9.0), 1);
}

#[test]
fn test_side_from_file_name() {
    assert_eq!(Side::from_file_name("run3_left.csv"), Some(Side::Left));
    assert_eq!(Side::from_file_name("TOP-sensor.csv"), Some(Side::Top));
    assert_eq!(Side::from_file_name("bottom.csv"), Some(Side::Bottom));
    assert_eq!(Side::from_file_name("rightmost.csv"), None);
    assert_eq!(Side::from_file_name("left_right.csv"), None);
    assert_eq!(Side::from_file_name("data.csv"), None);
    assert_eq!("Right".parse::<Side>(), Ok(Side::Right));
}

#[test]
fn test_panels_require_equal_time_axes() {
    let table = |times: Vec<f64>| {
        let rows = vec![vec![40.0]; times.len()];
        SeriesTable::new(times, vec![0.0], rows).unwrap()
    };
    let result = PanelSet::new(
        table(vec![0.0, 1.0]),
        table(vec![0.0, 1.0]),
        table(vec![0.0, 1.5]),
        table(vec![0.0, 1.0]),
    );
    assert!(matches!(result, Err(SeriesError::MismatchedAxes(_))));

    let result = PanelSet::new(
        table(vec![0.0, 1.0]),
        table(vec![0.0, 1.0]),
        table(vec![0.0, 1.0]),
        table(vec![0.0]),
    );
    assert!(matches!(result, Err(SeriesError::MismatchedAxes(_))));
}

#[test]
fn test_panels_assigned_by_name_tokens() {
    let dir = tempfile::tempdir().unwrap();
    let times = [0.0, 0.5];
    let paths = [
        write_file(dir.path(), "run_right.csv", 43.0, &times),
        write_file(dir.path(), "run_top.csv", 40.0, &times),
        write_file(dir.path(), "run_left.csv", 42.0, &times),
        write_file(dir.path(), "run_bottom.csv", 41.0, &times),
    ];

    let panels = PanelSet::from_paths(&paths).unwrap();
    assert_eq!(panels.get(Side::Top).row(0), Some(&[40.0, 41.0][..]));
    assert_eq!(panels.get(Side::Right).name(), Some("run_right"));
    let order: Vec<Side> = panels.iter().map(|(side, _)| side).collect();
    assert_eq!(order, Side::ALL.to_vec());
    assert_eq!(panels.times(), &times);
}

#[test]
fn test_panels_positional_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let times = [0.0, 1.0];
    let paths: Vec<_> = ["a.csv", "b.csv", "c.csv", "d.csv"]
        .iter()
        .enumerate()
        .map(|(i, name)| write_file(dir.path(), name, 40.0 + i as f64, &times))
        .collect();

    let panels = PanelSet::from_paths(&paths).unwrap();
    assert_eq!(panels.get(Side::Top).name(), Some("a"));
    assert_eq!(panels.get(Side::Right).name(), Some("d"));
}

#[test]
fn test_panels_partial_tokens_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let times = [0.0];
    let paths = [
        write_file(dir.path(), "top.csv", 40.0, &times),
        write_file(dir.path(), "bottom.csv", 40.0, &times),
        write_file(dir.path(), "left.csv", 40.0, &times),
        write_file(dir.path(), "other.csv", 40.0, &times),
    ];
    assert!(matches!(
        PanelSet::from_paths(&paths),
        Err(SeriesError::MalformedInput(_))
    ));
    assert!(matches!(
        PanelSet::from_paths(&paths[..3]),
        Err(SeriesError::MalformedInput(_))
    ));
}

#[test]
fn test_frame_source_times() {
    let source = FrameSource::from(parse(SAMPLE).unwrap().with_name("strip"));
    assert_eq!(source.times(), &[0.0, 0.1]);
    assert_eq!(source.time_span(), (0.0, 0.1));
    assert_eq!(source.names(), vec!["strip".to_string()]);
}
