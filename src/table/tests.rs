//! Tests for the table module

use super::*;
use crate::record;
use crate::shape::{Field, Input, Record};
use chrono::{NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use test_case::test_case;

record! {
    #[allow(non_snake_case)]
    #[derive(Debug, Clone)]
    struct Pair {
        A: i64,
        B: String,
    }
}

record! {
    #[derive(Debug, Clone)]
    struct Summary {
        team: String,
        extras: HashMap<(u8, u8), u8>,
        final_score: u32,
    }
}

fn kickoff() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 9, 8)
        .unwrap()
        .and_hms_opt(13, 0, 0)
        .unwrap()
}

fn fixed_builder() -> TableBuilder {
    TableBuilder::with_clock(Arc::new(FixedClock(kickoff())))
}

fn pairs(n: i64) -> Vec<Pair> {
    (1..=n)
        .map(|i| Pair {
            A: i,
            B: format!("b{i}"),
        })
        .collect()
}

fn strings(cells: &[&str]) -> Row {
    cells.iter().map(|c| (*c).to_string()).collect()
}

/// Advances one second per reading
struct TickingClock {
    seconds: AtomicI64,
}

impl Clock for TickingClock {
    fn now(&self) -> NaiveDateTime {
        let s = self.seconds.fetch_add(1, Ordering::SeqCst);
        kickoff() + chrono::Duration::seconds(s)
    }
}

// ============================================================================
// Row Materializer Tests
// ============================================================================

#[test]
fn test_header_row_appends_date_processed() {
    let header = header_row(&Field::list(["GameKey", "Season"]));
    assert_eq!(header, strings(&["GameKey", "Season", "date_processed"]));
}

#[test]
fn test_header_row_without_fields() {
    assert_eq!(header_row(&[]), strings(&["date_processed"]));
}

#[test]
fn test_materialize_typed_record() {
    let pair = Pair {
        A: 7,
        B: "seven".to_string(),
    };
    let row = materialize(&pair, &Pair::schema(), kickoff());
    assert_eq!(row, strings(&["7", "seven", "2024-09-08T13:00:00"]));
}

#[test]
fn test_materialize_unrenderable_member_keeps_row() {
    let mut extras = HashMap::new();
    extras.insert((1, 1), 1);
    let summary = Summary {
        team: "NE".to_string(),
        extras,
        final_score: 24,
    };

    let row = materialize(&summary, &Summary::schema(), kickoff());
    assert_eq!(
        row,
        strings(&["NE", UNRENDERABLE, "24", "2024-09-08T13:00:00"])
    );
}

#[test]
fn test_materialize_json_missing_member_is_empty() {
    let record = json!({"A": 1});
    let Value::Object(map) = &record else {
        panic!("Expected object");
    };
    let row = materialize(map, &Field::list(["A", "B"]), kickoff());
    assert_eq!(row, strings(&["1", "", "2024-09-08T13:00:00"]));
}

#[test_case(json!(null), "" ; "null is empty")]
#[test_case(json!(true), "true" ; "boolean true")]
#[test_case(json!(false), "false" ; "boolean false")]
#[test_case(json!(-42), "-42" ; "negative integer")]
#[test_case(json!(3.5), "3.5" ; "float")]
#[test_case(json!("Tom Brady"), "Tom Brady" ; "string verbatim")]
#[test_case(json!([1, 2]), "[1,2]" ; "array as json")]
#[test_case(json!({"a": "b"}), r#"{"a":"b"}"# ; "object as json")]
fn test_format_cell(value: Value, expected: &str) {
    assert_eq!(format_cell("field", &value).unwrap(), expected);
}

#[test]
fn test_format_timestamp() {
    assert_eq!(format_timestamp(kickoff()), "2024-09-08T13:00:00");
}

// ============================================================================
// Table Builder Tests
// ============================================================================

#[test]
fn test_sequence_of_three_records() {
    let records = pairs(3);
    let build = TableBuilder::new().build(&[Input::Sequence(&records)]);
    assert!(build.is_clean());

    let table = build.table;
    assert_eq!(table.len(), 4);
    assert_eq!(table.rows()[0], strings(&["A", "B", "date_processed"]));

    for (i, row) in table.data_rows().enumerate() {
        assert_eq!(row.len(), 3);
        assert_eq!(row[0], (i + 1).to_string());
        assert!(NaiveDateTime::parse_from_str(&row[2], DATE_PROCESSED_FORMAT).is_ok());
    }
}

#[test]
fn test_composite_yields_header_and_one_row() {
    let pair = Pair {
        A: 1,
        B: "x".to_string(),
    };
    let table = fixed_builder().build(&[Input::Composite(&pair)]).table;

    assert_eq!(
        table.into_rows(),
        vec![
            strings(&["A", "B", "date_processed"]),
            strings(&["1", "x", "2024-09-08T13:00:00"]),
        ]
    );
}

#[test]
fn test_empty_sequence_yields_header_only() {
    let records: Vec<Pair> = Vec::new();
    let table = fixed_builder().build(&[Input::Sequence(&records)]).table;

    assert_eq!(table.len(), 1);
    assert_eq!(table.data_row_count(), 0);
    assert_eq!(table.header(), Some(&strings(&["A", "B", "date_processed"])));
}

#[test]
fn test_scalar_only_yields_empty_table() {
    let build = fixed_builder().build(&[Input::scalar("ScoringPlayID")]);
    assert!(build.is_clean());
    assert!(build.table.is_empty());
}

#[test]
fn test_no_inputs_yields_empty_table() {
    assert!(fixed_builder().build(&[]).table.is_empty());
}

#[test]
fn test_scalar_with_sequence_contributes_nothing() {
    let records = pairs(2);
    let table = fixed_builder()
        .build(&[Input::scalar("ScoringPlayID"), Input::Sequence(&records)])
        .table;

    assert_eq!(table.len(), 3);
    assert_eq!(table.section_count(), 1);
}

#[test]
fn test_composites_append_positionally() {
    let a = json!({"Home": "NE", "Away": "BUF"});
    let b = json!({"Quarter": 1, "Points": 7, "Team": "NE"});
    let inputs = [Input::try_from(&a).unwrap(), Input::try_from(&b).unwrap()];
    let table = fixed_builder().build(&inputs).table;

    assert_eq!(
        table.rows(),
        &[
            strings(&["Home", "Away", "date_processed"]),
            strings(&["NE", "BUF", "2024-09-08T13:00:00"]),
            strings(&["Quarter", "Points", "Team", "date_processed"]),
            strings(&["1", "7", "NE", "2024-09-08T13:00:00"]),
        ]
    );
    assert_eq!(table.section_count(), 2);
    assert!(table.is_header(0));
    assert!(!table.is_header(1));
    assert!(table.is_header(2));
}

#[test]
fn test_every_row_matches_its_header_width() {
    let first = pairs(4);
    let second = json!([{"X": 1, "Y": 2, "Z": 3}, {"Z": 9}]);
    let inputs = [
        Input::Sequence(&first),
        Input::try_from(&second).unwrap(),
    ];
    let table = fixed_builder().build(&inputs).table;

    assert!(table.is_rectangular());
    assert_eq!(table.len(), 5 + 3);
}

#[test]
fn test_rejected_input_keeps_other_sections() {
    let before = json!({"A": 1});
    let broken = json!([{"A": 1}, "not a record"]);
    let after = json!({"B": 2});
    let inputs = [
        Input::try_from(&before).unwrap(),
        Input::try_from(&broken).unwrap(),
        Input::try_from(&after).unwrap(),
    ];

    let build = fixed_builder().build(&inputs);
    assert!(!build.is_clean());
    assert_eq!(build.rejected.len(), 1);
    assert_eq!(build.rejected[0].index, 1);
    assert!(build.rejected[0].error.is_shape());

    assert_eq!(build.table.len(), 4);
    assert_eq!(build.table.rows()[2], strings(&["B", "date_processed"]));
}

#[test]
fn test_into_result_reports_first_rejection() {
    let empty = json!([]);
    let inputs = [Input::try_from(&empty).unwrap()];
    let err = fixed_builder().build(&inputs).into_result().unwrap_err();
    assert!(err.is_shape());
}

#[test]
fn test_rows_are_stamped_when_materialized() {
    let records = pairs(3);
    let clock = Arc::new(TickingClock {
        seconds: AtomicI64::new(0),
    });
    let table = TableBuilder::with_clock(clock)
        .build(&[Input::Sequence(&records)])
        .table;

    let stamps: Vec<&str> = table.data_rows().map(|row| row[2].as_str()).collect();
    assert_eq!(
        stamps,
        vec![
            "2024-09-08T13:00:00",
            "2024-09-08T13:00:01",
            "2024-09-08T13:00:02"
        ]
    );
}

#[test]
fn test_header_identical_across_rows_of_one_shape() {
    let records = json!([
        {"PlayerID": 1, "Name": "A"},
        {"Name": "B", "PlayerID": 2}
    ]);
    let inputs = [Input::try_from(&records).unwrap()];
    let table = fixed_builder().build(&inputs).table;

    assert_eq!(table.headers().count(), 1);
    assert_eq!(table.rows()[2], strings(&["2", "B", "2024-09-08T13:00:00"]));
}

#[test]
fn test_system_clock_zone() {
    assert_eq!(SystemClock::default().zone(), TimestampZone::Utc);
    let stamp = format_timestamp(SystemClock::new(TimestampZone::Local).now());
    assert!(NaiveDateTime::parse_from_str(&stamp, DATE_PROCESSED_FORMAT).is_ok());
}

// ============================================================================
// CSV Codec Tests
// ============================================================================

#[test]
fn test_csv_round_trip_with_awkward_cells() {
    let records = json!([
        {"Name": "Smith, Jr.", "Note": "said \"go\"", "Detail": "line one\nline two"},
        {"Name": "", "Note": "plain", "Detail": "  padded  "}
    ]);
    let score = json!({"Total": 31});
    let inputs = [
        Input::try_from(&records).unwrap(),
        Input::try_from(&score).unwrap(),
    ];
    let table = fixed_builder().build(&inputs).table;

    let bytes = to_csv_bytes(&table).unwrap();
    let decoded = read_csv(bytes.as_slice()).unwrap();

    assert_eq!(decoded, table.rows());
}

#[test]
fn test_csv_encoding_layout() {
    let pair = Pair {
        A: 1,
        B: "a,b".to_string(),
    };
    let table = fixed_builder().build(&[Input::Composite(&pair)]).table;
    let text = String::from_utf8(to_csv_bytes(&table).unwrap()).unwrap();

    assert_eq!(
        text,
        "A,B,date_processed\n1,\"a,b\",2024-09-08T13:00:00\n"
    );
}

#[test]
fn test_csv_empty_table_is_empty_text() {
    assert!(to_csv_bytes(&Table::new()).unwrap().is_empty());
    assert!(read_csv(&b""[..]).unwrap().is_empty());
}
