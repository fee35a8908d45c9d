//! Tests for the ingestion pipeline

use super::*;
use crate::config::{default_entities, EntityConfig};
use crate::error::{Error, Result};
use crate::export::{BlobSink, CloudDestination};
use crate::source::{GameQuery, RecordSource};
use crate::table::{read_csv, FixedClock};
use async_trait::async_trait;
use bytes::Bytes;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;

const STAMP: &str = "2023-09-10T17:25:00";

/// Serves a fixed document
struct StaticSource(Value);

#[async_trait]
impl RecordSource for StaticSource {
    async fn fetch(&self, _query: &GameQuery) -> Result<Value> {
        Ok(self.0.clone())
    }
}

/// Always fails to fetch
struct DownSource;

#[async_trait]
impl RecordSource for DownSource {
    async fn fetch(&self, _query: &GameQuery) -> Result<Value> {
        Err(Error::http_status(503, "maintenance"))
    }
}

/// Fails deliveries into one folder
struct FlakySink {
    inner: CloudDestination,
    broken_folder: &'static str,
}

#[async_trait]
impl BlobSink for FlakySink {
    async fn put(&self, object_path: &str, data: Bytes) -> Result<String> {
        if object_path.contains(self.broken_folder) {
            return Err(Error::transport(object_path, "permission denied"));
        }
        self.inner.put(object_path, data).await
    }
}

fn query() -> GameQuery {
    GameQuery::new("1", "2023", "NE", "PHI")
}

fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(
        NaiveDate::from_ymd_opt(2023, 9, 10)
            .unwrap()
            .and_hms_opt(17, 25, 0)
            .unwrap(),
    ))
}

fn box_score() -> Value {
    json!({
        "Score": {"GameKey": "202310101", "AwayTeam": "PHI", "HomeTeam": "NE", "AwayScore": 25, "HomeScore": 20},
        "Quarters": [
            {"Number": 1, "AwayScore": 7, "HomeScore": 0},
            {"Number": 2, "AwayScore": 9, "HomeScore": 10}
        ],
        "TeamGames": [{"Team": "NE", "Score": 20}, {"Team": "PHI", "Score": 25}],
        "PlayerGames": [{"PlayerID": 1, "Name": "A. Player", "FantasyPoints": 12.5}],
        "FantasyDefenseGames": [],
        "ScoringPlays": [{"ScoringPlayID": 77, "Team": "PHI", "PlayDescription": "TD pass"}],
        "ScoringDetails": [{"ScoringDetailID": 5, "PlayerID": 1, "Length": 30}]
    })
}

fn ingestor(source: impl RecordSource + 'static, sink: Arc<dyn BlobSink>) -> Ingestor {
    Ingestor::new(Arc::new(source), sink, default_entities()).with_clock(clock())
}

// ============================================================================
// Entity Flattening Tests
// ============================================================================

#[test]
fn test_flatten_composite_entity() {
    let ingestor = ingestor(DownSource, Arc::new(CloudDestination::in_memory("")));
    let table = ingestor
        .flatten_entity(&box_score(), &EntityConfig::new("Score", "boxscore_score"))
        .unwrap();

    assert_eq!(
        table.rows(),
        vec![
            vec!["GameKey", "AwayTeam", "HomeTeam", "AwayScore", "HomeScore", "date_processed"],
            vec!["202310101", "PHI", "NE", "25", "20", STAMP],
        ]
    );
}

#[test]
fn test_flatten_skips_scalar_key() {
    let ingestor = ingestor(DownSource, Arc::new(CloudDestination::in_memory("")));
    let entity = EntityConfig::new("ScoringPlays", "plays").with_scalar_key("ScoringPlayID");
    let table = ingestor.flatten_entity(&box_score(), &entity).unwrap();

    assert_eq!(table.section_count(), 1);
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows()[1], vec!["77", "PHI", "TD pass", STAMP]);
}

#[test]
fn test_flatten_empty_untyped_sequence_is_shape_error() {
    let ingestor = ingestor(DownSource, Arc::new(CloudDestination::in_memory("")));
    let err = ingestor
        .flatten_entity(&box_score(), &EntityConfig::new("FantasyDefenseGames", "d"))
        .unwrap_err();

    assert!(err.is_shape());
}

#[test]
fn test_flatten_empty_sequence_with_declared_columns() {
    let ingestor = ingestor(DownSource, Arc::new(CloudDestination::in_memory("")));
    let entity =
        EntityConfig::new("FantasyDefenseGames", "d").with_columns(["Team", "FantasyPoints"]);
    let table = ingestor.flatten_entity(&box_score(), &entity).unwrap();

    assert_eq!(table.rows(), vec![vec!["Team", "FantasyPoints", "date_processed"]]);
    assert_eq!(table.data_row_count(), 0);
}

#[test]
fn test_flatten_empty_sequence_uses_empty_columns() {
    let ingestor = ingestor(DownSource, Arc::new(CloudDestination::in_memory("")));
    let entity =
        EntityConfig::new("FantasyDefenseGames", "d").with_empty_columns(&["Team", "Sacks"]);
    let table = ingestor.flatten_entity(&box_score(), &entity).unwrap();

    assert_eq!(table.rows(), vec![vec!["Team", "Sacks", "date_processed"]]);
}

#[test]
fn test_flatten_non_empty_sequence_ignores_empty_columns() {
    let ingestor = ingestor(DownSource, Arc::new(CloudDestination::in_memory("")));
    let entity = EntityConfig::new("TeamGames", "t").with_empty_columns(&["GameKey", "Team"]);
    let table = ingestor.flatten_entity(&box_score(), &entity).unwrap();

    assert_eq!(table.rows()[0], vec!["Team", "Score", "date_processed"]);
    assert_eq!(table.data_row_count(), 2);
}

#[test]
fn test_flatten_missing_or_null_member() {
    let ingestor = ingestor(DownSource, Arc::new(CloudDestination::in_memory("")));

    let err = ingestor
        .flatten_entity(&box_score(), &EntityConfig::new("Injuries", "i"))
        .unwrap_err();
    assert!(err.to_string().contains("no member 'Injuries'"));

    let err = ingestor
        .flatten_entity(&json!({"Score": null}), &EntityConfig::new("Score", "s"))
        .unwrap_err();
    assert!(err.is_shape());
}

// ============================================================================
// Run Tests
// ============================================================================

#[tokio::test]
async fn test_run_exports_every_entity() {
    let destination = Arc::new(CloudDestination::in_memory("fantasydata"));
    let ingestor = ingestor(StaticSource(box_score()), destination.clone());

    let summary = ingestor.run(&query()).await.unwrap();

    assert_eq!(summary.outcomes.len(), 7);
    assert_eq!(summary.succeeded().count(), 7);
    assert!(summary.is_complete_success());

    let bytes = destination
        .read("2023/1/boxscore_quarters/boxscore_quarters_NE_PHI_2023_1.csv")
        .await
        .unwrap();
    let rows = read_csv(bytes.as_ref()).unwrap();
    assert_eq!(
        rows,
        vec![
            vec!["Number", "AwayScore", "HomeScore", "date_processed"],
            vec!["1", "7", "0", STAMP],
            vec!["2", "9", "10", STAMP],
        ]
    );
}

#[tokio::test]
async fn test_run_writes_header_only_object_for_empty_sequence() {
    let destination = Arc::new(CloudDestination::in_memory("fantasydata"));
    let ingestor = ingestor(StaticSource(box_score()), destination.clone());

    let summary = ingestor.run(&query()).await.unwrap();
    assert!(summary.failed().next().is_none());

    let bytes = destination
        .read(
            "2023/1/boxscore_fantasydefensegames/boxscore_fantasydefensegames_NE_PHI_2023_1.csv",
        )
        .await
        .unwrap();
    let rows = read_csv(bytes.as_ref()).unwrap();

    let mut expected: Vec<String> = crate::source::boxscore::FANTASY_DEFENSE_GAME_FIELDS
        .iter()
        .map(|f| f.to_string())
        .collect();
    expected.push("date_processed".to_string());
    assert_eq!(rows, vec![expected]);
}

#[tokio::test]
async fn test_run_outcomes_follow_configuration_order() {
    let destination = Arc::new(CloudDestination::in_memory(""));
    let summary = ingestor(StaticSource(box_score()), destination)
        .run(&query())
        .await
        .unwrap();

    let labels: Vec<_> = summary.outcomes.iter().map(|o| o.label.as_str()).collect();
    let expected: Vec<_> = default_entities().iter().map(|e| e.label().to_string()).collect();
    assert_eq!(labels, expected);
}

#[tokio::test]
async fn test_run_isolates_transport_failures() {
    let sink = Arc::new(FlakySink {
        inner: CloudDestination::in_memory(""),
        broken_folder: "boxscore_playergames",
    });
    let summary = ingestor(StaticSource(box_score()), sink)
        .run(&query())
        .await
        .unwrap();

    assert_eq!(summary.succeeded().count(), 6);
    let transport_failures = summary
        .failed()
        .filter(|(_, e)| matches!(e, Error::Transport { .. }))
        .count();
    assert_eq!(transport_failures, 1);
}

#[tokio::test]
async fn test_run_fetch_failure_fails_request() {
    let ingestor = ingestor(DownSource, Arc::new(CloudDestination::in_memory("")));
    let err = ingestor.run(&query()).await.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 503, .. }));
}

#[tokio::test]
async fn test_run_uses_staging_dir() {
    let staging = tempfile::tempdir().unwrap();
    let ingestor = ingestor(StaticSource(box_score()), Arc::new(CloudDestination::in_memory("")))
        .with_staging_dir(staging.path());

    let summary = ingestor.run(&query()).await.unwrap();

    assert!(summary.any_success());
    assert_eq!(std::fs::read_dir(staging.path()).unwrap().count(), 0);
}

#[test]
fn test_summary_display() {
    let summary = IngestSummary::new(
        query(),
        vec![
            EntityOutcome::new(
                "boxscore_score",
                "boxscore_score",
                Ok(crate::export::ExportReceipt::new("2023/1/boxscore_score", "s.csv")),
            ),
            EntityOutcome::new("boxscore_quarters", "boxscore_quarters", Err(Error::shape("bad"))),
        ],
    );

    let text = summary.to_string();
    assert!(text.starts_with("PHI at NE, season 2023 week 1: exported 1 of 2 entities\n"));
    assert!(text.contains("ok     boxscore_score -> 2023/1/boxscore_score/s.csv"));
    assert!(text.contains("failed boxscore_quarters: Shape error: bad"));
}
