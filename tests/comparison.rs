use std::fs;
use std::path::PathBuf;

use fbref_scout::category::Category;
use fbref_scout::comparison::{ComparisonSession, ConfidenceTier, PlayerSlot};
use fbref_scout::normalize::ScoringConfig;
use fbref_scout::profile::PlayerProfile;
use fbref_scout::stat_record::parse_records_json;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn session() -> ComparisonSession {
    let mut records = parse_records_json(&read_fixture("players.json")).expect("fixture");
    let forward = records.remove(1);
    let verratti = records.remove(0);
    ComparisonSession::new(
        PlayerProfile::from_record(verratti),
        PlayerProfile::from_record(forward),
        ScoringConfig::default(),
    )
}

#[test]
fn confidence_follows_minutes_of_each_player() {
    let session = session();
    assert_eq!(session.minutes(PlayerSlot::First), 2145.0);
    assert_eq!(session.minutes(PlayerSlot::Second), 310.0);
    assert!(session.confidence(PlayerSlot::First) > 0.95);
    assert!(session.confidence(PlayerSlot::Second) < 0.2);
    assert_eq!(session.confidence_tier(PlayerSlot::First), ConfidenceTier::High);
    assert_eq!(session.confidence_tier(PlayerSlot::Second), ConfidenceTier::Low);
    assert!(session.marker_size(PlayerSlot::First) > session.marker_size(PlayerSlot::Second));
    assert!(session.bar_alpha(PlayerSlot::Second) >= 0.5);
}

#[test]
fn overriding_minutes_only_moves_confidence() {
    let mut session = session();
    let before = session.category_rows();
    session.set_minutes(PlayerSlot::Second, 900.0);
    assert_eq!(session.confidence(PlayerSlot::Second), 0.5);
    assert_eq!(session.marker_size(PlayerSlot::Second), 300.0);
    assert_eq!(session.bar_alpha(PlayerSlot::Second), 0.75);
    assert_eq!(session.category_rows(), before);
}

#[test]
fn category_rows_name_the_leader() {
    let session = session();
    let rows = session.category_rows();
    assert_eq!(rows.len(), 5);
    let passing = rows
        .iter()
        .find(|r| r.category == Category::Passing)
        .expect("passing row");
    assert_eq!(passing.leader, Some(PlayerSlot::First));
    assert!(passing.difference > 0.0);
    let shooting = rows
        .iter()
        .find(|r| r.category == Category::Shooting)
        .expect("shooting row");
    assert_eq!(shooting.leader, Some(PlayerSlot::Second));
    assert!(shooting.difference < 0.0);
}

#[test]
fn key_stats_prefer_listed_rows_then_backups() {
    let session = session();
    let rows = session.key_stats(&["Goals", "Aerials Won", "Assists"], &["Touches", "Carries"], 3);
    let names: Vec<&str> = rows.iter().map(|r| r.stat.as_str()).collect();
    // Nobody has "Aerials Won", so the first backup fills its slot.
    assert_eq!(names, ["Goals", "Assists", "Touches"]);
    assert_eq!(rows[0].first, 0.0);
    assert_eq!(rows[0].second, 0.87);
    assert_eq!(rows[0].leader, Some(PlayerSlot::Second));

    let defaults = session.default_key_stats();
    assert_eq!(defaults.len(), 6);
    assert_eq!(defaults[0].stat, "Goals");
}
