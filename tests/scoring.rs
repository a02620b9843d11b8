use std::fs;
use std::path::PathBuf;

use fbref_scout::category::{ALL_CATEGORIES, Category};
use fbref_scout::category_score::{StatInput, score_category};
use fbref_scout::comparison::confidence;
use fbref_scout::normalize::normalize;
use fbref_scout::position::Position;
use fbref_scout::profile::PlayerProfile;
use fbref_scout::stat_record::{StatRecord, parse_records_json};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn benchmark_midfielder() -> StatRecord {
    let raw = read_fixture("mf_at_benchmark.json");
    parse_records_json(&raw)
        .expect("fixture should parse")
        .remove(0)
}

#[test]
fn normalize_is_monotonic_for_fixed_benchmark() {
    let benchmark = 7.28;
    let mut prev = normalize(0.0, benchmark);
    for step in 1..=200 {
        let value = step as f64 * 0.05;
        let score = normalize(value, benchmark);
        assert!(score >= prev, "score dropped at {value}: {prev} -> {score}");
        prev = score;
    }
}

#[test]
fn normalize_anchors_and_ceiling() {
    for benchmark in [0.05, 1.0, 7.28, 62.0, 1500.0] {
        assert_eq!(normalize(benchmark, benchmark), 85.0);
        assert_eq!(normalize(benchmark * 1.30, benchmark), 100.0);
        assert_eq!(normalize(benchmark * 10.0, benchmark), 100.0);
        assert_eq!(normalize(0.0, benchmark), 0.0);
    }
    assert_eq!(normalize(5.0, 0.0), 0.0);
    assert_eq!(normalize(0.0, 0.0), 0.0);
}

#[test]
fn normalize_output_stays_in_range() {
    for benchmark in [0.0, 0.1, 2.0, 80.0] {
        for value in [0.0, 0.01, 0.5, 1.0, 3.0, 50.0, 1e6] {
            let score = normalize(value, benchmark);
            assert!((0.0..=100.0).contains(&score), "{value}/{benchmark} -> {score}");
        }
    }
}

#[test]
fn dispersion_costs_score_at_equal_average() {
    let flat = [
        StatInput::new(9.0, 10.0, 1.0),
        StatInput::new(9.0, 10.0, 1.0),
    ];
    let flat_avg = normalize(9.0, 10.0);

    // Find a spread pair with the same mean normalized value.
    let high = StatInput::new(10.0, 10.0, 1.0);
    let low_target = 2.0 * flat_avg - 85.0;
    let low_raw = (low_target / 85.0).sqrt() * 10.0;
    let spread = [high, StatInput::new(low_raw, 10.0, 1.0)];

    let flat_score = score_category(&flat);
    let spread_score = score_category(&spread);
    assert!((flat_score - flat_avg).abs() < 1e-9);
    assert!(spread_score < flat_score);
}

#[test]
fn confidence_is_bounded_with_exact_midpoint() {
    assert_eq!(confidence(900.0), 0.5);
    let mut prev = 0.0;
    for minutes in (0..=6000).step_by(150) {
        let c = confidence(minutes as f64);
        assert!(c > 0.0 && c < 1.0);
        assert!(c > prev);
        prev = c;
    }
    for minutes in [12_000.0, 50_000.0, 1e6, 1e12] {
        let c = confidence(minutes);
        assert!(c > 0.0 && c < 1.0, "confidence({minutes}) = {c}");
    }
}

#[test]
fn missing_stats_read_as_zero() {
    let record = benchmark_midfielder();
    assert_eq!(record.stat_value("Aerials Won"), 0.0);
    assert_eq!(record.stat_value(""), 0.0);
}

#[test]
fn midfielder_at_benchmark_scores_85_passing() {
    let record = benchmark_midfielder();
    assert_eq!(record.position, Position::MF);
    assert_eq!(record.minutes_played, Some(900.0));
    let profile = PlayerProfile::from_record(record);

    assert_eq!(profile.category_score(Category::Passing), 85.0);
    let breakdown = profile.breakdown(Category::Passing);
    assert_eq!(breakdown.std_dev, 0.0);
    assert_eq!(breakdown.penalty, 0.0);
}

#[test]
fn one_missing_passing_stat_drops_below_the_plain_average() {
    let mut record = benchmark_midfielder();
    record.insert_stat("Key Passes", 0.0);
    let profile = PlayerProfile::from_record(record);

    let breakdown = profile.breakdown(Category::Passing);
    assert!((breakdown.weighted_average - 68.0).abs() < 1e-9);
    assert!((breakdown.std_dev - 34.0).abs() < 1e-9);
    let score = profile.category_score(Category::Passing);
    assert!(score < 68.0);
    assert!((score - 63.376).abs() < 1e-9);
}

#[test]
fn elite_progressive_passer_lifts_passing() {
    let mut record = benchmark_midfielder();
    record.insert_stat("Progressive Passes", 7.28 * 1.30);
    let profile = PlayerProfile::from_record(record);

    // [85, 100, 85, 85, 85]: mean 88, population std 6.
    let score = profile.category_score(Category::Passing);
    assert!((score - 88.0 * (1.0 - 0.2 * 0.06)).abs() < 1e-9);
    assert!(score > 85.0);
}

#[test]
fn categories_without_data_score_zero() {
    let profile = PlayerProfile::from_record(benchmark_midfielder());
    for category in ALL_CATEGORIES {
        if category == Category::Passing {
            continue;
        }
        assert_eq!(profile.category_score(category), 0.0, "{category}");
    }
}

#[test]
fn percentage_column_does_not_stand_in_for_a_count() {
    let mut record = benchmark_midfielder();
    record.stats.remove("Passes Completed");
    record.insert_stat("Passes Completed pct", 88.0);
    let profile = PlayerProfile::from_record(record);

    let line = profile
        .stat_lines_for(Category::Passing)
        .find(|l| l.stat == "Passes Completed")
        .expect("passes completed line");
    assert_eq!(line.raw, 0.0);
    assert_eq!(line.normalized, 0.0);
    assert!((profile.category_score(Category::Passing) - 63.376).abs() < 1e-9);
}
