use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing::info;
use tracing_subscriber::EnvFilter;

use fbref_scout::category::{ALL_CATEGORIES, Category};
use fbref_scout::cleaning::{CleaningOptions, RecordMeta, clean_rows, load_raw_rows, pivot_to_record};
use fbref_scout::comparison::{ComparisonSession, PlayerSlot, confidence_tier};
use fbref_scout::config::AppConfig;
use fbref_scout::export::{export_profiles_xlsx, profiles_to_json};
use fbref_scout::leaderboard::{LeaderboardFilter, rank_by_category, score_all};
use fbref_scout::position::position_from_text;
use fbref_scout::profile::PlayerProfile;
use fbref_scout::stat_record::{StatRecord, load_records};

const VALUE_FLAGS: &[&str] = &[
    "--xlsx",
    "--category",
    "--position",
    "--top",
    "--min-minutes",
    "--first-minutes",
    "--second-minutes",
    "--name",
    "--season",
    "--competition",
    "--minutes",
];

const USAGE: &str = "usage:
  fbref_scout profile <records.json> [--json] [--xlsx out.xlsx]
  fbref_scout compare <a.json> <b.json> [--first-minutes M] [--second-minutes M]
  fbref_scout leaderboard <records.json> --category C [--position P] [--top N] [--min-minutes M]
  fbref_scout clean <raw_rows.json> --name N [--position P] [--season S] [--competition C] [--minutes M]";

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    init_tracing();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let Some(command) = args.first() else {
        println!("{USAGE}");
        return Ok(());
    };
    let rest = &args[1..];
    let cfg = AppConfig::from_env();

    match command.as_str() {
        "profile" => run_profile(rest, &cfg),
        "compare" => run_compare(rest, &cfg),
        "leaderboard" => run_leaderboard(rest, &cfg),
        "clean" => run_clean(rest),
        "help" | "--help" | "-h" => {
            println!("{USAGE}");
            Ok(())
        }
        other => Err(anyhow!("unknown command '{other}'\n{USAGE}")),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_profile(args: &[String], cfg: &AppConfig) -> Result<()> {
    let path = positional(args)
        .into_iter()
        .next()
        .context("profile needs a records file")?;
    let table = cfg.benchmark_table()?;
    let records = load_records(Path::new(&path))?;
    let profiles = score_all(&records, &table, &cfg.scoring, cfg.parallelism);
    info!(count = profiles.len(), path = %path, "scored profiles");

    if let Some(out) = flag_value(args, "--xlsx") {
        let report = export_profiles_xlsx(Path::new(&out), &profiles, &cfg.scoring)?;
        info!(
            profiles = report.profiles,
            stat_lines = report.stat_lines,
            out = %out,
            "wrote workbook"
        );
    }

    if has_flag(args, "--json") {
        println!("{}", profiles_to_json(&profiles, &cfg.scoring)?);
        return Ok(());
    }

    for profile in &profiles {
        print_profile(profile, cfg);
    }
    Ok(())
}

fn run_compare(args: &[String], cfg: &AppConfig) -> Result<()> {
    let paths = positional(args);
    let [first_path, second_path] = paths.as_slice() else {
        return Err(anyhow!("compare needs exactly two record files"));
    };
    let table = cfg.benchmark_table()?;
    let first = first_record(first_path)?;
    let second = first_record(second_path)?;

    let mut session = ComparisonSession::new(
        PlayerProfile::build(first, &table, &cfg.scoring),
        PlayerProfile::build(second, &table, &cfg.scoring),
        cfg.scoring,
    );
    if let Some(m) = parse_flag::<f64>(args, "--first-minutes")? {
        session.set_minutes(PlayerSlot::First, m);
    }
    if let Some(m) = parse_flag::<f64>(args, "--second-minutes")? {
        session.set_minutes(PlayerSlot::Second, m);
    }

    let name_a = session.profile(PlayerSlot::First).player_name().to_string();
    let name_b = session.profile(PlayerSlot::Second).player_name().to_string();
    println!("{name_a} vs {name_b}");
    for slot in [PlayerSlot::First, PlayerSlot::Second] {
        let p = session.profile(slot);
        println!(
            "  {:<28} {} | {:>5.0} min | confidence {:.2} ({})",
            p.player_name(),
            p.position(),
            session.minutes(slot),
            session.confidence(slot),
            session.confidence_tier(slot).label()
        );
    }

    println!();
    println!("  {:<12} {:>8} {:>8} {:>8}", "Category", "A", "B", "Diff");
    for row in session.category_rows() {
        println!(
            "  {:<12} {:>8.1} {:>8.1} {:>+8.1}{}",
            row.category.label(),
            row.first,
            row.second,
            row.difference,
            leader_mark(row.leader)
        );
    }

    let key_stats = session.default_key_stats();
    if !key_stats.is_empty() {
        println!();
        println!("  Key stats (per 90)");
        for row in key_stats {
            println!(
                "  {:<28} {:>8.2} {:>8.2}{}",
                row.stat,
                row.first,
                row.second,
                leader_mark(row.leader)
            );
        }
    }
    Ok(())
}

fn run_leaderboard(args: &[String], cfg: &AppConfig) -> Result<()> {
    let path = positional(args)
        .into_iter()
        .next()
        .context("leaderboard needs a records file")?;
    let category: Category = flag_value(args, "--category")
        .context("--category is required")?
        .parse()?;
    let filter = LeaderboardFilter {
        position: flag_value(args, "--position").map(|p| position_from_text(&p)),
        min_minutes: parse_flag::<f64>(args, "--min-minutes")?,
    };
    let top = parse_flag::<usize>(args, "--top")?.unwrap_or(20);

    let table = cfg.benchmark_table()?;
    let records = load_records(Path::new(&path))?;
    let profiles = score_all(&records, &table, &cfg.scoring, cfg.parallelism);
    let board = rank_by_category(&profiles, category, filter, &cfg.scoring);

    println!("{category} leaderboard ({} players)", board.len());
    for entry in board.iter().take(top) {
        println!(
            "  {:>3}. {:<28} {} {:<10} {:>6.1}  conf {:.2}",
            entry.rank,
            entry.player_name,
            entry.position,
            entry.season.as_deref().unwrap_or("-"),
            entry.score,
            entry.confidence
        );
    }
    Ok(())
}

fn run_clean(args: &[String]) -> Result<()> {
    let path = positional(args)
        .into_iter()
        .next()
        .context("clean needs a scouting rows file")?;
    let meta = RecordMeta {
        player_name: flag_value(args, "--name").context("--name is required")?,
        position: flag_value(args, "--position").unwrap_or_default(),
        season: flag_value(args, "--season"),
        competition: flag_value(args, "--competition"),
        minutes_played: parse_flag::<f64>(args, "--minutes")?,
    };

    let rows = load_raw_rows(Path::new(&path))?;
    let table = clean_rows(&rows, CleaningOptions::default());
    info!(
        kept = table.report.final_rows,
        dropped = table.report.initial_rows - table.report.final_rows,
        "cleaned scouting rows"
    );
    let record = pivot_to_record(&table, &meta);
    println!(
        "{}",
        serde_json::to_string_pretty(&record).context("serialize record")?
    );
    Ok(())
}

fn print_profile(profile: &PlayerProfile, cfg: &AppConfig) {
    let record = profile.record();
    let minutes = record.minutes_or_zero();
    println!(
        "{} | {} | {} | {} | {:.0} min | confidence {:.2} ({})",
        record.player_name,
        record.position,
        record.season.as_deref().unwrap_or("-"),
        record.competition.as_deref().unwrap_or("-"),
        minutes,
        cfg.scoring.confidence(minutes),
        confidence_tier(minutes).label()
    );
    for category in ALL_CATEGORIES {
        let score = profile.category_score(category);
        let bar = "#".repeat((score / 5.0).round() as usize);
        println!("  {:<12} {:>5.1}  {bar}", category.label(), score);
    }
    let strengths = profile
        .strengths(3)
        .iter()
        .map(|l| format!("{} ({:.0})", l.stat, l.normalized))
        .collect::<Vec<_>>();
    let weaknesses = profile
        .weaknesses(3)
        .iter()
        .map(|l| format!("{} ({:.0})", l.stat, l.normalized))
        .collect::<Vec<_>>();
    println!("  strengths:  {}", strengths.join(", "));
    println!("  weaknesses: {}", weaknesses.join(", "));
    println!();
}

fn first_record(path: &str) -> Result<StatRecord> {
    load_records(Path::new(path))?
        .into_iter()
        .next()
        .with_context(|| format!("no records in {path}"))
}

fn leader_mark(leader: Option<PlayerSlot>) -> &'static str {
    match leader {
        Some(PlayerSlot::First) => "  <",
        Some(PlayerSlot::Second) => "  >",
        None => "",
    }
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    let prefix = format!("{flag}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if arg == flag {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(next.trim().to_string());
            }
        }
    }
    None
}

fn parse_flag<T>(args: &[String], flag: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    flag_value(args, flag)
        .map(|raw| {
            raw.parse::<T>()
                .with_context(|| format!("invalid value '{raw}' for {flag}"))
        })
        .transpose()
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

fn positional(args: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if arg.starts_with("--") {
            skip_next = VALUE_FLAGS.contains(&arg.as_str());
            continue;
        }
        out.push(arg.clone());
    }
    out
}

