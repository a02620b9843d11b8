use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use rust_xlsxwriter::{Workbook, Worksheet};
use serde::Serialize;

use crate::category::{ALL_CATEGORIES, Category};
use crate::comparison::confidence_tier;
use crate::normalize::ScoringConfig;
use crate::position::Position;
use crate::profile::PlayerProfile;

pub struct ExportReport {
    pub profiles: usize,
    pub stat_lines: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileSummary {
    pub player_name: String,
    pub position: Position,
    pub season: Option<String>,
    pub competition: Option<String>,
    pub minutes_played: Option<f64>,
    pub confidence: f64,
    pub category_scores: Vec<(Category, f64)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfilesDocument {
    pub generated_at: String,
    pub config: ScoringConfig,
    pub profiles: Vec<ProfileSummary>,
}

pub fn summarize(profile: &PlayerProfile, cfg: &ScoringConfig) -> ProfileSummary {
    let record = profile.record();
    ProfileSummary {
        player_name: record.player_name.clone(),
        position: record.position,
        season: record.season.clone(),
        competition: record.competition.clone(),
        minutes_played: record.minutes_played,
        confidence: cfg.confidence(record.minutes_or_zero()),
        category_scores: ALL_CATEGORIES
            .into_iter()
            .map(|c| (c, profile.category_score(c)))
            .collect(),
    }
}

pub fn profiles_to_json(profiles: &[PlayerProfile], cfg: &ScoringConfig) -> Result<String> {
    let doc = ProfilesDocument {
        generated_at: Local::now().to_rfc3339(),
        config: *cfg,
        profiles: profiles.iter().map(|p| summarize(p, cfg)).collect(),
    };
    serde_json::to_string_pretty(&doc).context("serialize profiles")
}

pub fn export_profiles_xlsx(
    path: &Path,
    profiles: &[PlayerProfile],
    cfg: &ScoringConfig,
) -> Result<ExportReport> {
    let mut profile_rows = vec![profile_header()];
    let mut line_rows = vec![vec![
        "Player".to_string(),
        "Season".to_string(),
        "Competition".to_string(),
        "Category".to_string(),
        "Stat".to_string(),
        "Raw (per 90)".to_string(),
        "Benchmark".to_string(),
        "Weight".to_string(),
        "Normalized".to_string(),
    ]];

    for profile in profiles {
        profile_rows.push(profile_row(profile, cfg));
        let record = profile.record();
        for line in profile.stat_lines() {
            line_rows.push(vec![
                record.player_name.clone(),
                record.season.clone().unwrap_or_default(),
                record.competition.clone().unwrap_or_default(),
                line.category.to_string(),
                line.stat.clone(),
                format!("{:.2}", line.raw),
                format!("{:.2}", line.benchmark),
                format!("{:.2}", line.weight),
                format!("{:.1}", line.normalized),
            ]);
        }
    }

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Profiles")?;
        write_rows(sheet, &profile_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("StatLines")?;
        write_rows(sheet, &line_rows)?;
    }
    workbook
        .save(path)
        .with_context(|| format!("save workbook {}", path.display()))?;

    Ok(ExportReport {
        profiles: profile_rows.len() - 1,
        stat_lines: line_rows.len() - 1,
    })
}

fn profile_header() -> Vec<String> {
    let mut header = vec![
        "Player".to_string(),
        "Position".to_string(),
        "Season".to_string(),
        "Competition".to_string(),
        "Minutes".to_string(),
        "Confidence".to_string(),
        "Sample".to_string(),
    ];
    header.extend(ALL_CATEGORIES.iter().map(|c| c.to_string()));
    header
}

fn profile_row(profile: &PlayerProfile, cfg: &ScoringConfig) -> Vec<String> {
    let record = profile.record();
    let minutes = record.minutes_or_zero();
    let mut row = vec![
        record.player_name.clone(),
        record.position.to_string(),
        record.season.clone().unwrap_or_default(),
        record.competition.clone().unwrap_or_default(),
        opt_to_string(record.minutes_played.map(|m| m.round() as i64)),
        format!("{:.2}", cfg.confidence(minutes)),
        confidence_tier(minutes).label().to_string(),
    ];
    row.extend(
        ALL_CATEGORIES
            .iter()
            .map(|c| format!("{:.1}", profile.category_score(*c))),
    );
    row
}

fn opt_to_string<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
