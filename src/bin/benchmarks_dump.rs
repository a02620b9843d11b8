use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use fbref_scout::benchmarks::BenchmarkTable;

/// Writes the built-in benchmark table as JSON, as a starting point for an
/// alternate table passed through `SCOUT_BENCHMARKS`.
fn main() -> Result<()> {
    let json = BenchmarkTable::default_table().to_json_pretty()?;
    match parse_out_arg() {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)
                        .with_context(|| format!("create {}", parent.display()))?;
                }
            }
            let tmp = path.with_extension("json.tmp");
            fs::write(&tmp, json).context("write benchmark table")?;
            fs::rename(&tmp, &path).context("swap benchmark table")?;
            println!("Benchmarks written to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn parse_out_arg() -> Option<PathBuf> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    for (idx, arg) in args.iter().enumerate() {
        if let Some(path) = arg.strip_prefix("--out=") {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        if arg == "--out" {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(PathBuf::from(next));
            }
        }
    }
    None
}
