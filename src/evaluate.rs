use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use log::{debug, info};

use growth::algorithm::growth::{report, Query, Report};
use growth::schemas::{DirectorySource, Kind, TableSource, UnitSystem};

use crate::{Cli, Format};

pub const TABLES_DIR_ENV: &str = "GROWTH_TABLES_DIR";

pub fn run(cli: &Cli) -> Result<()> {
    // @NOTE: every argument is checked before the first table is read
    let query = build_query(cli)?;

    let root = tables_dir(cli)?;
    info!(
        "Evaluating {} months {} days ({} days) for a {} with tables from {}",
        query.months(),
        query.days(),
        query.age_in_days(),
        query.gender(),
        root.display()
    );

    let stdout = io::stdout();
    emit(
        &query,
        &DirectorySource::new(root),
        cli.format,
        &mut stdout.lock(),
    )
}

/// Scores measurements one by one. Text output is written as soon as each
/// report is ready, so earlier results survive a later table failure.
pub fn emit<S, W>(query: &Query, source: &S, format: Format, out: &mut W) -> Result<()>
where
    S: TableSource + ?Sized,
    W: Write,
{
    let mut reports = Vec::new();

    for measurement in query.measurements() {
        let report = report(query, measurement, source)?;

        match format {
            Format::Text => render_text(&report, out)?,
            Format::Json => reports.push(report),
        }
    }

    if let Format::Json = format {
        render_json(&reports, out)?;
    }

    Ok(())
}

pub fn build_query(cli: &Cli) -> Result<Query> {
    let length_system = UnitSystem::imperial_if(cli.inches);
    let mut query = Query::new(cli.months, cli.days, &cli.gender)?;

    for (kind, value, system) in [
        (Kind::HeadCircumference, cli.head, length_system),
        (Kind::Length, cli.length, length_system),
        (Kind::Weight, cli.weight, UnitSystem::imperial_if(cli.pounds)),
    ] {
        if let Some(value) = value {
            query = query.measure(kind, value, system)?;
        }
    }

    Ok(query)
}

fn tables_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(path) = &cli.tables {
        return Ok(path.clone());
    }

    if let Ok(path) = std::env::var(TABLES_DIR_ENV) {
        debug!("Using {}={}", TABLES_DIR_ENV, path);
        return Ok(PathBuf::from(path));
    }

    let executable = std::env::current_exe().context("Failed to locate the running executable")?;
    executable
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| anyhow!("Executable {} has no parent folder", executable.display()))
}

fn render_text<W: Write>(report: &Report, out: &mut W) -> Result<()> {
    writeln!(out, "Calculating {} percentile...", report.kind)?;
    writeln!(out, "{}", report)?;
    writeln!(out)?;
    out.flush()?;

    Ok(())
}

fn render_json<W: Write>(reports: &[Report], out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, reports).context("Failed to encode reports")?;
    writeln!(out)?;

    Ok(())
}
