// Report orchestration: load sources, compare, write outputs.

use crate::config::{Config, ReportConfig};
use crate::output::{self, ReportLayout, ReportPaths};
use anyhow::{bail, Context};
use rankdiff_core::compare::build_comparison;
use rankdiff_core::player::PlayerRecord;
use rankdiff_core::sources::{load_source, SourceSpec};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Summary of one written report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOutcome {
    pub name: String,
    pub rows: usize,
    pub paths: ReportPaths,
}

/// Loaded source rows keyed by source id, so a source shared by several
/// reports is read once.
#[derive(Default)]
struct SourceCache {
    loaded: HashMap<String, Vec<PlayerRecord>>,
}

impl SourceCache {
    fn ensure(&mut self, config: &Config, id: &str) -> anyhow::Result<()> {
        if self.loaded.contains_key(id) {
            return Ok(());
        }
        let spec = lookup_source(config, id)?;
        let records = load_source(spec, config.max_rows)
            .with_context(|| format!("failed to load source '{id}'"))?;
        info!(
            "Loaded {} players from {} ({})",
            records.len(),
            spec.label,
            spec.path.display()
        );
        self.loaded.insert(id.to_string(), records);
        Ok(())
    }

    fn records(&self, id: &str) -> &[PlayerRecord] {
        self.loaded.get(id).map(Vec::as_slice).unwrap_or_default()
    }
}

fn lookup_source<'a>(config: &'a Config, id: &str) -> anyhow::Result<&'a SourceSpec> {
    match config.source(id) {
        Some(spec) => Ok(spec),
        None => bail!("unknown source '{id}'"),
    }
}

/// Whether the team column shows bye weeks. The team text comes from the
/// primary source unless it has no team column, in which case the secondary
/// source's team (and bye) is shown.
fn shows_bye(primary: &SourceSpec, secondary: &SourceSpec) -> bool {
    primary.bye.is_some() || (primary.team.is_none() && secondary.bye.is_some())
}

fn run_with_cache(
    config: &Config,
    report: &ReportConfig,
    output_dir: &Path,
    cache: &mut SourceCache,
) -> anyhow::Result<ReportOutcome> {
    let primary_spec = lookup_source(config, &report.primary)?;
    let secondary_spec = lookup_source(config, &report.secondary)?;

    cache.ensure(config, &report.primary)?;
    cache.ensure(config, &report.secondary)?;
    let primary = cache.records(&report.primary);
    let secondary = cache.records(&report.secondary);

    let rows = build_comparison(primary, secondary);
    debug!(
        "Report '{}': {} primary x {} secondary -> {} rows",
        report.name,
        primary.len(),
        secondary.len(),
        rows.len()
    );

    let layout = ReportLayout::new(
        primary_spec.label.as_str(),
        secondary_spec.label.as_str(),
        shows_bye(primary_spec, secondary_spec),
        &rows,
    );
    let paths = output::write_report(output_dir, &report.name, &layout, &rows)
        .with_context(|| format!("failed to write report '{}'", report.name))?;

    Ok(ReportOutcome {
        name: report.name.clone(),
        rows: rows.len(),
        paths,
    })
}

/// Produce a single report.
pub fn run_report(
    config: &Config,
    report: &ReportConfig,
    output_dir: &Path,
) -> anyhow::Result<ReportOutcome> {
    run_with_cache(config, report, output_dir, &mut SourceCache::default())
}

/// Produce the named reports, or every configured report when `selected` is
/// empty. Stops at the first failure.
pub fn run(
    config: &Config,
    selected: &[String],
    output_dir: &Path,
) -> anyhow::Result<Vec<ReportOutcome>> {
    let reports: Vec<&ReportConfig> = if selected.is_empty() {
        config.reports.iter().collect()
    } else {
        selected
            .iter()
            .map(|name| match config.report(name) {
                Some(report) => Ok(report),
                None => bail!("unknown report '{name}'"),
            })
            .collect::<anyhow::Result<_>>()?
    };

    let mut cache = SourceCache::default();
    let mut outcomes = Vec::with_capacity(reports.len());
    for report in reports {
        info!(
            "Building report '{}' ({} vs {})",
            report.name, report.primary, report.secondary
        );
        outcomes.push(run_with_cache(config, report, output_dir, &mut cache)?);
    }
    Ok(outcomes)
}
