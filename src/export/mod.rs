//! Exports of projection results: CSV, JSON and a paginated text report
//!
//! File names are derived from the scenario's display name via [`file_stem`].

pub mod format;
mod json;
mod report;
mod tabular;

pub use json::{write_json, ProjectionDocument};
pub use report::{render_report, table_header, table_row, ReportOptions, DEFAULT_ROWS_PER_PAGE};
pub use tabular::{write_comparison_csv, write_yearly_csv, ComparisonRow, YEARLY_COLUMNS};

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::info;

use crate::error::{Error, Result};
use crate::params::BusinessCase;
use crate::projection::{InvestmentMetrics, ScenarioResult};

/// File name of the cross-scenario comparison table
pub const COMPARISON_FILE_NAME: &str = "scenario_comparison.csv";

/// File-system safe stem from a display name
///
/// ASCII letters and digits are kept (lowercased); every other run of
/// characters becomes a single underscore.
pub fn file_stem(display_name: &str) -> String {
    let mut stem = String::with_capacity(display_name.len());
    for c in display_name.chars() {
        if c.is_ascii_alphanumeric() {
            stem.push(c.to_ascii_lowercase());
        } else if !stem.is_empty() && !stem.ends_with('_') {
            stem.push('_');
        }
    }
    let stem = stem.trim_end_matches('_');

    if stem.is_empty() {
        "scenario".to_string()
    } else {
        stem.to_string()
    }
}

/// Writes export files for scenario results into one directory
#[derive(Debug, Clone)]
pub struct Exporter {
    out_dir: PathBuf,
    generated_at: DateTime<Utc>,
}

impl Exporter {
    pub fn new(out_dir: impl Into<PathBuf>, generated_at: DateTime<Utc>) -> Self {
        Self {
            out_dir: out_dir.into(),
            generated_at,
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    fn create(&self, file_name: &str) -> Result<(PathBuf, BufWriter<File>)> {
        fs::create_dir_all(&self.out_dir).map_err(|e| Error::io(&self.out_dir, e))?;
        let path = self.out_dir.join(file_name);
        let file = File::create(&path).map_err(|e| Error::io(&path, e))?;
        Ok((path, BufWriter::new(file)))
    }

    /// `<stem>_projection.csv`
    pub fn write_csv(&self, result: &ScenarioResult) -> Result<PathBuf> {
        let file_name = format!("{}_projection.csv", file_stem(&result.scenario.name));
        let (path, writer) = self.create(&file_name)?;
        write_yearly_csv(writer, result)?;
        info!("Wrote {}", path.display());
        Ok(path)
    }

    /// `<stem>_projection.json`
    pub fn write_json(
        &self,
        case: &BusinessCase,
        result: &ScenarioResult,
        metrics: &InvestmentMetrics,
    ) -> Result<PathBuf> {
        let file_name = format!("{}_projection.json", file_stem(&result.scenario.name));
        let (path, writer) = self.create(&file_name)?;
        let document = ProjectionDocument {
            generated_at: self.generated_at,
            case,
            result,
            metrics,
        };
        write_json(writer, &document)?;
        info!("Wrote {}", path.display());
        Ok(path)
    }

    /// `<stem>_report.txt`
    pub fn write_report(
        &self,
        case: &BusinessCase,
        result: &ScenarioResult,
        metrics: &InvestmentMetrics,
        rows_per_page: usize,
    ) -> Result<PathBuf> {
        let file_name = format!("{}_report.txt", file_stem(&result.scenario.name));
        let (path, mut writer) = self.create(&file_name)?;
        let options = ReportOptions {
            generated_on: self.generated_at.date_naive(),
            rows_per_page,
        };
        let report = render_report(case, result, metrics, &options);
        writer
            .write_all(report.as_bytes())
            .and_then(|_| writer.flush())
            .map_err(|e| Error::io(&path, e))?;
        info!("Wrote {}", path.display());
        Ok(path)
    }

    /// `scenario_comparison.csv`
    pub fn write_comparison(&self, rows: &[ComparisonRow]) -> Result<PathBuf> {
        let (path, writer) = self.create(COMPARISON_FILE_NAME)?;
        write_comparison_csv(writer, rows)?;
        info!("Wrote {}", path.display());
        Ok(path)
    }
}
