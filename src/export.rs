// Point-in-time JSON and CSV snapshots of the task set

use crate::error::{Result, StoreError};
use crate::task::Task;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

const CSV_HEADER: [&str; 5] = ["ID", "Title", "Status", "Priority", "Deadline"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "JSON"),
            ExportFormat::Csv => write!(f, "CSV"),
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            _ => Err(StoreError::Validation(format!(
                "Format must be 'json' or 'csv', got '{}'",
                s
            ))),
        }
    }
}

/// Result of an export request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Written { path: PathBuf, count: usize },
    /// The task set was empty; no file was created
    NothingToExport,
}

#[derive(Serialize)]
struct ExportDocument<'a> {
    export_date: String,
    total_tasks: usize,
    tasks: Vec<&'a Task>,
}

/// Writes export files into a fixed directory
///
/// File names carry the export time to the second, so two exports of the
/// same format within one second write the same file and the later one wins.
#[derive(Debug, Clone)]
pub struct Exporter {
    dir: PathBuf,
}

impl Exporter {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn export(&self, format: ExportFormat, tasks: &BTreeMap<u64, Task>) -> Result<ExportOutcome> {
        self.export_at(format, tasks, Local::now())
    }

    pub fn export_at(
        &self,
        format: ExportFormat,
        tasks: &BTreeMap<u64, Task>,
        at: DateTime<Local>,
    ) -> Result<ExportOutcome> {
        match format {
            ExportFormat::Json => self.export_json_at(tasks, at),
            ExportFormat::Csv => self.export_csv_at(tasks, at),
        }
    }

    pub fn export_json(&self, tasks: &BTreeMap<u64, Task>) -> Result<ExportOutcome> {
        self.export_json_at(tasks, Local::now())
    }

    pub fn export_csv(&self, tasks: &BTreeMap<u64, Task>) -> Result<ExportOutcome> {
        self.export_csv_at(tasks, Local::now())
    }

    pub fn export_json_at(&self, tasks: &BTreeMap<u64, Task>, at: DateTime<Local>) -> Result<ExportOutcome> {
        if tasks.is_empty() {
            info!("No tasks to export");
            return Ok(ExportOutcome::NothingToExport);
        }

        let path = self.prepare_path(ExportFormat::Json, at)?;
        let document = ExportDocument {
            export_date: at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
            total_tasks: tasks.len(),
            tasks: tasks.values().collect(),
        };

        let file = File::create(&path).map_err(|e| StoreError::io(&path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &document)?;
        writer.flush().map_err(|e| StoreError::io(&path, e))?;

        info!(file = ?path, count = tasks.len(), "Exported tasks to JSON");
        Ok(ExportOutcome::Written {
            path,
            count: tasks.len(),
        })
    }

    pub fn export_csv_at(&self, tasks: &BTreeMap<u64, Task>, at: DateTime<Local>) -> Result<ExportOutcome> {
        if tasks.is_empty() {
            info!("No tasks to export");
            return Ok(ExportOutcome::NothingToExport);
        }

        let path = self.prepare_path(ExportFormat::Csv, at)?;
        let file = File::create(&path).map_err(|e| StoreError::io(&path, e))?;
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::CRLF)
            .from_writer(file);

        writer.write_record(CSV_HEADER)?;
        for task in tasks.values() {
            writer.write_record([
                task.id.to_string(),
                task.title.clone(),
                task.status.to_string(),
                task.priority.to_string(),
                task.deadline.clone(),
            ])?;
        }
        writer.flush().map_err(|e| StoreError::io(&path, e))?;

        info!(file = ?path, count = tasks.len(), "Exported tasks to CSV");
        Ok(ExportOutcome::Written {
            path,
            count: tasks.len(),
        })
    }

    fn prepare_path(&self, format: ExportFormat, at: DateTime<Local>) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::io(&self.dir, e))?;
        Ok(self.dir.join(export_file_name(format, at)))
    }
}

/// `tasks_export_YYYYMMDD_HHMMSS.<ext>`
pub fn export_file_name(format: ExportFormat, at: DateTime<Local>) -> String {
    format!("tasks_export_{}.{}", at.format("%Y%m%d_%H%M%S"), format.extension())
}
