// Delimited text file operations

use crate::error::{Result, StoreError};
use crate::task::{FIELD_SEPARATOR, Priority, Status, Task, normalize_deadline};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default name of the persisted task file
pub const DEFAULT_TASKS_FILE: &str = "tasks.txt";

const MIN_FIELDS: usize = 3;
const MAX_FIELDS: usize = 5;

/// A task file on disk, one `id | title | status | priority | deadline` record per line
///
/// The format has no escaping. Titles and deadlines holding the separator or a
/// line break are refused before they reach the file (see `task::validate_title`).
#[derive(Debug, Clone)]
pub struct TaskFile {
    path: PathBuf,
}

impl TaskFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record from the file
    ///
    /// A missing file is an empty task set. Any malformed record aborts the
    /// whole load with `StoreError::Format`; nothing is partially loaded.
    pub fn load(&self) -> Result<BTreeMap<u64, Task>> {
        if !self.path.exists() {
            // No file yet, start empty
            debug!(file = ?self.path, "Task file does not exist, starting empty");
            return Ok(BTreeMap::new());
        }

        let file = File::open(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        let tasks = decode(BufReader::new(file), &self.path)?;

        info!(file = ?self.path, count = tasks.len(), "Loaded tasks");
        Ok(tasks)
    }

    /// Overwrite the file with the full task set
    ///
    /// Not transactional: a failure mid-write can leave the file truncated.
    pub fn save(&self, tasks: &BTreeMap<u64, Task>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let file = File::create(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        let mut writer = BufWriter::new(file);
        encode(&mut writer, tasks).map_err(|e| StoreError::io(&self.path, e))?;
        writer.flush().map_err(|e| StoreError::io(&self.path, e))?;

        info!(file = ?self.path, count = tasks.len(), "Saved tasks");
        Ok(())
    }
}

/// Decode records from a reader; `source` names the resource in errors
pub fn decode<R: BufRead>(reader: R, source: &Path) -> Result<BTreeMap<u64, Task>> {
    let mut tasks = BTreeMap::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| StoreError::io(source, e))?;
        if line.trim().is_empty() {
            continue;
        }

        let malformed = |reason: String| StoreError::Format {
            path: source.to_path_buf(),
            line: line_num + 1,
            reason,
        };

        let task = parse_line(&line).map_err(malformed)?;
        if tasks.contains_key(&task.id) {
            return Err(malformed(format!("duplicate id {}", task.id)));
        }
        tasks.insert(task.id, task);
    }

    Ok(tasks)
}

/// Write every record, one per line, in map order
pub fn encode<W: Write>(writer: &mut W, tasks: &BTreeMap<u64, Task>) -> std::io::Result<()> {
    for task in tasks.values() {
        writeln!(writer, "{}", format_line(task))?;
    }
    Ok(())
}

/// Parse one record; the error is a human-readable reason
pub fn parse_line(line: &str) -> std::result::Result<Task, String> {
    let parts: Vec<&str> = line.trim().split(FIELD_SEPARATOR).collect();

    if parts.len() < MIN_FIELDS {
        return Err(format!(
            "expected at least {} fields, found {}",
            MIN_FIELDS,
            parts.len()
        ));
    }
    if parts.len() > MAX_FIELDS {
        return Err(format!("expected at most {} fields, found {}", MAX_FIELDS, parts.len()));
    }

    let id = match parts[0].trim().parse::<u64>() {
        Ok(id) if id > 0 => id,
        _ => return Err(format!("invalid id '{}'", parts[0])),
    };

    let status: Status = parts[2].parse().map_err(|_| format!("invalid status '{}'", parts[2]))?;
    let priority = parts.get(3).map(|p| Priority::normalize(p)).unwrap_or_default();
    let deadline = normalize_deadline(parts.get(4).copied());

    Ok(Task {
        id,
        title: parts[1].to_string(),
        status,
        priority,
        deadline,
    })
}

/// Render one record without the trailing newline
pub fn format_line(task: &Task) -> String {
    [
        task.id.to_string(),
        task.title.clone(),
        task.status.to_string(),
        task.priority.to_string(),
        task.deadline.clone(),
    ]
    .join(FIELD_SEPARATOR)
}
