// In-memory task store backed by a delimited text file

use crate::codec::TaskFile;
use crate::error::{Result, StoreError};
use crate::filter::TaskFilter;
use crate::task::{Priority, Status, Task, validate_deadline, validate_title};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// All tasks for one run, keyed by id
///
/// Loaded whole at open and written whole on `save`. Nothing is flushed
/// implicitly; dropping the store discards unsaved changes.
pub struct Store {
    file: TaskFile,
    tasks: BTreeMap<u64, Task>,
}

impl Store {
    /// Open the store at the given task file path
    ///
    /// A missing file gives an empty store. A malformed file is an error.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = TaskFile::new(path);
        let tasks = file.load()?;
        Ok(Self::from_tasks(file, tasks))
    }

    /// Wrap an already-decoded task set
    pub fn from_tasks(file: TaskFile, tasks: BTreeMap<u64, Task>) -> Self {
        Self { file, tasks }
    }

    /// Get the path of the backing file
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Write every task back to the backing file
    pub fn save(&self) -> Result<()> {
        self.file.save(&self.tasks)
    }

    // ========================================================================
    // CRUD API
    // ========================================================================

    /// Id the next `add` will assign: highest existing id plus one
    ///
    /// Fails once the highest id is `u64::MAX`; ids are never wrapped or reused.
    pub fn next_id(&self) -> Result<u64> {
        match self.tasks.keys().next_back() {
            None => Ok(1),
            Some(max) => max
                .checked_add(1)
                .ok_or_else(|| StoreError::Validation(format!("No task ID left after {}", max))),
        }
    }

    /// Add a new pending task and return its id
    ///
    /// The priority token is matched case-insensitively; anything else,
    /// including `None`, gives Medium. An empty deadline means "No deadline".
    pub fn add(&mut self, title: &str, priority: Option<&str>, deadline: Option<&str>) -> Result<u64> {
        let priority = priority.map(Priority::normalize).unwrap_or_default();
        self.add_with(title, priority, deadline)
    }

    /// Add a new pending task with an already-typed priority
    pub fn add_with(&mut self, title: &str, priority: Priority, deadline: Option<&str>) -> Result<u64> {
        validate_title(title)?;
        if let Some(deadline) = deadline {
            validate_deadline(deadline)?;
        }

        let id = self.next_id()?;
        let task = Task::new(id, title, Some(priority), deadline);

        debug!(id, priority = %task.priority, deadline = %task.deadline, "add: created task");
        self.tasks.insert(id, task);
        Ok(id)
    }

    /// Get a task by id
    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.get(&id)
    }

    /// Mark a task completed and return its title
    pub fn complete(&mut self, id: u64) -> Result<String> {
        let task = self.tasks.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        task.status = Status::Completed;

        debug!(id, "complete: marked task completed");
        Ok(task.title.clone())
    }

    /// Remove a task and return it
    pub fn delete(&mut self, id: u64) -> Result<Task> {
        let task = self.tasks.remove(&id).ok_or(StoreError::NotFound(id))?;

        debug!(id, "delete: removed task");
        Ok(task)
    }

    /// List tasks matching the filter in display order
    ///
    /// Ordered by priority (High first), then deadline ascending with
    /// "No deadline" after every date, then id.
    pub fn query(&self, filter: &TaskFilter) -> Vec<Task> {
        let mut results: Vec<Task> = self.tasks.values().filter(|t| filter.matches(t)).cloned().collect();
        results.sort_by(|a, b| {
            a.priority
                .rank()
                .cmp(&b.priority.rank())
                .then_with(|| a.deadline_sort_key().cmp(b.deadline_sort_key()))
                .then_with(|| a.id.cmp(&b.id))
        });

        info!(filter = %filter, count = results.len(), "Queried tasks");
        results
    }

    /// Borrow the underlying id-to-task map
    pub fn as_map(&self) -> &BTreeMap<u64, Task> {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
