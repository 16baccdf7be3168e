// Interactive menu over a loaded store

use crate::error::StoreError;
use crate::export::{ExportFormat, ExportOutcome, Exporter};
use crate::filter::TaskFilter;
use crate::render;
use crate::store::Store;
use crate::task::Priority;
use eyre::{Context, Result};
use std::io::{BufRead, Write};
use tracing::debug;

const MAIN_MENU: &str = "\n--- Task Manager Menu ---
1. Add Task
2. View Tasks
3. Mark Task Completed
4. Delete Task
5. Export Tasks
6. Exit
";

const EXPORT_MENU: &str = "\n--- Export Tasks ---
1. Export to JSON
2. Export to CSV
3. Back to main menu
";

const PRIORITY_MENU: &str = "Select priority:
1. High
2. Medium
3. Low
";

/// Numbered menu loop
///
/// Mutations stay in memory until the user exits; exit (or end of input)
/// saves the store once.
pub struct Shell<'a, R, W> {
    store: &'a mut Store,
    exporter: &'a Exporter,
    input: R,
    output: W,
    color: bool,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(store: &'a mut Store, exporter: &'a Exporter, input: R, output: W) -> Self {
        Self {
            store,
            exporter,
            input,
            output,
            color: false,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            write!(self.output, "{}", MAIN_MENU)?;
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                debug!("End of input, exiting");
                return self.exit();
            };

            match choice.trim() {
                "1" => self.add()?,
                "2" => self.view()?,
                "3" => self.complete()?,
                "4" => self.delete()?,
                "5" => self.export()?,
                "6" => return self.exit(),
                _ => writeln!(self.output, "Invalid choice. Please try again.")?,
            }
        }
    }

    fn exit(&mut self) -> Result<()> {
        self.store
            .save()
            .with_context(|| format!("Failed to save tasks to {}", self.store.path().display()))?;
        writeln!(self.output, "Exiting...")?;
        Ok(())
    }

    fn add(&mut self) -> Result<()> {
        let Some(title) = self.prompt("Enter task title: ")? else {
            return Ok(());
        };

        write!(self.output, "{}", PRIORITY_MENU)?;
        let Some(choice) = self.prompt("Enter priority (1-3, default 2): ")? else {
            return Ok(());
        };
        let priority = match choice.trim() {
            "1" => Priority::High,
            "3" => Priority::Low,
            _ => Priority::Medium,
        };

        let Some(deadline) = self.prompt("Enter deadline (YYYY-MM-DD) or press Enter for no deadline: ")? else {
            return Ok(());
        };

        match self.store.add_with(&title, priority, Some(deadline.as_str())) {
            Ok(id) => {
                writeln!(self.output, "Task added with ID: {}", id)?;
                if let Some(task) = self.store.get(id) {
                    write!(self.output, "{}", render::task_summary(task))?;
                }
            }
            Err(e) => self.report(e)?,
        }
        Ok(())
    }

    fn view(&mut self) -> Result<()> {
        if self.store.is_empty() {
            writeln!(self.output, "No tasks available.")?;
            return Ok(());
        }
        let tasks = self.store.query(&TaskFilter::all());
        write!(self.output, "{}", render::task_table(&tasks, self.color))?;
        Ok(())
    }

    fn complete(&mut self) -> Result<()> {
        let Some(id) = self.prompt_id("Enter task ID to mark as completed: ")? else {
            return Ok(());
        };
        match self.store.complete(id) {
            Ok(title) => writeln!(self.output, "Task '{}' marked as completed.", title)?,
            Err(e) => self.report(e)?,
        }
        Ok(())
    }

    fn delete(&mut self) -> Result<()> {
        let Some(id) = self.prompt_id("Enter task ID to delete: ")? else {
            return Ok(());
        };
        match self.store.delete(id) {
            Ok(task) => writeln!(self.output, "Task '{}' deleted.", task.title)?,
            Err(e) => self.report(e)?,
        }
        Ok(())
    }

    fn export(&mut self) -> Result<()> {
        if self.store.is_empty() {
            writeln!(self.output, "No tasks to export.")?;
            return Ok(());
        }

        write!(self.output, "{}", EXPORT_MENU)?;
        let Some(choice) = self.prompt("Enter your choice: ")? else {
            return Ok(());
        };
        let format = match choice.trim() {
            "1" => ExportFormat::Json,
            "2" => ExportFormat::Csv,
            "3" => return Ok(()),
            _ => {
                writeln!(self.output, "Invalid choice. Please try again.")?;
                return Ok(());
            }
        };

        match self.exporter.export(format, self.store.as_map()) {
            Ok(ExportOutcome::Written { path, count }) => {
                writeln!(self.output, "Tasks exported to {}", path.display())?;
                writeln!(self.output, "Total tasks exported: {}", count)?;
            }
            Ok(ExportOutcome::NothingToExport) => writeln!(self.output, "No tasks to export.")?,
            Err(e) => writeln!(self.output, "Error exporting to {}: {}", format, e)?,
        }
        Ok(())
    }

    /// Print a recoverable store error and carry on; anything else ends the session
    fn report(&mut self, e: StoreError) -> Result<()> {
        if !e.is_recoverable() {
            return Err(e.into());
        }
        match e {
            StoreError::NotFound(_) => writeln!(self.output, "Task ID not found.")?,
            e => writeln!(self.output, "Error: {}", e)?,
        }
        Ok(())
    }

    /// Read one line; `None` at end of input
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Read a task id; a non-numeric answer is reported and yields `None`
    fn prompt_id(&mut self, text: &str) -> Result<Option<u64>> {
        let Some(answer) = self.prompt(text)? else {
            return Ok(None);
        };
        match answer.trim().parse::<u64>() {
            Ok(id) => Ok(Some(id)),
            Err(_) => {
                writeln!(self.output, "Invalid task ID: '{}'", answer.trim())?;
                Ok(None)
            }
        }
    }
}
