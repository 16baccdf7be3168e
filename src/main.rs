use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use eyre::{Context, Result};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tasktrack::{Config, ExportFormat, ExportOutcome, Exporter, Priority, Shell, Status, Store, TaskFilter};
use tracing::Level;

#[derive(Parser)]
#[command(name = "tasktrack")]
#[command(about = "Command-line task manager with JSON/CSV export")]
#[command(version)]
#[command(after_help = "Examples:
  tasktrack add \"Buy groceries\" -p high -d 2024-01-15
  tasktrack list
  tasktrack list -s pending -p high
  tasktrack complete 1
  tasktrack delete 2
  tasktrack export json

Run without a command for the interactive menu.")]
struct Cli {
    /// Task file (default: tasks.txt in the current directory)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Directory for export files (default: current directory)
    #[arg(long, global = true)]
    export_dir: Option<PathBuf>,

    /// Config file (default: $TASKTRACK_CONFIG, then the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        /// Task title
        title: String,

        /// Task priority
        #[arg(short, long, value_enum, default_value_t = PriorityArg::Medium)]
        priority: PriorityArg,

        /// Task deadline (YYYY-MM-DD)
        #[arg(short, long)]
        deadline: Option<String>,
    },

    /// List tasks
    List {
        /// Filter by status
        #[arg(short, long, value_enum)]
        status: Option<StatusArg>,

        /// Filter by priority
        #[arg(short, long, value_enum)]
        priority: Option<PriorityArg>,
    },

    /// Mark task as completed
    Complete {
        /// Task ID to complete
        id: u64,
    },

    /// Delete a task
    Delete {
        /// Task ID to delete
        id: u64,
    },

    /// Export tasks
    Export {
        /// Export format
        #[arg(value_enum)]
        format: FormatArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PriorityArg {
    High,
    Medium,
    Low,
}

impl From<PriorityArg> for Priority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::High => Priority::High,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::Low => Priority::Low,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    Pending,
    Completed,
}

impl From<StatusArg> for Status {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Pending => Status::Pending,
            StatusArg::Completed => Status::Completed,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    Csv,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => ExportFormat::Json,
            FormatArg::Csv => ExportFormat::Csv,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing
    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let config = Config::load(cli.config.as_deref())?.with_overrides(cli.file, cli.export_dir);

    // Open store
    let mut store = Store::open(&config.tasks_file)
        .wrap_err_with(|| format!("Failed to load tasks from {}", config.tasks_file.display()))?;
    let exporter = Exporter::new(&config.export_dir);
    let color = io::stdout().is_terminal();

    let Some(command) = cli.command else {
        let stdin = io::stdin();
        return Shell::new(&mut store, &exporter, stdin.lock(), io::stdout())
            .with_color(color)
            .run();
    };

    match command {
        Commands::Add {
            title,
            priority,
            deadline,
        } => {
            let id = store.add_with(&title, priority.into(), deadline.as_deref())?;
            save(&store)?;

            println!("{}", "✓ Task added successfully!".green());
            if let Some(task) = store.get(id) {
                print!("{}", tasktrack::render::task_summary(task));
            }
        }
        Commands::List { status, priority } => {
            let mut filter = TaskFilter::all();
            if let Some(status) = status {
                filter = filter.with_status(status.into());
            }
            if let Some(priority) = priority {
                filter = filter.with_priority(priority.into());
            }

            let tasks = store.query(&filter);
            if tasks.is_empty() {
                println!("No tasks found matching the criteria.");
            } else {
                print!("{}", tasktrack::render::task_table(&tasks, color));
            }
        }
        Commands::Complete { id } => {
            let title = store.complete(id)?;
            save(&store)?;
            println!("{}", format!("✓ Task '{}' marked as completed!", title).green());
        }
        Commands::Delete { id } => {
            let task = store.delete(id)?;
            save(&store)?;
            println!("{}", format!("✓ Task '{}' deleted successfully!", task.title).green());
        }
        Commands::Export { format } => {
            let format = ExportFormat::from(format);
            match exporter
                .export(format, store.as_map())
                .wrap_err_with(|| format!("Error exporting to {}", format))?
            {
                ExportOutcome::Written { path, count } => {
                    println!("Tasks exported to {}", path.display());
                    println!("Total tasks exported: {}", count);
                }
                ExportOutcome::NothingToExport => println!("No tasks to export."),
            }
        }
    }

    Ok(())
}

fn save(store: &Store) -> Result<()> {
    store
        .save()
        .wrap_err_with(|| format!("Failed to save tasks to {}", store.path().display()))
}
