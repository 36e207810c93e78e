use clap::{ArgAction, Parser, Subcommand, ValueHint};

#[derive(Parser)]
#[command(
    author,
    version,
    about,
    help_template = "{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}",
    arg_required_else_help = true
)]
pub struct Args {
    /// Set output verbosity
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress outputs
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output as json
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Provide custom config file
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<String>,

    /// Use this database file instead of the configured one
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub db: Option<String>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create every table (projects, tasks, stations, measurements)
    Init,

    /// Generate default config
    #[clap(name = "defconfig")]
    DefConfig,

    /// Connect to an in-memory database and report the SQLite version
    Probe,

    /// Manage projects
    #[command(arg_required_else_help = true)]
    Project {
        #[clap(subcommand)]
        action: ProjectAction,
    },

    /// Manage tasks
    #[command(arg_required_else_help = true)]
    Task {
        #[clap(subcommand)]
        action: TaskAction,
    },

    /// Select rows matching every filter
    #[command(arg_required_else_help = true)]
    #[clap(name = "select", visible_alias = "s")]
    Select {
        /// Table to read from
        #[arg(required = true)]
        table: String,

        /// Filter as column=value (repeatable, joined with AND)
        #[arg(short = 'w', long = "where")]
        filters: Vec<String>,

        /// Maximum number of rows
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Update one row by id
    #[command(arg_required_else_help = true)]
    Update {
        /// Table to update
        #[arg(required = true)]
        table: String,

        /// Row id
        #[arg(required = true)]
        id: i64,

        /// Assignment as column=value (repeatable)
        #[arg(short = 's', long = "set", required = true)]
        assignments: Vec<String>,
    },

    /// Delete rows matching every filter
    #[command(arg_required_else_help = true)]
    #[clap(name = "delete", visible_alias = "rm")]
    Delete {
        /// Table to delete from
        #[arg(required = true)]
        table: String,

        /// Filter as column=value (repeatable, joined with AND)
        #[arg(short = 'w', long = "where", required = true)]
        filters: Vec<String>,
    },

    /// Delete every row of a table
    #[command(arg_required_else_help = true)]
    Purge {
        /// Table to empty
        #[arg(required = true)]
        table: String,
    },

    /// Weather station data
    #[command(arg_required_else_help = true)]
    Weather {
        #[clap(subcommand)]
        action: WeatherAction,
    },
}

#[derive(Subcommand)]
pub enum ProjectAction {
    /// Add a project
    Add {
        name: String,
        start_date: String,
        end_date: String,
    },
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task to a project
    Add {
        project_id: i64,
        name: String,
        description: String,
        status: String,
        start_date: String,
        end_date: String,
    },

    /// List tasks with the given status
    Status { status: String },
}

#[derive(Subcommand)]
pub enum WeatherAction {
    /// Load stations and measurements from CSV files
    Import {
        /// Stations CSV (defaults to the configured file)
        #[arg(long, value_hint = ValueHint::FilePath)]
        stations: Option<String>,

        /// Measurements CSV (defaults to the configured file)
        #[arg(long, value_hint = ValueHint::FilePath)]
        measurements: Option<String>,
    },

    /// Show the first stations
    Sample {
        /// Number of stations (defaults to the configured sample_limit)
        #[arg(short, long)]
        limit: Option<u32>,
    },
}
