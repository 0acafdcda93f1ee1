use crate::config::SourceKind;
use crate::export::ExportFormat;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for rworktime
#[derive(Parser, Debug)]
#[command(
    name = "rworktime",
    version = env!("CARGO_PKG_VERSION"),
    about = "Record working times in SQLite, then load, cache and report them",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where `list` and `export` read records from.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Data source (defaults to the configured one)
    #[arg(long, value_enum)]
    pub source: Option<SourceKind>,

    /// JSON file to read when `--source json`
    #[arg(long = "from", value_name = "FILE")]
    pub from: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show or edit the configuration file
    Config {
        #[arg(long = "print", help = "Print the effective configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Editor to use with --edit")]
        editor: Option<String>,
    },

    /// Record a working time
    Add {
        /// Day of the entry (YYYY-MM-DD or "today")
        date: String,

        /// Clock-in time (HH:MM)
        #[arg(long = "in", value_name = "HH:MM")]
        start: String,

        /// Clock-out time (HH:MM)
        #[arg(long = "out", value_name = "HH:MM")]
        end: Option<String>,

        /// Lunch break in minutes
        #[arg(long = "lunch", default_value_t = 0, allow_negative_numbers = true)]
        lunch: i32,

        /// Position: O=Office, R=Remote, H=Holiday, C=Client, M=Mixed
        #[arg(long = "pos")]
        pos: Option<String>,

        /// Free-text note
        #[arg(long = "note")]
        note: Option<String>,
    },

    /// Delete a working time by id
    Del {
        id: i64,
    },

    /// Load working times and show them
    List {
        /// Group by day (calendar view)
        #[arg(long, conflicts_with = "flat")]
        calendar: bool,

        /// One row per record
        #[arg(long)]
        flat: bool,

        #[arg(long, short, help = "Filter by YYYY, YYYY-MM, YYYY-MM-DD or a START:END range")]
        period: Option<String>,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Export working times
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter by YYYY, YYYY-MM, YYYY-MM-DD or a START:END range"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
