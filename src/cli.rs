//! Command-line argument parsing for querygate.

use clap::Parser;
use std::path::PathBuf;

/// A read-only SQL gateway over a single CSV-backed SQLite table.
#[derive(Parser, Debug)]
#[command(name = "querygate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// SQL to execute once; reads statements from stdin when omitted
    #[arg(value_name = "SQL")]
    pub sql: Option<String>,

    /// CSV source used to build the store on first run
    #[arg(long, value_name = "PATH", env = "QUERYGATE_SOURCE")]
    pub source: Option<PathBuf>,

    /// SQLite store file
    #[arg(long, value_name = "PATH", env = "QUERYGATE_STORE")]
    pub store: Option<PathBuf>,

    /// Name of the queryable table
    #[arg(long, value_name = "NAME", env = "QUERYGATE_TABLE")]
    pub table: Option<String>,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write logs to a file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Serve execute_sql tool calls as JSON lines on stdin/stdout
    #[arg(long, conflicts_with_all = ["sql", "schema", "tool_spec"])]
    pub serve: bool,

    /// Print the table schema and exit
    #[arg(long, conflicts_with_all = ["sql", "tool_spec"])]
    pub schema: bool,

    /// Print the execute_sql tool definition as JSON and exit
    #[arg(long, conflicts_with = "sql")]
    pub tool_spec: bool,
}

/// What the binary should do after startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Execute one statement and exit.
    Once(String),
    /// Read one statement per stdin line until EOF or `quit`.
    Interactive,
    /// JSON-lines tool protocol.
    Serve,
    /// Print the schema.
    Schema,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(querygate::config::Config::default_path)
    }

    /// Resolves the run mode from the flags.
    ///
    /// `--tool-spec` is handled before the store is touched and has no mode.
    pub fn mode(&self) -> Mode {
        if self.schema {
            Mode::Schema
        } else if self.serve {
            Mode::Serve
        } else if let Some(sql) = &self.sql {
            Mode::Once(sql.clone())
        } else {
            Mode::Interactive
        }
    }
}

/// Returns true for inputs that end the interactive loop.
pub fn is_exit_command(line: &str) -> bool {
    matches!(line.trim().to_lowercase().as_str(), "quit" | "exit" | "q")
}
