use clap::{Parser, Subcommand};

use std::path::PathBuf;

use super::constants::{ENV_CONFIG, ENV_DATABASE_MAX_CONNECTIONS, ENV_DATABASE_URL};
use crate::data::sql::Backend;

#[derive(Parser)]
#[command(name = "querykit")]
#[command(version, about = "Composable parameterised SQL filters", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Database URL (sqlite://path/to/file.db)
    #[arg(long, global = true, env = ENV_DATABASE_URL)]
    pub database_url: Option<String>,

    /// Maximum pool connections
    #[arg(long, global = true, env = ENV_DATABASE_MAX_CONNECTIONS)]
    pub max_connections: Option<u32>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Render a JSON filter to positional SQL and bound values
    Render {
        /// Filter tree as JSON
        #[arg(long, short = 'f')]
        filter: String,

        /// Target dialect (sqlite or postgres)
        #[arg(long, short = 'd', default_value = "sqlite", value_parser = parse_backend)]
        dialect: Backend,

        /// Render as a full SELECT against this table
        #[arg(long, short = 't')]
        table: Option<String>,
    },
    /// Count rows of a table in the configured database
    Count {
        /// Table to count
        #[arg(long, short = 't')]
        table: String,

        /// Filter tree as JSON; all rows when omitted
        #[arg(long, short = 'f')]
        filter: Option<String>,
    },
}

fn parse_backend(s: &str) -> Result<Backend, String> {
    s.parse()
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub config: Option<PathBuf>,
    pub database_url: Option<String>,
    pub max_connections: Option<u32>,
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Commands) {
    let cli = Cli::parse();
    let config = CliConfig {
        config: cli.config,
        database_url: cli.database_url,
        max_connections: cli.max_connections,
    };
    (config, cli.command)
}
