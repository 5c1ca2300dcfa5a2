//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Paginated product catalog client
#[derive(Parser, Debug)]
#[command(name = "catalog-pager")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// API host, overrides the config file (e.g. "fakestoreapi.com")
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Bearer token, overrides the config file
    #[arg(long, global = true, env = "CATALOG_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Verbose output (includes network logs)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load products page by page and print them
    Browse {
        /// Follow-up pages to load after the first one
        #[arg(long, default_value = "3")]
        pages: u32,
    },

    /// Show details for a single product
    Show {
        /// Product id
        #[arg(long)]
        id: i64,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one product per line)
    Json,
    /// Human-readable output
    Pretty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_browse() {
        let cli = Cli::parse_from(["catalog-pager", "browse", "--pages", "2", "-f", "json"]);
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(cli.command, Commands::Browse { pages: 2 }));
    }

    #[test]
    fn test_parse_show_with_overrides() {
        let cli = Cli::parse_from([
            "catalog-pager",
            "--host",
            "shop.example.com",
            "show",
            "--id",
            "4",
        ]);
        assert_eq!(cli.host.as_deref(), Some("shop.example.com"));
        assert_eq!(cli.format, OutputFormat::Pretty);
        assert!(matches!(cli.command, Commands::Show { id: 4 }));
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
