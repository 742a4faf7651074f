//! CLI argument parsing using clap derive API
//!
//! Purely declarative: no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use docker_format_core::config::TagRewriteMode;

/// docker-format -- enrich log events with Docker container metadata.
///
/// Use `docker-format <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "docker-format", version, about, long_about = None)]
pub struct Cli {
    /// Path to the docker-format.toml configuration file.
    #[arg(short, long, global = true, default_value = "docker-format.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format for reports (`enrich` always writes NDJSON).
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// Override the Docker containers directory.
    #[arg(long, global = true)]
    pub containers_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Enrich NDJSON events read from a file or stdin.
    Enrich(EnrichArgs),

    /// Show the metadata resolved for one container.
    Inspect(InspectArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- enrich ----

/// Read `{"tag","time","record"}` lines and write enriched lines to stdout.
#[derive(Args, Debug)]
pub struct EnrichArgs {
    /// Input file (default: stdin).
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Override the output tag rewrite mode (compat, full).
    #[arg(long)]
    pub tag_rewrite: Option<TagRewriteMode>,
}

// ---- inspect ----

/// Resolve name, image and selected env/label values for a container ID.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Container ID (directory name under the containers path).
    pub container_id: String,

    /// Environment variable to look up (repeatable).
    #[arg(long = "env", value_name = "KEY")]
    pub env: Vec<String>,

    /// Label to look up (repeatable).
    #[arg(long = "label", value_name = "KEY")]
    pub labels: Vec<String>,
}

// ---- config ----

/// Configuration management.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file.
    Validate,

    /// Show the effective configuration (file + env + defaults).
    Show {
        /// Show only a specific section (general, filter).
        #[arg(long)]
        section: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parse_enrich_defaults() {
        let cli = Cli::try_parse_from(["docker-format", "enrich"]).expect("parse succeeded");
        assert_eq!(cli.config, PathBuf::from("docker-format.toml"));
        assert_eq!(cli.output, OutputFormat::Text);
        assert!(cli.log_level.is_none());
        assert!(cli.containers_path.is_none());
        match cli.command {
            Commands::Enrich(args) => {
                assert!(args.input.is_none());
                assert!(args.tag_rewrite.is_none());
            }
            _ => panic!("expected Enrich command"),
        }
    }

    #[test]
    fn test_cli_parse_enrich_with_input_and_mode() {
        let cli = Cli::try_parse_from([
            "docker-format",
            "enrich",
            "--input",
            "events.ndjson",
            "--tag-rewrite",
            "full",
        ])
        .expect("parse succeeded");
        match cli.command {
            Commands::Enrich(args) => {
                assert_eq!(args.input, Some(PathBuf::from("events.ndjson")));
                assert_eq!(args.tag_rewrite, Some(TagRewriteMode::Full));
            }
            _ => panic!("expected Enrich command"),
        }
    }

    #[test]
    fn test_cli_parse_enrich_invalid_mode() {
        let result = Cli::try_parse_from(["docker-format", "enrich", "--tag-rewrite", "bogus"]);
        assert!(result.is_err(), "unknown rewrite mode should be rejected");
    }

    #[test]
    fn test_cli_parse_inspect_repeated_keys() {
        let cli = Cli::try_parse_from([
            "docker-format",
            "inspect",
            "abc123",
            "--env",
            "FOO",
            "--env",
            "BAR",
            "--label",
            "com.docker.compose.service",
        ])
        .expect("parse succeeded");
        match cli.command {
            Commands::Inspect(args) => {
                assert_eq!(args.container_id, "abc123");
                assert_eq!(args.env, vec!["FOO", "BAR"]);
                assert_eq!(args.labels, vec!["com.docker.compose.service"]);
            }
            _ => panic!("expected Inspect command"),
        }
    }

    #[test]
    fn test_cli_parse_inspect_requires_id() {
        assert!(Cli::try_parse_from(["docker-format", "inspect"]).is_err());
    }

    #[test]
    fn test_cli_parse_config_show_section() {
        let cli = Cli::try_parse_from(["docker-format", "config", "show", "--section", "filter"])
            .expect("parse succeeded");
        match cli.command {
            Commands::Config(args) => match args.action {
                ConfigAction::Show { section } => assert_eq!(section.as_deref(), Some("filter")),
                _ => panic!("expected Show action"),
            },
            _ => panic!("expected Config command"),
        }
    }

    #[test]
    fn test_cli_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "docker-format",
            "inspect",
            "abc",
            "--output",
            "json",
            "--containers-path",
            "/tmp/containers",
            "--log-level",
            "debug",
        ])
        .expect("parse succeeded");
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.containers_path, Some(PathBuf::from("/tmp/containers")));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_cli_parse_invalid_output_format() {
        let result = Cli::try_parse_from(["docker-format", "--output", "yaml", "enrich"]);
        assert!(result.is_err());
    }
}
