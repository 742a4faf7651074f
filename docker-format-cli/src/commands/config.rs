//! `docker-format config` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use docker_format_core::config::DockerFormatConfig;

use crate::cli::{ConfigAction, ConfigArgs};
use crate::commands::{ConfigOverrides, resolve_config};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `config` command.
pub async fn execute(
    args: ConfigArgs,
    config_path: &Path,
    overrides: &ConfigOverrides,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    match args.action {
        ConfigAction::Validate => execute_validate(config_path, writer).await,
        ConfigAction::Show { section } => {
            execute_show(config_path, overrides, section, writer).await
        }
    }
}

/// Load the file strictly (it must exist) and report any error.
///
/// # Errors
///
/// Returns `CliError::Config` if the file is missing, malformed or invalid.
async fn execute_validate(config_path: &Path, writer: &OutputWriter) -> Result<(), CliError> {
    info!(path = %config_path.display(), "validating configuration");

    let report = match DockerFormatConfig::load(config_path).await {
        Ok(_) => ConfigValidationReport {
            source: config_path.display().to_string(),
            valid: true,
            errors: Vec::new(),
        },
        Err(e) => ConfigValidationReport {
            source: config_path.display().to_string(),
            valid: false,
            errors: vec![e.to_string()],
        },
    };

    writer.render(&report)?;

    if !report.valid {
        return Err(CliError::Config("configuration is invalid".to_owned()));
    }
    Ok(())
}

/// Display the effective configuration (file + env + command line + defaults).
///
/// # Errors
///
/// Returns `CliError::Command` if the section name is unknown.
async fn execute_show(
    config_path: &Path,
    overrides: &ConfigOverrides,
    section: Option<String>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    info!(path = %config_path.display(), "loading configuration");

    let config = resolve_config(config_path, overrides).await?;
    let report = build_show_report(&config, config_path, section.as_deref())?;
    writer.render(&report)
}

fn build_show_report(
    config: &DockerFormatConfig,
    config_path: &Path,
    section: Option<&str>,
) -> Result<ConfigReport, CliError> {
    let (section, config_toml, value) = match section {
        None => (
            None,
            toml::to_string_pretty(config),
            serde_json::to_value(config)?,
        ),
        Some("general") => (
            Some("general"),
            toml::to_string_pretty(&config.general),
            serde_json::to_value(&config.general)?,
        ),
        Some("filter") => (
            Some("filter"),
            toml::to_string_pretty(&config.filter),
            serde_json::to_value(&config.filter)?,
        ),
        Some(other) => {
            return Err(CliError::Command(format!(
                "unknown section: {} (expected: general, filter)",
                other
            )));
        }
    };

    Ok(ConfigReport {
        source: config_path.display().to_string(),
        section: section.map(str::to_owned),
        config_toml: config_toml.unwrap_or_else(|e| format!("(serialization error: {})", e)),
        config: value,
    })
}

/// Configuration display report.
///
/// Text output prints `config_toml`; JSON output carries the structured `config`.
#[derive(Serialize)]
pub struct ConfigReport {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(skip)]
    pub config_toml: String,
    pub config: serde_json::Value,
}

impl Render for ConfigReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        if let Some(ref section) = self.section {
            let section_label = format!("[{}]", section);
            writeln!(
                w,
                "Configuration {} (source: {})",
                section_label.bold(),
                self.source
            )?;
        } else {
            writeln!(w, "Configuration (source: {})", self.source.bold())?;
        }

        writeln!(w)?;
        write!(w, "{}", self.config_toml)?;
        Ok(())
    }
}

/// Configuration validation report.
#[derive(Serialize)]
pub struct ConfigValidationReport {
    pub source: String,
    pub valid: bool,
    /// Validation error messages (empty if valid)
    pub errors: Vec<String>,
}

impl Render for ConfigValidationReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Config Validation: {}", self.source.bold())?;

        if self.valid {
            writeln!(w, "  Result: {}", "VALID".green().bold())?;
        } else {
            writeln!(w, "  Result: {}", "INVALID".red().bold())?;
            for err in &self.errors {
                writeln!(w, "  Error: {}", err.red())?;
            }
        }
        Ok(())
    }
}
