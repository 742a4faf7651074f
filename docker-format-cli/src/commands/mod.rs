//! Command handlers -- one module per subcommand

pub mod config;
pub mod enrich;
pub mod inspect;

use std::path::{Path, PathBuf};

use tracing::debug;

use docker_format_core::config::{DockerFormatConfig, TagRewriteMode};
use docker_format_core::error::{ConfigError, DockerFormatError};

use crate::error::CliError;

/// Command-line values that take precedence over file and environment.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub log_level: Option<String>,
    pub containers_path: Option<PathBuf>,
    pub tag_rewrite: Option<TagRewriteMode>,
}

impl ConfigOverrides {
    fn apply(&self, config: &mut DockerFormatConfig) {
        if let Some(level) = &self.log_level {
            config.general.log_level = level.clone();
        }
        if let Some(path) = &self.containers_path {
            config.filter.docker_containers_path = path.to_string_lossy().into_owned();
        }
        if let Some(mode) = self.tag_rewrite {
            config.filter.tag_rewrite = mode;
        }
    }
}

/// Build the effective configuration.
///
/// Precedence: command line > environment > file > defaults. A missing
/// config file is not an error; defaults are used instead.
pub async fn resolve_config(
    config_path: &Path,
    overrides: &ConfigOverrides,
) -> Result<DockerFormatConfig, CliError> {
    let mut config = match DockerFormatConfig::from_file(config_path).await {
        Ok(config) => config,
        Err(DockerFormatError::Config(ConfigError::FileNotFound { path })) => {
            debug!(path = %path, "config file not found, using defaults");
            DockerFormatConfig::default()
        }
        Err(e) => return Err(e.into()),
    };

    config.apply_env_overrides();
    overrides.apply(&mut config);
    config.validate()?;
    Ok(config)
}
