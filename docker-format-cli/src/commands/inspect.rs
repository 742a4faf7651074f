//! `docker-format inspect` command handler

use std::collections::BTreeMap;
use std::io::Write;

use colored::Colorize;
use serde::Serialize;
use tracing::info;

use docker_format_core::config::DockerFormatConfig;
use docker_format_filter::{FilterConfig, RecordEnricher};

use crate::cli::InspectArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `inspect` command.
pub async fn execute(
    args: InspectArgs,
    config: &DockerFormatConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    info!(container_id = %args.container_id, "inspecting container");

    let mut enricher = RecordEnricher::new(FilterConfig::from_core(&config.filter))?;
    let report = build_report(&mut enricher, &args);
    writer.render(&report)?;
    Ok(())
}

/// Resolve everything the enricher would use for `args.container_id`.
pub fn build_report(enricher: &mut RecordEnricher, args: &InspectArgs) -> InspectReport {
    let id = args.container_id.as_str();
    let output_tag = enricher.output_tag(id);
    let resolver = enricher.resolver_mut();

    let env: BTreeMap<_, _> = args
        .env
        .iter()
        .map(|key| (key.clone(), resolver.env_variable(id, key)))
        .collect();
    let labels: BTreeMap<_, _> = args
        .labels
        .iter()
        .map(|key| (key.clone(), resolver.label(id, key)))
        .collect();

    InspectReport {
        container_id: id.to_owned(),
        config_path: resolver
            .store()
            .source()
            .config_path(id)
            .display()
            .to_string(),
        found: resolver.has_config(id),
        container_name: resolver.container_name(id),
        image_name: resolver.image_name(id),
        service_id: resolver.label(id, docker_format_filter::SERVICE_ID_LABEL),
        output_tag,
        env,
        labels,
    }
}

/// Metadata resolved for a single container.
#[derive(Debug, Serialize)]
pub struct InspectReport {
    pub container_id: String,
    /// Config file that was (or would be) read.
    pub config_path: String,
    /// Whether a readable config document exists.
    pub found: bool,
    pub container_name: Option<String>,
    pub image_name: Option<String>,
    pub service_id: Option<String>,
    /// Tag the enricher would emit for this container.
    pub output_tag: String,
    pub env: BTreeMap<String, Option<String>>,
    pub labels: BTreeMap<String, Option<String>>,
}

impl Render for InspectReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "Container: {}", self.container_id.bold())?;
        let status = if self.found {
            "found".green()
        } else {
            "not found".red()
        };
        writeln!(w, "  Config:  {} ({})", self.config_path, status)?;
        writeln!(w, "  Name:    {}", display(self.container_name.as_deref()))?;
        writeln!(w, "  Image:   {}", display(self.image_name.as_deref()))?;
        writeln!(w, "  Service: {}", display(self.service_id.as_deref()))?;
        writeln!(w, "  Tag:     {}", self.output_tag)?;

        if !self.env.is_empty() {
            writeln!(w, "  Env:")?;
            for (key, value) in &self.env {
                writeln!(w, "    {} = {}", key, display(value.as_deref()))?;
            }
        }
        if !self.labels.is_empty() {
            writeln!(w, "  Labels:")?;
            for (key, value) in &self.labels {
                writeln!(w, "    {} = {}", key, display(value.as_deref()))?;
            }
        }
        Ok(())
    }
}

fn display(value: Option<&str>) -> String {
    match value {
        Some(v) => v.to_owned(),
        None => "-".dimmed().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docker_format_filter::FilterConfigBuilder;
    use docker_format_filter::store::CONFIG_V2_FILE;

    fn enricher(dir: &std::path::Path) -> RecordEnricher {
        let config = FilterConfigBuilder::new()
            .tag("docker.${image_name}")
            .docker_containers_path(dir)
            .build()
            .expect("valid config");
        RecordEnricher::new(config).expect("enricher")
    }

    fn args(id: &str, env: &[&str], labels: &[&str]) -> InspectArgs {
        InspectArgs {
            container_id: id.to_owned(),
            env: env.iter().map(|s| (*s).to_owned()).collect(),
            labels: labels.iter().map(|s| (*s).to_owned()).collect(),
        }
    }

    #[test]
    fn report_for_known_container() {
        let dir = tempfile::tempdir().expect("tempdir");
        let container = dir.path().join("abc123");
        std::fs::create_dir_all(&container).expect("mkdir");
        std::fs::write(
            container.join(CONFIG_V2_FILE),
            serde_json::json!({
                "Name": "/myapp_web_1",
                "Config": {
                    "Image": "myrepo/myimage:latest",
                    "Env": ["FOO=bar"],
                    "Labels": {
                        "com.docker.compose.project.working_dir": "/srv/myapp",
                        "com.docker.compose.service": "web"
                    }
                }
            })
            .to_string(),
        )
        .expect("write config");

        let mut e = enricher(dir.path());
        let report = build_report(
            &mut e,
            &args("abc123", &["FOO", "MISSING"], &["com.docker.compose.service"]),
        );

        assert!(report.found);
        assert!(report.config_path.ends_with(CONFIG_V2_FILE));
        assert_eq!(report.container_name.as_deref(), Some("myapp_web_1"));
        assert_eq!(report.image_name.as_deref(), Some("myrepo/myimage"));
        assert_eq!(report.service_id.as_deref(), Some("/srv/myapp"));
        assert_eq!(report.output_tag, "docker.myrepo/myimage");
        assert_eq!(report.env["FOO"].as_deref(), Some("bar"));
        assert_eq!(report.env["MISSING"], None);
        assert_eq!(
            report.labels["com.docker.compose.service"].as_deref(),
            Some("web")
        );
    }

    #[test]
    fn report_for_unknown_container() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut e = enricher(dir.path());
        let report = build_report(&mut e, &args("ghost", &[], &[]));

        assert!(!report.found);
        assert_eq!(report.container_name, None);
        assert_eq!(report.output_tag, "docker.ghost");

        let mut buffer = Vec::new();
        report.render_text(&mut buffer).expect("render");
        let text = String::from_utf8(buffer).expect("utf-8");
        assert!(text.contains("ghost"));
        assert!(text.contains("not found"));
        assert!(!text.contains("Env:"));
    }

    #[test]
    fn missing_values_render_as_placeholder() {
        assert_eq!(display(Some("web")), "web");
        assert!(display(None).contains('-'));
    }
}
