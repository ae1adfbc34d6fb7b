use std::path::Path;

use anyhow::{Context, Result};
use penport_core::GeneratorOptions;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::args::ExportArgs;

/// Contents of `penport.config.json`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PenportConfig {
    pub file_id: Option<String>,
    pub output: Option<GeneratorOptions>,
}

impl PenportConfig {
    /// A missing file is an empty configuration; a malformed one is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no configuration file");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Command line flags win over the configuration file.
    pub fn generator_options(&self, args: &ExportArgs) -> GeneratorOptions {
        let mut options = match (args.format, &self.output) {
            (Some(mode), Some(output)) if output.mode() == mode => output.clone(),
            (Some(mode), _) => GeneratorOptions::new(mode),
            (None, Some(output)) => output.clone(),
            (None, None) => GeneratorOptions::default(),
        };

        if let Some(path) = &args.css_output {
            options.set_css_output_path(path);
        }
        match &mut options {
            GeneratorOptions::PureCss(pure) => {
                if args.no_fallback {
                    pure.typography.fallback_to_sans_serif = false;
                }
                if args.config_output.is_some() {
                    warn!("--config-output only applies to the tailwind format");
                }
            }
            GeneratorOptions::Tailwind(tailwind) => {
                if let Some(path) = &args.config_output {
                    tailwind.config_output_path = path.clone();
                }
                if args.no_fallback {
                    warn!("--no-fallback only applies to the css format");
                }
            }
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use std::{io::Write, path::PathBuf};

    use clap::Parser;
    use penport_core::{OutputMode, TailwindOptions};
    use tempfile::NamedTempFile;

    use super::*;
    use crate::args::{Cli, Commands};

    fn export_args(extra: &[&str]) -> ExportArgs {
        let cli = Cli::parse_from(["penport", "export"].iter().chain(extra));
        match cli.command {
            Commands::Export(args) => args,
        }
    }

    #[test]
    fn test_missing_config_is_empty() {
        let config = PenportConfig::load(Path::new("does/not/exist.json")).unwrap();
        assert_eq!(config, PenportConfig::default());
    }

    #[test]
    fn test_load_config() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        file.write_all(
            br#"{
  "fileId": "3f1e2d3c-4b5a-4697-8887-766554433221",
  "output": { "outputMode": "tailwind", "cssOutputPath": "src/typography.css" }
}"#,
        )
        .unwrap();

        let config = PenportConfig::load(file.path()).unwrap();
        assert_eq!(config.file_id.as_deref(), Some("3f1e2d3c-4b5a-4697-8887-766554433221"));
        assert_eq!(
            config.output,
            Some(GeneratorOptions::Tailwind(TailwindOptions {
                config_output_path: PathBuf::from("penpot.tailwind.config.js"),
                css_output_path: PathBuf::from("src/typography.css"),
            }))
        );
    }

    #[test]
    fn test_malformed_config() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        file.write_all(b"{ \"output\": { \"outputMode\": \"scss\" } }").unwrap();
        let err = PenportConfig::load(file.path()).unwrap_err();
        assert!(format!("{err}").contains("Failed to parse config file"));
    }

    #[test]
    fn test_flags_override_config() {
        let config = PenportConfig {
            file_id: None,
            output: Some(GeneratorOptions::Tailwind(TailwindOptions {
                config_output_path: PathBuf::from("tailwind/penpot.config.js"),
                css_output_path: PathBuf::from("src/typography.css"),
            })),
        };

        let options = config.generator_options(&export_args(&[]));
        assert_eq!(options, config.output.clone().unwrap());

        let options = config.generator_options(&export_args(&["--css-output", "dist/tokens.css"]));
        let GeneratorOptions::Tailwind(tailwind) = options else {
            panic!("expected tailwind options");
        };
        assert_eq!(tailwind.config_output_path, PathBuf::from("tailwind/penpot.config.js"));
        assert_eq!(tailwind.css_output_path, PathBuf::from("dist/tokens.css"));

        let options = config.generator_options(&export_args(&["--format", "css", "--no-fallback"]));
        let GeneratorOptions::PureCss(pure) = options else {
            panic!("expected pure css options");
        };
        assert_eq!(pure.css_output_path, PathBuf::from("styles.css"));
        assert!(!pure.typography.fallback_to_sans_serif);
    }

    #[test]
    fn test_defaults_without_config() {
        let options = PenportConfig::default().generator_options(&export_args(&[]));
        assert_eq!(options.mode(), OutputMode::PureCss);
        assert_eq!(options.css_output_path(), &PathBuf::from("styles.css"));
    }
}
