use std::{fmt, path::PathBuf, str::FromStr};

use serde::Deserialize;

use crate::TokenError;

pub const DEFAULT_CSS_OUTPUT_PATH: &str = "styles.css";
pub const DEFAULT_CONFIG_OUTPUT_PATH: &str = "penpot.tailwind.config.js";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    PureCss,
    Tailwind,
}

impl FromStr for OutputMode {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "css" | "pure-css" => Ok(OutputMode::PureCss),
            "tailwind" => Ok(OutputMode::Tailwind),
            _ => Err(TokenError::assertion(format!("Unsupported output mode: {s}"))),
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputMode::PureCss => f.write_str("pure-css"),
            OutputMode::Tailwind => f.write_str("tailwind"),
        }
    }
}

/// What to render and where the artifacts go.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "outputMode", rename_all = "kebab-case")]
pub enum GeneratorOptions {
    PureCss(PureCssOptions),
    Tailwind(TailwindOptions),
}

impl GeneratorOptions {
    pub fn new(mode: OutputMode) -> Self {
        match mode {
            OutputMode::PureCss => GeneratorOptions::PureCss(PureCssOptions::default()),
            OutputMode::Tailwind => GeneratorOptions::Tailwind(TailwindOptions::default()),
        }
    }

    pub fn mode(&self) -> OutputMode {
        match self {
            GeneratorOptions::PureCss(_) => OutputMode::PureCss,
            GeneratorOptions::Tailwind(_) => OutputMode::Tailwind,
        }
    }

    pub fn css_output_path(&self) -> &PathBuf {
        match self {
            GeneratorOptions::PureCss(options) => &options.css_output_path,
            GeneratorOptions::Tailwind(options) => &options.css_output_path,
        }
    }

    pub fn set_css_output_path(&mut self, path: impl Into<PathBuf>) {
        match self {
            GeneratorOptions::PureCss(options) => options.css_output_path = path.into(),
            GeneratorOptions::Tailwind(options) => options.css_output_path = path.into(),
        }
    }
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        GeneratorOptions::new(OutputMode::PureCss)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PureCssOptions {
    pub css_output_path: PathBuf,
    pub typography: TypographyOptions,
}

impl Default for PureCssOptions {
    fn default() -> Self {
        Self {
            css_output_path: PathBuf::from(DEFAULT_CSS_OUTPUT_PATH),
            typography: TypographyOptions::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypographyOptions {
    /// Append `sans-serif` to every generated font-family variable.
    pub fallback_to_sans_serif: bool,
}

impl Default for TypographyOptions {
    fn default() -> Self {
        Self {
            fallback_to_sans_serif: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TailwindOptions {
    pub config_output_path: PathBuf,
    pub css_output_path: PathBuf,
}

impl Default for TailwindOptions {
    fn default() -> Self {
        Self {
            config_output_path: PathBuf::from(DEFAULT_CONFIG_OUTPUT_PATH),
            css_output_path: PathBuf::from(DEFAULT_CSS_OUTPUT_PATH),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_mode() {
        assert_eq!("css".parse::<OutputMode>().unwrap(), OutputMode::PureCss);
        assert_eq!("pure-css".parse::<OutputMode>().unwrap(), OutputMode::PureCss);
        assert_eq!("tailwind".parse::<OutputMode>().unwrap(), OutputMode::Tailwind);
        let err = "scss".parse::<OutputMode>().unwrap_err();
        assert!(err.is_assertion());
        assert_eq!(err.to_string(), "Assertion failed: Unsupported output mode: scss");
        assert_eq!(OutputMode::Tailwind.to_string(), "tailwind");
    }

    #[test]
    fn test_defaults() {
        let options = GeneratorOptions::default();
        assert_eq!(options.mode(), OutputMode::PureCss);
        assert_eq!(options.css_output_path(), &PathBuf::from("styles.css"));

        let GeneratorOptions::Tailwind(tailwind) = GeneratorOptions::new(OutputMode::Tailwind) else {
            panic!("expected tailwind options");
        };
        assert_eq!(tailwind.config_output_path, PathBuf::from("penpot.tailwind.config.js"));
    }

    #[test]
    fn test_deserialize() {
        let options: GeneratorOptions = serde_json::from_str(
            r#"{ "outputMode": "pure-css", "typography": { "fallbackToSansSerif": false } }"#,
        )
        .unwrap();
        assert_eq!(
            options,
            GeneratorOptions::PureCss(PureCssOptions {
                css_output_path: PathBuf::from("styles.css"),
                typography: TypographyOptions {
                    fallback_to_sans_serif: false
                },
            })
        );

        let options: GeneratorOptions = serde_json::from_str(
            r#"{ "outputMode": "tailwind", "cssOutputPath": "src/typography.css" }"#,
        )
        .unwrap();
        assert_eq!(options.css_output_path(), &PathBuf::from("src/typography.css"));

        assert!(serde_json::from_str::<GeneratorOptions>(r#"{ "outputMode": "scss" }"#).is_err());
    }
}
