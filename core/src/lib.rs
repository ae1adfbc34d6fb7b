use std::path::{Path, PathBuf};

use itertools::Itertools;
use tracing::debug;

mod css;
pub mod declaration;
mod error;
pub mod options;
pub mod source;
mod tailwind;
pub mod tokens;

pub use declaration::{Block, Declaration};
pub use error::{Result, TokenError};
pub use options::{GeneratorOptions, OutputMode, PureCssOptions, TailwindOptions, TypographyOptions};
pub use tokens::{Color, TextTransform, Tokens, Typography};

/// Browsers resolve `rem` against this root font size.
pub(crate) const BASE_FONT_SIZE_PX: f64 = 16.0;

/// A rendered artifact. Writing it anywhere is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub path: PathBuf,
    pub contents: String,
}

/// Renders `tokens` with the renderer selected by `options`.
pub fn generate(tokens: &Tokens, options: &GeneratorOptions) -> Result<Vec<OutputFile>> {
    debug!(
        mode = %options.mode(),
        colors = tokens.colors.len(),
        typographies = tokens.typographies.len(),
        "generating stylesheets"
    );
    match options {
        GeneratorOptions::PureCss(options) => css::render(tokens, options),
        GeneratorOptions::Tailwind(options) => tailwind::render(tokens, options),
    }
}

/// Joins the non-empty segments with `_` and reduces the result to
/// `[a-z0-9_-]`, turning `/` and `.` into `_` and spaces into `-`.
pub fn sanitize(segments: &[&str]) -> Result<String> {
    if segments.is_empty() {
        return Err(TokenError::assertion(
            "Cannot get CSS name, at least one path segment is required",
        ));
    }
    Ok(segments
        .iter()
        .filter(|segment| !segment.is_empty())
        .join("_")
        .to_lowercase()
        .replace('/', "_")
        .replace(' ', "-")
        .replace('.', "_")
        .chars()
        .filter(|c| matches!(c, 'a'..='z' | '0'..='9' | '_' | '-'))
        .collect())
}

pub(crate) fn px_to_rem(px: f64) -> f64 {
    px / BASE_FONT_SIZE_PX
}

/// Rounds to four decimals and prints the shortest form, so `0.8750` comes
/// out as `0.875` and `1.0000` as `1`.
pub(crate) fn format_rounded(value: f64) -> String {
    let rounded = (value * 10_000.0).round() / 10_000.0;
    if rounded == 0.0 {
        // keeps `-0` out of the stylesheet
        "0".to_string()
    } else {
        rounded.to_string()
    }
}

pub(crate) fn ensure_extension(path: &Path, extension: &str, what: &str) -> Result<()> {
    if path.to_string_lossy().ends_with(extension) {
        Ok(())
    } else {
        Err(TokenError::assertion(format!(
            "{what} output path must end with {extension}, path: {}",
            path.display()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize(&["Brand/Primary", "Dark Blue"]).unwrap(), "brand_primary_dark-blue");
        assert_eq!(sanitize(&["", "Heading 1"]).unwrap(), "heading-1");
        assert_eq!(sanitize(&["Text", "", "Body.Small"]).unwrap(), "text_body_small");
        assert_eq!(sanitize(&["Ünïcode (v2)!"]).unwrap(), "ncode-v2");
        assert_eq!(sanitize(&["", ""]).unwrap(), "");
    }

    #[test]
    fn test_sanitize_requires_segments() {
        let err = sanitize(&[]).unwrap_err();
        assert!(err.is_assertion());
    }

    #[test]
    fn test_format_rounded() {
        assert_eq!(format_rounded(px_to_rem(14.0)), "0.875");
        assert_eq!(format_rounded(px_to_rem(16.0)), "1");
        assert_eq!(format_rounded(-0.5 / 32.0), "-0.0156");
        assert_eq!(format_rounded(0.2 / 12.0), "0.0167");
        assert_eq!(format_rounded(-0.00001), "0");
    }

    #[test]
    fn test_ensure_extension() {
        assert!(ensure_extension(Path::new("out/styles.css"), ".css", "CSS").is_ok());
        let err = ensure_extension(Path::new("styles.scss.txt"), ".css", "CSS").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Assertion failed: CSS output path must end with .css, path: styles.scss.txt"
        );
    }

    proptest! {
        #[test]
        fn sanitized_names_use_safe_characters(path in ".*", name in ".*") {
            let sanitized = sanitize(&[&path, &name]).unwrap();
            prop_assert!(sanitized
                .chars()
                .all(|c| matches!(c, 'a'..='z' | '0'..='9' | '_' | '-')));
        }

        #[test]
        fn sanitize_is_idempotent(path in ".*", name in ".*") {
            let once = sanitize(&[&path, &name]).unwrap();
            prop_assert_eq!(sanitize(&[&once]).unwrap(), once.clone());
            prop_assert_eq!(sanitize(&[&path, &name]).unwrap(), once);
        }
    }
}
