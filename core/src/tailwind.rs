use indexmap::IndexMap;
use itertools::Itertools;
use serde::Serialize;
use slug::slugify;
use tracing::debug;

use crate::{
    ensure_extension, format_rounded, px_to_rem, Color, OutputFile, Result, TailwindOptions,
    TextTransform, TokenError, Tokens, Typography,
};

const DIRECTIVES: &str = "@tailwind base;\n@tailwind components;\n@tailwind utilities;";

#[derive(Debug, Serialize)]
struct Config<'a> {
    theme: Theme<'a>,
}

#[derive(Debug, Serialize)]
struct Theme<'a> {
    extend: ThemeExtension<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThemeExtension<'a> {
    colors: IndexMap<String, String>,
    font_family: IndexMap<String, [&'a str; 2]>,
}

pub(crate) fn render(tokens: &Tokens, options: &TailwindOptions) -> Result<Vec<OutputFile>> {
    ensure_extension(&options.config_output_path, ".js", "Config")?;
    ensure_extension(&options.css_output_path, ".css", "CSS")?;

    let config = config_file(tokens)?;
    let css = utility_classes(&tokens.typographies)?;
    debug!(
        config = %options.config_output_path.display(),
        css = %options.css_output_path.display(),
        "rendered tailwind"
    );

    Ok(vec![
        OutputFile {
            path: options.config_output_path.clone(),
            contents: config,
        },
        OutputFile {
            path: options.css_output_path.clone(),
            contents: css,
        },
    ])
}

fn config_file(tokens: &Tokens) -> Result<String> {
    let colors = tokens
        .colors
        .iter()
        .map(|color| -> Result<(String, String)> {
            Ok((color.identifier()?, color_value(color)?))
        })
        .collect::<Result<IndexMap<_, _>>>()?;
    let font_family = tokens
        .typographies
        .iter()
        .map(|t| t.font_family.as_str())
        .unique()
        .map(|family| (slugify(family), [family, "sans-serif"]))
        .collect();

    let config = Config {
        theme: Theme {
            extend: ThemeExtension {
                colors,
                font_family,
            },
        },
    };
    let body = serde_json::to_string_pretty(&config).map_err(|err| {
        TokenError::unrecoverable(format!("Failed to serialize tailwind config: {err}"))
    })?;
    Ok(format!(
        "/** @type {{import('tailwindcss').Config}} */\nmodule.exports = {body};\n"
    ))
}

/// The hex string when fully opaque, otherwise `rgba(...)`.
fn color_value(color: &Color) -> Result<String> {
    if color.opacity == 1.0 {
        return Ok(color.color.clone());
    }
    let (r, g, b) = color.rgb()?;
    Ok(format!("rgba({r}, {g}, {b}, {})", color.opacity))
}

fn utility_classes(typographies: &[Typography]) -> Result<String> {
    let classes = typographies
        .iter()
        .map(|typography| -> Result<String> {
            Ok(format!(
                ".text-{} {{\n  @apply {};\n}}",
                typography.class_name()?,
                utilities(typography).join(" ")
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    if classes.is_empty() {
        return Ok(DIRECTIVES.to_string());
    }
    Ok(format!("{DIRECTIVES}\n\n{}", classes.join("\n\n")))
}

fn utilities(typography: &Typography) -> Vec<String> {
    let font_family = slugify(&typography.font_family);
    [
        format!("text-[{}rem]", px_to_rem(typography.font_size)),
        format!("leading-[{}]", typography.line_height),
        font_weight(&typography.font_weight).to_string(),
        format!(
            "tracking-[{}em]",
            format_rounded(typography.letter_spacing / typography.font_size)
        ),
        if font_family.is_empty() {
            String::new()
        } else {
            format!("font-{font_family}")
        },
        text_transform(&typography.text_transform).to_string(),
    ]
    .into_iter()
    .filter(|utility| !utility.is_empty())
    .collect()
}

fn font_weight(weight: &str) -> &'static str {
    match weight {
        "100" => "font-thin",
        "200" => "font-extralight",
        "300" => "font-light",
        "400" => "font-normal",
        "500" => "font-medium",
        "600" => "font-semibold",
        "700" => "font-bold",
        "800" => "font-extrabold",
        "900" => "font-black",
        _ => "font-normal",
    }
}

fn text_transform(transform: &TextTransform) -> &'static str {
    match transform {
        TextTransform::Uppercase => "uppercase",
        TextTransform::Lowercase => "lowercase",
        TextTransform::Capitalize => "capitalize",
        // unknown transforms have no utility
        TextTransform::None | TextTransform::Other(_) => "",
    }
}
