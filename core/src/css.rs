use std::iter;

use indexmap::IndexMap;
use itertools::Itertools;
use tracing::debug;

use crate::{
    ensure_extension, format_rounded, px_to_rem, sanitize, Block, Color, Declaration, OutputFile,
    PureCssOptions, Result, TokenError, Tokens, Typography, TypographyOptions,
};

pub(crate) fn render(tokens: &Tokens, options: &PureCssOptions) -> Result<Vec<OutputFile>> {
    ensure_extension(&options.css_output_path, ".css", "CSS")?;

    let color_blocks = color_blocks(&tokens.colors)?;
    let typography_blocks = typography_blocks(&tokens.typographies, &options.typography)?;
    let blocks = Block::merge(color_blocks.into_iter().chain(typography_blocks))?;
    debug!(blocks = blocks.len(), path = %options.css_output_path.display(), "rendered pure css");

    Ok(vec![OutputFile {
        path: options.css_output_path.clone(),
        contents: blocks.iter().join("\n\n"),
    }])
}

/// `font-family-open-sans` for `Open Sans`.
pub(crate) fn font_family_variable(family: &str) -> Result<String> {
    let family = family.split_whitespace().join(" ");
    Ok(format!("font-family-{}", sanitize(&[&family])?))
}

fn color_blocks(colors: &[Color]) -> Result<Vec<Block>> {
    let variables = colors
        .iter()
        .map(|color| -> Result<Declaration> {
            Declaration::variable(color.identifier()?, &color.color)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(vec![Block::root(variables)])
}

fn typography_blocks(typographies: &[Typography], options: &TypographyOptions) -> Result<Vec<Block>> {
    let mut variables: IndexMap<String, Declaration> = IndexMap::new();
    for family in typographies.iter().map(|t| &t.font_family).unique() {
        let value = if options.fallback_to_sans_serif {
            format!("\"{family}\", sans-serif")
        } else {
            format!("\"{family}\"")
        };
        variables.insert(
            family.clone(),
            Declaration::variable(font_family_variable(family)?, value)?,
        );
    }

    let mut blocks = vec![Block::root(
        iter::once(Declaration::comment("Add your own fallback fonts here:"))
            .chain(variables.values().cloned())
            .collect(),
    )];

    for typography in typographies {
        let family = variables.get(&typography.font_family).ok_or_else(|| {
            TokenError::assertion(format!(
                "No font family variable for {}",
                typography.font_family
            ))
        })?;
        blocks.push(Block::class(
            typography.class_name()?,
            vec![
                Declaration::property("font-family", format!("var({})", family.name()))?,
                Declaration::property(
                    "font-size",
                    format!("{}rem", format_rounded(px_to_rem(typography.font_size))),
                )?,
                Declaration::property("font-style", &typography.font_style)?,
                Declaration::property("font-weight", &typography.font_weight)?,
                Declaration::property("line-height", typography.line_height)?,
                Declaration::property(
                    "letter-spacing",
                    format!(
                        "{}em",
                        format_rounded(typography.letter_spacing / typography.font_size)
                    ),
                )?,
                Declaration::property("text-transform", &typography.text_transform)?,
            ],
        )?);
    }

    Ok(blocks)
}
