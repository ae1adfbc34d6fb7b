use std::fmt;

use serde::Deserialize;
use serde_json::{Number, Value};
use tracing::trace;
use uuid::Uuid;

use crate::{sanitize, Result, TokenError};

/// Older exports store these as strings; they are coerced before validation.
const NUMERIC_TYPOGRAPHY_FIELDS: [&str; 3] = ["fontSize", "lineHeight", "letterSpacing"];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tokens {
    pub colors: Vec<Color>,
    pub typographies: Vec<Typography>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub path: Option<String>,
    /// `#rrggbb`
    pub color: String,
    pub opacity: f64,
    pub modified_at: String,
}

impl Color {
    /// Variable name for this color: sanitized path and name, prefixed with
    /// `color-` unless it already starts with a letter.
    pub fn identifier(&self) -> Result<String> {
        let name = sanitize(&[self.path.as_deref().unwrap_or(""), &self.name])?;
        if name.is_empty() {
            return Err(TokenError::assertion(format!(
                "Cannot generate CSS variable name for color: {}",
                self.name
            )));
        }
        if name.starts_with(|c: char| c.is_ascii_lowercase()) {
            Ok(name)
        } else {
            Ok(format!("color-{name}"))
        }
    }

    pub fn rgb(&self) -> Result<(u8, u8, u8)> {
        let parsed = csscolorparser::parse(&self.color).map_err(|err| {
            TokenError::unrecoverable(format!("Invalid color {}: {err}", self.color))
        })?;
        let [r, g, b, _] = parsed.to_rgba8();
        Ok((r, g, b))
    }

    fn validate(&self) -> std::result::Result<(), String> {
        let is_hex = match self.color.strip_prefix('#') {
            Some(hex) => hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()),
            None => false,
        };
        if !is_hex {
            return Err(format!(
                "invalid color {:?} for {:?}, expected #rrggbb",
                self.color, self.name
            ));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(format!(
                "opacity {} for {:?} is outside [0, 1]",
                self.opacity, self.name
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub path: Option<String>,
    pub font_family: String,
    /// px
    pub font_size: f64,
    /// Numeric weight as text, usually `"100"` to `"900"`.
    pub font_weight: String,
    pub font_style: String,
    /// Unitless multiplier.
    pub line_height: f64,
    /// px
    pub letter_spacing: f64,
    pub text_transform: TextTransform,
    pub font_variant_id: String,
    pub font_id: String,
    pub modified_at: String,
}

impl Typography {
    pub fn class_name(&self) -> Result<String> {
        let name = sanitize(&[self.path.as_deref().unwrap_or(""), &self.name])?;
        if name.is_empty() {
            return Err(TokenError::assertion(format!(
                "Cannot generate CSS class name for typography: {}",
                self.name
            )));
        }
        Ok(name)
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(format!(
                "fontSize {} for {:?} must be a positive number",
                self.font_size, self.name
            ));
        }
        if !(self.line_height.is_finite() && self.line_height > 0.0) {
            return Err(format!(
                "lineHeight {} for {:?} must be a positive number",
                self.line_height, self.name
            ));
        }
        if !self.letter_spacing.is_finite() {
            return Err(format!("letterSpacing for {:?} must be finite", self.name));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum TextTransform {
    None,
    Uppercase,
    Lowercase,
    Capitalize,
    /// Anything the design tool emits outside the four known values.
    Other(String),
}

impl TextTransform {
    pub fn as_str(&self) -> &str {
        match self {
            TextTransform::None => "none",
            TextTransform::Uppercase => "uppercase",
            TextTransform::Lowercase => "lowercase",
            TextTransform::Capitalize => "capitalize",
            TextTransform::Other(other) => other,
        }
    }
}

impl From<String> for TextTransform {
    fn from(value: String) -> Self {
        match value.as_str() {
            "none" => TextTransform::None,
            "uppercase" => TextTransform::Uppercase,
            "lowercase" => TextTransform::Lowercase,
            "capitalize" => TextTransform::Capitalize,
            _ => TextTransform::Other(value),
        }
    }
}

impl fmt::Display for TextTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn parse_color(raw: &str) -> Result<Color> {
    let record = serde_json::from_str(raw).map_err(color_error)?;
    parse_color_value(record)
}

pub fn parse_color_value(record: Value) -> Result<Color> {
    let color: Color = serde_json::from_value(record).map_err(color_error)?;
    color.validate().map_err(color_error)?;
    trace!(name = %color.name, "parsed color");
    Ok(color)
}

pub fn parse_typography(raw: &str) -> Result<Typography> {
    let record = serde_json::from_str(raw).map_err(typography_error)?;
    parse_typography_value(record)
}

pub fn parse_typography_value(mut record: Value) -> Result<Typography> {
    coerce_numeric_fields(&mut record);
    let typography: Typography = serde_json::from_value(record).map_err(typography_error)?;
    typography.validate().map_err(typography_error)?;
    trace!(name = %typography.name, "parsed typography");
    Ok(typography)
}

fn color_error(cause: impl fmt::Display) -> TokenError {
    TokenError::unrecoverable(format!("Failed to parse color data: {cause}"))
}

fn typography_error(cause: impl fmt::Display) -> TokenError {
    TokenError::unrecoverable(format!("Failed to parse typography data: {cause}"))
}

fn coerce_numeric_fields(record: &mut Value) {
    let Some(fields) = record.as_object_mut() else {
        return;
    };
    for key in NUMERIC_TYPOGRAPHY_FIELDS {
        let coerced = match fields.get(key) {
            Some(Value::String(text)) => parse_leading_float(text).and_then(Number::from_f64),
            _ => None,
        };
        if let Some(number) = coerced {
            fields.insert(key.to_string(), Value::Number(number));
        }
    }
}

/// Reads the longest numeric prefix, so `"14px"` gives 14. Text without one
/// stays a string and fails the schema check.
fn parse_leading_float(text: &str) -> Option<f64> {
    let text = text.trim();
    (1..=text.len())
        .rev()
        .filter(|&end| text.is_char_boundary(end))
        .find_map(|end| text[..end].parse::<f64>().ok())
}
