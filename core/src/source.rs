//! Readers for the two places tokens come from: the JSON body returned by
//! the design tool's `get-file` call, and the records of an unpacked file
//! package.

use serde_json::Value;
use tracing::debug;

use crate::{
    tokens::{parse_color, parse_color_value, parse_typography, parse_typography_value},
    Result, TokenError, Tokens,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Color,
    Typography,
}

peg::parser! {
  grammar entry_parser() for str {
    rule hex() = ['0'..='9' | 'a'..='f']
    rule uuid() = hex()*<8> "-" hex()*<4> "-" hex()*<4> "-" hex()*<4> "-" hex()*<12>

    rule kind() -> RecordKind
        = "colors/" { RecordKind::Color }
        / "typographies/" { RecordKind::Typography }

    rule record() -> RecordKind = k:kind() uuid() ".json" ![_] { k }

    pub(crate) rule entry() -> RecordKind = (!record() [_])* k:record() { k }
  }
}

/// Classifies a package entry by name: `.../colors/<uuid>.json` and
/// `.../typographies/<uuid>.json` hold tokens, everything else is ignored.
pub fn record_kind(entry_name: &str) -> Option<RecordKind> {
    entry_parser::entry(entry_name).ok()
}

impl Tokens {
    /// Reads `data.colors` and `data.typographies` from a `get-file` response.
    pub fn from_document(text: &str) -> Result<Tokens> {
        let document: Value = serde_json::from_str(text).map_err(document_error)?;
        let data = document
            .get("data")
            .ok_or_else(|| document_error("missing field `data`"))?;

        let tokens = Tokens {
            colors: records(data, "colors")?
                .into_iter()
                .map(parse_color_value)
                .collect::<Result<_>>()?,
            typographies: records(data, "typographies")?
                .into_iter()
                .map(parse_typography_value)
                .collect::<Result<_>>()?,
        };
        debug!(
            colors = tokens.colors.len(),
            typographies = tokens.typographies.len(),
            "read design document"
        );
        Ok(tokens)
    }

    /// Reads `(entry name, contents)` pairs from an unpacked file package.
    pub fn from_records<I, N, C>(records: I) -> Result<Tokens>
    where
        I: IntoIterator<Item = (N, C)>,
        N: AsRef<str>,
        C: AsRef<str>,
    {
        let mut tokens = Tokens::default();
        let mut entries = 0usize;
        for (name, contents) in records {
            entries += 1;
            match record_kind(name.as_ref()) {
                Some(RecordKind::Color) => tokens.colors.push(parse_color(contents.as_ref())?),
                Some(RecordKind::Typography) => {
                    tokens.typographies.push(parse_typography(contents.as_ref())?)
                }
                None => {}
            }
        }
        if entries == 0 {
            return Err(TokenError::unrecoverable(
                "No entries found in the Penpot file.",
            ));
        }
        debug!(
            entries,
            colors = tokens.colors.len(),
            typographies = tokens.typographies.len(),
            "read package records"
        );
        Ok(tokens)
    }
}

fn records(data: &Value, key: &str) -> Result<Vec<Value>> {
    match data.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Object(map)) => Ok(map.values().cloned().collect()),
        Some(_) => Err(document_error(format!("`data.{key}` is not an object"))),
    }
}

fn document_error(cause: impl std::fmt::Display) -> TokenError {
    TokenError::unrecoverable(format!("Failed to parse design file: {cause}"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::tokens::tests::{color_json, typography_json};

    const COLOR_ENTRY: &str = "files/3f1e/colors/0f0b4b9e-3c7e-4a57-8d4c-3a7d0c1b2a11.json";
    const TYPOGRAPHY_ENTRY: &str = "typographies/6a2b5a8e-1d2f-4c3b-9e8f-7a6b5c4d3e21.json";

    #[test]
    fn test_record_kind() {
        assert_eq!(record_kind(COLOR_ENTRY), Some(RecordKind::Color));
        assert_eq!(record_kind(TYPOGRAPHY_ENTRY), Some(RecordKind::Typography));
        assert_eq!(
            record_kind("mycolors/0f0b4b9e-3c7e-4a57-8d4c-3a7d0c1b2a11.json"),
            Some(RecordKind::Color)
        );
        assert_eq!(record_kind("colors/0f0b4b9e-3c7e-4a57-8d4c-3a7d0c1b2a11.json.bak"), None);
        assert_eq!(record_kind("colors/0F0B4B9E-3C7E-4A57-8D4C-3A7D0C1B2A11.json"), None);
        assert_eq!(record_kind("colors/not-a-uuid.json"), None);
        assert_eq!(record_kind("manifest.json"), None);
        assert_eq!(record_kind(""), None);
    }

    #[test]
    fn test_from_document() {
        let document = json!({
            "id": "3f1e2d3c-4b5a-4697-8887-766554433221",
            "data": {
                "colors": { "0f0b4b9e-3c7e-4a57-8d4c-3a7d0c1b2a11": color_json() },
                "typographies": { "6a2b5a8e-1d2f-4c3b-9e8f-7a6b5c4d3e21": typography_json() }
            }
        });
        let tokens = Tokens::from_document(&document.to_string()).unwrap();
        assert_eq!(tokens.colors.len(), 1);
        assert_eq!(tokens.typographies.len(), 1);
        assert_eq!(tokens.typographies[0].name, "Heading 1");
    }

    #[test]
    fn test_from_document_without_tokens() {
        let tokens = Tokens::from_document(r#"{ "data": { "colors": null } }"#).unwrap();
        assert_eq!(tokens, Tokens::default());
    }

    #[test]
    fn test_from_document_errors() {
        assert!(Tokens::from_document("not json").is_err());
        let err = Tokens::from_document("{}").unwrap_err();
        assert_eq!(err.to_string(), "Failed to parse design file: missing field `data`");
        assert!(Tokens::from_document(r#"{ "data": { "colors": [] } }"#).is_err());

        let mut broken = color_json();
        broken["opacity"] = json!("opaque");
        let document = json!({ "data": { "colors": { "x": broken } } });
        let err = Tokens::from_document(&document.to_string()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse color data"), "{err}");
    }

    #[test]
    fn test_from_records() {
        let records = vec![
            ("manifest.json".to_string(), "{}".to_string()),
            (COLOR_ENTRY.to_string(), color_json().to_string()),
            (TYPOGRAPHY_ENTRY.to_string(), typography_json().to_string()),
        ];
        let tokens = Tokens::from_records(records).unwrap();
        assert_eq!(tokens.colors.len(), 1);
        assert_eq!(tokens.typographies.len(), 1);
    }

    #[test]
    fn test_from_records_errors() {
        let err = Tokens::from_records(Vec::<(&str, &str)>::new()).unwrap_err();
        assert_eq!(err.to_string(), "No entries found in the Penpot file.");

        let err = Tokens::from_records([(COLOR_ENTRY, "{\"name\": 1}")]).unwrap_err();
        assert!(!err.is_assertion());
    }
}
