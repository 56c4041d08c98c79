//! Frontmatter documents: a YAML header between `---` lines, then the body
//!
//! ```text
//! ---
//! Title: Weekend trip
//! Date: 2012-12-19T10:00:00+09:00
//! URL: https://example.hatenablog.com/entry/2012/12/19/weekend-trip
//! EditURL: https://blog.hatena.ne.jp/.../atom/entry/123456
//! ---
//!
//! body
//! ```
//!
//! Header values are converted to and from strings explicitly so the YAML
//! layer only ever sees scalars, sequences and one mapping.

use chrono::{DateTime, FixedOffset, Utc};
use serde_yaml::{Mapping, Value};
use url::Url;

use crate::entry::{Entry, EntryHeader};
use crate::{Error, Result};

/// Opening and closing line of the header block.
pub const DELIMITER: &str = "---";

/// Format of the `Date` field.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

const TITLE: &str = "Title";
const CATEGORY: &str = "Category";
const DATE: &str = "Date";
const URL: &str = "URL";
const EDIT_URL: &str = "EditURL";
const PREVIEW_URL: &str = "PreviewURL";
const DRAFT: &str = "Draft";
const CUSTOM_PATH: &str = "CustomPath";

/// Split a document into its header and body.
///
/// A document that does not open with the delimiter line has no header; the
/// whole text is its body. The single blank line separating header and body
/// is not part of the body.
pub fn parse(text: &str) -> Result<(EntryHeader, String)> {
    let Some(rest) = strip_line(text, DELIMITER) else {
        return Ok((EntryHeader::default(), text.to_string()));
    };

    let mut offset = 0;
    let mut bounds = None;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\n', '\r']) == DELIMITER {
            bounds = Some((offset, offset + line.len()));
            break;
        }
        offset += line.len();
    }
    let (yaml_end, body_start) =
        bounds.ok_or_else(|| Error::frontmatter("header block is never closed"))?;

    let header = header_from_yaml(&rest[..yaml_end])?;
    let body = &rest[body_start..];
    let body = body
        .strip_prefix("\r\n")
        .or_else(|| body.strip_prefix('\n'))
        .unwrap_or(body);

    Ok((header, body.to_string()))
}

/// Render `entry` as a frontmatter document.
pub fn serialize(entry: &Entry) -> Result<String> {
    serialize_at(entry, Utc::now())
}

/// [`serialize`] evaluating draft dates against `now`.
pub fn serialize_at(entry: &Entry, now: DateTime<Utc>) -> Result<String> {
    let mut header = entry.header().clone();
    header.suppress_draft_date(now);

    let yaml = serde_yaml::to_string(&Value::Mapping(header_to_mapping(&header)))?;
    let content = entry.content();

    let mut document = String::with_capacity(yaml.len() + content.len() + 16);
    document.push_str(DELIMITER);
    document.push('\n');
    document.push_str(&yaml);
    document.push_str(DELIMITER);
    document.push_str("\n\n");
    document.push_str(content);
    if !content.ends_with('\n') {
        document.push('\n');
    }
    Ok(document)
}

pub fn format_date(date: &DateTime<FixedOffset>) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(value: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_str(value, DATE_FORMAT).map_err(|e| Error::header_value(DATE, value, e))
}

fn strip_line<'a>(text: &'a str, line: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(line)?;
    rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))
}

fn header_to_mapping(header: &EntryHeader) -> Mapping {
    let mut mapping = Mapping::new();
    let mut insert = |key: &str, value: Value| {
        mapping.insert(Value::String(key.to_string()), value);
    };

    insert(TITLE, Value::String(header.title.clone()));
    if !header.category.is_empty() {
        insert(
            CATEGORY,
            Value::Sequence(header.category.iter().cloned().map(Value::String).collect()),
        );
    }
    if let Some(date) = &header.date {
        insert(DATE, Value::String(format_date(date)));
    }
    if let Some(url) = &header.url {
        insert(URL, Value::String(url.to_string()));
    }
    insert(EDIT_URL, Value::String(header.edit_url.clone()));
    if let Some(preview) = header.preview_url.as_ref().filter(|p| !p.is_empty()) {
        insert(PREVIEW_URL, Value::String(preview.clone()));
    }
    if header.is_draft {
        insert(DRAFT, Value::Bool(true));
    }
    if let Some(custom_path) = header.custom_path.as_ref().filter(|p| !p.is_empty()) {
        insert(CUSTOM_PATH, Value::String(custom_path.clone()));
    }

    mapping
}

fn header_from_yaml(yaml: &str) -> Result<EntryHeader> {
    if yaml.trim().is_empty() {
        return Ok(EntryHeader::default());
    }
    let mapping: Mapping = serde_yaml::from_str::<Option<Mapping>>(yaml)
        .map_err(|e| Error::frontmatter(e.to_string()))?
        .unwrap_or_default();

    let field = |key: &'static str| -> Result<Option<String>> {
        mapping
            .get(key)
            .map_or(Ok(None), |value| scalar_string(key, value))
    };

    let category = match mapping.get(CATEGORY) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Sequence(items)) => items
            .iter()
            .map(|item| scalar_string(CATEGORY, item))
            .filter_map(Result::transpose)
            .collect::<Result<Vec<_>>>()?,
        Some(value) => scalar_string(CATEGORY, value)?.into_iter().collect(),
    };

    let is_draft = match mapping.get(DRAFT) {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(value) => match scalar_string(DRAFT, value)?.as_deref() {
            Some("yes") | Some("true") => true,
            Some("no") | Some("false") | Some("") | None => false,
            Some(other) => return Err(Error::header_value(DRAFT, other, "expected a boolean")),
        },
    };

    let mut header = EntryHeader {
        title: field(TITLE)?.unwrap_or_default(),
        category: Vec::new(),
        date: field(DATE)?
            .filter(|s| !s.is_empty())
            .map(|s| parse_date(&s))
            .transpose()?,
        url: field(URL)?
            .filter(|s| !s.is_empty())
            .map(|s| Url::parse(&s).map_err(|e| Error::header_value(URL, s, e)))
            .transpose()?,
        edit_url: field(EDIT_URL)?.unwrap_or_default(),
        preview_url: field(PREVIEW_URL)?.filter(|s| !s.is_empty()),
        is_draft,
        custom_path: field(CUSTOM_PATH)?.filter(|s| !s.is_empty()),
    };
    for term in category {
        header.add_category(term);
    }
    Ok(header)
}

fn scalar_string(field: &'static str, value: &Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(Error::header_value(
            field,
            format!("{other:?}"),
            "expected a scalar",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()
    }

    fn sample_header() -> EntryHeader {
        EntryHeader {
            title: "Weekend trip".to_string(),
            category: vec!["foo".to_string(), "bar".to_string()],
            date: Some(DateTime::parse_from_rfc3339("2012-12-19T10:00:00+09:00").unwrap()),
            url: Some(
                Url::parse("https://example.hatenablog.com/entry/2012/12/19/weekend-trip")
                    .unwrap(),
            ),
            edit_url: "https://blog.hatena.ne.jp/motemen/example.hatenablog.com/atom/entry/123456"
                .to_string(),
            preview_url: None,
            is_draft: false,
            custom_path: None,
        }
    }

    #[test]
    fn test_serializes_keys_in_order() {
        let entry = Entry::new(sample_header(), "Hello\n");
        let document = serialize_at(&entry, now()).unwrap();

        assert_eq!(
            document,
            "---\n\
             Title: Weekend trip\n\
             Category:\n\
             - foo\n\
             - bar\n\
             Date: 2012-12-19T10:00:00+09:00\n\
             URL: https://example.hatenablog.com/entry/2012/12/19/weekend-trip\n\
             EditURL: https://blog.hatena.ne.jp/motemen/example.hatenablog.com/atom/entry/123456\n\
             ---\n\
             \n\
             Hello\n"
        );
    }

    #[test]
    fn test_appends_newline_only_when_missing() {
        let with = serialize_at(&Entry::new(sample_header(), "body\n"), now()).unwrap();
        let without = serialize_at(&Entry::new(sample_header(), "body"), now()).unwrap();
        assert!(with.ends_with("\n\nbody\n"));
        assert_eq!(with, without);
    }

    #[test]
    fn test_draft_without_future_date_omits_date() {
        let mut header = sample_header();
        header.is_draft = true;
        let document = serialize_at(&Entry::new(header, "x\n"), now()).unwrap();
        assert!(!document.contains("Date:"));
        assert!(document.contains("Draft: true\n"));
    }

    #[test]
    fn test_draft_with_future_date_keeps_date() {
        let mut header = sample_header();
        header.is_draft = true;
        header.date = Some(DateTime::parse_from_rfc3339("2030-01-01T09:00:00+09:00").unwrap());
        let document = serialize_at(&Entry::new(header, "x\n"), now()).unwrap();
        assert!(document.contains("Date: 2030-01-01T09:00:00+09:00\n"));
    }

    #[test]
    fn test_round_trips_header_and_body() {
        let mut header = sample_header();
        header.preview_url = Some("https://example.hatenablog.com/preview".to_string());
        header.custom_path = Some("about".to_string());
        let entry = Entry::new(header.clone(), "# Title\n\n---\nafter rule\n");

        let (parsed, body) = parse(&serialize_at(&entry, now()).unwrap()).unwrap();

        assert_eq!(parsed, header);
        assert_eq!(body, "# Title\n\n---\nafter rule\n");
    }

    #[test]
    fn test_document_without_header_is_all_body() {
        let (header, body) = parse("Just text\n---\nmore\n").unwrap();
        assert_eq!(header, EntryHeader::default());
        assert_eq!(body, "Just text\n---\nmore\n");
    }

    #[test]
    fn test_unclosed_header_is_an_error() {
        let err = parse("---\nTitle: x\n\nbody\n").unwrap_err();
        assert!(matches!(err, Error::Frontmatter { .. }));
    }

    #[test]
    fn test_accepts_loose_scalar_values() {
        let (header, body) = parse(
            "---\nTitle: 2024\nCategory: single\nDraft: yes\nEditURL: ''\n---\nno blank line\n",
        )
        .unwrap();
        assert_eq!(header.title, "2024");
        assert_eq!(header.category, vec!["single".to_string()]);
        assert!(header.is_draft);
        assert_eq!(body, "no blank line\n");
    }

    #[test]
    fn test_rejects_malformed_url_and_date() {
        let err = parse("---\nTitle: x\nURL: not a url\n---\n\n").unwrap_err();
        assert!(matches!(err, Error::HeaderValue { field: "URL", .. }));

        let err = parse("---\nTitle: x\nDate: 2012/12/19\n---\n\n").unwrap_err();
        assert!(matches!(err, Error::HeaderValue { field: "Date", .. }));
    }

    #[test]
    fn test_crlf_documents_parse() {
        let (header, body) = parse("---\r\nTitle: x\r\n---\r\n\r\nbody\r\n").unwrap();
        assert_eq!(header.title, "x");
        assert_eq!(body, "body\r\n");
    }
}
