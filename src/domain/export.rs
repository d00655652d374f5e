//! Export formats and serializers

use crate::domain::entry::format_long_date;
use crate::domain::Entry;
use crate::error::{DiaryError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Base file name used when none is given
pub const DEFAULT_EXPORT_NAME: &str = "my-diary-export";

const SEPARATOR_WIDTH: usize = 50;

const HTML_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>My Diary Export</title>
    <style>
        body { font-family: Arial, sans-serif; max-width: 800px; margin: 2rem auto; padding: 0 1rem; line-height: 1.6; }
        .entry { margin-bottom: 3rem; padding-bottom: 2rem; border-bottom: 2px solid #ff6b35; }
        .entry:last-child { border-bottom: none; }
        .date { color: #ff6b35; font-size: 1.2rem; font-weight: bold; margin-bottom: 1rem; }
        .content { white-space: pre-wrap; }
    </style>
</head>
<body>
    <h1 style="color: #ff6b35;">My Diary</h1>
    "#;

const HTML_TAIL: &str = "\n</body>\n</html>";

fn unsafe_filename_chars() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r#"[/\\:*?"<>|\x00-\x1f]"#).unwrap())
}

/// Output formats offered at export time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ExportFormat {
    /// Plain text with separator lines
    #[default]
    #[serde(rename = "txt")]
    Text,
    /// One level-1 heading per entry
    #[serde(rename = "md")]
    Markdown,
    /// Standalone styled document
    #[serde(rename = "html")]
    Html,
    /// Pretty-printed array of entry records
    #[serde(rename = "json")]
    Json,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Text,
        ExportFormat::Markdown,
        ExportFormat::Html,
        ExportFormat::Json,
    ];

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Markdown => "md",
            ExportFormat::Html => "html",
            ExportFormat::Json => "json",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Text => "text/plain",
            ExportFormat::Markdown => "text/markdown",
            ExportFormat::Html => "text/html",
            ExportFormat::Json => "application/json",
        }
    }

    /// Serialize `entries` oldest first, whatever order they arrive in
    pub fn render<'a, I>(&self, entries: I) -> Result<String>
    where
        I: IntoIterator<Item = &'a Entry>,
    {
        let mut entries: Vec<&Entry> = entries.into_iter().collect();
        entries.sort_by_key(|e| e.date());

        let output = match self {
            ExportFormat::Text => entries
                .iter()
                .map(|e| {
                    format!(
                        "{}\n\n{}\n\n{}\n\n",
                        e.date(),
                        e.content(),
                        "=".repeat(SEPARATOR_WIDTH)
                    )
                })
                .collect(),
            ExportFormat::Markdown => entries
                .iter()
                .map(|e| format!("# {}\n\n{}\n\n---\n\n", format_long_date(e.date()), e.content()))
                .collect(),
            ExportFormat::Html => {
                let blocks: String = entries
                    .iter()
                    .map(|e| {
                        format!(
                            "\n    <div class=\"entry\">\n        <div class=\"date\">{}</div>\n        <div class=\"content\">{}</div>\n    </div>\n    ",
                            format_long_date(e.date()),
                            e.content()
                        )
                    })
                    .collect();
                format!("{}{}{}", HTML_HEAD, blocks, HTML_TAIL)
            }
            ExportFormat::Json => serde_json::to_string_pretty(&entries)?,
        };

        Ok(output)
    }

    /// File name for an export: `base` (or the default when blank) plus the
    /// format's extension
    pub fn file_name(&self, base: &str) -> String {
        let base = base.trim();
        let base = if base.is_empty() {
            DEFAULT_EXPORT_NAME.to_string()
        } else {
            unsafe_filename_chars().replace_all(base, "-").into_owned()
        };
        format!("{}.{}", base, self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = DiaryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "txt" | "text" => Ok(ExportFormat::Text),
            "md" | "markdown" => Ok(ExportFormat::Markdown),
            "html" => Ok(ExportFormat::Html),
            "json" => Ok(ExportFormat::Json),
            _ => Err(DiaryError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A rendered export, ready to be written out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub mime_type: &'static str,
    pub content: String,
}

impl ExportFile {
    pub fn render<'a, I>(entries: I, format: ExportFormat, base_name: &str) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Entry>,
    {
        Ok(ExportFile {
            file_name: format.file_name(base_name),
            mime_type: format.mime_type(),
            content: format.render(entries)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(d: &str, content: &str) -> Entry {
        Entry::new(NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap(), content)
    }

    fn sample() -> Vec<Entry> {
        vec![
            entry("2024-01-05", "fifth"),
            entry("2024-01-01", "first"),
            entry("2024-01-10", "tenth"),
        ]
    }

    #[test]
    fn test_plain_text_is_chronological() {
        let out = ExportFormat::Text.render(&sample()).unwrap();
        let sep = "=".repeat(50);
        let expected = format!(
            "2024-01-01\n\nfirst\n\n{sep}\n\n2024-01-05\n\nfifth\n\n{sep}\n\n2024-01-10\n\ntenth\n\n{sep}\n\n"
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_markdown_headings() {
        let out = ExportFormat::Markdown
            .render(&[entry("2024-01-05", "line one\nline two")])
            .unwrap();
        assert_eq!(out, "# Friday, January 5, 2024\n\nline one\nline two\n\n---\n\n");
    }

    #[test]
    fn test_html_document() {
        let out = ExportFormat::Html
            .render(&[entry("2024-01-05", "hello\n  world")])
            .unwrap();
        assert!(out.starts_with("<!DOCTYPE html>\n<html lang=\"en\">"));
        assert!(out.contains("<title>My Diary Export</title>"));
        assert!(out.contains(".content { white-space: pre-wrap; }"));
        assert!(out.contains(
            "    <h1 style=\"color: #ff6b35;\">My Diary</h1>\n    \n    <div class=\"entry\">\n        <div class=\"date\">Friday, January 5, 2024</div>\n        <div class=\"content\">hello\n  world</div>\n    </div>\n    \n</body>\n</html>"
        ));
    }

    #[test]
    fn test_html_without_entries_is_still_a_document() {
        let out = ExportFormat::Html.render(std::iter::empty()).unwrap();
        assert!(out.ends_with("My Diary</h1>\n    \n</body>\n</html>"));
    }

    #[test]
    fn test_json_records() {
        let out = ExportFormat::Json.render(&sample()).unwrap();
        assert!(out.starts_with("[\n  {\n    \"date\": \"2024-01-01\""));
        let parsed: Vec<Entry> = serde_json::from_str(&out).unwrap();
        let dates: Vec<_> = parsed.iter().map(|e| e.date().to_string()).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-05", "2024-01-10"]);
        assert_eq!(parsed[0].word_count(), 1);
    }

    #[test]
    fn test_file_name_defaults_when_blank() {
        assert_eq!(ExportFormat::Markdown.file_name(""), "my-diary-export.md");
        assert_eq!(ExportFormat::Json.file_name("   "), "my-diary-export.json");
        assert_eq!(ExportFormat::Html.file_name("summer"), "summer.html");
    }

    #[test]
    fn test_file_name_replaces_unsafe_characters() {
        assert_eq!(ExportFormat::Text.file_name("../a/b:c"), "..-a-b-c.txt");
    }

    #[test]
    fn test_parse_formats() {
        for format in ExportFormat::ALL {
            assert_eq!(format.extension().parse::<ExportFormat>().unwrap(), format);
        }
        assert_eq!("Markdown".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert!(matches!(
            "pdf".parse::<ExportFormat>(),
            Err(DiaryError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_mime_types() {
        assert_eq!(ExportFormat::Text.mime_type(), "text/plain");
        assert_eq!(ExportFormat::Markdown.mime_type(), "text/markdown");
        assert_eq!(ExportFormat::Html.mime_type(), "text/html");
        assert_eq!(ExportFormat::Json.mime_type(), "application/json");
    }
}
