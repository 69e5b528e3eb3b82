//! Supported source file formats.

use std::fmt;

/// Identifies which reader parses a given source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Comma-separated values with a header row.
    Csv,
    /// Line-delimited JSON: one object per line.
    JsonLines,
    /// A single root element with one child element per record.
    Xml,
}

impl SourceFormat {
    /// Fixed processing order for aggregation: csv, then json, then xml.
    pub const ALL: [SourceFormat; 3] = [
        SourceFormat::Csv,
        SourceFormat::JsonLines,
        SourceFormat::Xml,
    ];

    /// File extension matched during discovery (case-insensitive).
    pub fn extension(self) -> &'static str {
        match self {
            SourceFormat::Csv => "csv",
            SourceFormat::JsonLines => "json",
            SourceFormat::Xml => "xml",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceFormat::Csv => "csv",
            SourceFormat::JsonLines => "json-lines",
            SourceFormat::Xml => "xml",
        };
        f.write_str(name)
    }
}
