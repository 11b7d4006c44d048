//! Gradle version catalog (`gradle/libs.versions.toml`) reader
//!
//! Only the `[versions]` table is read. Each entry keeps the byte range of
//! its value so it can be replaced without touching the rest of the file.

use std::ops::Range;

use tracing::warn;

use crate::develop::error::ParseError;

/// Relative path of the version catalog in a Gradle project
pub const CATALOG_FILE: &str = "gradle/libs.versions.toml";

const VERSIONS_TABLE: &str = "versions";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    pub value: String,
    /// Byte range of the value, excluding quotes
    pub value_range: Range<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionCatalog {
    entries: Vec<CatalogEntry>,
}

impl VersionCatalog {
    pub fn parse(content: &str) -> Result<Self, ParseError> {
        let mut parser = tree_sitter::Parser::new();
        let language = tree_sitter_toml_ng::LANGUAGE;
        parser.set_language(&language.into()).map_err(|e| {
            warn!("Failed to set TOML language for tree-sitter: {}", e);
            ParseError::Catalog(e.to_string())
        })?;

        let tree = parser
            .parse(content, None)
            .ok_or_else(|| ParseError::Catalog("Failed to parse TOML".to_string()))?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(ParseError::Catalog("Invalid TOML syntax".to_string()));
        }

        let mut entries = Vec::new();
        let mut cursor = root.walk();
        for child in root.children(&mut cursor) {
            if child.kind() == "table" && table_name(child, content).as_deref() == Some(VERSIONS_TABLE)
            {
                collect_entries(child, content, &mut entries);
            }
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.value.as_str())
    }
}

fn table_name(table_node: tree_sitter::Node, content: &str) -> Option<String> {
    let mut cursor = table_node.walk();
    table_node
        .children(&mut cursor)
        .find(|child| matches!(child.kind(), "bare_key" | "quoted_key" | "dotted_key"))
        .map(|child| unquote(&content[child.byte_range()]).to_string())
}

fn collect_entries(table_node: tree_sitter::Node, content: &str, entries: &mut Vec<CatalogEntry>) {
    let mut cursor = table_node.walk();
    for pair in table_node.children(&mut cursor) {
        if pair.kind() != "pair" {
            continue;
        }

        let mut name: Option<String> = None;
        let mut pair_cursor = pair.walk();
        for child in pair.children(&mut pair_cursor) {
            match child.kind() {
                "bare_key" | "quoted_key" => {
                    name = Some(unquote(&content[child.byte_range()]).to_string());
                }
                // Multi-line strings and rich versions ({ strictly = ... }) are left alone
                "string" => {
                    let text = &content[child.byte_range()];
                    if text.starts_with("\"\"\"") || text.starts_with("'''") {
                        continue;
                    }
                    if let Some(name) = name.take() {
                        entries.push(CatalogEntry {
                            name,
                            value: unquote(text).to_string(),
                            value_range: child.start_byte() + 1..child.end_byte() - 1,
                        });
                    }
                }
                _ => {}
            }
        }
    }
}

fn unquote(text: &str) -> &str {
    let text = text.trim();
    text.strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .or_else(|| text.strip_prefix('\'').and_then(|t| t.strip_suffix('\'')))
        .unwrap_or(text)
}
