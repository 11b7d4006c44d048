//! Line-preserving rewrite of version files
//!
//! Only lines holding a single recognised property are replaced. Every other
//! line, including comments, blank lines, continuation lines and unknown
//! keys, is copied byte for byte with its original line ending.

use std::collections::HashMap;
use std::io::Write;

use crate::develop::catalog::{CATALOG_FILE, VersionCatalog};
use crate::develop::error::ParseError;
use crate::develop::platform::PROPERTIES_FILE;
use crate::develop::platforms::quilt::catalog_key;
use crate::develop::properties;
use crate::develop::tree::ProjectTree;
use crate::develop::version_key::VersionKey;
use crate::error::UpdateError;

/// Writes `gradle.properties` with the pins in `values` substituted
pub fn update_to_version<W: Write>(
    out: &mut W,
    tree: &ProjectTree,
    values: &HashMap<VersionKey, String>,
) -> Result<(), UpdateError> {
    let content = tree
        .read_to_string(PROPERTIES_FILE)
        .map_err(|source| ParseError::Io {
            path: tree.path(PROPERTIES_FILE),
            source,
        })?;

    out.write_all(rewrite_properties(&content, values).as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Writes the Gradle version catalog with `updates` substituted.
///
/// `updates` holds resolved updates only; catalog values may differ from the
/// project's current versions.
pub fn update_catalog<W: Write>(
    out: &mut W,
    tree: &ProjectTree,
    updates: &HashMap<VersionKey, String>,
) -> Result<(), UpdateError> {
    let content = tree
        .read_to_string(CATALOG_FILE)
        .map_err(|source| ParseError::Io {
            path: tree.path(CATALOG_FILE),
            source,
        })?;

    out.write_all(rewrite_catalog(&content, updates)?.as_bytes())?;
    out.flush()?;
    Ok(())
}

pub fn rewrite_properties(content: &str, values: &HashMap<VersionKey, String>) -> String {
    let mut out = String::with_capacity(content.len());
    let mut continued = false;

    for raw in content.split_inclusive('\n') {
        let (line, ending) = split_line_ending(raw);
        let is_continuation = continued;
        continued = properties::ends_with_continuation(line)
            && (is_continuation || !properties::is_comment(line));

        if !is_continuation
            && let Some((name, current)) = properties::parse_line(line)
            && let Some(key) = VersionKey::from_key(&name)
            && let Some(value) = values.get(&key)
            && *value != current
        {
            out.push_str(key.key());
            out.push('=');
            out.push_str(&properties::escape_value(value));
            out.push_str(ending);
            continue;
        }

        out.push_str(raw);
    }

    out
}

/// Replaces catalog values in place; entries are matched with [`catalog_key`]
pub fn rewrite_catalog(
    content: &str,
    updates: &HashMap<VersionKey, String>,
) -> Result<String, ParseError> {
    let catalog = VersionCatalog::parse(content)?;
    let mut out = content.to_string();

    // Back to front so earlier ranges stay valid
    for entry in catalog.entries().iter().rev() {
        if let Some(key) = catalog_key(&entry.name)
            && let Some(value) = updates.get(&key)
            && *value != entry.value
        {
            out.replace_range(entry.value_range.clone(), value);
        }
    }

    Ok(out)
}

fn split_line_ending(raw: &str) -> (&str, &str) {
    if let Some(line) = raw.strip_suffix("\r\n") {
        (line, "\r\n")
    } else if let Some(line) = raw.strip_suffix('\n') {
        (line, "\n")
    } else {
        (raw, "")
    }
}
