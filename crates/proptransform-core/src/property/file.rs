//! Property file loading
//!
//! Reads `.properties` files (the usual build-tool format) as well as flat
//! JSON and YAML maps into a [`PropertySet`]. `.properties` entries keep
//! file order; duplicate keys keep their first position and last value.

use super::PropertySet;
use crate::{Error, Result};
use std::path::Path;
use tracing::debug;

/// Supported property file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyFileFormat {
    Properties,
    Json,
    Yaml,
}

impl PropertyFileFormat {
    /// Pick a format from the file extension, defaulting to `.properties`
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("json") => PropertyFileFormat::Json,
            Some("yaml") | Some("yml") => PropertyFileFormat::Yaml,
            _ => PropertyFileFormat::Properties,
        }
    }
}

/// Load a property file into a property set
pub fn load_property_file(path: &Path) -> Result<PropertySet> {
    let content = std::fs::read_to_string(path)?;
    let format = PropertyFileFormat::from_path(path);
    debug!(path = %path.display(), format = ?format, "Loading property file");

    let invalid = |message: String| Error::PropertyFile {
        path: path.to_path_buf(),
        message,
    };

    match format {
        PropertyFileFormat::Properties => Ok(parse_properties(&content)),
        PropertyFileFormat::Json => {
            let map: serde_json::Map<String, serde_json::Value> =
                serde_json::from_str(&content).map_err(|e| invalid(e.to_string()))?;
            let mut set = PropertySet::new();
            for (key, value) in map {
                let value = json_scalar(value).ok_or_else(|| invalid(SCALAR_VALUES.to_string()))?;
                set.insert(key, value);
            }
            Ok(set)
        }
        PropertyFileFormat::Yaml => {
            let map: serde_yaml::Mapping =
                serde_yaml::from_str(&content).map_err(|e| invalid(e.to_string()))?;
            let mut set = PropertySet::new();
            for (key, value) in map {
                let key = yaml_scalar(key).ok_or_else(|| invalid("keys must be scalars".to_string()))?;
                let value = yaml_scalar(value).ok_or_else(|| invalid(SCALAR_VALUES.to_string()))?;
                set.insert(key, value);
            }
            Ok(set)
        }
    }
}

const SCALAR_VALUES: &str = "values must be strings, numbers or booleans";

fn json_scalar(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn yaml_scalar(value: serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Parse `.properties` text
///
/// Supports `#`/`!` comments, `=`, `:` or whitespace separators, trailing
/// backslash continuation and the escapes `\t \n \r \f \uXXXX`.
pub fn parse_properties(content: &str) -> PropertySet {
    let mut set = PropertySet::new();
    for line in logical_lines(content) {
        let (key, value) = split_entry(&line);
        set.insert(unescape(key), unescape(value));
    }
    set
}

/// Join continuation lines and drop blanks and comments
fn logical_lines(content: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current: Option<String> = None;

    for raw in content.lines() {
        let trimmed = raw.trim_start();
        let mut line = match current.take() {
            Some(mut pending) => {
                pending.push_str(trimmed);
                pending
            }
            None => {
                if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                    continue;
                }
                trimmed.to_string()
            }
        };

        if trailing_backslashes(&line) % 2 == 1 {
            line.pop();
            current = Some(line);
        } else {
            lines.push(line);
        }
    }

    if let Some(pending) = current {
        lines.push(pending);
    }
    lines
}

fn trailing_backslashes(line: &str) -> usize {
    line.chars().rev().take_while(|c| *c == '\\').count()
}

/// Split a logical line into raw key and raw value
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' | ' ' | '\t' | '\x0c' => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let rest = line[key_end..].trim_start_matches([' ', '\t', '\x0c']);
    let rest = rest
        .strip_prefix('=')
        .or_else(|| rest.strip_prefix(':'))
        .unwrap_or(rest);
    (key, rest.trim_start_matches([' ', '\t', '\x0c']))
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}
