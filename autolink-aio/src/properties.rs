// autolink-aio/src/properties.rs
//! Minimal reader for Java `.properties` files such as `gradle.properties`.
use std::collections::HashMap;
use std::path::Path;

use autolink_common::error::Result;

/// Parses `key=value` / `key: value` lines. Comments (`#`, `!`), blank lines and
/// backslash line continuations are handled; unicode escapes are not.
pub fn parse_properties(contents: &str) -> HashMap<String, String> {
    let mut props = HashMap::new();
    let mut logical = String::new();

    for line in contents.lines() {
        let trimmed = line.trim_start();
        if logical.is_empty() && (trimmed.is_empty() || trimmed.starts_with(['#', '!'])) {
            continue;
        }
        if let Some(stripped) = trimmed.strip_suffix('\\') {
            logical.push_str(stripped);
            continue;
        }
        logical.push_str(trimmed);
        insert_logical_line(&mut props, &logical);
        logical.clear();
    }
    if !logical.is_empty() {
        insert_logical_line(&mut props, &logical);
    }
    props
}

fn insert_logical_line(props: &mut HashMap<String, String>, line: &str) {
    let split_at = line.find(['=', ':']);
    let (key, value) = match split_at {
        Some(idx) => (&line[..idx], &line[idx + 1..]),
        None => (line, ""),
    };
    let key = key.trim();
    if !key.is_empty() {
        props.insert(key.to_string(), value.trim().to_string());
    }
}

pub fn read_properties(path: &Path) -> Result<HashMap<String, String>> {
    let contents = crate::fs::read_to_string(path)?;
    Ok(parse_properties(&contents))
}
