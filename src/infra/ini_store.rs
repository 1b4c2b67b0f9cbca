//! Flat INI persistence for spectrometer settings.
//!
//! Reading is forgiving and lossy: every space inside a line is dropped,
//! section headers are ignored (all keys share one namespace), and a line is
//! split on its *last* `=`. Malformed lines are skipped rather than reported.

use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use crate::{
    domain::config_map::ConfigMap,
    infra::error::{IniStoreError, MissingKeys},
};

/// Reads `path` into a [`ConfigMap`].
///
/// A file that cannot be opened (missing, unreadable, or a directory) yields
/// [`IniStoreError::FileOpen`]; callers treat that as "no configuration
/// available". Bytes that are not UTF-8 are decoded lossily per line.
pub fn read_config(path: &Path) -> Result<ConfigMap, IniStoreError> {
    let file = open_for_reading(path).map_err(|source| {
        tracing::warn!(path = %path.display(), error = %source, "INI file could not be opened");
        IniStoreError::FileOpen {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let mut entries = ConfigMap::new();
    for line in BufReader::new(file).split(b'\n') {
        let line = line.map_err(|source| IniStoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        parse_line_into(&String::from_utf8_lossy(&line), &mut entries);
    }

    tracing::debug!(path = %path.display(), entries = entries.len(), "INI file loaded");
    Ok(entries)
}

fn open_for_reading(path: &Path) -> io::Result<File> {
    let file = File::open(path)?;
    if file.metadata()?.is_dir() {
        return Err(io::Error::new(io::ErrorKind::Other, "is a directory"));
    }
    Ok(file)
}

/// Parses INI text already held in memory, with the same rules as [`read_config`].
#[cfg_attr(not(test), allow(dead_code))]
pub fn parse_config(text: &str) -> ConfigMap {
    let mut entries = ConfigMap::new();
    for line in text.lines() {
        parse_line_into(line, &mut entries);
    }
    entries
}

/// Rewrites `path` with `[section]` followed by one `key = value ` line per entry.
///
/// The write is not atomic: an I/O error part way through leaves a
/// truncated file behind.
pub fn write_config(map: &ConfigMap, section: &str, path: &Path) -> Result<(), IniStoreError> {
    let file = File::create(path).map_err(|source| {
        tracing::warn!(path = %path.display(), error = %source, "INI output file could not be opened");
        IniStoreError::FileOpen {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(render_config(map, section).as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|source| IniStoreError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!(path = %path.display(), section, entries = map.len(), "INI file written");
    Ok(())
}

/// Exact text [`write_config`] puts on disk.
pub fn render_config(map: &ConfigMap, section: &str) -> String {
    let mut out = format!("[{section}]\n");
    for (key, value) in map.iter() {
        out.push_str(&format!("{key} = {value} \n"));
    }
    out
}

/// Checks that every key in `required` is present in `map`.
///
/// All missing keys are logged and collected; values are not inspected.
pub fn validate_required<'a>(
    map: &ConfigMap,
    required: impl IntoIterator<Item = &'a str>,
) -> Result<(), MissingKeys> {
    let mut missing: Vec<String> = Vec::new();
    for key in required {
        if map.contains_key(key) || missing.iter().any(|seen| seen == key) {
            continue;
        }
        tracing::warn!(key, "INI does not contain a setting for {key}");
        missing.push(key.to_owned());
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(MissingKeys { keys: missing })
    }
}

fn parse_line_into(raw: &str, entries: &mut ConfigMap) {
    let line = normalize_whitespace(raw);
    if line.chars().count() <= 1 || line.starts_with('[') {
        return;
    }

    let line = match line.find('#') {
        Some(0) => return,
        Some(index) => &line[..index],
        None => line.as_str(),
    };
    if line.chars().count() <= 1 {
        return;
    }

    let Some((key, value)) = line.rsplit_once('=') else {
        tracing::trace!(line = raw, "skipping INI line without '='");
        return;
    };
    if !key.is_empty() {
        entries.set(key, value);
    }
}

fn normalize_whitespace(raw: &str) -> String {
    raw.replace('\t', " ")
        .trim()
        .replace("  ", " ")
        .replace("  ", " ")
        .replace(' ', "")
}
