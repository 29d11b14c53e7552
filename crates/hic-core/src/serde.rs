//! JSON helpers and on-disk bundle I/O.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::iter::FromIterator;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::bundle::ResultBundle;
use crate::errors::{ErrorInfo, HicError};

fn serde_error(code: &str, err: impl ToString) -> HicError {
    HicError::Serde(ErrorInfo::new(code, err.to_string()))
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let ordered = map
                .into_iter()
                .map(|(key, value)| (key, canonicalize(value)))
                .collect::<BTreeMap<_, _>>();
            Value::Object(Map::from_iter(ordered))
        }
        Value::Array(values) => {
            let canonical_values = values.into_iter().map(canonicalize).collect();
            Value::Array(canonical_values)
        }
        other => other,
    }
}

/// Serializes a value into canonical JSON bytes with deterministic ordering.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, HicError> {
    let value = serde_json::to_value(value).map_err(|err| serde_error("json-encode", err))?;
    let canonical = canonicalize(value);
    let mut bytes = Vec::new();
    serde_json::to_writer(&mut bytes, &canonical).map_err(|err| serde_error("json-write", err))?;
    Ok(bytes)
}

/// Serializes a bundle to pretty JSON.
pub fn bundle_to_json(bundle: &ResultBundle) -> Result<String, HicError> {
    serde_json::to_string_pretty(bundle).map_err(|err| serde_error("bundle-serialize", err))
}

/// Restores a bundle from JSON and verifies its schema and digest.
pub fn bundle_from_json(json: &str) -> Result<ResultBundle, HicError> {
    let bundle: ResultBundle =
        serde_json::from_str(json).map_err(|err| serde_error("bundle-deserialize", err))?;
    bundle.verify()?;
    Ok(bundle)
}

/// Final on-disk path for a bundle: `.json` is appended unless present.
pub fn bundle_output_path(requested: &Path) -> PathBuf {
    let has_json_extension = requested
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if has_json_extension {
        requested.to_path_buf()
    } else {
        let mut raw = requested.as_os_str().to_owned();
        raw.push(".json");
        PathBuf::from(raw)
    }
}

/// Fails with [`HicError::OutputExists`] when `path` is already taken.
pub fn ensure_output_free(path: &Path) -> Result<(), HicError> {
    if path.exists() {
        return Err(output_exists(path));
    }
    Ok(())
}

fn output_exists(path: &Path) -> HicError {
    HicError::OutputExists(
        ErrorInfo::new(
            "output-exists",
            format!(
                "output file {} already exists, refusing to overwrite it",
                path.display()
            ),
        )
        .with_path(path)
        .with_hint("remove the file or choose another output name"),
    )
}

/// Writes `bundle` to `path`, never replacing an existing file.
pub fn write_bundle(path: &Path, bundle: &ResultBundle) -> Result<(), HicError> {
    let json = bundle_to_json(bundle)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| HicError::io("bundle-mkdir", parent, err))?;
        }
    }
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|err| match err.kind() {
            ErrorKind::AlreadyExists => output_exists(path),
            _ => HicError::io("bundle-create", path, err),
        })?;
    file.write_all(json.as_bytes())
        .and_then(|_| file.write_all(b"\n"))
        .map_err(|err| HicError::io("bundle-write", path, err))
}

/// Loads and verifies a bundle from `path`.
pub fn read_bundle(path: &Path) -> Result<ResultBundle, HicError> {
    let contents =
        fs::read_to_string(path).map_err(|err| HicError::io("bundle-read", path, err))?;
    bundle_from_json(&contents).map_err(|err| match err {
        HicError::Serde(info) => HicError::Serde(info.with_path(path)),
        HicError::Compat(info) => HicError::Compat(info.with_path(path)),
        other => other,
    })
}
