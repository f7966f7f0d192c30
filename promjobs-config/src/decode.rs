use crate::one_or_many::{kind, OneOrMany};
use crate::prometheus::{Document, GlobalConfig, Job, Params, RelabelRule, StaticTargetGroup};
use crate::{DecodeError, FieldPath, Result};
use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;
use tracing::{debug, trace, warn};


/// Parse `input` as YAML (which includes JSON) and decode it into a
/// [`Document`]. Merge keys (`<<: *anchor`) are expanded before decoding.
pub fn from_slice(input: &[u8]) -> Result<Document> {
    let mut value: Value = serde_yaml::from_slice(input)?;
    value.apply_merge()?;
    decode(value)
}

/// Decode an already parsed document tree into a [`Document`].
///
/// `scrape_configs` and every job's `static_configs` accept either a single
/// mapping or a sequence of mappings. Top-level keys outside the schema are
/// kept in [`Document::extra`]. Any error aborts the whole decode.
pub fn decode(value: Value) -> Result<Document> {
    let root = FieldPath::root();

    // An empty file parses to null, treat it as an empty document.
    let mut map = match value {
        Value::Null => Mapping::new(),
        other => expect_mapping(other, &root)?,
    };

    let global = take_field::<GlobalConfig>(&mut map, "global", &root)?.unwrap_or_default();
    let jobs = take_one_or_many(&mut map, "scrape_configs", &root, "job", decode_job)?;

    // Distinct keys can render to the same string (`1` and `"1"`), the last
    // one in the document wins.
    let mut extra = BTreeMap::new();
    for (key, value) in map {
        let key = key_to_string(key);
        trace!(key = %key, "keeping unrecognized top-level key");
        if extra.insert(key.clone(), value).is_some() {
            warn!(key = %key, "duplicate top-level key, keeping the last value");
        }
    }

    debug!(
        jobs = jobs.len(),
        extra = extra.len(),
        "decoded scrape configuration"
    );

    Ok(Document {
        global,
        jobs,
        extra,
    })
}

fn decode_job(value: Value, path: &FieldPath) -> Result<Job> {
    let mut map = expect_mapping(value, path)?;

    let job_name = take_field::<String>(&mut map, "job_name", path)?.ok_or_else(|| {
        DecodeError::MissingField {
            path: path.key("job_name"),
        }
    })?;
    let metrics_path = take_field(&mut map, "metrics_path", path)?;
    let params = take_field::<Params>(&mut map, "params", path)?.unwrap_or_default();
    let relabel_configs =
        take_field::<Vec<RelabelRule>>(&mut map, "relabel_configs", path)?.unwrap_or_default();
    let static_configs = take_one_or_many(
        &mut map,
        "static_configs",
        path,
        "static target group",
        decode_static_group,
    )?;
    let scrape_interval = take_field(&mut map, "scrape_interval", path)?;
    let scrape_timeout = take_field(&mut map, "scrape_timeout", path)?;

    for key in map.keys() {
        trace!(%path, key = %key_to_string(key.clone()), "ignoring unrecognized job field");
    }

    Ok(Job {
        job_name,
        metrics_path,
        params,
        relabel_configs,
        static_configs,
        scrape_interval,
        scrape_timeout,
    })
}

fn decode_static_group(value: Value, path: &FieldPath) -> Result<StaticTargetGroup> {
    let mut map = expect_mapping(value, path)?;

    Ok(StaticTargetGroup {
        targets: take_field(&mut map, "targets", path)?.unwrap_or_default(),
        labels: take_labels(&mut map, path)?,
    })
}

/// Label values are strings, but scalars such as `port: 9100` are accepted
/// and kept in their plain text. A null value is an empty label.
fn take_labels(map: &mut Mapping, parent: &FieldPath) -> Result<BTreeMap<String, String>> {
    let path = parent.key("labels");
    let labels = match map.shift_remove("labels") {
        None | Some(Value::Null) => return Ok(BTreeMap::new()),
        Some(value) => expect_mapping(value, &path)?,
    };

    labels
        .into_iter()
        .map(|(name, value)| {
            let name = key_to_string(name);
            let value = match value {
                Value::String(value) => value,
                Value::Number(number) => number.to_string(),
                Value::Bool(flag) => flag.to_string(),
                Value::Null => String::new(),
                other => {
                    return Err(DecodeError::UnexpectedType {
                        path: path.key(name),
                        expected: "a scalar",
                        found: kind(&other),
                    })
                }
            };
            Ok((name, value))
        })
        .collect()
}

/// Remove `key` from `map` and resolve it as a one-or-many field. An absent
/// or null value is an empty sequence.
fn take_one_or_many<T, F>(
    map: &mut Mapping,
    key: &str,
    parent: &FieldPath,
    element: &'static str,
    decode_one: F,
) -> Result<Vec<T>>
where
    F: Fn(Value, &FieldPath) -> Result<T>,
{
    match map.shift_remove(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => {
            OneOrMany::resolve(value, &parent.key(key), element, decode_one).map(Vec::from)
        }
    }
}

/// Remove `key` from `map` and deserialize it. An absent or null value is
/// `None`.
fn take_field<T: DeserializeOwned>(
    map: &mut Mapping,
    key: &str,
    parent: &FieldPath,
) -> Result<Option<T>> {
    match map.shift_remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => {
            let path = parent.key(key);
            serde_yaml::from_value(value)
                .map(Some)
                .map_err(|err| DecodeError::InvalidField {
                    path,
                    reason: err.to_string(),
                })
        }
    }
}

fn expect_mapping(value: Value, path: &FieldPath) -> Result<Mapping> {
    match value {
        Value::Mapping(map) => Ok(map),
        other => Err(DecodeError::UnexpectedType {
            path: path.clone(),
            expected: "a mapping",
            found: kind(&other),
        }),
    }
}

/// Keys are kept as strings. Scalar keys use their plain text, anything
/// else falls back to its YAML rendering.
fn key_to_string(key: Value) -> String {
    match key {
        Value::String(key) => key,
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null => "null".to_string(),
        other => serde_yaml::to_string(&other)
            .map(|rendered| rendered.trim_end().to_string())
            .unwrap_or_else(|_| kind(&other).to_string()),
    }
}
