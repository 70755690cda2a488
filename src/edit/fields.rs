use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::str::FromStr;

use super::apply_section_edit;
use crate::model::{PortfolioConfig, Section};

/// A single `path=value` assignment such as `personal.name=Sam Rivera`,
/// `colors.primary=#111111`, `projects.0.technologies=Rust, Tokio` or
/// `visibility.about.awards=false`.
///
/// Path segments are object keys or zero-based array indices. The raw value
/// is converted to the type of the field it replaces; list fields take a
/// comma separated value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEdit {
    pub path: String,
    pub value: String,
}

impl FromStr for FieldEdit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (path, value) = s
            .split_once('=')
            .ok_or_else(|| format!("invalid edit '{}': expected path=value", s))?;
        let path = path.trim();
        if path.is_empty() {
            return Err(format!("invalid edit '{}': empty path", s));
        }
        Ok(Self {
            path: path.to_string(),
            value: value.trim().to_string(),
        })
    }
}

/// Apply several field edits as one transaction.
///
/// All edits are applied to a copy; every touched section is then parsed and
/// validated. If anything fails, all failures are returned and `config` stays
/// as it was.
pub fn apply_field_edits(
    config: &PortfolioConfig,
    edits: &[FieldEdit],
) -> Result<PortfolioConfig, Vec<String>> {
    let mut errors = Vec::new();
    let mut touched: BTreeMap<&'static str, (Section, Value)> = BTreeMap::new();

    for edit in edits {
        let mut segments = edit.path.split('.');
        let head = segments.next().unwrap_or_default();
        let rest: Vec<&str> = segments.collect();

        let section = match head.parse::<Section>() {
            Ok(section) => section,
            Err(e) => {
                errors.push(format!("{}: {}", edit.path, e));
                continue;
            }
        };

        let (_, value) = touched
            .entry(section.key())
            .or_insert_with(|| (section, config.section_value(section)));

        if let Err(e) = set_path(value, &rest, &edit.value) {
            errors.push(format!("{}: {}", edit.path, e));
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let mut updated = config.clone();
    for (section, value) in touched.into_values() {
        match apply_section_edit(&updated, section, &value) {
            Ok(next) => updated = next,
            Err(section_errors) => errors.extend(section_errors),
        }
    }

    if errors.is_empty() {
        Ok(updated)
    } else {
        Err(errors)
    }
}

fn set_path(target: &mut Value, segments: &[&str], raw: &str) -> Result<(), String> {
    let Some((last, parents)) = segments.split_last() else {
        return Err("path must name a field inside the section".to_string());
    };

    let mut current = target;
    for segment in parents {
        current = match current {
            Value::Object(map) => map
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new())),
            Value::Array(items) => {
                let index = parse_index(segment, items.len())?;
                &mut items[index]
            }
            _ => return Err(format!("'{}' is not inside a group or list", segment)),
        };
    }

    match current {
        Value::Object(map) => {
            let value = coerce(map.get(*last), raw)?;
            map.insert(last.to_string(), value);
        }
        Value::Array(items) => {
            let index = parse_index(last, items.len())?;
            let value = coerce(Some(&items[index]), raw)?;
            items[index] = value;
        }
        _ => return Err(format!("'{}' is not inside a group or list", last)),
    }
    Ok(())
}

fn parse_index(segment: &str, len: usize) -> Result<usize, String> {
    let index: usize = segment
        .parse()
        .map_err(|_| format!("'{}' is not a list index", segment))?;
    if index >= len {
        return Err(format!("index {} out of range (list has {} items)", index, len));
    }
    Ok(index)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "show" => Some(true),
        "false" | "no" | "off" | "hide" => Some(false),
        _ => None,
    }
}

/// Convert a raw string to the JSON type of the value it replaces
fn coerce(existing: Option<&Value>, raw: &str) -> Result<Value, String> {
    match existing {
        Some(Value::String(_)) => Ok(Value::String(raw.to_string())),
        Some(Value::Number(_)) => raw
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| format!("expected a whole number, got '{}'", raw)),
        Some(Value::Bool(_)) => parse_bool(raw)
            .map(Value::Bool)
            .ok_or_else(|| format!("expected true or false, got '{}'", raw)),
        Some(Value::Array(_)) => Ok(Value::Array(
            raw.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(|item| Value::String(item.to_string()))
                .collect(),
        )),
        Some(Value::Object(_)) => Err("is a group; set one of its fields instead".to_string()),
        Some(Value::Null) | None => Ok(parse_bool(raw)
            .filter(|_| matches!(raw, "true" | "false"))
            .map(Value::Bool)
            .unwrap_or_else(|| Value::String(raw.to_string()))),
    }
}
