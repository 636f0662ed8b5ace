//! Scalar normalization of raw submission objects.

use serde_json::{Map, Value};

use nbi_model::EntityKind;

use crate::error::{IngestError, Result};

/// Child collections of an entity object and the kind each one holds.
fn collections(kind: EntityKind) -> &'static [(&'static str, EntityKind)] {
    match kind {
        EntityKind::Bridge => &[
            ("features", EntityKind::Feature),
            ("elements", EntityKind::Element),
            ("inspections", EntityKind::Inspection),
            ("posting_evaluations", EntityKind::PostingEvaluation),
            ("posting_statuses", EntityKind::PostingStatus),
            ("span_sets", EntityKind::SpanSet),
            ("substructure_sets", EntityKind::SubstructureSet),
            ("work", EntityKind::Work),
        ],
        EntityKind::Feature => &[("routes", EntityKind::Route)],
        _ => &[],
    }
}

pub(crate) fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Text form of a scalar. Numbers keep their JSON spelling and booleans
/// become `Y`/`N`; null means absent.
pub(crate) fn scalar_text(value: &Value, location: &str, item: &str) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(text) => Ok(Some(text.clone())),
        Value::Number(number) => Ok(Some(number.to_string())),
        Value::Bool(flag) => Ok(Some(if *flag { "Y" } else { "N" }.to_string())),
        Value::Array(_) | Value::Object(_) => Err(IngestError::NotAScalar {
            location: location.to_string(),
            item: item.to_string(),
            found: describe(value),
        }),
    }
}

/// Rewrite an entity object so that every known item holds a string, nulls
/// are dropped and child collections are normalized recursively.
///
/// Items outside the entity's schema are removed and their paths pushed to
/// `dropped`.
pub(crate) fn normalize_entity(
    object: &mut Map<String, Value>,
    kind: EntityKind,
    location: &str,
    dropped: &mut Vec<String>,
) -> Result<()> {
    let items: Vec<String> = object.keys().cloned().collect();
    for item in items {
        if let Some(&(_, child)) = collections(kind).iter().find(|(name, _)| *name == item) {
            normalize_collection(object, &item, child, location, dropped)?;
            continue;
        }
        if kind.spec(&item).is_none() {
            object.remove(&item);
            dropped.push(format!("{location}.{item}"));
            continue;
        }
        let text = match object.get(&item) {
            Some(value) => scalar_text(value, location, &item)?,
            None => None,
        };
        match text {
            Some(text) => {
                object.insert(item, Value::String(text));
            }
            None => {
                object.remove(&item);
            }
        }
    }
    Ok(())
}

fn normalize_collection(
    object: &mut Map<String, Value>,
    name: &str,
    kind: EntityKind,
    location: &str,
    dropped: &mut Vec<String>,
) -> Result<()> {
    let location = format!("{location}.{name}");
    match object.get_mut(name) {
        Some(Value::Array(children)) => {
            for (index, child) in children.iter_mut().enumerate() {
                let child_location = format!("{location}[{index}]");
                match child {
                    Value::Object(map) => normalize_entity(map, kind, &child_location, dropped)?,
                    other => {
                        return Err(IngestError::NotAnObject {
                            location: child_location,
                            found: describe(other),
                        });
                    }
                }
            }
            Ok(())
        }
        Some(Value::Null) | None => Ok(()),
        Some(other) => Err(IngestError::NotAnArray {
            location,
            found: describe(other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_become_text() {
        assert_eq!(scalar_text(&json!(12.5), "$", "BLR06").ok(), Some(Some("12.5".into())));
        assert_eq!(scalar_text(&json!(7), "$", "BC01").ok(), Some(Some("7".into())));
        assert_eq!(scalar_text(&json!(false), "$", "BN01").ok(), Some(Some("N".into())));
        assert_eq!(scalar_text(&Value::Null, "$", "BN01").ok(), Some(None));
        assert!(scalar_text(&json!([1]), "$", "BN01").is_err());
    }
}
