//! Recognizes the two timeline payload shapes and flattens them into entries.

use engine_logging::engine_debug;
use serde::Deserialize;
use serde_json::Value;

use crate::schema::TimelineEntry;

/// The instruction list shared by both shapes.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Timeline {
    instructions: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TimelineHolder {
    timeline: Timeline,
}

/// `data.search_by_raw_query`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchByRawQuery {
    search_timeline: TimelineHolder,
}

/// `data.user`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UserRoot {
    result: UserResult,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UserResult {
    timeline: TimelineHolder,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchInstruction {
    entries: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum UserInstruction {
    TimelineAddEntries {
        #[serde(default)]
        entries: Vec<Value>,
    },
    TimelinePinEntry {
        #[serde(default)]
        entry: Option<Value>,
    },
    #[serde(other)]
    Other,
}

/// A raw payload classified once into one of the known shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineShape {
    /// Search results: entries of the first instruction.
    Search { entries: Vec<Value> },
    /// Profile timeline: added entries and pinned entries, in instruction order.
    UserTimeline { entries: Vec<Value> },
    /// Neither shape; contributes nothing.
    Unrecognized,
}

impl TimelineShape {
    /// Classifies a payload. Never fails: a recognized shape whose inner
    /// structure is malformed yields an empty entry list.
    pub fn classify(payload: &Value) -> Self {
        let data = payload.get("data");
        if let Some(search) = data.and_then(|d| d.get("search_by_raw_query")).filter(|v| truthy(v)) {
            return TimelineShape::Search {
                entries: search_entries(search),
            };
        }
        if let Some(user) = data.and_then(|d| d.get("user")).filter(|v| truthy(v)) {
            return TimelineShape::UserTimeline {
                entries: user_entries(user),
            };
        }
        TimelineShape::Unrecognized
    }

    /// Raw entries in emission order.
    pub fn into_raw_entries(self) -> Vec<Value> {
        match self {
            TimelineShape::Search { entries } | TimelineShape::UserTimeline { entries } => entries,
            TimelineShape::Unrecognized => Vec::new(),
        }
    }
}

/// Resolves a payload into typed entries, in order.
///
/// Entries that are not even shaped like a timeline entry (no `entryId`) are
/// dropped individually; the rest of the payload is still resolved.
pub fn resolve(payload: &Value) -> Vec<TimelineEntry> {
    TimelineShape::classify(payload)
        .into_raw_entries()
        .into_iter()
        .filter_map(|raw| match serde_json::from_value::<TimelineEntry>(raw) {
            Ok(entry) => Some(entry),
            Err(err) => {
                engine_debug!("Skipping malformed timeline entry: {}", err);
                None
            }
        })
        .collect()
}

fn search_entries(search: &Value) -> Vec<Value> {
    let Ok(root) = SearchByRawQuery::deserialize(search) else {
        return Vec::new();
    };
    root.search_timeline
        .timeline
        .instructions
        .first()
        .and_then(|first| SearchInstruction::deserialize(first).ok())
        .map(|instruction| instruction.entries)
        .unwrap_or_default()
}

fn user_entries(user: &Value) -> Vec<Value> {
    let Ok(root) = UserRoot::deserialize(user) else {
        return Vec::new();
    };
    let mut entries = Vec::new();
    for raw in &root.result.timeline.timeline.instructions {
        match UserInstruction::deserialize(raw) {
            Ok(UserInstruction::TimelineAddEntries { entries: added }) => entries.extend(added),
            Ok(UserInstruction::TimelinePinEntry { entry: Some(pinned) }) if truthy(&pinned) => {
                entries.push(pinned)
            }
            Ok(_) => {}
            Err(err) => engine_debug!("Skipping malformed timeline instruction: {}", err),
        }
    }
    entries
}

/// JSON truthiness: null, false, 0, "", [] and {} are all absent.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
