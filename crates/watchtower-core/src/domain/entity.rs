//! Entity records: the counter's view of shots and assets.

use serde::{Deserialize, Serialize};

/// A task reference as seen by the counter.
///
/// Both ids are optional on purpose: tracker data is not always complete, and
/// an incomplete record is skipped rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(default)]
    pub task_type_id: Option<String>,
    #[serde(default)]
    pub task_status_id: Option<String>,
}

impl TaskRecord {
    pub fn new(task_type_id: impl Into<String>, task_status_id: impl Into<String>) -> Self {
        Self {
            task_type_id: Some(task_type_id.into()),
            task_status_id: Some(task_status_id.into()),
        }
    }
}

/// A tracked item (shot, asset, edit) at one point in time.
///
/// Extra fields in the source JSON are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    #[serde(default)]
    pub episode_id: Option<String>,
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
}

impl EntityRecord {
    pub fn new(episode_id: Option<&str>, tasks: Vec<TaskRecord>) -> Self {
        Self {
            episode_id: episode_id.map(str::to_string),
            tasks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extra_fields_are_ignored() {
        let entity: EntityRecord = serde_json::from_value(serde_json::json!({
            "canceled": false,
            "entity_type_id": "shot",
            "episode_id": "ep01",
            "sequence_id": "seq01",
            "tasks": [
                { "task_status_id": "done", "task_type_id": "animation", "assignees": [] }
            ],
            "type": "Shot",
        }))
        .unwrap();

        assert_eq!(entity.episode_id.as_deref(), Some("ep01"));
        assert_eq!(entity.tasks, vec![TaskRecord::new("animation", "done")]);
    }

    #[test]
    fn missing_fields_decode_as_absent() {
        let entity: EntityRecord =
            serde_json::from_value(serde_json::json!({ "tasks": [{ "task_type_id": "fx" }] }))
                .unwrap();

        assert_eq!(entity.episode_id, None);
        assert_eq!(entity.tasks[0].task_status_id, None);
    }
}
