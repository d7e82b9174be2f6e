//! Counter: entities -> single-timestamp snapshot.

use indexmap::IndexMap;

use crate::domain::{
    CountPoint, EntityRecord, StatusBucket, TaskCountGroup, TaskCountSeries, Timestamp,
};

/// Count tasks per (task type, episode, status) at `timestamp`.
///
/// - One [`CountPoint`] per distinct triple, `count` = number of matching tasks.
/// - Groups come out in the order their (task type, episode) pair is first
///   seen; statuses in the order they are first seen inside the group.
/// - Task records without a type or a status are skipped.
pub fn count_tasks(entities: &[EntityRecord], timestamp: &Timestamp) -> TaskCountSeries {
    // (task_type_id, episode_id) -> status -> count
    let mut groups: IndexMap<(&str, Option<&str>), IndexMap<&str, u64>> = IndexMap::new();

    for entity in entities {
        let episode_id = entity.episode_id.as_deref();
        for task in &entity.tasks {
            let (Some(task_type_id), Some(task_status_id)) =
                (task.task_type_id.as_deref(), task.task_status_id.as_deref())
            else {
                continue;
            };
            *groups
                .entry((task_type_id, episode_id))
                .or_default()
                .entry(task_status_id)
                .or_insert(0) += 1;
        }
    }

    groups
        .into_iter()
        .map(|((task_type_id, episode_id), statuses)| {
            let task_statuses = statuses
                .into_iter()
                .map(|(task_status_id, count)| {
                    StatusBucket::new(
                        task_status_id,
                        vec![CountPoint::new(timestamp.clone(), count)],
                    )
                })
                .collect();
            TaskCountGroup::new(task_type_id, episode_id, task_statuses)
        })
        .collect::<Vec<_>>()
        .into()
}
