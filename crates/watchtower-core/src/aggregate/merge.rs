//! Merger: fold a fresh snapshot into the persisted history.

use std::collections::HashMap;

use crate::domain::{GroupKey, TaskCountGroup, TaskCountSeries};

/// Append `update` to `existing` and return the result.
///
/// Neither input is modified. Ordering rules:
/// - existing groups keep their position, unknown groups from `update` are
///   appended in the order they appear there;
/// - inside a known group, existing statuses keep their position and unknown
///   statuses are appended;
/// - for a known status the update's points go after the existing ones.
///
/// There is no de-duplication by timestamp: merging the same update twice
/// records its points twice.
pub fn merge_task_counts(existing: &TaskCountSeries, update: &TaskCountSeries) -> TaskCountSeries {
    let mut merged = existing.clone();

    // First occurrence wins if the persisted file already has a duplicate key.
    let mut positions: HashMap<GroupKey, usize> = HashMap::new();
    for (pos, group) in merged.groups().iter().enumerate() {
        positions.entry(group.key()).or_insert(pos);
    }

    for group in update.groups() {
        let key = group.key();
        match positions.get(&key) {
            Some(&pos) => absorb(&mut merged.groups_mut()[pos], group),
            None => {
                positions.insert(key, merged.len());
                merged.push(group.clone());
            }
        }
    }

    merged
}

fn absorb(target: &mut TaskCountGroup, update: &TaskCountGroup) {
    for bucket in &update.task_statuses {
        match target
            .task_statuses
            .iter_mut()
            .find(|b| b.task_status_id == bucket.task_status_id)
        {
            Some(existing) => existing.data.extend(bucket.data.iter().cloned()),
            None => target.task_statuses.push(bucket.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::count_tasks;
    use crate::domain::{CountPoint, EntityRecord, StatusBucket, TaskRecord, Timestamp};
    use rstest::rstest;
    use std::collections::HashSet;

    fn points(samples: &[(&str, u64)]) -> Vec<CountPoint> {
        samples
            .iter()
            .map(|(ts, count)| CountPoint::new(Timestamp::from_raw(*ts), *count))
            .collect()
    }

    fn bucket(status: &str, samples: &[(&str, u64)]) -> StatusBucket {
        StatusBucket::new(status, points(samples))
    }

    fn group(task_type_id: &str, episode_id: &str, buckets: Vec<StatusBucket>) -> TaskCountGroup {
        TaskCountGroup::new(task_type_id, Some(episode_id), buckets)
    }

    fn history() -> TaskCountSeries {
        TaskCountSeries::from(vec![group(
            "animation",
            "ep01",
            vec![
                bucket("done", &[("2020-02-01", 10), ("2020-02-02", 15)]),
                bucket("todo", &[("2020-02-01", 10), ("2020-02-02", 5)]),
            ],
        )])
    }

    fn snapshot() -> TaskCountSeries {
        TaskCountSeries::from(vec![
            group(
                "animation",
                "ep01",
                vec![
                    bucket("done", &[("2020-02-03", 17)]),
                    bucket("todo", &[("2020-02-03", 2)]),
                    bucket("in_progress", &[("2020-02-03", 1)]),
                ],
            ),
            group("lighting", "ep01", vec![bucket("done", &[("2020-02-03", 10)])]),
            group("lighting", "ep02", vec![bucket("done", &[("2020-02-03", 10)])]),
        ])
    }

    #[test]
    fn merges_reference_fixture() {
        let expected = TaskCountSeries::from(vec![
            group(
                "animation",
                "ep01",
                vec![
                    bucket(
                        "done",
                        &[("2020-02-01", 10), ("2020-02-02", 15), ("2020-02-03", 17)],
                    ),
                    bucket(
                        "todo",
                        &[("2020-02-01", 10), ("2020-02-02", 5), ("2020-02-03", 2)],
                    ),
                    bucket("in_progress", &[("2020-02-03", 1)]),
                ],
            ),
            group("lighting", "ep01", vec![bucket("done", &[("2020-02-03", 10)])]),
            group("lighting", "ep02", vec![bucket("done", &[("2020-02-03", 10)])]),
        ]);

        assert_eq!(merge_task_counts(&history(), &snapshot()), expected);
    }

    #[test]
    fn inputs_are_left_untouched() {
        let existing = history();
        let update = snapshot();
        let _ = merge_task_counts(&existing, &update);

        assert_eq!(existing, history());
        assert_eq!(update, snapshot());
    }

    #[rstest]
    #[case::empty_history(TaskCountSeries::new(), snapshot())]
    #[case::empty_update(history(), TaskCountSeries::new())]
    fn empty_side_is_identity(#[case] existing: TaskCountSeries, #[case] update: TaskCountSeries) {
        let merged = merge_task_counts(&existing, &update);
        let expected = if existing.is_empty() { update } else { existing };
        assert_eq!(merged, expected);
    }

    #[test]
    fn points_are_appended_in_order() {
        let merged = merge_task_counts(&history(), &snapshot());
        let done = merged.group("animation", Some("ep01")).unwrap().status("done").unwrap();

        // [p1..pn] ++ [q1..qm]
        let mut expected = history().groups()[0].task_statuses[0].data.clone();
        expected.extend(snapshot().groups()[0].task_statuses[0].data.clone());
        assert_eq!(done.data, expected);
    }

    #[test]
    fn no_point_is_lost() {
        let existing = history();
        let update = snapshot();
        let merged = merge_task_counts(&existing, &update);

        assert_eq!(
            merged.data_points(),
            existing.data_points() + update.data_points()
        );
    }

    #[test]
    fn keys_stay_unique() {
        let merged = merge_task_counts(&history(), &snapshot());

        let keys: HashSet<GroupKey> = merged.groups().iter().map(TaskCountGroup::key).collect();
        assert_eq!(keys.len(), merged.len());

        for group in merged.groups() {
            let ids: HashSet<&str> = group
                .task_statuses
                .iter()
                .map(|b| b.task_status_id.as_str())
                .collect();
            assert_eq!(ids.len(), group.task_statuses.len());
        }
    }

    #[test]
    fn merging_twice_duplicates_points() {
        let once = merge_task_counts(&history(), &snapshot());
        let twice = merge_task_counts(&once, &snapshot());

        assert_ne!(once, twice);
        assert_eq!(twice.len(), once.len());
        let done = twice.group("lighting", Some("ep02")).unwrap().status("done").unwrap();
        assert_eq!(done.data, points(&[("2020-02-03", 10), ("2020-02-03", 10)]));
    }

    #[test]
    fn duplicate_keys_in_update_fold_together() {
        let update = TaskCountSeries::from(vec![
            group("fx", "ep09", vec![bucket("done", &[("t1", 1)])]),
            group("fx", "ep09", vec![bucket("done", &[("t2", 2)]), bucket("todo", &[("t2", 3)])]),
        ]);

        let merged = merge_task_counts(&TaskCountSeries::new(), &update);
        assert_eq!(merged.len(), 1);
        let group = &merged.groups()[0];
        assert_eq!(group.status("done").unwrap().data, points(&[("t1", 1), ("t2", 2)]));
        assert_eq!(group.status("todo").unwrap().data, points(&[("t2", 3)]));
    }

    #[test]
    fn absent_task_type_groups_like_any_other_value() {
        let untyped = TaskCountGroup {
            task_type_id: None,
            episode_id: None,
            task_statuses: vec![bucket("done", &[("t1", 1)])],
        };
        let existing = TaskCountSeries::from(vec![untyped.clone()]);
        let update = TaskCountSeries::from(vec![TaskCountGroup {
            task_statuses: vec![bucket("done", &[("t2", 4)])],
            ..untyped
        }]);

        let merged = merge_task_counts(&existing, &update);
        assert_eq!(merged.len(), 1);
        assert_eq!(
            merged.groups()[0].task_statuses[0].data,
            points(&[("t1", 1), ("t2", 4)])
        );
    }

    #[test]
    fn counter_output_merges_into_history() {
        let day = |d: &str| Timestamp::from_raw(d);
        let entities = vec![EntityRecord::new(
            Some("ep01"),
            vec![TaskRecord::new("animation", "done"), TaskRecord::new("animation", "done")],
        )];

        let first = count_tasks(&entities, &day("2020-02-01"));
        let second = count_tasks(&entities, &day("2020-02-02"));
        let merged = merge_task_counts(&merge_task_counts(&TaskCountSeries::new(), &first), &second);

        let done = merged.group("animation", Some("ep01")).unwrap().status("done").unwrap();
        assert_eq!(done.data, points(&[("2020-02-01", 2), ("2020-02-02", 2)]));
    }
}
