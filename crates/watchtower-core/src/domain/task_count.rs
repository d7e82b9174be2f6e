//! Task-count time series (the shape of `task_counts.json`).
//!
//! This module only defines the data. Building a snapshot lives in
//! `aggregate::counter`, folding snapshots into history in `aggregate::merge`.

use serde::{Deserialize, Serialize};

use super::Timestamp;

/// One sample of a status count.
///
/// The counter never emits `count == 0`. Loading is tolerant: zero counts in a
/// persisted file are kept as-is (see `TaskCountSeries::zero_points`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountPoint {
    pub timestamp: Timestamp,
    pub count: u64,
}

impl CountPoint {
    pub fn new(timestamp: Timestamp, count: u64) -> Self {
        Self { timestamp, count }
    }
}

/// All samples recorded for one status inside a group.
///
/// `data` is chronological history: it is appended to, never reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBucket {
    pub task_status_id: String,
    #[serde(default)]
    pub data: Vec<CountPoint>,
}

impl StatusBucket {
    pub fn new(task_status_id: impl Into<String>, data: Vec<CountPoint>) -> Self {
        Self {
            task_status_id: task_status_id.into(),
            data,
        }
    }
}

/// Grouping key of a [`TaskCountGroup`].
///
/// `None` is a value of its own: "no episode" never matches a real episode.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub task_type_id: Option<String>,
    pub episode_id: Option<String>,
}

/// Counts for one (task type, episode) pair.
///
/// `episode_id` is always serialized (`null` when absent); a missing key and
/// `null` decode to the same value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCountGroup {
    #[serde(default)]
    pub task_type_id: Option<String>,
    #[serde(default)]
    pub episode_id: Option<String>,
    #[serde(default)]
    pub task_statuses: Vec<StatusBucket>,
}

impl TaskCountGroup {
    pub fn new(
        task_type_id: impl Into<String>,
        episode_id: Option<&str>,
        task_statuses: Vec<StatusBucket>,
    ) -> Self {
        Self {
            task_type_id: Some(task_type_id.into()),
            episode_id: episode_id.map(str::to_string),
            task_statuses,
        }
    }

    pub fn key(&self) -> GroupKey {
        GroupKey {
            task_type_id: self.task_type_id.clone(),
            episode_id: self.episode_id.clone(),
        }
    }

    pub fn status(&self, task_status_id: &str) -> Option<&StatusBucket> {
        self.task_statuses
            .iter()
            .find(|bucket| bucket.task_status_id == task_status_id)
    }
}

/// The whole aggregate: an ordered list of groups.
///
/// Serialized as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskCountSeries {
    groups: Vec<TaskCountGroup>,
}

impl TaskCountSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn groups(&self) -> &[TaskCountGroup] {
        &self.groups
    }

    pub(crate) fn groups_mut(&mut self) -> &mut Vec<TaskCountGroup> {
        &mut self.groups
    }

    pub fn push(&mut self, group: TaskCountGroup) {
        self.groups.push(group);
    }

    pub fn group(&self, task_type_id: &str, episode_id: Option<&str>) -> Option<&TaskCountGroup> {
        self.groups.iter().find(|g| {
            g.task_type_id.as_deref() == Some(task_type_id) && g.episode_id.as_deref() == episode_id
        })
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of count points across all buckets.
    pub fn data_points(&self) -> usize {
        self.groups
            .iter()
            .flat_map(|g| &g.task_statuses)
            .map(|b| b.data.len())
            .sum()
    }

    /// Number of points with `count == 0`, only possible in hand-edited or foreign files.
    pub fn zero_points(&self) -> usize {
        self.groups
            .iter()
            .flat_map(|g| &g.task_statuses)
            .flat_map(|b| &b.data)
            .filter(|p| p.count == 0)
            .count()
    }
}

impl From<Vec<TaskCountGroup>> for TaskCountSeries {
    fn from(groups: Vec<TaskCountGroup>) -> Self {
        Self { groups }
    }
}
