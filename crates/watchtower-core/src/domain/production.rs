//! Production model: what the viewer reads from the static tree.
//!
//! Field names follow the viewer's JSON contract, which mixes snake_case
//! (tracker ids) and camelCase (viewer-computed values).

use serde::{Deserialize, Serialize};

use super::entity::{EntityRecord, TaskRecord};

pub const DEFAULT_FPS: f64 = 24.0;

fn default_fps() -> f64 {
    DEFAULT_FPS
}

/// Asset type such as prop, character, etc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetType {
    pub id: String,
    pub name: String,
}

/// Task type such as layout, animation, lighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskType {
    pub id: String,
    pub name: String,
    /// Hex color, e.g. `#F9A825`.
    pub color: String,
    #[serde(default)]
    pub for_shots: bool,
}

/// Task status such as todo, wip, done.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStatus {
    pub id: String,
    pub name: String,
    pub color: String,
}

/// Project member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub full_name: String,
    #[serde(default)]
    pub has_avatar: bool,
    #[serde(skip)]
    pub thumbnail_url: Option<String>,
}

/// A film, short film, series...
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub ratio: String,
    pub resolution: String,
    #[serde(default)]
    pub asset_types: Vec<String>,
    #[serde(default)]
    pub task_types: Vec<String>,
    #[serde(default)]
    pub task_statuses: Vec<String>,
    /// User ids.
    #[serde(default)]
    pub team: Vec<String>,
    #[serde(rename = "thumbnailUrl", default)]
    pub thumbnail_url: Option<String>,
    #[serde(default = "default_fps")]
    pub fps: f64,
}

/// A task on a shot or an asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub task_status_id: String,
    pub task_type_id: String,
    /// User ids.
    #[serde(default)]
    pub assignees: Vec<String>,
    pub id: String,
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        TaskRecord::new(task.task_type_id.clone(), task.task_status_id.clone())
    }
}

/// A character, set, prop...
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub asset_type_id: String,
    #[serde(default)]
    pub episode_id: Option<String>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(rename = "thumbnailUrl", default)]
    pub thumbnail_url: Option<String>,
}

/// Frame range as stored in the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotData {
    pub frame_in: i64,
    pub frame_out: i64,
}

/// A shot, the reference point for tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    pub id: String,
    pub name: String,
    pub sequence_id: String,
    #[serde(default)]
    pub episode_id: Option<String>,
    pub data: ShotData,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(rename = "startFrame")]
    pub start_frame: i64,
    #[serde(rename = "durationSeconds")]
    pub duration_seconds: f64,
    #[serde(rename = "thumbnailUrl", default)]
    pub thumbnail_url: Option<String>,
    #[serde(default = "default_fps")]
    pub fps: f64,
}

impl Shot {
    /// Build a shot, deriving `startFrame` / `durationSeconds` from the frame range.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        sequence_id: impl Into<String>,
        data: ShotData,
        fps: f64,
    ) -> Self {
        let duration_seconds = if fps > 0.0 {
            (data.frame_out - data.frame_in) as f64 / fps
        } else {
            0.0
        };
        Self {
            id: id.into(),
            name: name.into(),
            sequence_id: sequence_id.into(),
            episode_id: None,
            data,
            tasks: Vec::new(),
            start_frame: data.frame_in,
            duration_seconds,
            thumbnail_url: None,
            fps,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    pub id: String,
    pub name: String,
}

/// Which assets appear in a shot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotCasting {
    pub shot_id: String,
    pub asset_ids: Vec<String>,
}

/// The complete cut of the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    #[serde(rename = "totalFrames")]
    pub total_frames: i64,
    #[serde(rename = "frameOffset")]
    pub frame_offset: i64,
    #[serde(rename = "sourceName")]
    pub source_name: String,
    #[serde(rename = "sourceType")]
    pub source_type: String,
}

impl Edit {
    pub const DEFAULT_SOURCE_TYPE: &'static str = "video/mp4";

    /// Edit pointing at the conventional `edit.mp4` of a project.
    pub fn for_project(project_id: &str, total_frames: i64, frame_offset: i64) -> Self {
        Self {
            total_frames,
            frame_offset,
            source_name: format!("data/projects/{project_id}/edit.mp4"),
            source_type: Self::DEFAULT_SOURCE_TYPE.to_string(),
        }
    }
}

/// Everything shared across projects (`context.json`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductionContext {
    pub asset_types: Vec<AssetType>,
    pub users: Vec<User>,
    pub projects: Vec<Project>,
    pub task_status: Vec<TaskStatus>,
    pub task_types: Vec<TaskType>,
}

/// Everything fetched for one project.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectData {
    pub project: Project,
    pub assets: Vec<Asset>,
    pub shots: Vec<Shot>,
    pub sequences: Vec<Sequence>,
    pub casting: Vec<ShotCasting>,
    pub edit: Edit,
}

impl ProjectData {
    /// Shots, then assets, as counter input.
    pub fn entities(&self) -> Vec<EntityRecord> {
        let shots = self
            .shots
            .iter()
            .map(|s| (s.episode_id.as_deref(), s.tasks.as_slice()));
        let assets = self
            .assets
            .iter()
            .map(|a| (a.episode_id.as_deref(), a.tasks.as_slice()));

        shots
            .chain(assets)
            .map(|(episode_id, tasks)| {
                EntityRecord::new(episode_id, tasks.iter().map(TaskRecord::from).collect())
            })
            .collect()
    }
}
