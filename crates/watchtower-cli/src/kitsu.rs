//! Kitsu tracker client.
//!
//! HTTP + JSON decoding live in `KitsuClient`; turning wire records into
//! domain models is done by the plain `map_*` functions so they can be tested
//! without a server. Thumbnails are referenced by URL only.

use async_trait::async_trait;
use indexmap::IndexMap;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use watchtower_core::WatchtowerError;
use watchtower_core::domain::{
    Asset, AssetType, DEFAULT_FPS, Edit, ProductionContext, Project, ProjectData, Sequence, Shot,
    ShotCasting, ShotData, Task, TaskStatus, TaskType, User,
};
use watchtower_core::ports::TrackerSource;

use crate::config::TrackerConfig;

/// Kitsu does not expose edit metadata; these match what the viewer expects by default.
const EDIT_TOTAL_FRAMES: i64 = 10_000;
const EDIT_FRAME_OFFSET: i64 = 20;

// ----------------------------------------------------------------------------
// Wire format
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct PersonWire {
    pub id: String,
    pub full_name: String,
    #[serde(default)]
    pub has_avatar: bool,
}

#[derive(Debug, Deserialize)]
pub struct AssetTypeWire {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct TaskTypeWire {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub for_shots: bool,
}

#[derive(Debug, Deserialize)]
pub struct TaskStatusWire {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectWire {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub ratio: Option<String>,
    #[serde(default)]
    pub resolution: Option<String>,
    #[serde(default)]
    pub asset_types: Vec<String>,
    #[serde(default)]
    pub task_types: Vec<String>,
    #[serde(default)]
    pub task_statuses: Vec<String>,
    #[serde(default)]
    pub team: Vec<String>,
    /// Kitsu stores fps as a string ("24"), sometimes as a number.
    #[serde(default)]
    pub fps: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct UserContextWire {
    #[serde(default)]
    pub persons: Vec<PersonWire>,
    #[serde(default)]
    pub asset_types: Vec<AssetTypeWire>,
    #[serde(default)]
    pub task_types: Vec<TaskTypeWire>,
    #[serde(default)]
    pub task_status: Vec<TaskStatusWire>,
    #[serde(default)]
    pub projects: Vec<ProjectWire>,
}

#[derive(Debug, Deserialize)]
pub struct TaskWire {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub task_status_id: Option<String>,
    #[serde(default)]
    pub task_type_id: Option<String>,
    #[serde(default)]
    pub assignees: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct AssetWire {
    pub id: String,
    pub name: String,
    pub asset_type_id: String,
    #[serde(default)]
    pub canceled: bool,
    #[serde(default)]
    pub episode_id: Option<String>,
    #[serde(default)]
    pub preview_file_id: Option<String>,
    #[serde(default)]
    pub tasks: Vec<TaskWire>,
}

#[derive(Debug, Deserialize)]
pub struct ShotWire {
    pub id: String,
    pub name: String,
    pub sequence_id: String,
    #[serde(default)]
    pub episode_id: Option<String>,
    #[serde(default)]
    pub preview_file_id: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub tasks: Vec<TaskWire>,
}

#[derive(Debug, Deserialize)]
pub struct SequenceWire {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CastAssetWire {
    pub asset_id: String,
}

/// shot id -> cast assets, in response order
pub type SequenceCastingWire = IndexMap<String, Vec<CastAssetWire>>;

// ----------------------------------------------------------------------------
// Mapping
// ----------------------------------------------------------------------------

fn number(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn preview_thumbnail(base_url: &str, preview_file_id: Option<&str>) -> Option<String> {
    preview_file_id
        .map(|id| format!("{base_url}/pictures/thumbnails/preview-files/{id}.png"))
}

fn map_tasks(tasks: Vec<TaskWire>) -> Vec<Task> {
    tasks
        .into_iter()
        .filter_map(|t| {
            Some(Task {
                task_status_id: t.task_status_id?,
                task_type_id: t.task_type_id?,
                assignees: t.assignees,
                id: t.id.unwrap_or_default(),
            })
        })
        .collect()
}

pub fn map_context(base_url: &str, wire: UserContextWire) -> ProductionContext {
    let users = wire
        .persons
        .into_iter()
        .map(|p| User {
            thumbnail_url: p
                .has_avatar
                .then(|| format!("{base_url}/pictures/thumbnails/persons/{}.png", p.id)),
            id: p.id,
            full_name: p.full_name,
            has_avatar: p.has_avatar,
        })
        .collect();

    let projects = wire
        .projects
        .into_iter()
        .map(|p| Project {
            thumbnail_url: Some(format!("{base_url}/pictures/thumbnails/projects/{}.png", p.id)),
            fps: p.fps.as_ref().and_then(number).unwrap_or(DEFAULT_FPS),
            id: p.id,
            name: p.name,
            ratio: p.ratio.unwrap_or_default(),
            resolution: p.resolution.unwrap_or_default(),
            asset_types: p.asset_types,
            task_types: p.task_types,
            task_statuses: p.task_statuses,
            team: p.team,
        })
        .collect();

    ProductionContext {
        asset_types: wire
            .asset_types
            .into_iter()
            .map(|a| AssetType { id: a.id, name: a.name })
            .collect(),
        users,
        projects,
        task_status: wire
            .task_status
            .into_iter()
            .map(|s| TaskStatus {
                id: s.id,
                name: s.name,
                color: s.color.unwrap_or_default(),
            })
            .collect(),
        task_types: wire
            .task_types
            .into_iter()
            .map(|t| TaskType {
                id: t.id,
                name: t.name,
                color: t.color.unwrap_or_default(),
                for_shots: t.for_shots,
            })
            .collect(),
    }
}

/// Canceled assets are dropped.
pub fn map_assets(base_url: &str, wire: Vec<AssetWire>) -> Vec<Asset> {
    wire.into_iter()
        .filter(|a| !a.canceled)
        .map(|a| Asset {
            thumbnail_url: preview_thumbnail(base_url, a.preview_file_id.as_deref()),
            id: a.id,
            name: a.name,
            asset_type_id: a.asset_type_id,
            episode_id: a.episode_id,
            tasks: map_tasks(a.tasks),
        })
        .collect()
}

/// Shots without `data.frame_in` are dropped; a missing `frame_out` means zero length.
pub fn map_shots(base_url: &str, fps: f64, wire: Vec<ShotWire>) -> Vec<Shot> {
    wire.into_iter()
        .filter_map(|s| {
            let data = s.data.as_ref()?;
            let Some(frame_in) = data.get("frame_in").and_then(number) else {
                debug!(shot = %s.name, "skipping shot with no frame_in data");
                return None;
            };
            let frame_in = frame_in as i64;
            let frame_out = data
                .get("frame_out")
                .and_then(number)
                .map_or(frame_in, |f| f as i64);

            let mut shot = Shot::new(
                s.id,
                s.name,
                s.sequence_id,
                ShotData { frame_in, frame_out },
                fps,
            );
            shot.episode_id = s.episode_id;
            shot.thumbnail_url = preview_thumbnail(base_url, s.preview_file_id.as_deref());
            shot.tasks = map_tasks(s.tasks);
            Some(shot)
        })
        .collect()
}

pub fn map_casting(wire: SequenceCastingWire) -> Vec<ShotCasting> {
    wire.into_iter()
        .map(|(shot_id, assets)| ShotCasting {
            shot_id,
            asset_ids: assets.into_iter().map(|a| a.asset_id).collect(),
        })
        .collect()
}

// ----------------------------------------------------------------------------
// Client
// ----------------------------------------------------------------------------

fn tracker_error(context: &str, err: impl std::fmt::Display) -> WatchtowerError {
    WatchtowerError::Tracker(format!("{context}: {err}"))
}

/// Authenticated Kitsu API client.
pub struct KitsuClient {
    http: Client,
    base_url: String,
    jwt: String,
}

impl KitsuClient {
    /// Log in and keep the access token for later requests.
    pub async fn connect(config: &TrackerConfig) -> Result<Self, WatchtowerError> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .map_err(|e| tracker_error("failed to create HTTP client", e))?;

        let response = http
            .post(format!("{}/auth/login", config.base_url))
            .form(&[("email", &config.email), ("password", &config.password)])
            .send()
            .await
            .map_err(|e| tracker_error("login request failed", e))?;
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| tracker_error("failed to parse login response", e))?;

        let jwt = parse_login(&body)?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            jwt,
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, WatchtowerError> {
        let url = format!("{}{path}", self.base_url);
        debug!(%url, "GET");
        let response = self
            .http
            .get(&url)
            .query(query)
            .bearer_auth(&self.jwt)
            .send()
            .await
            .map_err(|e| tracker_error(&format!("GET {path} failed"), e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WatchtowerError::Tracker(format!("GET {path} ({status}): {body}")));
        }
        response
            .json()
            .await
            .map_err(|e| tracker_error(&format!("failed to parse {path}"), e))
    }
}

fn parse_login(body: &serde_json::Value) -> Result<String, WatchtowerError> {
    if body.get("error").is_some() {
        let message = body
            .get("message")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("login rejected");
        return Err(WatchtowerError::Tracker(message.to_string()));
    }
    body.get("access_token")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| WatchtowerError::Tracker("login response has no access_token".into()))
}

#[async_trait]
impl TrackerSource for KitsuClient {
    async fn fetch_context(&self) -> Result<ProductionContext, WatchtowerError> {
        let wire: UserContextWire = self.get("/data/user/context", &[]).await?;
        Ok(map_context(&self.base_url, wire))
    }

    async fn fetch_project(&self, project: &Project) -> Result<ProjectData, WatchtowerError> {
        let query = [("project_id", project.id.as_str())];

        let assets: Vec<AssetWire> = self.get("/data/assets/with-tasks", &query).await?;
        let sequences: Vec<SequenceWire> = self.get("/data/sequences", &query).await?;
        let shots: Vec<ShotWire> = self.get("/data/shots/with-tasks", &query).await?;

        let sequences: Vec<Sequence> = sequences
            .into_iter()
            .map(|s| Sequence { id: s.id, name: s.name })
            .collect();

        let mut casting = Vec::new();
        for sequence in &sequences {
            let path = format!("/data/projects/{}/sequences/{}/casting", project.id, sequence.id);
            let wire: Option<SequenceCastingWire> = self.get(&path, &[]).await?;
            casting.extend(map_casting(wire.unwrap_or_default()));
        }

        Ok(ProjectData {
            project: project.clone(),
            assets: map_assets(&self.base_url, assets),
            shots: map_shots(&self.base_url, project.fps, shots),
            sequences,
            casting,
            edit: Edit::for_project(&project.id, EDIT_TOTAL_FRAMES, EDIT_FRAME_OFFSET),
        })
    }
}
